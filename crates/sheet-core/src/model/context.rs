//! Contexto compartido de una cadena.
//!
//! `Context` es un mapa ordenado `clave -> serde_json::Value` que acumula las
//! entradas configuradas y los resultados intermedios de cada step. El orden
//! de inserción se conserva para que los volcados (logs, eventos) sean
//! estables entre ejecuciones.
//!
//! El merge es "shallow": las claves del fragmento reemplazan a las
//! existentes sin mezclar objetos anidados (misma semántica que el merge de
//! parámetros del engine).
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    entries: IndexMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variante encadenable de `set`, útil para construir fragmentos.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Devuelve el valor de `key` o `default` si no existe.
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.entries.get(key).cloned().unwrap_or(default)
    }

    /// Lectura de strings. Valores de otro tipo se tratan como ausentes.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Lectura de flags; ausente o no-booleano equivale a `false`.
    pub fn get_bool(&self, key: &str) -> bool {
        self.entries.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Deserializa el valor de `key` a `T`. `Ok(None)` si la clave no existe.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, serde_json::Error> {
        match self.entries.get(key) {
            Some(v) => serde_json::from_value(v.clone()).map(Some),
            None => Ok(None),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Serializa `value` y lo guarda bajo `key`.
    pub fn set_as<T: Serialize>(&mut self, key: impl Into<String>, value: &T) -> Result<(), serde_json::Error> {
        let v = serde_json::to_value(value)?;
        self.entries.insert(key.into(), v);
        Ok(())
    }

    /// Fusiona `fragment` sobre el contexto: sus claves sobreescriben.
    pub fn merge(&mut self, fragment: Context) {
        for (k, v) in fragment.entries {
            self.entries.insert(k, v);
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }
}

impl FromIterator<(String, Value)> for Context {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}
