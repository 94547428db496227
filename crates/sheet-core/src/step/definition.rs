use super::run_result::StepRunResult;
use crate::model::Context;

/// Trait que define un Step.
///
/// `S` son los servicios externos (colaboradores) que el engine presta al
/// step durante su ejecución; el core no conoce su forma.
///
/// Contrato de claves: `requires` lista las claves de `Context` que deben
/// existir antes de ejecutar y `provides` las únicas claves que el fragmento
/// devuelto puede contener. El sequencer verifica ambas listas.
pub trait StepDefinition<S: ?Sized> {
    /// Identificador estable y único dentro de la cadena.
    fn name(&self) -> &str;

    /// Texto para el mensaje de estado previo a la ejecución.
    fn description(&self) -> &str {
        self.name()
    }

    /// Mensaje registrado como último error si el step falla.
    fn failure_message(&self) -> String {
        format!("Step '{}' failed", self.name())
    }

    fn requires(&self) -> &[&'static str] {
        &[]
    }

    fn provides(&self) -> &[&'static str] {
        &[]
    }

    /// Ejecución del step. Nunca debe entrar en pánico; los errores se
    /// devuelven como `StepRunResult::Failure`.
    fn run(&self, ctx: &Context, services: &mut S) -> StepRunResult;
}
