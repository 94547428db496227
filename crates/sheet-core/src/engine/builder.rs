//! Builder para `Sequencer`.
//!
//! Acumula los steps de una cadena en orden de registro. El primer step
//! registrado es el punto de entrada de la cadena; el resto se alcanza sólo
//! si algún step lo nombra como sucesor.
//!
//! ```ignore
//! let registry = Sequencer::builder()
//!     .step(LoadStep)
//!     .step(ValidateStep)
//!     .build()?;
//! ```

use indexmap::IndexMap;

use crate::engine::sequencer::Sequencer;
use crate::errors::CoreEngineError;
use crate::step::StepDefinition;

pub struct SequencerBuilder<S: ?Sized> {
    steps: Vec<Box<dyn StepDefinition<S>>>,
}

impl<S: ?Sized> Default for SequencerBuilder<S> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<S: ?Sized> SequencerBuilder<S> {
    /// Registra el siguiente step de la cadena.
    #[inline]
    pub fn step<T>(mut self, step: T) -> Self
        where T: StepDefinition<S> + 'static
    {
        self.steps.push(Box::new(step));
        self
    }

    /// Variante para steps ya empaquetados.
    #[inline]
    pub fn boxed_step(mut self, step: Box<dyn StepDefinition<S>>) -> Self {
        self.steps.push(step);
        self
    }

    /// Construye el registro. Falla si no hay steps o si dos comparten nombre.
    pub fn build(self) -> Result<Sequencer<S>, CoreEngineError> {
        if self.steps.is_empty() {
            return Err(CoreEngineError::EmptyRegistry);
        }
        let mut steps: IndexMap<String, Box<dyn StepDefinition<S>>> = IndexMap::with_capacity(self.steps.len());
        for step in self.steps {
            let name = step.name().to_string();
            if steps.contains_key(&name) {
                return Err(CoreEngineError::DuplicateStep(name));
            }
            steps.insert(name, step);
        }
        Ok(Sequencer::from_steps(steps))
    }
}
