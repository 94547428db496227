//! Registros de las dos cadenas del workflow.
//!
//! El orden de registro sólo fija el punto de entrada; el avance lo decide
//! cada step con el nombre de su sucesor.
use sheet_core::{CoreEngineError, Sequencer};

use crate::services::Services;
use crate::steps::{GenerateStep, LoadStep, NotifyStep, ReportStep, StoreStep, UploadStep, ValidateStep};

/// `load → validate → generate → store → upload`
pub fn main_chain() -> Result<Sequencer<Services>, CoreEngineError> {
    Sequencer::builder().step(LoadStep)
                        .step(ValidateStep)
                        .step(GenerateStep)
                        .step(StoreStep)
                        .step(UploadStep)
                        .build()
}

/// `notify → report`
pub fn optional_chain() -> Result<Sequencer<Services>, CoreEngineError> {
    Sequencer::builder().step(NotifyStep).step(ReportStep).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chains_start_at_load_and_notify() {
        let main = main_chain().unwrap();
        assert_eq!(main.entry(), Some("load"));
        assert_eq!(main.names(), vec!["load", "validate", "generate", "store", "upload"]);
        let optional = optional_chain().unwrap();
        assert_eq!(optional.names(), vec!["notify", "report"]);
    }
}
