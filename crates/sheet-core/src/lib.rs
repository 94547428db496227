//! sheet-core: motor lineal de cadenas de steps.
//!
//! Contexto compartido, steps que nombran a su sucesor, sequencer de una sola
//! pasada y engine con estado independiente para la cadena principal y la
//! opcional.
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod model;
pub mod step;

pub use engine::{ChainOutcome, LogReporter, NoopReporter, Sequencer, SequencerBuilder, StatusReporter, WorkflowEngine};
pub use errors::{CoreEngineError, StepError};
pub use event::{EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
pub use model::{Context, ScratchDir};
pub use step::{ChainKind, StepDefinition, StepRunResult, WorkflowState};
