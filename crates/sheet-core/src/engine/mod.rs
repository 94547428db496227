//! Engine: registro de steps, despachador y `WorkflowEngine`.
//!
//! - `SequencerBuilder` / `Sequencer`: registro ordenado de una cadena y
//!   despacho "ejecutar y avanzar al sucesor nombrado".
//! - `WorkflowEngine`: estado de ambas cadenas, contexto, reporter y scratch.
//! - `StatusReporter`: sumidero de mensajes de progreso.

pub mod builder;
pub mod core;
pub mod reporter;
pub mod sequencer;

pub use builder::SequencerBuilder;
pub use core::WorkflowEngine;
pub use reporter::{LogReporter, NoopReporter, StatusReporter};
pub use sequencer::{ChainOutcome, Sequencer};
