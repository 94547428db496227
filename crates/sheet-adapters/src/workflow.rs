//! `AutomationWorkflow`: superficie para el caller (UI, CLI, tests).
//!
//! Una instancia por caller; no hay estado global. Envuelve un
//! `WorkflowEngine<Services>` e instala la cadena correspondiente en cada
//! `run_*`.
use serde_json::Value;
use sheet_core::{ChainKind, Context, CoreEngineError, EventStore, FlowEvent, StatusReporter, WorkflowEngine, WorkflowState};
use sheet_domain::Row;

use crate::chains::{main_chain, optional_chain};
use crate::inputs::{InputFields, KEY_DATA};
use crate::services::Services;

pub struct AutomationWorkflow {
    engine: WorkflowEngine<Services>,
}

impl AutomationWorkflow {
    /// El scratch del engine es el mismo donde `generate` escribe.
    pub fn new(services: Services) -> Self {
        let scratch = services.scratch.clone();
        Self { engine: WorkflowEngine::new(services, scratch) }
    }

    /// Normaliza los campos del formulario (los desconocidos se ignoran) y
    /// guarda el reporter.
    pub fn configure(&mut self, fields: &Value, reporter: Option<Box<dyn StatusReporter>>) {
        self.configure_fields(&InputFields::from_value(fields), reporter);
    }

    pub fn configure_fields(&mut self, fields: &InputFields, reporter: Option<Box<dyn StatusReporter>>) {
        self.engine.configure(fields.to_context(), reporter);
    }

    /// `load → validate → generate → store → upload`. Devuelve el estado
    /// terminal; es un error si la cadena ya corrió sin `reset`.
    pub fn run_main(&mut self) -> Result<WorkflowState, CoreEngineError> {
        self.engine.run_chain(ChainKind::Main, main_chain()?)
    }

    /// `notify → report`, independiente de la cadena principal.
    pub fn run_optional(&mut self) -> Result<WorkflowState, CoreEngineError> {
        self.engine.run_chain(ChainKind::Optional, optional_chain()?)
    }

    pub fn reset(&mut self) -> Result<(), CoreEngineError> {
        self.engine.reset()
    }

    pub fn status(&self) -> WorkflowState {
        self.engine.status()
    }

    pub fn optional_status(&self) -> WorkflowState {
        self.engine.optional_status()
    }

    pub fn error_message(&self) -> &str {
        self.engine.error_message()
    }

    pub fn context(&self) -> &Context {
        self.engine.context()
    }

    /// Filas actuales (vacío si todavía no hubo carga o no se pueden leer).
    pub fn rows(&self) -> Vec<Row> {
        self.engine.context().get_as::<Vec<Row>>(KEY_DATA).ok().flatten().unwrap_or_default()
    }

    /// Traza completa de eventos de todas las corridas de esta instancia.
    pub fn events(&self) -> Vec<FlowEvent> {
        self.engine.event_store().list_all()
    }

    pub fn engine(&self) -> &WorkflowEngine<Services> {
        &self.engine
    }
}
