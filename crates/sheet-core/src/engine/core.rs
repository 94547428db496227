//! Core WorkflowEngine implementation

use log::{info, warn};
use uuid::Uuid;

use crate::constants::{ENGINE_VERSION, KEY_ERROR_MESSAGE, KEY_WORKFLOW_STATUS};
use crate::engine::reporter::{NoopReporter, StatusReporter};
use crate::engine::sequencer::{ChainOutcome, Sequencer};
use crate::errors::CoreEngineError;
use crate::event::{EventStore, FlowEventKind, InMemoryEventStore};
use crate::model::{Context, ScratchDir};
use crate::step::{ChainKind, WorkflowState};

/// Motor de ejecución de cadenas de steps.
///
/// Responsable de mantener el `Context`, el registro de steps instalado, el
/// estado independiente de la cadena principal y de la opcional, el último
/// mensaje de error y el directorio scratch. `S` son los servicios que se
/// prestan a cada step.
///
/// Una instancia por caller: no hay estado global compartido.
pub struct WorkflowEngine<S, E = InMemoryEventStore>
    where E: EventStore
{
    services: S,
    context: Context,
    registry: Option<Sequencer<S>>,
    status: WorkflowState,
    optional_status: WorkflowState,
    error_message: String,
    reporter: Option<Box<dyn StatusReporter>>,
    scratch: ScratchDir,
    event_store: E,
    last_run_id: Option<Uuid>,
}

impl<S> WorkflowEngine<S, InMemoryEventStore> {
    /// Crea un engine con store de eventos en memoria.
    pub fn new(services: S, scratch: ScratchDir) -> Self {
        Self::with_event_store(services, scratch, InMemoryEventStore::default())
    }
}

impl<S, E> WorkflowEngine<S, E> where E: EventStore
{
    pub fn with_event_store(services: S, scratch: ScratchDir, event_store: E) -> Self {
        Self { services,
               context: Context::new(),
               registry: None,
               status: WorkflowState::NotStarted,
               optional_status: WorkflowState::NotStarted,
               error_message: String::new(),
               reporter: None,
               scratch,
               event_store,
               last_run_id: None }
    }

    /// Fusiona las entradas ya normalizadas en el contexto y guarda el
    /// reporter (reemplaza al anterior, `None` lo quita).
    pub fn configure(&mut self, inputs: Context, reporter: Option<Box<dyn StatusReporter>>) {
        info!("configure: keys={:?}", inputs.keys().collect::<Vec<_>>());
        self.context.merge(inputs);
        self.reporter = reporter;
    }

    pub fn set_reporter<R>(&mut self, reporter: R)
        where R: StatusReporter + 'static
    {
        self.reporter = Some(Box::new(reporter));
    }

    /// Instala `registry` como cadena `kind` y la ejecuta desde su primer
    /// step hasta completarla o fallar.
    ///
    /// Devuelve el estado terminal de la cadena. Es un error correr una
    /// cadena que no esté en `NotStarted` (hay que llamar a `reset`).
    pub fn run_chain(&mut self, kind: ChainKind, registry: Sequencer<S>) -> Result<WorkflowState, CoreEngineError> {
        if self.state(kind) != WorkflowState::NotStarted {
            return Err(CoreEngineError::ChainAlreadyStarted(kind));
        }
        let entry = registry.entry().map(str::to_string).ok_or(CoreEngineError::EmptyRegistry)?;
        self.set_state(kind, WorkflowState::InProgress)?;

        let run_id = Uuid::new_v4();
        self.last_run_id = Some(run_id);
        self.event_store.append_kind(run_id,
                                     FlowEventKind::ChainStarted { chain: kind,
                                                                   entry: entry.clone(),
                                                                   engine_version: ENGINE_VERSION.to_string() });
        info!("chain:start chain={kind} run_id={run_id} entry={entry}");

        let registry = self.registry.insert(registry);
        let mut noop = NoopReporter;
        let reporter: &mut dyn StatusReporter = match self.reporter.as_mut() {
            Some(r) => r.as_mut(),
            None => &mut noop,
        };
        let outcome = registry.run(&entry,
                                   &mut self.context,
                                   &mut self.services,
                                   reporter,
                                   &mut self.event_store,
                                   run_id);

        let (final_state, message) = match outcome {
            ChainOutcome::Completed { steps_run } => {
                info!("chain:done chain={kind} run_id={run_id} steps_run={steps_run}");
                (WorkflowState::Success, None)
            }
            ChainOutcome::Halted { step_id, message } => {
                warn!("chain:failed chain={kind} run_id={run_id} step={step_id}");
                (WorkflowState::Failed, Some(message))
            }
        };
        match kind {
            ChainKind::Main => self.stop(Some(final_state), None, message)?,
            ChainKind::Optional => self.stop(None, Some(final_state), message)?,
        }
        self.event_store.append_kind(run_id,
                                     FlowEventKind::ChainStopped { chain: kind,
                                                                   status: final_state });
        Ok(final_state)
    }

    /// Registra estados terminales y el último mensaje de error.
    ///
    /// El mensaje no se acumula: se sobreescribe (y queda vacío si es
    /// `None`). Cuando se fija el estado principal también se publica en el
    /// contexto junto con el mensaje, para los steps de la cadena opcional.
    pub fn stop(&mut self,
                status: Option<WorkflowState>,
                optional_status: Option<WorkflowState>,
                message: Option<String>)
                -> Result<(), CoreEngineError> {
        // validar ambas transiciones antes de mutar nada
        if let Some(next) = status {
            check_transition(self.status, next)?;
        }
        if let Some(next) = optional_status {
            check_transition(self.optional_status, next)?;
        }
        if let Some(next) = status {
            self.status = next;
        }
        if let Some(next) = optional_status {
            self.optional_status = next;
        }
        self.error_message = message.unwrap_or_default();
        if let Some(next) = status {
            self.context.set(KEY_WORKFLOW_STATUS, next.as_str());
            self.context.set(KEY_ERROR_MESSAGE, self.error_message.clone());
        }
        Ok(())
    }

    /// Vuelve al estado inicial: contexto, registro, estados y error vacíos;
    /// el scratch se borra y se recrea siempre.
    pub fn reset(&mut self) -> Result<(), CoreEngineError> {
        self.context.clear();
        self.registry = None;
        self.status = WorkflowState::NotStarted;
        self.optional_status = WorkflowState::NotStarted;
        self.error_message.clear();
        self.scratch.reset()?;
        info!("reset: scratch={}", self.scratch.path().display());
        Ok(())
    }

    pub fn state(&self, kind: ChainKind) -> WorkflowState {
        match kind {
            ChainKind::Main => self.status,
            ChainKind::Optional => self.optional_status,
        }
    }

    fn set_state(&mut self, kind: ChainKind, next: WorkflowState) -> Result<(), CoreEngineError> {
        let slot = match kind {
            ChainKind::Main => &mut self.status,
            ChainKind::Optional => &mut self.optional_status,
        };
        check_transition(*slot, next)?;
        *slot = next;
        Ok(())
    }

    pub fn status(&self) -> WorkflowState {
        self.status
    }

    pub fn optional_status(&self) -> WorkflowState {
        self.optional_status
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn services(&self) -> &S {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut S {
        &mut self.services
    }

    pub fn scratch(&self) -> &ScratchDir {
        &self.scratch
    }

    /// Nombres de los steps de la cadena instalada (vacío tras `reset`).
    pub fn registered_steps(&self) -> Vec<&str> {
        self.registry.as_ref().map(|r| r.names()).unwrap_or_default()
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }

    /// Identificador de la última corrida de cadena.
    pub fn last_run_id(&self) -> Option<Uuid> {
        self.last_run_id
    }
}

fn check_transition(from: WorkflowState, to: WorkflowState) -> Result<(), CoreEngineError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(CoreEngineError::InvalidTransition { from, to })
    }
}
