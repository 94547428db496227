use std::cell::RefCell;
use std::rc::Rc;

use sheet_core::constants::{KEY_ERROR_MESSAGE, KEY_WORKFLOW_STATUS};
use sheet_core::{ChainKind, Context, CoreEngineError, EventStore, FlowEventKind, ScratchDir, Sequencer, StepDefinition,
                 StepError, StepRunResult, WorkflowEngine, WorkflowState};

/// Servicios de prueba: cuenta cuántas veces corrió cada step.
#[derive(Default)]
struct Counter {
    runs: Vec<String>,
}

struct Put {
    name: &'static str,
    key: &'static str,
    next: Option<&'static str>,
}

impl StepDefinition<Counter> for Put {
    fn name(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        self.key
    }
    fn provides(&self) -> &[&'static str] {
        std::slice::from_ref(&self.key)
    }
    fn run(&self, _ctx: &Context, services: &mut Counter) -> StepRunResult {
        services.runs.push(self.name.to_string());
        let fragment = Context::new().with(self.key, true);
        match self.next {
            Some(n) => StepRunResult::next(fragment, n),
            None => StepRunResult::finish(fragment),
        }
    }
}

struct Boom;

impl StepDefinition<Counter> for Boom {
    fn name(&self) -> &str {
        "boom"
    }
    fn failure_message(&self) -> String {
        "Failed to explode".to_string()
    }
    fn run(&self, _ctx: &Context, _services: &mut Counter) -> StepRunResult {
        StepRunResult::Failure { error: StepError::Collaborator("sin red".into()) }
    }
}

struct NeedsData;

impl StepDefinition<Counter> for NeedsData {
    fn name(&self) -> &str {
        "needs"
    }
    fn requires(&self) -> &[&'static str] {
        &["data"]
    }
    fn run(&self, _ctx: &Context, services: &mut Counter) -> StepRunResult {
        services.runs.push("needs".into());
        StepRunResult::skip_and_finish("nothing")
    }
}

struct Sneaky;

impl StepDefinition<Counter> for Sneaky {
    fn name(&self) -> &str {
        "sneaky"
    }
    fn provides(&self) -> &[&'static str] {
        &["allowed"]
    }
    fn run(&self, _ctx: &Context, _services: &mut Counter) -> StepRunResult {
        StepRunResult::finish(Context::new().with("allowed", 1).with("other", 2))
    }
}

fn engine() -> (tempfile::TempDir, WorkflowEngine<Counter>) {
    let dir = tempfile::tempdir().unwrap();
    let scratch = ScratchDir::new(dir.path().join("scratch"));
    (dir, WorkflowEngine::new(Counter::default(), scratch))
}

fn two_steps() -> Sequencer<Counter> {
    Sequencer::builder().step(Put { name: "first", key: "one", next: Some("second") })
                        .step(Put { name: "second", key: "two", next: None })
                        .build()
                        .unwrap()
}

#[test]
fn successful_chain_reaches_success_and_publishes_status() {
    let (_dir, mut engine) = engine();
    let state = engine.run_chain(ChainKind::Main, two_steps()).unwrap();
    assert_eq!(state, WorkflowState::Success);
    assert_eq!(engine.status(), WorkflowState::Success);
    assert_eq!(engine.optional_status(), WorkflowState::NotStarted);
    assert_eq!(engine.services().runs, vec!["first", "second"]);
    assert!(engine.context().get_bool("one"));
    assert!(engine.context().get_bool("two"));
    assert_eq!(engine.context().get_str(KEY_WORKFLOW_STATUS), Some("Success"));
    assert_eq!(engine.context().get_str(KEY_ERROR_MESSAGE), Some(""));
    assert_eq!(engine.registered_steps(), vec!["first", "second"]);
}

#[test]
fn reporter_receives_one_message_per_step_in_order() {
    let (_dir, mut engine) = engine();
    let seen = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = Rc::clone(&seen);
    engine.configure(Context::new(), Some(Box::new(move |m: &str| sink.borrow_mut().push(m.to_string()))));
    engine.run_chain(ChainKind::Main, two_steps()).unwrap();
    assert_eq!(*seen.borrow(), vec!["Running step: one", "Running step: two"]);
}

#[test]
fn failure_records_step_message_and_stops_dispatch() {
    let (_dir, mut engine) = engine();
    let seq = Sequencer::builder().step(Put { name: "first", key: "one", next: Some("boom") })
                                  .step(Boom)
                                  .step(Put { name: "never", key: "three", next: None })
                                  .build()
                                  .unwrap();
    let state = engine.run_chain(ChainKind::Main, seq).unwrap();
    assert_eq!(state, WorkflowState::Failed);
    assert_eq!(engine.error_message(), "Failed to explode: collaborator error: sin red");
    assert_eq!(engine.services().runs, vec!["first"]);
    assert_eq!(engine.context().get_str(KEY_WORKFLOW_STATUS), Some("Failed"));
    assert_eq!(engine.context().get_str(KEY_ERROR_MESSAGE), Some(engine.error_message()));
}

#[test]
fn missing_required_key_fails_before_running_the_step() {
    let (_dir, mut engine) = engine();
    let seq = Sequencer::builder().step(NeedsData).build().unwrap();
    let state = engine.run_chain(ChainKind::Optional, seq).unwrap();
    assert_eq!(state, WorkflowState::Failed);
    assert!(engine.services().runs.is_empty());
    assert!(engine.error_message().contains("missing required input 'data'"));
}

#[test]
fn undeclared_output_key_halts_the_chain() {
    let (_dir, mut engine) = engine();
    let seq = Sequencer::builder().step(Sneaky).build().unwrap();
    let state = engine.run_chain(ChainKind::Main, seq).unwrap();
    assert_eq!(state, WorkflowState::Failed);
    assert!(engine.error_message().contains("undeclared output 'other'"));
    assert!(!engine.context().contains("allowed"));
}

#[test]
fn running_a_chain_twice_without_reset_is_rejected() {
    let (_dir, mut engine) = engine();
    engine.run_chain(ChainKind::Main, two_steps()).unwrap();
    let err = engine.run_chain(ChainKind::Main, two_steps()).unwrap_err();
    assert!(matches!(err, CoreEngineError::ChainAlreadyStarted(ChainKind::Main)));
    assert_eq!(engine.services().runs.len(), 2);
}

#[test]
fn main_failure_leaves_optional_chain_untouched() {
    let (_dir, mut engine) = engine();
    let failing = Sequencer::builder().step(Boom).build().unwrap();
    assert_eq!(engine.run_chain(ChainKind::Main, failing).unwrap(), WorkflowState::Failed);
    assert_eq!(engine.optional_status(), WorkflowState::NotStarted);

    let optional = Sequencer::builder().step(Put { name: "notify", key: "sent", next: None }).build().unwrap();
    assert_eq!(engine.run_chain(ChainKind::Optional, optional).unwrap(), WorkflowState::Success);
    assert_eq!(engine.status(), WorkflowState::Failed);
    // el éxito de la opcional limpia el último error
    assert_eq!(engine.error_message(), "");
}

#[test]
fn stop_overwrites_the_previous_error_message() {
    let (_dir, mut engine) = engine();
    let failing = Sequencer::builder().step(Boom).build().unwrap();
    engine.run_chain(ChainKind::Main, failing).unwrap();
    let other = Sequencer::builder().step(NeedsData).build().unwrap();
    engine.run_chain(ChainKind::Optional, other).unwrap();
    assert!(engine.error_message().starts_with("Step 'needs' failed"));
    assert!(!engine.error_message().contains("explode"));
}

#[test]
fn stop_rejects_backward_transitions() {
    let (_dir, mut engine) = engine();
    let err = engine.stop(Some(WorkflowState::Success), None, None).unwrap_err();
    assert!(matches!(err, CoreEngineError::InvalidTransition { from: WorkflowState::NotStarted, .. }));
    assert_eq!(engine.status(), WorkflowState::NotStarted);
}

#[test]
fn reset_is_idempotent_and_wipes_scratch() {
    let (_dir, mut engine) = engine();
    engine.configure(Context::new().with("email_address", "a@b.c"), None);
    engine.run_chain(ChainKind::Main, two_steps()).unwrap();
    std::fs::create_dir_all(engine.scratch().path()).unwrap();
    std::fs::write(engine.scratch().join("leftover.json"), "{}").unwrap();

    engine.reset().unwrap();
    let once = (engine.status(), engine.optional_status(), engine.context().len(), engine.error_message().to_string());
    engine.reset().unwrap();
    let twice = (engine.status(), engine.optional_status(), engine.context().len(), engine.error_message().to_string());

    assert_eq!(once, twice);
    assert_eq!(twice, (WorkflowState::NotStarted, WorkflowState::NotStarted, 0, String::new()));
    assert!(engine.scratch().is_empty().unwrap());
    assert!(engine.registered_steps().is_empty());

    // tras reset la cadena puede volver a correr
    assert_eq!(engine.run_chain(ChainKind::Main, two_steps()).unwrap(), WorkflowState::Success);
}

#[test]
fn events_trace_the_chain() {
    let (_dir, mut engine) = engine();
    engine.run_chain(ChainKind::Main, two_steps()).unwrap();
    let run_id = engine.last_run_id().unwrap();
    let events = engine.event_store().list(run_id);
    assert!(matches!(events.first().map(|e| &e.kind), Some(FlowEventKind::ChainStarted { entry, .. }) if entry == "first"));
    assert!(matches!(events.last().map(|e| &e.kind),
                     Some(FlowEventKind::ChainStopped { status: WorkflowState::Success, .. })));
    let finished = events.iter().filter(|e| matches!(e.kind, FlowEventKind::StepFinished { .. })).count();
    assert_eq!(finished, 2);
}

#[test]
fn reset_keeps_the_event_log() {
    let (_dir, mut engine) = engine();
    engine.run_chain(ChainKind::Main, two_steps()).unwrap();
    let first = engine.last_run_id().unwrap();
    let before = engine.event_store().list(first).len();
    engine.reset().unwrap();
    assert_eq!(engine.event_store().list(first).len(), before);
}
