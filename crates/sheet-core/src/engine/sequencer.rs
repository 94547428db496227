//! Registro ordenado de steps y despachador "ejecutar y avanzar".
//!
//! El sequencer no calcula el orden: ejecuta el step nombrado, aplica su
//! resultado y despacha el sucesor que el propio step devolvió. Garantías:
//! - el reporter recibe `"Running step: <descripción>"` antes de cada step;
//! - un step no corre si falta alguna de sus claves `requires`;
//! - un fragmento con claves fuera de `provides` detiene la cadena;
//! - cada step corre a lo sumo una vez por cadena (single-pass);
//! - el primer `Failure` detiene la cadena sin más despachos.

use indexmap::IndexMap;
use log::{debug, error, info};
use uuid::Uuid;

use crate::constants::STATUS_PREFIX;
use crate::engine::builder::SequencerBuilder;
use crate::engine::reporter::StatusReporter;
use crate::errors::{CoreEngineError, StepError};
use crate::event::{EventStore, FlowEventKind};
use crate::model::Context;
use crate::step::{StepDefinition, StepRunResult};

/// Resultado de correr una cadena completa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainOutcome {
    Completed { steps_run: usize },
    Halted { step_id: String, message: String },
}

pub struct Sequencer<S: ?Sized> {
    steps: IndexMap<String, Box<dyn StepDefinition<S>>>,
}

impl<S: ?Sized> Sequencer<S> {
    pub fn builder() -> SequencerBuilder<S> {
        SequencerBuilder::default()
    }

    pub(crate) fn from_steps(steps: IndexMap<String, Box<dyn StepDefinition<S>>>) -> Self {
        Self { steps }
    }

    /// Nombre del step de entrada (el primero registrado).
    pub fn entry(&self) -> Option<&str> {
        self.steps.keys().next().map(String::as_str)
    }

    pub fn names(&self) -> Vec<&str> {
        self.steps.keys().map(String::as_str).collect()
    }

    pub fn get(&self, name: &str) -> Option<&dyn StepDefinition<S>> {
        self.steps.get(name).map(|s| s.as_ref())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Ejecuta la cadena desde `entry` hasta completarla o hasta el primer
    /// fallo. Nunca devuelve error: los fallos quedan en `ChainOutcome`.
    pub fn run<E>(&self,
                  entry: &str,
                  ctx: &mut Context,
                  services: &mut S,
                  reporter: &mut dyn StatusReporter,
                  events: &mut E,
                  run_id: Uuid)
                  -> ChainOutcome
        where E: EventStore
    {
        let mut visited: Vec<String> = Vec::with_capacity(self.steps.len());
        let mut current = entry.to_string();

        loop {
            let Some(step) = self.steps.get(current.as_str()) else {
                let message = CoreEngineError::UnknownStep(current.clone()).to_string();
                return halt(events, run_id, current, message);
            };
            if visited.contains(&current) {
                let message = format!("step '{current}' dispatched twice in one chain");
                return halt(events, run_id, current, message);
            }
            visited.push(current.clone());

            reporter.notify(&format!("{STATUS_PREFIX}{}", step.description()));
            events.append_kind(run_id,
                               FlowEventKind::StepStarted { step_id: current.clone(),
                                                            description: step.description().to_string() });
            debug!("step:start run_id={run_id} step={current}");

            let result = match missing_requirement(step.as_ref(), ctx) {
                Some(key) => StepRunResult::Failure { error: StepError::MissingInput(key.to_string()) },
                None => step.run(ctx, services),
            };

            match result {
                StepRunResult::Continue { fragment, next } => {
                    if let Some(key) = undeclared_output(step.as_ref(), &fragment) {
                        let message = format!("{}: {}", step.failure_message(), StepError::UndeclaredOutput(key));
                        return halt(events, run_id, current, message);
                    }
                    let keys = merge_fragment(ctx, fragment);
                    events.append_kind(run_id,
                                       FlowEventKind::StepFinished { step_id: current.clone(),
                                                                     keys,
                                                                     next: Some(next.clone()) });
                    debug!("step:done run_id={run_id} step={current} next={next}");
                    current = next;
                }
                StepRunResult::Skip { next, reason } => {
                    info!("step:skip run_id={run_id} step={current} reason={reason}");
                    events.append_kind(run_id,
                                       FlowEventKind::StepSkipped { step_id: current.clone(),
                                                                    reason,
                                                                    next: next.clone() });
                    match next {
                        Some(n) => current = n,
                        None => return ChainOutcome::Completed { steps_run: visited.len() },
                    }
                }
                StepRunResult::Finish { fragment } => {
                    if let Some(key) = undeclared_output(step.as_ref(), &fragment) {
                        let message = format!("{}: {}", step.failure_message(), StepError::UndeclaredOutput(key));
                        return halt(events, run_id, current, message);
                    }
                    let keys = merge_fragment(ctx, fragment);
                    events.append_kind(run_id,
                                       FlowEventKind::StepFinished { step_id: current.clone(),
                                                                     keys,
                                                                     next: None });
                    debug!("step:done run_id={run_id} step={current} (last)");
                    return ChainOutcome::Completed { steps_run: visited.len() };
                }
                StepRunResult::Failure { error } => {
                    let message = format!("{}: {}", step.failure_message(), error);
                    return halt(events, run_id, current, message);
                }
            }
        }
    }
}

fn halt<E: EventStore>(events: &mut E, run_id: Uuid, step_id: String, message: String) -> ChainOutcome {
    error!("step:failed run_id={run_id} step={step_id} err={message}");
    events.append_kind(run_id,
                       FlowEventKind::StepFailed { step_id: step_id.clone(),
                                                   error: message.clone() });
    ChainOutcome::Halted { step_id, message }
}

fn missing_requirement<'a, S: ?Sized>(step: &'a dyn StepDefinition<S>, ctx: &Context) -> Option<&'a str> {
    step.requires().iter().copied().find(|k| !ctx.contains(k))
}

fn undeclared_output<S: ?Sized>(step: &dyn StepDefinition<S>, fragment: &Context) -> Option<String> {
    let allowed = step.provides();
    fragment.keys().find(|k| !allowed.iter().any(|a| *a == *k)).map(str::to_string)
}

fn merge_fragment(ctx: &mut Context, fragment: Context) -> Vec<String> {
    let keys: Vec<String> = fragment.keys().map(str::to_string).collect();
    ctx.merge(fragment);
    keys
}
