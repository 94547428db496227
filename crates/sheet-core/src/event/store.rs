use chrono::Utc;
use uuid::Uuid;

use super::{FlowEvent, FlowEventKind};

/// Almacenamiento de eventos append-only.
pub trait EventStore {
    /// Agrega un evento a partir de su kind y devuelve el evento completo (con seq y ts).
    fn append_kind(&mut self, run_id: Uuid, kind: FlowEventKind) -> FlowEvent;
    /// Lista eventos de una corrida (orden ascendente por seq).
    fn list(&self, run_id: Uuid) -> Vec<FlowEvent>;
    /// Lista todos los eventos de todas las corridas.
    fn list_all(&self) -> Vec<FlowEvent>;
}

/// Crece con cada corrida y `reset` no lo vacía; un caller de larga vida
/// debería crear una instancia nueva.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    inner: Vec<FlowEvent>,
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, run_id: Uuid, kind: FlowEventKind) -> FlowEvent {
        let seq = self.inner.len() as u64;
        let ev = FlowEvent { seq, run_id, kind, ts: Utc::now() };
        self.inner.push(ev.clone());
        ev
    }
    fn list(&self, run_id: Uuid) -> Vec<FlowEvent> {
        self.inner.iter().filter(|e| e.run_id == run_id).cloned().collect()
    }
    fn list_all(&self) -> Vec<FlowEvent> {
        self.inner.clone()
    }
}
