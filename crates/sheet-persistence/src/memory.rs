//! `DocumentStore` en memoria.
//!
//! Misma semántica que `PgDocumentStore`: id uuid v4 asignado al insertar,
//! filtro `DocumentFilter`, orden ascendente por `created_date`. Los clones
//! comparten el mismo almacenamiento, de modo que el caller puede conservar
//! un handle para inspeccionar lo guardado por el workflow.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use uuid::Uuid;

use sheet_domain::{CollaboratorError, DocumentFilter, DocumentStore, StoredDocument};

#[derive(Debug, Default, Clone)]
pub struct InMemoryDocumentStore {
    inner: Rc<RefCell<Vec<StoredDocument>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Precarga documentos tal cual (conservan su id si lo traen).
    pub fn with_documents(docs: Vec<StoredDocument>) -> Self {
        Self { inner: Rc::new(RefCell::new(docs)) }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn snapshot(&self) -> Vec<StoredDocument> {
        self.inner.borrow().clone()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn insert(&mut self, document: &StoredDocument) -> Result<Option<String>, CollaboratorError> {
        let id = Uuid::new_v4().to_string();
        let mut stored = document.clone();
        stored.id = Some(id.clone());
        self.inner.borrow_mut().push(stored);
        debug!("insert:done id={id}");
        Ok(Some(id))
    }

    fn find_all(&self, filter: &DocumentFilter) -> Result<Vec<StoredDocument>, CollaboratorError> {
        let mut docs: Vec<StoredDocument> = self.inner.borrow().iter().filter(|d| filter.matches(d)).cloned().collect();
        docs.sort_by_key(|d| d.created_date);
        Ok(docs)
    }
}
