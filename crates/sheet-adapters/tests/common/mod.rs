//! Colaboradores falsos compartidos por los tests de integración.
#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use sheet_adapters::{AutomationWorkflow, Services};
use sheet_core::ScratchDir;
use sheet_domain::{CollaboratorError, DeliveryReceipt, DocumentFilter, DocumentStore, FileStore, MailSender, SheetData,
                   SpreadsheetSource, StoredDocument, UploadedFile};

pub struct FakeSheets {
    pub data: Option<SheetData>,
}

impl SpreadsheetSource for FakeSheets {
    fn fetch(&self, locator: &str) -> Result<SheetData, CollaboratorError> {
        self.data.clone().ok_or_else(|| CollaboratorError::NotFound(locator.to_string()))
    }
}

/// Con `fail = true` rechaza cada subida sin registrarla.
#[derive(Clone, Default)]
pub struct FakeDrive {
    pub uploads: Rc<RefCell<Vec<(PathBuf, String)>>>,
    pub fail: bool,
}

impl FileStore for FakeDrive {
    fn upload(&mut self, local_path: &Path, folder_locator: &str) -> Result<UploadedFile, CollaboratorError> {
        if self.fail {
            return Err(CollaboratorError::Unavailable("drive offline".into()));
        }
        let mut uploads = self.uploads.borrow_mut();
        uploads.push((local_path.to_path_buf(), folder_locator.to_string()));
        let name = local_path.file_name().and_then(|n| n.to_str()).unwrap_or_default().to_string();
        Ok(UploadedFile { id: format!("drive-{}", uploads.len()),
                          name })
    }
}

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Clone, Default)]
pub struct FakeMail {
    pub sent: Rc<RefCell<Vec<SentMail>>>,
}

impl MailSender for FakeMail {
    fn send(&mut self, address: &str, subject: &str, html_body: &str) -> Result<DeliveryReceipt, CollaboratorError> {
        let mut sent = self.sent.borrow_mut();
        sent.push(SentMail { to: address.to_string(),
                             subject: subject.to_string(),
                             body: html_body.to_string() });
        Ok(DeliveryReceipt { id: format!("mail-{}", sent.len()) })
    }
}

/// Store en memoria; con `assign_ids = false` simula un store que no
/// devuelve id. `fail_insert` y `fail_find` hacen fallar cada llamada.
#[derive(Clone)]
pub struct FakeDocs {
    pub docs: Rc<RefCell<Vec<StoredDocument>>>,
    pub assign_ids: bool,
    pub fail_insert: bool,
    pub fail_find: bool,
}

impl Default for FakeDocs {
    fn default() -> Self {
        Self { docs: Rc::default(),
               assign_ids: true,
               fail_insert: false,
               fail_find: false }
    }
}

impl DocumentStore for FakeDocs {
    fn insert(&mut self, document: &StoredDocument) -> Result<Option<String>, CollaboratorError> {
        if self.fail_insert {
            return Err(CollaboratorError::Rejected("insert refused".into()));
        }
        let mut docs = self.docs.borrow_mut();
        let id = self.assign_ids.then(|| format!("doc-{}", docs.len() + 1));
        let mut stored = document.clone();
        stored.id = id.clone();
        docs.push(stored);
        Ok(id)
    }

    fn find_all(&self, filter: &DocumentFilter) -> Result<Vec<StoredDocument>, CollaboratorError> {
        if self.fail_find {
            return Err(CollaboratorError::Unavailable("store offline".into()));
        }
        Ok(self.docs.borrow().iter().filter(|d| filter.matches(d)).cloned().collect())
    }
}

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
}

pub const HEADERS: [&str; 5] = ["File Name", "Description", "Assets", "Output Format", "Model Specification"];

pub fn sheet(body: Vec<Vec<Value>>) -> SheetData {
    let mut rows = vec![HEADERS.iter().map(|h| json!(h)).collect::<Vec<_>>()];
    rows.extend(body);
    SheetData { rows,
                title: "Campaign".into(),
                sheet_name: "June".into() }
}

pub fn valid_row(name: &str) -> Vec<Value> {
    vec![json!(name), json!("A description"), json!("assets.zip"), json!("PNG"), json!("Claude")]
}

pub struct Harness {
    pub dir: tempfile::TempDir,
    pub workflow: AutomationWorkflow,
    pub drive: FakeDrive,
    pub mail: FakeMail,
    pub docs: FakeDocs,
}

impl Harness {
    pub fn new(data: Option<SheetData>) -> Self {
        Self::with_docs(data, FakeDocs::default())
    }

    pub fn with_docs(data: Option<SheetData>, docs: FakeDocs) -> Self {
        Self::with_collaborators(data, FakeDrive::default(), docs)
    }

    pub fn with_collaborators(data: Option<SheetData>, drive: FakeDrive, docs: FakeDocs) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mail = FakeMail::default();
        let services = Services::new(FakeSheets { data },
                                     drive.clone(),
                                     mail.clone(),
                                     docs.clone(),
                                     ScratchDir::new(dir.path().join("scratch"))).with_clock(fixed_now);
        Self { dir,
               workflow: AutomationWorkflow::new(services),
               drive,
               mail,
               docs }
    }

    pub fn scratch_path(&self) -> PathBuf {
        self.dir.path().join("scratch")
    }
}
