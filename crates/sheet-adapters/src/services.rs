//! Colaboradores prestados a los steps.
use chrono::{DateTime, Utc};
use sheet_core::ScratchDir;
use sheet_domain::{DocumentStore, FileStore, MailSender, SpreadsheetSource};

/// Reloj inyectable; por defecto `Utc::now`.
pub type Clock = Box<dyn Fn() -> DateTime<Utc>>;

pub struct Services {
    pub sheets: Box<dyn SpreadsheetSource>,
    pub files: Box<dyn FileStore>,
    pub mail: Box<dyn MailSender>,
    pub documents: Box<dyn DocumentStore>,
    /// Destino de los artifacts generados; el mismo que limpia `reset`.
    pub scratch: ScratchDir,
    clock: Clock,
}

impl Services {
    pub fn new(sheets: impl SpreadsheetSource + 'static,
               files: impl FileStore + 'static,
               mail: impl MailSender + 'static,
               documents: impl DocumentStore + 'static,
               scratch: ScratchDir)
               -> Self {
        Self { sheets: Box::new(sheets),
               files: Box::new(files),
               mail: Box::new(mail),
               documents: Box::new(documents),
               scratch,
               clock: Box::new(Utc::now) }
    }

    /// Reemplaza el reloj (tests y reportes con fecha fija).
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}
