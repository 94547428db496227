use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::info;
use uuid::Uuid;

use sheet_domain::{CollaboratorError, DeliveryReceipt, MailSender};

/// Mailer que no envía: escribe cada mensaje como `<timestamp>-<id>.html` en
/// `dir`, con destinatario y asunto en un comentario de cabecera.
#[derive(Debug, Clone)]
pub struct OutboxMailer {
    dir: PathBuf,
}

impl OutboxMailer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl MailSender for OutboxMailer {
    fn send(&mut self, address: &str, subject: &str, html_body: &str) -> Result<DeliveryReceipt, CollaboratorError> {
        if !address.contains('@') {
            return Err(CollaboratorError::Rejected(format!("invalid address '{address}'")));
        }
        fs::create_dir_all(&self.dir)?;
        let id = Uuid::new_v4().to_string();
        let file = self.dir.join(format!("{}-{id}.html", Utc::now().format("%Y%m%dT%H%M%S")));
        let content = format!("<!--\nTo: {address}\nSubject: {subject}\n-->\n{html_body}\n");
        fs::write(&file, content)?;
        info!("send:done id={id} to={address} file={}", file.display());
        Ok(DeliveryReceipt { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_message_to_outbox() {
        let dir = tempfile::tempdir().unwrap();
        let mut mailer = OutboxMailer::new(dir.path().join("outbox"));
        let receipt = mailer.send("ops@example.com", "[AutomationWorkflow] Daily report", "<p>hi</p>").unwrap();
        let entries: Vec<_> = fs::read_dir(mailer.dir()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        let path = entries[0].as_ref().unwrap().path();
        let body = fs::read_to_string(&path).unwrap();
        assert!(body.contains("Subject: [AutomationWorkflow] Daily report"));
        assert!(path.to_string_lossy().contains(&receipt.id));
    }

    #[test]
    fn rejects_addresses_without_at() {
        let dir = tempfile::tempdir().unwrap();
        let mut mailer = OutboxMailer::new(dir.path());
        assert!(mailer.send("nobody", "s", "b").is_err());
    }
}
