//! NotifyStep: primer step de la cadena opcional.
//!
//! Notificaciones desactivadas es un no-op exitoso: cede a `report` si el
//! reporte diario está activo o cierra la cadena.
use log::info;
use sheet_core::constants::{KEY_ERROR_MESSAGE, KEY_WORKFLOW_STATUS};
use sheet_core::{Context, StepDefinition, StepError, StepRunResult, WorkflowState};

use super::{collaborator, read_rows, render};
use crate::inputs::{KEY_DAILY_REPORT, KEY_EMAIL_ADDRESS, KEY_FILE_NAME, KEY_SEND_NOTIFICATIONS, KEY_SHEET_NAME};
use crate::mail::{compose_notification, RunSummary};
use crate::services::Services;

pub struct NotifyStep;

impl NotifyStep {
    fn notify(&self, ctx: &Context, services: &mut Services) -> Result<StepRunResult, StepError> {
        let report_enabled = ctx.get_bool(KEY_DAILY_REPORT);
        if !ctx.get_bool(KEY_SEND_NOTIFICATIONS) {
            return Ok(if report_enabled {
                          StepRunResult::skip_to("report", "email notifications disabled")
                      } else {
                          StepRunResult::skip_and_finish("email notifications disabled")
                      });
        }
        let address = ctx.get_str(KEY_EMAIL_ADDRESS).unwrap_or_default();
        if address.is_empty() {
            return Err(StepError::invalid(KEY_EMAIL_ADDRESS, "notifications enabled but no address configured"));
        }

        let rows = read_rows(ctx)?;
        let summary = RunSummary { status: ctx.get_str(KEY_WORKFLOW_STATUS).unwrap_or(WorkflowState::NotStarted.as_str()),
                                   error_message: ctx.get_str(KEY_ERROR_MESSAGE).unwrap_or_default(),
                                   file_name: ctx.get_str(KEY_FILE_NAME).unwrap_or("Untitled"),
                                   sheet_name: ctx.get_str(KEY_SHEET_NAME).unwrap_or("Sheet1"),
                                   rows: &rows };
        let (subject, body) = compose_notification(&summary, services.now()).map_err(|e| render(self.name(), e))?;
        let receipt = services.mail.send(address, &subject, &body).map_err(|e| collaborator(self.name(), e))?;
        info!("notify: sent id={} to={address}", receipt.id);

        Ok(if report_enabled {
               StepRunResult::next(Context::new(), "report")
           } else {
               StepRunResult::finish(Context::new())
           })
    }
}

impl StepDefinition<Services> for NotifyStep {
    fn name(&self) -> &str {
        "notify"
    }
    fn description(&self) -> &str {
        "Send email notifications"
    }
    fn failure_message(&self) -> String {
        "Failed to send email notifications".to_string()
    }
    fn requires(&self) -> &[&'static str] {
        &[KEY_SEND_NOTIFICATIONS, KEY_EMAIL_ADDRESS, KEY_DAILY_REPORT]
    }
    fn run(&self, ctx: &Context, services: &mut Services) -> StepRunResult {
        self.notify(ctx, services).into()
    }
}
