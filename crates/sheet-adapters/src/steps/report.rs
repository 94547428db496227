use log::info;
use sheet_core::{Context, StepDefinition, StepError, StepRunResult};
use sheet_domain::{group_by_date, last_days, DocumentFilter};

use super::{collaborator, render};
use crate::inputs::{KEY_DAILY_REPORT, KEY_EMAIL_ADDRESS};
use crate::report::{compose_report_body, render_chart_svg, report_subject, REPORT_DAYS};
use crate::services::Services;

/// Reporte diario: todos los documentos almacenados agrupados por fecha,
/// gráfico de los últimos días y envío al destinatario configurado.
pub struct ReportStep;

impl ReportStep {
    fn report(&self, ctx: &Context, services: &mut Services) -> Result<StepRunResult, StepError> {
        if !ctx.get_bool(KEY_DAILY_REPORT) {
            return Ok(StepRunResult::skip_and_finish("daily report disabled"));
        }
        let address = ctx.get_str(KEY_EMAIL_ADDRESS).unwrap_or_default();
        if address.is_empty() {
            return Err(StepError::invalid(KEY_EMAIL_ADDRESS, "daily report enabled but no address configured"));
        }

        let docs = services.documents.find_all(&DocumentFilter::all()).map_err(|e| collaborator(self.name(), e))?;
        let grouped = group_by_date(&docs);
        let today = services.now().date_naive();
        let series = last_days(&grouped, today, REPORT_DAYS);
        let chart = render_chart_svg(&series).map_err(|e| render(self.name(), e))?;
        let body = compose_report_body(&grouped, &chart).map_err(|e| render(self.name(), e))?;
        let receipt = services.mail
                              .send(address, &report_subject(), &body)
                              .map_err(|e| collaborator(self.name(), e))?;
        info!("report: sent id={} docs={} days_with_data={}", receipt.id, docs.len(), grouped.len());
        Ok(StepRunResult::finish(Context::new()))
    }
}

impl StepDefinition<Services> for ReportStep {
    fn name(&self) -> &str {
        "report"
    }
    fn description(&self) -> &str {
        "Generate daily report"
    }
    fn failure_message(&self) -> String {
        "Failed to generate daily report".to_string()
    }
    fn requires(&self) -> &[&'static str] {
        &[KEY_DAILY_REPORT, KEY_EMAIL_ADDRESS]
    }
    fn run(&self, ctx: &Context, services: &mut Services) -> StepRunResult {
        self.report(ctx, services).into()
    }
}
