use crate::errors::StepError;
use crate::model::Context;

/// Resultado abstracto de ejecutar un step.
///
/// El propio step elige su sucesor: el sequencer no calcula el orden, sólo
/// despacha el nombre devuelto. Fallar es siempre explícito (`Failure`); un
/// fragmento vacío es un éxito válido.
#[derive(Debug)]
pub enum StepRunResult {
    /// Fusionar `fragment` en el contexto y despachar `next`.
    Continue { fragment: Context, next: String },
    /// No-op exitoso: no se fusiona nada; `None` termina la cadena con éxito.
    Skip { next: Option<String>, reason: String },
    /// Último step de la cadena: fusionar y terminar con éxito.
    Finish { fragment: Context },
    /// Error terminal: la cadena se detiene.
    Failure { error: StepError },
}

impl StepRunResult {
    pub fn next(fragment: Context, next: impl Into<String>) -> Self {
        Self::Continue { fragment,
                         next: next.into() }
    }

    pub fn finish(fragment: Context) -> Self {
        Self::Finish { fragment }
    }

    pub fn skip_to(next: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Skip { next: Some(next.into()),
                     reason: reason.into() }
    }

    pub fn skip_and_finish(reason: impl Into<String>) -> Self {
        Self::Skip { next: None,
                     reason: reason.into() }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

impl From<Result<StepRunResult, StepError>> for StepRunResult {
    /// Límite de step: cualquier `Err` se convierte en `Failure`.
    fn from(res: Result<StepRunResult, StepError>) -> Self {
        res.unwrap_or_else(|error| StepRunResult::Failure { error })
    }
}
