//! Sumidero de notificaciones de progreso.
//!
//! El engine invoca `notify` una vez por step, antes de ejecutarlo. Es un
//! canal de una sola vía: no se consume ningún valor de retorno y lo que haga
//! el receptor (UI, consola, log) queda fuera del core.
use log::info;

pub trait StatusReporter {
    fn notify(&mut self, message: &str);
}

/// Cualquier closure `FnMut(&str)` sirve como reporter.
impl<F> StatusReporter for F where F: FnMut(&str)
{
    fn notify(&mut self, message: &str) {
        self(message)
    }
}

/// Reporter por defecto cuando el caller no configuró ninguno.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl StatusReporter for NoopReporter {
    fn notify(&mut self, _message: &str) {}
}

/// Reenvía cada mensaje al log (`info`).
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl StatusReporter for LogReporter {
    fn notify(&mut self, message: &str) {
        info!("status: {message}");
    }
}
