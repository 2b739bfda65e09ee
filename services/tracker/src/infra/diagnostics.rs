use crate::domain::repository::DiagnosticSink;

/// Diagnostic sink that forwards events to the tracing subscriber. The host
/// decides where its subscriber routes them; emitting never fails.
#[derive(Clone, Copy, Default)]
pub struct TracingDiagnosticSink;

impl DiagnosticSink for TracingDiagnosticSink {
    fn record(&self, message: &str, code: &str) {
        tracing::error!(code, "{message}");
    }
}
