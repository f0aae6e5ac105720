//! Structured security diagnostics
//!
//! Detected attack patterns are reported as events rather than written to a
//! hard-coded log sink. Hosts can install their own sink once at startup;
//! without one, events are emitted through `tracing::warn!`.

use once_cell::sync::OnceCell;
use serde::Serialize;

/// A security-relevant observation made while sanitizing input.
///
/// Events are informational: by the time one is emitted the offending value
/// has already been defanged or rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SecurityEvent {
    /// A string leaf matched an injection-signal pattern and was replaced
    /// with the empty string.
    InjectionDefanged { input: String },
    /// A map key was a banned operator or prototype-pollution name and the
    /// entry was dropped.
    OperatorKeyDropped { key: String },
    /// A value failed the document identifier format check.
    InvalidObjectId { input: String },
}

type DiagnosticSink = dyn Fn(&SecurityEvent) + Send + Sync;

static SINK: OnceCell<Box<DiagnosticSink>> = OnceCell::new();

/// Install a process-wide diagnostic sink.
///
/// May be called at most once; returns `false` if a sink was already
/// installed. When no sink is installed events go to `tracing::warn!`.
pub fn set_diagnostic_sink<F>(sink: F) -> bool
where
    F: Fn(&SecurityEvent) + Send + Sync + 'static,
{
    SINK.set(Box::new(sink)).is_ok()
}

/// Report an event to the installed sink, or log it.
pub(crate) fn emit(event: SecurityEvent) {
    if let Some(sink) = SINK.get() {
        sink(&event);
        return;
    }

    match &event {
        SecurityEvent::InjectionDefanged { input } => {
            tracing::warn!(input = %input, "injection pattern defanged");
        }
        SecurityEvent::OperatorKeyDropped { key } => {
            tracing::warn!(key = %key, "dangerous operator key dropped");
        }
        SecurityEvent::InvalidObjectId { input } => {
            tracing::warn!(input = %input, "invalid object id rejected");
        }
    }
}
