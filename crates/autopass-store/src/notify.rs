//! Reporting of non-fatal entry problems.

use autopass_core::SecretString;
use tracing::{debug, warn};

/// Context attached to a content parse failure.
#[derive(Debug, Clone)]
pub struct ParseDiagnostic {
    /// The first line of the decrypted content.
    pub secret_line: SecretString,
    /// The attribute block that failed to parse.
    pub attributes_block: String,
    /// The underlying parser message.
    pub error: String,
}

/// Fire-and-forget sink for problems that should not abort an operation.
pub trait Notifier {
    fn notify(&self, message: &str, diagnostic: &ParseDiagnostic);
}

/// A [`Notifier`] that writes to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, diagnostic: &ParseDiagnostic) {
        warn!("{message}");
        debug!(
            secret_line = %diagnostic.secret_line,
            attributes_block = %diagnostic.attributes_block,
            error = %diagnostic.error,
            "entry parse diagnostic"
        );
    }
}
