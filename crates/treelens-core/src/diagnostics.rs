/// Operator-visible records of recovered failures.
use std::fmt;

/// Where in a run a failure was recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Resolve,
    Analyse,
    Report,
    Merge,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Resolve => "resolve",
            Self::Analyse => "analyse",
            Self::Report => "report",
            Self::Merge => "merge",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A non-fatal failure, naming the analyser and phase it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The identifier as requested, or the analyser name once resolved.
    pub identifier: String,
    pub phase: Phase,
    pub message: String,
}

impl Diagnostic {
    /// Build a diagnostic and log it at `warn`.
    pub fn emit(identifier: impl Into<String>, phase: Phase, message: impl Into<String>) -> Self {
        let diagnostic = Self {
            identifier: identifier.into(),
            phase,
            message: message.into(),
        };
        tracing::warn!(
            analyser = %diagnostic.identifier,
            phase = %diagnostic.phase,
            "{}",
            diagnostic.message
        );
        diagnostic
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.phase, self.identifier, self.message)
    }
}
