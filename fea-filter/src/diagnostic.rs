//! Reporting dropped statements and other information to the caller.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Warning,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A glyph or class name that was not defined at the point of use.
    UndefinedReference(String),
    /// A feature, lookup, table or languagesystem seen before in this pass.
    DuplicateDefinition(String),
}

/// Something the filter removed from its output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub kind: DiagnosticKind,
    message: String,
}

impl Diagnostic {
    pub fn new(level: Level, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Diagnostic {
            level,
            kind,
            message: message.into(),
        }
    }

    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Diagnostic::new(Level::Warning, kind, message)
    }

    pub fn info(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Diagnostic::new(Level::Info, kind, message)
    }

    pub fn text(&self) -> &str {
        &self.message
    }

    pub fn is_warning(&self) -> bool {
        self.level == Level::Warning
    }

    /// The undefined name, if this diagnostic reports one.
    pub fn reference(&self) -> Option<&str> {
        match &self.kind {
            DiagnosticKind::UndefinedReference(name) => Some(name),
            DiagnosticKind::DuplicateDefinition(_) => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            Level::Warning => "warning",
            Level::Info => "info",
        };
        write!(f, "{level}: {}", self.message)
    }
}
