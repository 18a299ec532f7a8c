// crates/dgus-check/src/report.rs
use std::fmt;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

/// What a diagnostic is about. The ids are stable and safe to grep for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    PageIdTooLarge,
    PageResolution,
    IconTooLarge,
    RamOverflow,
    AuxPointerOverlap,
    VpTypeMismatch,
    VpAddrMismatch,
    VpSizeMismatch,
    ControlTypeMismatch,
    DuplicateKeycode,
    TextboxGlyphSize,
    TextboxHeight,
    TextboxWidth,
    TextboxMaybeTooSmall,
    QWordUnsupported,
    MissingPage,
    MissingIconLib,
    IconIndex,
    TextEncoding,
    FontLib,
    InvertedArea,
    Summary,
}

impl DiagnosticKind {
    pub fn id(self) -> &'static str {
        match self {
            DiagnosticKind::PageIdTooLarge => "page-id",
            DiagnosticKind::PageResolution => "page-resolution",
            DiagnosticKind::IconTooLarge => "icon-size",
            DiagnosticKind::RamOverflow => "ram-overflow",
            DiagnosticKind::AuxPointerOverlap => "aux-ptr-overlap",
            DiagnosticKind::VpTypeMismatch => "vp-type-mismatch",
            DiagnosticKind::VpAddrMismatch => "vp-addr-mismatch",
            DiagnosticKind::VpSizeMismatch => "vp-size-mismatch",
            DiagnosticKind::ControlTypeMismatch => "control-type-mismatch",
            DiagnosticKind::DuplicateKeycode => "duplicate-keycode",
            DiagnosticKind::TextboxGlyphSize => "textbox-glyph",
            DiagnosticKind::TextboxHeight => "textbox-height",
            DiagnosticKind::TextboxWidth => "textbox-width",
            DiagnosticKind::TextboxMaybeTooSmall => "textbox-small",
            DiagnosticKind::QWordUnsupported => "qword",
            DiagnosticKind::MissingPage => "bad-pic",
            DiagnosticKind::MissingIconLib => "bad-iconlib",
            DiagnosticKind::IconIndex => "icon-index",
            DiagnosticKind::TextEncoding => "text-encoding",
            DiagnosticKind::FontLib => "fontlib",
            DiagnosticKind::InvertedArea => "inverted-area",
            DiagnosticKind::Summary => "summary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity.label(), self.kind.id(), self.message)
    }
}

/// Diagnostics of one validation run, in the order they were found.
#[derive(Debug, Clone, Default)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, kind: DiagnosticKind, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity,
            kind,
            message: message.into(),
        });
    }

    pub fn error(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.push(Severity::Error, kind, message);
    }

    pub fn warning(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.push(Severity::Warning, kind, message);
    }

    pub fn info(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.push(Severity::Info, kind, message);
    }

    /// Records an error unless `cond` holds; returns `cond`.
    pub fn check(&mut self, cond: bool, kind: DiagnosticKind, message: impl FnOnce() -> String) -> bool {
        if !cond {
            self.error(kind, message());
        }
        cond
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn count_kind(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// Errors and warnings go to `err`, informational lines to `out`.
    pub fn write_to(&self, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
        for diagnostic in &self.diagnostics {
            match diagnostic.severity {
                Severity::Info => writeln!(out, "{}", diagnostic)?,
                Severity::Warning | Severity::Error => writeln!(err, "{}", diagnostic)?,
            }
        }
        Ok(())
    }
}
