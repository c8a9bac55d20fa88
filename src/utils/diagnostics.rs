use crate::domain::model::Diagnostic;
use crate::domain::ports::DiagnosticSink;

/// Collects diagnostics for the run summary and forwards each one to the log.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    log: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            log: true,
        }
    }

    /// 只收集、不寫 log（測試用）
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_where(&self, pred: impl Fn(&Diagnostic) -> bool) -> usize {
        self.entries.iter().filter(|d| pred(d)).count()
    }

    pub fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        if self.log {
            tracing::warn!("⚠️ {}", diagnostic);
        }
        self.entries.push(diagnostic);
    }
}
