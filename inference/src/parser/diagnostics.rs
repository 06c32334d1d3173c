//! Diagnostics for one inference run.

use serde::Serialize;

/// Line-level accounting for a single parse.
///
/// Every non-empty normalized line is "relevant"; a line is "recognized"
/// when some matcher opened a block on it or an open block absorbed it.
/// The remainder shows up in `unknown_lines`, mirroring the `unknown`
/// definitions emitted into the result.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseDiagnostics {
    /// Non-empty normalized lines seen.
    pub relevant_lines: usize,
    /// Lines claimed by a matcher (header or continuation).
    pub recognized_lines: usize,
    /// Lines no matcher claimed, verbatim.
    pub unknown_lines: Vec<String>,
    /// Matchers that opened at least one block, in first-use order.
    pub matchers_used: Vec<&'static str>,
}

impl ParseDiagnostics {
    /// Fraction of relevant lines that were recognized.
    pub fn coverage(&self) -> f64 {
        if self.relevant_lines == 0 {
            return 0.0;
        }
        self.recognized_lines as f64 / self.relevant_lines as f64
    }
}
