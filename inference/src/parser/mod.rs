//! Input-format parser for contest problem statements.
//!
//! This module drives the inference pipeline over one problem's
//! input-format section:
//!
//! 1. **Normalize** the raw text/HTML into clean lines
//!    ([`normalize::normalize_format_text`]).
//! 2. **Scan** the lines with the ordered matcher catalog, greedily
//!    absorbing continuation lines into open blocks.
//! 3. **Refine** the captured names and sizes (origin correction, size
//!    splitting).
//! 4. **Disambiguate** provisional numeric items against the largest
//!    sample input.
//!
//! The pipeline never fails: lines nothing recognizes degrade to
//! `unknown` definitions plus a diagnostic, because a partial schema is
//! more useful to the contestant than an aborted run.

mod diagnostics;
mod disambiguate;
mod matchers;
pub mod normalize;
mod refine;

use tracing::{debug, warn};

use statement_schema_core::{InputDefinition, Sample};

pub use diagnostics::ParseDiagnostics;

use matchers::{Block, RawDefinition};

/// Parser for one problem's input-format section.
///
/// # Examples
///
/// ```
/// use statement_schema_inference::parser::InputFormatParser;
///
/// let mut parser = InputFormatParser::new("N M\na_1 a_2 .. a_N");
/// let definitions = parser.parse();
///
/// assert_eq!(definitions.len(), 2);
/// assert_eq!(definitions[0].names, vec!["N", "M"]);
/// assert_eq!(definitions[1].names, vec!["a"]);
/// assert_eq!(definitions[1].size, vec!["N"]);
/// ```
pub struct InputFormatParser {
    format_text: String,
    sample_text: Option<String>,
    warnings: Vec<String>,
    diagnostics: ParseDiagnostics,
}

impl InputFormatParser {
    /// Creates a parser over the raw input-format section text.
    pub fn new(format_text: &str) -> Self {
        Self {
            format_text: format_text.to_string(),
            sample_text: None,
            warnings: Vec::new(),
            diagnostics: ParseDiagnostics::default(),
        }
    }

    /// Attaches sample records; the longest sample input drives type
    /// disambiguation. Without one, provisional types stand as final.
    pub fn with_samples(mut self, samples: &[Sample]) -> Self {
        self.sample_text = disambiguate::longest_input_sample(samples).map(str::to_string);
        self
    }

    /// Attaches one pre-selected sample-input text.
    pub fn with_sample_text(mut self, sample_text: &str) -> Self {
        self.sample_text = Some(sample_text.to_string());
        self
    }

    /// Runs the full pipeline and returns the ordered definitions.
    pub fn parse(&mut self) -> Vec<InputDefinition> {
        let lines = normalize::normalize_format_text(&self.format_text);
        let raw = self.scan(&lines);
        let mut definitions: Vec<InputDefinition> = raw.into_iter().map(refine::refine).collect();
        if let Some(sample) = &self.sample_text {
            disambiguate::disambiguate(&mut definitions, sample);
        }
        debug!(
            definitions = definitions.len(),
            coverage = self.diagnostics.coverage(),
            "input format inferred"
        );
        definitions
    }

    /// Warnings accumulated during the last parse.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Line-level diagnostics for the last parse.
    pub fn diagnostics(&self) -> &ParseDiagnostics {
        &self.diagnostics
    }

    /// Drives the matcher catalog over the normalized lines. A trailing
    /// empty sentinel guarantees the final open block is flushed.
    fn scan(&mut self, lines: &[String]) -> Vec<RawDefinition> {
        let mut raw: Vec<RawDefinition> = Vec::new();
        let mut open: Option<Block> = None;
        let sentinel = String::new();

        for line in lines.iter().chain(std::iter::once(&sentinel)) {
            let line = line.as_str();

            if let Some(block) = open.as_mut() {
                if block.try_absorb(line) {
                    self.diagnostics.relevant_lines += 1;
                    self.diagnostics.recognized_lines += 1;
                    continue;
                }
            }
            if let Some(block) = open.take() {
                raw.push(block.finish());
            }
            if line.is_empty() {
                continue;
            }

            self.diagnostics.relevant_lines += 1;
            match matchers::catalog().iter().find_map(|m| m.try_open(line)) {
                Some(block) => {
                    debug!(matcher = block.matcher_name(), line, "opened block");
                    self.diagnostics.recognized_lines += 1;
                    if !self.diagnostics.matchers_used.contains(&block.matcher_name()) {
                        self.diagnostics.matchers_used.push(block.matcher_name());
                    }
                    open = Some(block);
                }
                None => {
                    warn!("unknown format: {line}");
                    self.warnings.push(format!("unknown format: {line}"));
                    self.diagnostics.unknown_lines.push(line.to_string());
                    raw.push(RawDefinition::unknown(line));
                }
            }
        }

        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statement_schema_core::{Container, ItemKind};

    #[test]
    fn test_empty_format_text() {
        assert!(InputFormatParser::new("").parse().is_empty());
        assert!(InputFormatParser::new("\n\n").parse().is_empty());
    }

    #[test]
    fn test_single_block_flushed_by_sentinel() {
        let defs = InputFormatParser::new("x_1 y_1\nx_2 y_2\n:\nx_N y_N").parse();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].container, Container::VerticalArray);
        assert_eq!(defs[0].size, vec!["N"]);
    }

    #[test]
    fn test_unknown_line_recorded_and_parse_continues() {
        let mut parser = InputFormatParser::new("N\n!!!???\nM");
        let defs = parser.parse();

        assert_eq!(defs.len(), 3);
        assert_eq!(defs[1].container, Container::Unknown);
        assert_eq!(defs[1].item, ItemKind::Unknown("!!!???".to_string()));
        assert_eq!(parser.warnings(), ["unknown format: !!!???"]);
        assert_eq!(parser.diagnostics().unknown_lines, ["!!!???"]);
    }

    #[test]
    fn test_diagnostics_coverage() {
        let mut parser = InputFormatParser::new("N M\n§§§");
        parser.parse();
        let diagnostics = parser.diagnostics();
        assert_eq!(diagnostics.relevant_lines, 2);
        assert_eq!(diagnostics.recognized_lines, 1);
        assert!(diagnostics.matchers_used.contains(&"scalar"));
        assert!((diagnostics.coverage() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_blank_lines_between_blocks() {
        let defs = InputFormatParser::new("N\n\na_1 a_2 .. a_N").parse();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].container, Container::Scalar);
        assert_eq!(defs[1].container, Container::HorizontalArray);
    }
}
