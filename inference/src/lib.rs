//! Input-format inference for competitive-programming statements.
//!
//! This crate converts the loosely formatted "input format" section of a
//! contest problem statement — mathematical notation, subscripts, HTML
//! markup, inconsistent delimiters — into an ordered, typed schema of
//! [`InputDefinition`]s: containers (scalar, arrays, matrices, composite
//! forms), item kinds, names, and dimensions, in the exact order the
//! variables must be read from standard input.
//!
//! # Main entry points
//!
//! - [`infer_input_format`] — infer one problem's schema from its format
//!   section and sample records.
//! - [`infer_batch`] — infer many problems in parallel.
//! - [`parser::InputFormatParser`] — the lower-level driver, exposing
//!   warnings and line-level diagnostics.
//!
//! # Example
//!
//! ```
//! use statement_schema_core::{Container, Sample};
//! use statement_schema_inference::infer_input_format;
//!
//! let format = "\
//! N M P Q R
//! x_1 y_1 z_1
//! x_2 y_2 z_2
//! :
//! x_R y_R z_R";
//! let samples = [Sample::input("4 5 3 2 9\n1 2 3\n4 5 6\n")];
//!
//! let result = infer_input_format(format, &samples);
//! assert!(result.success);
//!
//! let defs = &result.definitions;
//! assert_eq!(defs.len(), 2);
//! assert_eq!(defs[0].names, vec!["N", "M", "P", "Q", "R"]);
//! assert_eq!(defs[1].container, Container::VerticalArray);
//! assert_eq!(defs[1].names, vec!["x", "y", "z"]);
//! assert_eq!(defs[1].size, vec!["R"]);
//! ```
//!
//! # Failure semantics
//!
//! Inference never returns an error: problem-page text is inherently
//! unpredictable, and a partial schema is more useful to the contestant
//! than an aborted run. Unrecognized lines degrade to definitions with
//! the `Unknown` container, surfaced through
//! [`InferenceResult::warnings`] and the `unknown format:` diagnostic
//! log line.

pub mod output;
pub mod parser;

use rayon::prelude::*;

pub use parser::{InputFormatParser, ParseDiagnostics};
pub use statement_schema_core::{
    Container, InferenceResult, InputDefinition, ItemKind, Sample, SampleKind,
};

/// Infers the input-format schema for one problem.
///
/// `format_text` is the raw text/HTML of the statement's input-format
/// section; `samples` are the scraped sample records, of which the longest
/// sample input drives type disambiguation (no sample input means the
/// provisional types stand).
///
/// # Examples
///
/// ```
/// use statement_schema_core::{ItemKind, Sample};
/// use statement_schema_inference::infer_input_format;
///
/// // the matcher alone would guess `number`; the sample says otherwise
/// let result = infer_input_format("X", &[Sample::input("atcoder\n")]);
/// assert_eq!(result.definitions[0].item, ItemKind::String);
/// ```
pub fn infer_input_format(format_text: &str, samples: &[Sample]) -> InferenceResult {
    let mut parser = InputFormatParser::new(format_text).with_samples(samples);
    let definitions = parser.parse();
    InferenceResult::new(definitions, parser.warnings().to_vec())
}

/// Infers schemas for many problems in parallel.
///
/// The matcher catalog is immutable and shared, so problems fan out over
/// a rayon thread pool; result order matches input order.
pub fn infer_batch(problems: &[(String, Vec<Sample>)]) -> Vec<InferenceResult> {
    problems
        .par_iter()
        .map(|(format_text, samples)| infer_input_format(format_text, samples))
        .collect()
}
