//! Sample-driven type disambiguation.
//!
//! The format text alone cannot distinguish "an integer" from "a token":
//! a lone identifier could denote either. This pass walks the definitions
//! and the lines of the largest sample input in lockstep by index and
//! narrows provisional `Number` items whose sample line is visibly
//! non-numeric.
//!
//! The index walk cannot track containers that consume a variable number
//! of sample lines, so it stops as soon as one is reached — these guard
//! clauses are deliberate and must stay explicit.

use statement_schema_core::{Container, InputDefinition, ItemKind, Sample, SampleKind};

/// Selects the longest sample input by character count.
pub(crate) fn longest_input_sample(samples: &[Sample]) -> Option<&str> {
    samples
        .iter()
        .filter(|s| s.kind == SampleKind::Input)
        .max_by_key(|s| s.text.chars().count())
        .map(|s| s.text.as_str())
}

/// Narrows provisional `Number` items against the sample text, in place.
///
/// Only `Number` is ever rewritten — to `Decimal` when the corresponding
/// sample line is numeric with dots, to `String` when it contains anything
/// beyond digits, minus signs, and spaces. All other item kinds pass
/// through untouched.
pub(crate) fn disambiguate(definitions: &mut [InputDefinition], sample_text: &str) {
    let lines: Vec<&str> = sample_text.lines().collect();

    for (index, def) in definitions.iter_mut().enumerate() {
        let Some(line) = lines.get(index) else {
            // fewer sample lines than definitions: nothing left to check
            break;
        };
        if consumes_untracked_rows(def.container) {
            break;
        }
        if def.item != ItemKind::Number {
            continue;
        }
        if let Some(narrowed) = narrow_number(line) {
            def.item = narrowed;
        }
    }
}

/// Containers whose sample-line consumption cannot be tracked by a simple
/// index walk.
fn consumes_untracked_rows(container: Container) -> bool {
    matches!(
        container,
        Container::VerticalArrayMatrix
            | Container::Matrix
            | Container::VerticalMatrix
            | Container::MatrixVerticalArray
    )
}

/// Decides whether a `Number` item must be narrowed, given one sample line.
fn narrow_number(line: &str) -> Option<ItemKind> {
    let numeric = |c: char| c.is_ascii_digit() || c == '-' || c == ' ';
    if line.chars().all(numeric) {
        return None;
    }
    if line.chars().all(|c| numeric(c) || c == '.') {
        return Some(ItemKind::Decimal);
    }
    Some(ItemKind::String)
}
