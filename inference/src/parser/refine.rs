//! Size and name refinement.
//!
//! Post-processes the raw names and size tokens the matchers captured:
//! strips stray underscores and braces from name edges, shifts 0-origin
//! size bounds into the 1-origin convention the rest of the system uses,
//! and splits a joined matrix-size token into exactly two components. The
//! splitter's final fallback always manufactures the arity the container
//! promises, trading semantic accuracy for a structural guarantee.

use statement_schema_core::InputDefinition;

use super::matchers::{IndexOrigin, RawDefinition};

/// Placeholder component used when no size expression could be recovered.
const PLACEHOLDER: &str = "_";

/// Refines one raw definition into its final names and sizes.
pub(crate) fn refine(raw: RawDefinition) -> InputDefinition {
    let RawDefinition {
        mut definition,
        origin,
    } = raw;

    definition.names = normalize_names(&definition.names);

    definition.size = match definition.container.dimensions() {
        0 => Vec::new(),
        1 => {
            let size = definition.size.first().map(String::as_str).unwrap_or("");
            vec![adjust_bound(size.trim(), origin)]
        }
        _ => {
            let (rows, cols) = match definition.size.as_slice() {
                [combined] => split_size(combined),
                [rows, cols, ..] => (rows.clone(), cols.clone()),
                [] => (PLACEHOLDER.to_string(), PLACEHOLDER.to_string()),
            };
            vec![
                adjust_bound(rows.trim(), origin),
                adjust_bound(cols.trim(), origin),
            ]
        }
    };

    definition
}

/// Strips stray underscores/braces from both ends of each name, dropping
/// names that vanish and duplicates that appear after stripping.
fn normalize_names(names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let stripped = name
            .trim_matches(|c| c == '_' || c == '{' || c == '}')
            .to_string();
        if !stripped.is_empty() && !out.contains(&stripped) {
            out.push(stripped);
        }
    }
    out
}

/// Applies the 0-origin correction: a visible index starting at 0 means
/// the captured terminal bound is exclusive, so `0` becomes `1` and
/// trailing `-1`/`-2` arithmetic shifts by one.
fn adjust_bound(size: &str, origin: IndexOrigin) -> String {
    if size.is_empty() {
        return PLACEHOLDER.to_string();
    }
    if origin != IndexOrigin::Zero {
        return size.to_string();
    }
    if size == "0" {
        return "1".to_string();
    }
    if let Some(base) = size.strip_suffix("-1") {
        if !base.is_empty() {
            return base.to_string();
        }
    }
    if let Some(base) = size.strip_suffix("-2") {
        if !base.is_empty() {
            return format!("{base}-1");
        }
    }
    size.to_string()
}

/// Splits a joined matrix-size token into two components. Cascade:
/// comma, brace-delimited segments, leading-character adjacency,
/// underscore halves, then a placeholder.
fn split_size(combined: &str) -> (String, String) {
    let combined = combined.trim();

    if let Some((rows, cols)) = combined.split_once(',') {
        if !rows.is_empty() && !cols.is_empty() {
            return (rows.to_string(), cols.to_string());
        }
    }

    if combined.contains('{') {
        let mut segments: Vec<String> = Vec::new();
        let mut depth = 0usize;
        let mut current = String::new();
        let mut lead = String::new();
        for c in combined.chars() {
            match c {
                '{' => {
                    depth += 1;
                    if depth > 1 {
                        current.push(c);
                    }
                }
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        segments.push(std::mem::take(&mut current));
                    } else {
                        current.push(c);
                    }
                }
                _ if depth > 0 => current.push(c),
                _ if segments.is_empty() => lead.push(c),
                _ => {}
            }
        }
        match (lead.is_empty(), segments.as_slice()) {
            (false, [cols, ..]) if !cols.is_empty() => return (lead, cols.clone()),
            (true, [rows, cols, ..]) if !rows.is_empty() && !cols.is_empty() => {
                return (rows.clone(), cols.clone());
            }
            _ => {}
        }
    }

    if combined.len() >= 2 && combined.chars().all(|c| c.is_ascii_alphanumeric()) {
        let mut chars = combined.chars();
        if let Some(first) = chars.next() {
            return (first.to_string(), chars.as_str().to_string());
        }
    }

    if let Some((rows, cols)) = combined.split_once('_') {
        if !rows.is_empty() && !cols.is_empty() {
            return (rows.to_string(), cols.to_string());
        }
    }

    if combined.is_empty() {
        (PLACEHOLDER.to_string(), PLACEHOLDER.to_string())
    } else {
        (combined.to_string(), PLACEHOLDER.to_string())
    }
}
