//! Structural validation of inferred schemas.
//!
//! Validates the invariants every produced [`InputDefinition`] must satisfy:
//! non-empty names for recognized containers, size arity matching the
//! container's dimensionality, distinct names, and non-empty size
//! components. The inference engine upholds these by construction; callers
//! that deserialize or hand-edit schemas can use this module to catch
//! violations before generating code from them.
//!
//! # Examples
//!
//! ```
//! use statement_schema_core::*;
//!
//! let def = InputDefinition::new(Container::Matrix, ItemKind::Number)
//!     .with_names(&["D"])
//!     .with_size(&["N", "N"]);
//! assert!(validate_definition(&def).is_empty());
//!
//! // Invalid: a matrix with a single size expression
//! let bad = InputDefinition::new(Container::Matrix, ItemKind::Number)
//!     .with_names(&["D"])
//!     .with_size(&["N"]);
//! assert!(!validate_definition(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{Container, InputDefinition};

/// Schema validation errors.
///
/// Each variant describes a specific structural problem found during
/// validation. The `Display` impl provides a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A recognized container has no variable names.
    #[error("definition with container {0:?} has no names")]
    EmptyNames(Container),
    /// `size` arity does not match the container's dimensionality.
    #[error("container {container:?} expects {expected} size entries, found {actual}")]
    SizeArity {
        /// Offending container.
        container: Container,
        /// Arity the container promises.
        expected: usize,
        /// Arity actually present.
        actual: usize,
    },
    /// The same name appears twice within one definition.
    #[error("duplicate name in definition: {0}")]
    DuplicateName(String),
    /// A size expression is empty or whitespace-only.
    #[error("empty size component in definition")]
    EmptySizeComponent,
}

/// Validates a single definition, returning all problems found.
pub fn validate_definition(def: &InputDefinition) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if def.container != Container::Unknown && def.names.is_empty() {
        errors.push(ValidationError::EmptyNames(def.container));
    }

    let expected = def.container.dimensions();
    if def.size.len() != expected {
        errors.push(ValidationError::SizeArity {
            container: def.container,
            expected,
            actual: def.size.len(),
        });
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for name in &def.names {
        if !seen.insert(name.as_str()) {
            errors.push(ValidationError::DuplicateName(name.clone()));
        }
    }

    if def.size.iter().any(|s| s.trim().is_empty()) {
        errors.push(ValidationError::EmptySizeComponent);
    }

    errors
}

/// Validates an ordered definition list.
///
/// # Examples
///
/// ```
/// use statement_schema_core::*;
///
/// let defs = vec![
///     InputDefinition::scalar(&["N"]),
///     InputDefinition::new(Container::HorizontalArray, ItemKind::Number)
///         .with_names(&["a"])
///         .with_size(&["N"]),
/// ];
/// assert!(validate_definitions(&defs).is_empty());
/// ```
pub fn validate_definitions(defs: &[InputDefinition]) -> Vec<ValidationError> {
    defs.iter().flat_map(validate_definition).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemKind;

    #[test]
    fn test_valid_definitions_pass() {
        let defs = vec![
            InputDefinition::scalar(&["N", "M"]),
            InputDefinition::new(Container::VerticalArray, ItemKind::Number)
                .with_names(&["x", "y"])
                .with_size(&["N"]),
            InputDefinition::new(Container::Matrix, ItemKind::Char)
                .with_names(&["S"])
                .with_size(&["H", "W"]),
            InputDefinition::unknown("unparsed"),
        ];
        assert!(validate_definitions(&defs).is_empty());
    }

    #[test]
    fn test_empty_names_flagged() {
        let def = InputDefinition::new(Container::Scalar, ItemKind::Number);
        let errors = validate_definition(&def);
        assert!(errors.contains(&ValidationError::EmptyNames(Container::Scalar)));
    }

    #[test]
    fn test_unknown_container_allows_empty_names() {
        let def = InputDefinition::unknown("free text");
        assert!(validate_definition(&def).is_empty());
    }

    #[test]
    fn test_size_arity_flagged() {
        let def = InputDefinition::new(Container::HorizontalArray, ItemKind::Number)
            .with_names(&["a"]);
        let errors = validate_definition(&def);
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::SizeArity {
                expected: 1,
                actual: 0,
                ..
            }]
        ));
    }

    #[test]
    fn test_duplicate_names_flagged() {
        let def = InputDefinition::scalar(&["N", "N"]);
        let errors = validate_definition(&def);
        assert!(errors.contains(&ValidationError::DuplicateName("N".to_string())));
    }

    #[test]
    fn test_empty_size_component_flagged() {
        let def = InputDefinition::new(Container::VerticalArray, ItemKind::Number)
            .with_names(&["a"])
            .with_size(&[" "]);
        let errors = validate_definition(&def);
        assert!(errors.contains(&ValidationError::EmptySizeComponent));
    }
}
