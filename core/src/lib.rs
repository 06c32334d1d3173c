//! Core schema types for contest problem input formats.
//!
//! This crate defines the foundational types for modeling the input format
//! of a competitive-programming problem as an ordered, typed schema:
//!
//! - [`InputDefinition`] — one input block (container shape, item kind,
//!   names, size expressions, optional field delimiter).
//! - [`Container`] — the structural shape of a block (scalar, arrays,
//!   matrices, and composite forms).
//! - [`ItemKind`] — the per-element data type.
//! - [`Sample`] / [`SampleKind`] — sample-data records used for type
//!   disambiguation.
//! - [`InferenceResult`] — the outcome of one inference run.
//!
//! Validation ([`validate_definition`], [`validate_definitions`]) catches
//! structural errors such as missing names or a size arity that does not
//! match the container's dimensionality.
//!
//! The inference engine itself lives in the `statement-schema-inference`
//! crate; code generators and other collaborators consume the types defined
//! here.
//!
//! # Example
//!
//! ```
//! use statement_schema_core::*;
//!
//! // The schema for "N\nA_1 A_2 .. A_N"
//! let defs = vec![
//!     InputDefinition::scalar(&["N"]),
//!     InputDefinition::new(Container::HorizontalArray, ItemKind::Number)
//!         .with_names(&["A"])
//!         .with_size(&["N"]),
//! ];
//!
//! assert!(validate_definitions(&defs).is_empty());
//! assert!(defs.iter().all(|def| def.dimensions_match()));
//! ```

mod types;
mod validate;

pub use types::*;
pub use validate::{ValidationError, validate_definition, validate_definitions};
