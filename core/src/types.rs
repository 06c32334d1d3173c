//! Schema type definitions for problem input formats.
//!
//! This module defines the core data model used to represent the input
//! format of a contest problem as an ordered list of typed definitions.
//! The types are designed for serialization with [`serde`] and can
//! round-trip through JSON and other storage backends.

use serde::{Deserialize, Serialize};

/// Version of the schema contract (semver).
///
/// Embedded by callers that persist inferred schemas, to track
/// compatibility across schema versions.
pub const SCHEMA_CONTRACT_VERSION: &str = "1.0.0";

/// Structural shape of one input block.
///
/// A container describes how the elements of a definition are laid out in
/// the input stream: a lone line of scalars, a one-dimensional array
/// (written across or down), a two-dimensional matrix, or one of the
/// composite forms that combine an array with matrix rows.
///
/// # Examples
///
/// ```
/// use statement_schema_core::Container;
///
/// assert_eq!(Container::Scalar.dimensions(), 0);
/// assert_eq!(Container::VerticalArray.dimensions(), 1);
/// assert_eq!(Container::Matrix.dimensions(), 2);
/// assert!(Container::VerticalArrayMatrix.is_matrix_family());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Container {
    /// One line of named scalar values (`N M K`).
    #[default]
    Scalar,
    /// A one-dimensional array written across a single line (`a_1 a_2 .. a_N`).
    HorizontalArray,
    /// A one-dimensional array written one row per line (`x_1 y_1` … `x_N y_N`).
    VerticalArray,
    /// A two-dimensional matrix, one row per line.
    Matrix,
    /// A vertical array whose rows each end in a variable-length matrix row
    /// (`K_1 A_{1,1} .. A_{1,K_1}` … `K_N A_{N,1} .. A_{N,K_N}`).
    VerticalArrayMatrix,
    /// A matrix whose rows each carry trailing per-row scalars
    /// (`A_{1,1} .. A_{1,M} B_1` … `A_{N,1} .. A_{N,M} B_N`).
    MatrixVerticalArray,
    /// A matrix expanded vertically, one element group per line
    /// (`a_{1,1}` … `a_{N,M}`).
    VerticalMatrix,
    /// A matrix expanded horizontally onto a single line
    /// (`x_{1,1} y_{1,1} .. x_{N,M} y_{N,M}`).
    HorizontalMatrix,
    /// A line no matcher recognized; the raw text is kept as the item.
    Unknown,
}

impl Container {
    /// Number of size expressions this container carries (0, 1, or 2).
    pub fn dimensions(&self) -> usize {
        match self {
            Container::Scalar | Container::Unknown => 0,
            Container::HorizontalArray | Container::VerticalArray => 1,
            Container::Matrix
            | Container::VerticalArrayMatrix
            | Container::MatrixVerticalArray
            | Container::VerticalMatrix
            | Container::HorizontalMatrix => 2,
        }
    }

    /// True for the two-dimensional container shapes.
    pub fn is_matrix_family(&self) -> bool {
        self.dimensions() == 2
    }

    /// True for the one-dimensional container shapes.
    pub fn is_array_family(&self) -> bool {
        self.dimensions() == 1
    }
}

/// Per-element data type within a container.
///
/// Matchers infer a provisional kind from the format text alone (numeric by
/// default, `Char` for adjacent-cell shapes); the sample-driven
/// disambiguation pass may later narrow `Number` to `Decimal` or `String`.
///
/// # Examples
///
/// ```
/// use statement_schema_core::ItemKind;
///
/// let kind = ItemKind::default();
/// assert_eq!(kind, ItemKind::Number);
///
/// let raw = ItemKind::Unknown("some unparsed label".into());
/// assert!(matches!(raw, ItemKind::Unknown(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Integer value (the default inference).
    #[default]
    Number,
    /// Decimal value.
    Decimal,
    /// Whitespace-delimited token.
    String,
    /// Single character, read without delimiters.
    Char,
    /// Free-text label for a line no matcher recognized.
    Unknown(String),
}

/// One inferred input definition.
///
/// The final output unit of the inference engine: a container shape, a
/// per-element item kind, the ordered variable names, and the size
/// expressions whose count is fixed by the container
/// ([`Container::dimensions`]). Definitions are emitted in the exact order
/// the variables must be read from standard input.
///
/// # Examples
///
/// ```
/// use statement_schema_core::{Container, InputDefinition, ItemKind};
///
/// let def = InputDefinition::new(Container::VerticalArray, ItemKind::Number)
///     .with_names(&["x", "y", "z"])
///     .with_size(&["R"]);
///
/// assert_eq!(def.names, vec!["x", "y", "z"]);
/// assert_eq!(def.size, vec!["R"]);
/// assert!(def.dimensions_match());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDefinition {
    /// Structural shape of the block.
    pub container: Container,
    /// Per-element type.
    pub item: ItemKind,
    /// Ordered, distinct variable names (declaration/read order).
    pub names: Vec<String>,
    /// Size expressions: numeric literals or references to earlier scalars.
    pub size: Vec<String>,
    /// Character joining fields on a data line (e.g. the dash in `S-E`),
    /// stripped before splitting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
}

impl InputDefinition {
    /// Creates an empty definition with the given container and item kind.
    pub fn new(container: Container, item: ItemKind) -> Self {
        Self {
            container,
            item,
            names: Vec::new(),
            size: Vec::new(),
            delimiter: None,
        }
    }

    /// Creates a scalar definition from a list of names.
    ///
    /// # Examples
    ///
    /// ```
    /// use statement_schema_core::{Container, InputDefinition};
    ///
    /// let def = InputDefinition::scalar(&["N", "M"]);
    /// assert_eq!(def.container, Container::Scalar);
    /// assert!(def.size.is_empty());
    /// ```
    pub fn scalar(names: &[&str]) -> Self {
        Self::new(Container::Scalar, ItemKind::Number).with_names(names)
    }

    /// Creates an `Unknown` definition carrying the raw unmatched line.
    ///
    /// # Examples
    ///
    /// ```
    /// use statement_schema_core::{Container, InputDefinition, ItemKind};
    ///
    /// let def = InputDefinition::unknown("see the figure below");
    /// assert_eq!(def.container, Container::Unknown);
    /// assert!(matches!(def.item, ItemKind::Unknown(_)));
    /// assert!(def.names.is_empty());
    /// ```
    pub fn unknown(raw_line: &str) -> Self {
        Self::new(Container::Unknown, ItemKind::Unknown(raw_line.to_string()))
    }

    /// Sets the names.
    pub fn with_names(mut self, names: &[&str]) -> Self {
        self.names = names.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Sets the size expressions.
    pub fn with_size(mut self, size: &[&str]) -> Self {
        self.size = size.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Checks that `size` has the arity the container promises.
    pub fn dimensions_match(&self) -> bool {
        self.size.len() == self.container.dimensions()
    }
}

/// Category of a sample-data record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleKind {
    /// Sample input (`.in` files).
    Input,
    /// Expected output (`.out` files).
    Output,
}

/// One sample-data record scraped alongside the problem statement.
///
/// The inference engine only reads `Input` samples (it selects the longest
/// one by character count for type disambiguation); `Output` records pass
/// through untouched for the judging collaborator.
///
/// # Examples
///
/// ```
/// use statement_schema_core::{Sample, SampleKind};
///
/// let sample = Sample::input("4 5 3 2 9\n");
/// assert_eq!(sample.kind, SampleKind::Input);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Whether this is a sample input or expected output.
    pub kind: SampleKind,
    /// Raw sample text.
    pub text: String,
}

impl Sample {
    /// Creates a sample-input record.
    pub fn input(text: &str) -> Self {
        Self {
            kind: SampleKind::Input,
            text: text.to_string(),
        }
    }

    /// Creates an expected-output record.
    pub fn output(text: &str) -> Self {
        Self {
            kind: SampleKind::Output,
            text: text.to_string(),
        }
    }
}

/// Result of one inference run.
///
/// Returned by the inference crate's entry points. `success` is true when
/// at least one definition was produced and every line of the format text
/// was recognized (no [`Container::Unknown`] definitions).
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// Ordered input definitions, in read order.
    pub definitions: Vec<InputDefinition>,
    /// Warnings encountered during inference.
    pub warnings: Vec<String>,
    /// Whether inference fully recognized the format text.
    pub success: bool,
}

impl InferenceResult {
    /// Builds a result, deriving the `success` flag from the definitions.
    pub fn new(definitions: Vec<InputDefinition>, warnings: Vec<String>) -> Self {
        let success = !definitions.is_empty()
            && definitions
                .iter()
                .all(|def| def.container != Container::Unknown);
        Self {
            definitions,
            warnings,
            success,
        }
    }
}
