//! End-to-end inference scenarios over realistic format sections.

use pretty_assertions::assert_eq;

use statement_schema_core::{Container, ItemKind, Sample, validate_definitions};
use statement_schema_inference::parser::InputFormatParser;
use statement_schema_inference::parser::normalize::normalize_format_text;
use statement_schema_inference::{infer_batch, infer_input_format};

#[test]
fn test_scalars_then_vertical_array() {
    let format = "N M P Q R\nx_1 y_1 z_1\nx_2 y_2 z_2\n:\nx_R y_R z_R";
    let result = infer_input_format(format, &[Sample::input("4 5 3 2 9\n1 2 3\n")]);

    assert!(result.success);
    assert_eq!(result.definitions.len(), 2);

    let scalar = &result.definitions[0];
    assert_eq!(scalar.container, Container::Scalar);
    assert_eq!(scalar.names, vec!["N", "M", "P", "Q", "R"]);
    assert!(scalar.size.is_empty());

    let varray = &result.definitions[1];
    assert_eq!(varray.container, Container::VerticalArray);
    assert_eq!(varray.names, vec!["x", "y", "z"]);
    assert_eq!(varray.size, vec!["R"]);
}

#[test]
fn test_two_named_scalars_stay_numeric() {
    let result = infer_input_format("Deg Dis", &[Sample::input("113 201\n")]);

    assert_eq!(result.definitions.len(), 1);
    let def = &result.definitions[0];
    assert_eq!(def.container, Container::Scalar);
    assert_eq!(def.names, vec!["Deg", "Dis"]);
    assert_eq!(def.item, ItemKind::Number);
}

#[test]
fn test_textual_sample_downgrades_scalar() {
    let result = infer_input_format("X", &[Sample::input("atcoder\n")]);

    assert_eq!(result.definitions.len(), 1);
    assert_eq!(result.definitions[0].item, ItemKind::String);
}

#[test]
fn test_matrix_block() {
    let format = "N\nD_11 D_12 ... D_1N\n...\nD_N1 ... D_NN";
    let result = infer_input_format(format, &[]);

    assert_eq!(result.definitions.len(), 2);
    assert_eq!(result.definitions[0].names, vec!["N"]);

    let matrix = &result.definitions[1];
    assert_eq!(matrix.container, Container::Matrix);
    assert_eq!(matrix.names, vec!["D"]);
    assert_eq!(matrix.size, vec!["N", "N"]);
}

#[test]
fn test_unparsable_line_degrades_to_unknown() {
    let mut parser = InputFormatParser::new("values??");
    let defs = parser.parse();

    assert_eq!(defs.len(), 1);
    assert_eq!(defs[0].container, Container::Unknown);
    assert_eq!(defs[0].item, ItemKind::Unknown("values??".to_string()));
    assert_eq!(parser.warnings(), ["unknown format: values??"]);
}

#[test]
fn test_html_markup_section() {
    let format = "<var>N</var> <var>M</var>\nA<sub>1</sub> A<sub>2</sub> … A<sub>N</sub>";
    let result = infer_input_format(format, &[]);

    assert_eq!(result.definitions.len(), 2);
    assert_eq!(result.definitions[0].names, vec!["N", "M"]);

    let harray = &result.definitions[1];
    assert_eq!(harray.container, Container::HorizontalArray);
    assert_eq!(harray.names, vec!["A"]);
    assert_eq!(harray.size, vec!["N"]);
}

#[test]
fn test_character_grid() {
    let format = "\
H W
c_{1,1}c_{1,2}..c_{1,W}
c_{2,1}c_{2,2}..c_{2,W}
:
c_{H,1}c_{H,2}..c_{H,W}";
    let result = infer_input_format(format, &[Sample::input("2 3\n#.#\n..#\n")]);

    assert_eq!(result.definitions.len(), 2);
    let grid = &result.definitions[1];
    assert_eq!(grid.container, Container::Matrix);
    assert_eq!(grid.item, ItemKind::Char);
    assert_eq!(grid.names, vec!["c"]);
    assert_eq!(grid.size, vec!["H", "W"]);
}

#[test]
fn test_queries_section() {
    let format = "\
N K
a_1 a_2 .. a_N
Q
l_1 r_1
:
l_Q r_Q";
    let result = infer_input_format(format, &[]);

    let containers: Vec<Container> = result.definitions.iter().map(|d| d.container).collect();
    assert_eq!(
        containers,
        vec![
            Container::Scalar,
            Container::HorizontalArray,
            Container::Scalar,
            Container::VerticalArray,
        ]
    );
    assert_eq!(result.definitions[3].names, vec!["l", "r"]);
    assert_eq!(result.definitions[3].size, vec!["Q"]);
}

#[test]
fn test_jagged_rows_block() {
    let format = "\
N
K_1 A_{1,1} .. A_{1,K_1}
:
K_N A_{N,1} .. A_{N,K_N}";
    let result = infer_input_format(format, &[]);

    assert_eq!(result.definitions.len(), 2);
    let jagged = &result.definitions[1];
    assert_eq!(jagged.container, Container::VerticalArrayMatrix);
    assert_eq!(jagged.names, vec!["K", "A"]);
    assert_eq!(jagged.size, vec!["N", "K_N"]);
}

#[test]
fn test_matrix_with_trailing_scalars() {
    let format = "\
N M
A_{1,1} .. A_{1,M} B_1
:
A_{N,1} .. A_{N,M} B_N";
    let result = infer_input_format(format, &[]);

    assert_eq!(result.definitions.len(), 2);
    let block = &result.definitions[1];
    assert_eq!(block.container, Container::MatrixVerticalArray);
    assert_eq!(block.names, vec!["A", "B"]);
    assert_eq!(block.size, vec!["N", "M"]);
}

#[test]
fn test_vertically_expanded_matrix() {
    let format = "\
N M
a_{1,1} b_{1,1}
a_{1,2} b_{1,2}
:
a_{N,M} b_{N,M}";
    let result = infer_input_format(format, &[]);

    let block = &result.definitions[1];
    assert_eq!(block.container, Container::VerticalMatrix);
    assert_eq!(block.names, vec!["a", "b"]);
    assert_eq!(block.size, vec!["N", "M"]);
}

#[test]
fn test_horizontally_expanded_matrix() {
    let format = "N M\nx_{1,1} y_{1,1} x_{1,2} y_{1,2} .. x_{N,M} y_{N,M}";
    let result = infer_input_format(format, &[]);

    let block = &result.definitions[1];
    assert_eq!(block.container, Container::HorizontalMatrix);
    assert_eq!(block.names, vec!["x", "y"]);
    assert_eq!(block.size, vec!["N", "M"]);
}

#[test]
fn test_zero_origin_array_bound() {
    let result = infer_input_format("N\na_0 a_1 .. a_{N-1}", &[]);

    let array = &result.definitions[1];
    assert_eq!(array.container, Container::HorizontalArray);
    assert_eq!(array.size, vec!["N"]);
}

#[test]
fn test_delimited_range_rows() {
    let format = "N\nS_1-E_1\n:\nS_N-E_N";
    let result = infer_input_format(format, &[]);

    let ranges = &result.definitions[1];
    assert_eq!(ranges.container, Container::VerticalArray);
    assert_eq!(ranges.names, vec!["S", "E"]);
    assert_eq!(ranges.delimiter, Some('-'));
    assert_eq!(ranges.size, vec!["N"]);
}

// Priority ordering: a line matching both a structured shape and the
// scalar fallback must be classified by the structured shape.
#[test]
fn test_structured_shapes_outrank_scalar_fallback() {
    let matrix = infer_input_format("D_11 D_12 .. D_1N", &[]);
    assert_eq!(matrix.definitions[0].container, Container::Matrix);

    let harray = infer_input_format("a_1 a_2 .. a_N", &[]);
    assert_eq!(harray.definitions[0].container, Container::HorizontalArray);

    let varray = infer_input_format("p_1 q_1", &[]);
    assert_eq!(varray.definitions[0].container, Container::VerticalArray);
}

// Dimensionality invariant: len(size) always equals the container's
// promise, for every matcher and every degraded input.
#[test]
fn test_dimensionality_invariant_across_shapes() {
    let formats = [
        "N M",
        "a_1 a_2 .. a_N",
        "c_1c_2..c_N",
        "x_1 y_1\n:\nx_N y_N",
        "D_11 D_12 .. D_1N\n:\nD_N1 .. D_NN",
        "K_1 A_{1,1} .. A_{1,K_1}\n:\nK_N A_{N,1} .. A_{N,K_N}",
        "A_{1,1} .. A_{1,M} B_1\n:\nA_{N,1} .. A_{N,M} B_N",
        "a_{1,1} b_{1,1}\n:\na_{N,M} b_{N,M}",
        "x_{1,1} y_{1,1} .. x_{N,M} y_{N,M}",
        "???",
        "D_11 D_12 .. D_1N",
    ];

    for format in formats {
        let result = infer_input_format(format, &[]);
        assert!(!result.definitions.is_empty(), "no definitions for {format:?}");
        for def in &result.definitions {
            assert_eq!(
                def.size.len(),
                def.container.dimensions(),
                "size arity broken for {format:?}: {def:?}"
            );
        }
        assert!(
            validate_definitions(&result.definitions).is_empty(),
            "invariants broken for {format:?}"
        );
    }
}

// Disambiguation only ever narrows `number`; char and string survive any
// sample contents.
#[test]
fn test_disambiguation_is_monotonic() {
    let chars = infer_input_format("s_1s_2..s_N", &[Sample::input("10110\n")]);
    assert_eq!(chars.definitions[0].item, ItemKind::Char);

    let numbers = infer_input_format("A B", &[Sample::input("3 4\n")]);
    assert_eq!(numbers.definitions[0].item, ItemKind::Number);

    let decimals = infer_input_format("T", &[Sample::input("2.5\n")]);
    assert_eq!(decimals.definitions[0].item, ItemKind::Decimal);
}

#[test]
fn test_missing_sample_keeps_provisional_types() {
    let result = infer_input_format("X", &[]);
    assert_eq!(result.definitions[0].item, ItemKind::Number);

    let output_only = infer_input_format("X", &[Sample::output("atcoder\n")]);
    assert_eq!(output_only.definitions[0].item, ItemKind::Number);
}

#[test]
fn test_empty_section_yields_empty_schema() {
    let result = infer_input_format("", &[]);
    assert!(result.definitions.is_empty());
    assert!(!result.success);
}

#[test]
fn test_normalization_is_idempotent() {
    let sections = [
        "Ｎ Ｍ\nA<sub>1</sub> A<sub>2</sub> ... A<sub>N</sub>\n:\nD_{i, j}",
        "N\nS_1-E_1\n⋮\nS_N-E_N",
        "H W\nc_{1,1}c_{1,2}..c_{1,W}",
    ];
    for section in sections {
        let once = normalize_format_text(section);
        let twice = normalize_format_text(&once.join("\n"));
        assert_eq!(once, twice);
    }
}

#[test]
fn test_batch_preserves_order() {
    let problems: Vec<(String, Vec<Sample>)> = vec![
        ("N M".to_string(), vec![]),
        ("a_1 a_2 .. a_N".to_string(), vec![Sample::input("1 2 3\n")]),
        ("X".to_string(), vec![Sample::input("word\n")]),
    ];

    let results = infer_batch(&problems);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].definitions[0].names, vec!["N", "M"]);
    assert_eq!(
        results[1].definitions[0].container,
        Container::HorizontalArray
    );
    assert_eq!(results[2].definitions[0].item, ItemKind::String);
}
