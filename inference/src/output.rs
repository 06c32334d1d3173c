//! Output formatting for inferred schemas.

use statement_schema_core::{Container, InputDefinition, ItemKind};

/// Supported output formats.
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

/// Formats a definition list in the requested output format.
pub fn format_definitions(
    definitions: &[InputDefinition],
    format: OutputFormat,
) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(definitions)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => serde_yaml::to_string(definitions)
            .map_err(|e| format!("YAML serialization failed: {e}")),
        OutputFormat::Markdown => Ok(definitions_to_markdown(definitions)),
        OutputFormat::Table => Ok(definitions_to_table(definitions)),
    }
}

fn container_label(container: Container) -> &'static str {
    match container {
        Container::Scalar => "scalar",
        Container::HorizontalArray => "harray",
        Container::VerticalArray => "varray",
        Container::Matrix => "matrix",
        Container::VerticalArrayMatrix => "varray_matrix",
        Container::MatrixVerticalArray => "matrix_varray",
        Container::VerticalMatrix => "vmatrix",
        Container::HorizontalMatrix => "hmatrix",
        Container::Unknown => "unknown",
    }
}

fn item_label(item: &ItemKind) -> String {
    match item {
        ItemKind::Number => "number".to_string(),
        ItemKind::Decimal => "decimal".to_string(),
        ItemKind::String => "string".to_string(),
        ItemKind::Char => "char".to_string(),
        ItemKind::Unknown(raw) => format!("? {raw}"),
    }
}

fn definitions_to_markdown(definitions: &[InputDefinition]) -> String {
    let mut out = String::new();

    out.push_str("# Input format\n\n");
    out.push_str("| # | Container | Item | Names | Size |\n");
    out.push_str("|---|-----------|------|-------|------|\n");
    for (index, def) in definitions.iter().enumerate() {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            index + 1,
            container_label(def.container),
            item_label(&def.item),
            def.names.join(", "),
            def.size.join(" × "),
        ));
    }

    out
}

fn definitions_to_table(definitions: &[InputDefinition]) -> String {
    let mut out = String::new();

    for (index, def) in definitions.iter().enumerate() {
        let delimiter = def
            .delimiter
            .map(|d| format!("  delim '{d}'"))
            .unwrap_or_default();
        out.push_str(&format!(
            "{:>3}  {:<14} {:<8} [{}]  sizes [{}]{}\n",
            index + 1,
            container_label(def.container),
            item_label(&def.item),
            def.names.join(" "),
            def.size.join(", "),
            delimiter,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_definitions() -> Vec<InputDefinition> {
        vec![
            InputDefinition::scalar(&["N", "M"]),
            InputDefinition::new(Container::Matrix, ItemKind::Number)
                .with_names(&["D"])
                .with_size(&["N", "N"]),
        ]
    }

    #[test]
    fn test_json_round_trip() {
        let defs = sample_definitions();
        let json = format_definitions(&defs, OutputFormat::Json).expect("json");
        let back: Vec<InputDefinition> = serde_json::from_str(&json).expect("parse");
        assert_eq!(defs, back);
    }

    #[test]
    fn test_markdown_lists_every_definition() {
        let markdown =
            format_definitions(&sample_definitions(), OutputFormat::Markdown).expect("markdown");
        assert!(markdown.contains("| 1 | scalar | number | N, M |"));
        assert!(markdown.contains("| 2 | matrix | number | D | N × N |"));
    }

    #[test]
    fn test_table_mentions_delimiter() {
        let defs = vec![
            InputDefinition::new(Container::VerticalArray, ItemKind::Number)
                .with_names(&["S", "E"])
                .with_size(&["N"])
                .with_delimiter('-'),
        ];
        let table = format_definitions(&defs, OutputFormat::Table).expect("table");
        assert!(table.contains("delim '-'"));
        assert!(table.contains("varray"));
    }
}
