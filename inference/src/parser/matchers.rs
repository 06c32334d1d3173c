//! The ordered catalog of line matchers.
//!
//! Each matcher recognizes one structural shape from a single normalized
//! line: a matrix header, a one-line horizontal array, one of the composite
//! array+matrix forms, a vertical-array row, or the fully generic scalar
//! fallback. Matchers are tried in a fixed priority order — the most
//! constrained multi-variable shapes first — because the scalar fallback is
//! permissive enough to match almost any line.
//!
//! A successful match opens a [`Block`]: the captured name set, the
//! index-origin marker, a continuation pattern built from the escaped names
//! (the regex crate has no backreferences, so the pattern is generated per
//! block), and a size probe that re-extracts the size token from every
//! absorbed line so the block's closing line supplies the authoritative
//! size expression.

use regex::Regex;
use std::sync::LazyLock;

use statement_schema_core::{Container, InputDefinition, ItemKind};

use super::normalize::ELLIPSIS;

/// Generic index expression: a brace group, a digit run, or a symbol.
/// Digits are tried before the general run so adjacent char cells
/// (`c_1c_2`) split at the right place.
const IDX: &str = r"(?:\{[^{}]*\}|[0-9]+|[A-Za-z0-9']+)";
/// Capturing form of [`IDX`].
const IDX_CAP: &str = r"(\{[^{}]*\}|[0-9]+|[A-Za-z0-9']+)";
/// Separator between cells on a numeric data line (space or comma).
const SEP: &str = r"(?:\s*,\s*|\s+)";

// SAFETY: these regexes are compile-time constants and are validated by tests.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*$").expect("static regex must compile"));
static LEAD_CELL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^([A-Za-z][A-Za-z0-9]*)_{IDX_CAP}")).expect("static regex must compile")
});
static SCALAR_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_{}',.^+-]+$").expect("static regex must compile")
});
static DELIM_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    // `S_1-E_1` style: a delimiter wedged between a subscript and the next
    // subscripted name.
    Regex::new(r"([0-9A-Za-z'}])([-/])([A-Za-z][A-Za-z0-9]*_)").expect("static regex must compile")
});

/// Whether the visible example index in the format text starts at 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum IndexOrigin {
    Zero,
    #[default]
    One,
}

/// A definition as captured by the scanner, before size/name refinement.
#[derive(Debug, Clone)]
pub(crate) struct RawDefinition {
    pub(crate) definition: InputDefinition,
    pub(crate) origin: IndexOrigin,
}

impl RawDefinition {
    pub(crate) fn unknown(line: &str) -> Self {
        Self {
            definition: InputDefinition::unknown(line),
            origin: IndexOrigin::One,
        }
    }
}

/// The shapes the catalog can recognize, one tag per container form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Matrix,
    HorizontalArray,
    VerticalArrayMatrix,
    MatrixVerticalArray,
    VerticalMatrix,
    HorizontalMatrix,
    VerticalArray,
    Scalar,
}

/// One catalog entry: a shape tag plus the base item kind it infers.
pub(crate) struct Matcher {
    shape: Shape,
    item: ItemKind,
    name: &'static str,
}

static CATALOG: LazyLock<Vec<Matcher>> = LazyLock::new(|| {
    // Priority order is a hard requirement: constrained shapes before the
    // permissive scalar fallback.
    vec![
        Matcher::new(Shape::Matrix, ItemKind::Number, "matrix:number"),
        Matcher::new(Shape::Matrix, ItemKind::Char, "matrix:char"),
        Matcher::new(Shape::HorizontalArray, ItemKind::Number, "harray:number"),
        Matcher::new(Shape::HorizontalArray, ItemKind::Char, "harray:char"),
        Matcher::new(
            Shape::VerticalArrayMatrix,
            ItemKind::Number,
            "varray-matrix:number",
        ),
        Matcher::new(
            Shape::VerticalArrayMatrix,
            ItemKind::Char,
            "varray-matrix:char",
        ),
        Matcher::new(
            Shape::MatrixVerticalArray,
            ItemKind::Number,
            "matrix-varray:number",
        ),
        Matcher::new(Shape::VerticalMatrix, ItemKind::Number, "vmatrix"),
        Matcher::new(Shape::HorizontalMatrix, ItemKind::Number, "hmatrix"),
        Matcher::new(Shape::VerticalArray, ItemKind::Number, "varray"),
        Matcher::new(Shape::Scalar, ItemKind::Number, "scalar"),
    ]
});

/// The shared, immutable matcher catalog in priority order.
pub(crate) fn catalog() -> &'static [Matcher] {
    &CATALOG
}

impl Matcher {
    fn new(shape: Shape, item: ItemKind, name: &'static str) -> Self {
        Self { shape, item, name }
    }

    /// Tries this matcher's primary pattern against one normalized line.
    pub(crate) fn try_open(&self, line: &str) -> Option<Block> {
        match self.shape {
            Shape::Matrix => self.open_same_name_row(line, Container::Matrix),
            Shape::HorizontalArray => self.open_same_name_row(line, Container::HorizontalArray),
            Shape::VerticalArrayMatrix => self.open_varray_matrix(line),
            Shape::MatrixVerticalArray => self.open_matrix_varray(line),
            Shape::VerticalMatrix => self.open_vmatrix(line),
            Shape::HorizontalMatrix => self.open_hmatrix(line),
            Shape::VerticalArray => self.open_varray(line),
            Shape::Scalar => self.open_scalar(line),
        }
    }

    fn adjacent(&self) -> bool {
        self.item == ItemKind::Char
    }

    /// Matrix header rows and one-line horizontal arrays share one shape:
    /// repeated cells of a single name. A matrix anchors on a two-part
    /// origin index (`D_11`, `D_{1,1}`) and keeps a continuation pattern;
    /// an array anchors on a one-part origin index (`a_1`) and closes
    /// immediately.
    fn open_same_name_row(&self, line: &str, container: Container) -> Option<Block> {
        let caps = LEAD_CELL_RE.captures(line)?;
        let name = caps.get(1)?.as_str();
        let first_idx = strip_outer_braces(caps.get(2)?.as_str());
        let origin = match container {
            Container::Matrix => pair_origin(&first_idx)?,
            _ => single_origin(&first_idx)?,
        };
        let row_re = same_name_row_pattern(name, self.adjacent());
        if !row_re.is_match(line) {
            return None;
        }
        let probe_re = cell_capture(name);
        if probe_re.captures_iter(line).count() < 2 && !line.contains(ELLIPSIS) {
            return None;
        }
        let cont = (container == Container::Matrix).then(|| row_re.clone());
        let mut block = Block {
            matcher: self.name,
            container,
            item: self.item.clone(),
            names: vec![name.to_string()],
            sizes: vec![String::new()],
            origin,
            delimiter: None,
            cont,
            probe: SizeProbe::Last(probe_re),
        };
        block.update_sizes(line);
        Some(block)
    }

    /// `x_1 y_1 z_1` rows: several distinct names sharing one origin index,
    /// continued vertically. Also handles the delimited `S_1-E_1` form.
    fn open_varray(&self, line: &str) -> Option<Block> {
        let (clean, delimiter) = split_delimited(line);
        let tokens = tokens_of(&clean);
        if tokens.is_empty() {
            return None;
        }
        let mut names: Vec<String> = Vec::new();
        let mut origin: Option<IndexOrigin> = None;
        for token in &tokens {
            let (name, index) = parse_cell(token)?;
            let o = single_origin(&index)?;
            if *origin.get_or_insert(o) != o {
                return None;
            }
            if names.iter().any(|n| n == name) {
                return None;
            }
            names.push(name.to_string());
        }
        let sep = if delimiter.is_some() {
            r"(?:\s*[-/,]\s*|\s+)"
        } else {
            SEP
        };
        let row: Vec<String> = names.iter().map(|n| cell_pattern(n)).collect();
        let cont = Regex::new(&format!("^{}$", row.join(sep))).expect("generated regex must compile");
        let probe_re = names.last().map(|n| cell_capture(n))?;
        let mut block = Block {
            matcher: self.name,
            container: Container::VerticalArray,
            item: self.item.clone(),
            names,
            sizes: vec![String::new()],
            origin: origin?,
            delimiter,
            cont: Some(cont),
            probe: SizeProbe::Last(probe_re),
        };
        block.update_sizes(&clean);
        Some(block)
    }

    /// `K_1 A_{1,1} .. A_{1,K_1}` rows: leading per-row scalars, then a
    /// variable-length run of one matrix name.
    fn open_varray_matrix(&self, line: &str) -> Option<Block> {
        let tokens = tokens_of(line);
        if tokens.len() < 2 {
            return None;
        }
        let mut lead_names: Vec<String> = Vec::new();
        let mut origin: Option<IndexOrigin> = None;
        let mut split = 0;
        while split < tokens.len() {
            let Some((name, index)) = parse_cell(tokens[split]) else {
                break;
            };
            let Some(o) = single_origin(&index) else { break };
            if *origin.get_or_insert(o) != o {
                return None;
            }
            if lead_names.iter().any(|n| n == name) {
                break;
            }
            lead_names.push(name.to_string());
            split += 1;
        }
        if split == 0 || split >= tokens.len() {
            return None;
        }
        let mname = parse_cell(tokens[split])?.0.to_string();
        // a one-part first index (`x_1 x_2 .. x_{W_1}`) makes the greedy
        // lead walk overshoot by one cell; give it back
        while lead_names.last() == Some(&mname) {
            lead_names.pop();
            split -= 1;
        }
        if lead_names.is_empty() {
            return None;
        }
        let rest = tokens[split..].join(" ");
        let matrix_run = matrix_run_pattern(&mname, self.adjacent());
        let rest_re =
            Regex::new(&format!("^{matrix_run}$")).expect("generated regex must compile");
        if !rest_re.is_match(&rest) {
            return None;
        }
        let tail_probe = cell_capture(&mname);
        if tail_probe.captures_iter(&rest).count() < 2 && !rest.contains(ELLIPSIS) {
            return None;
        }
        let lead_row: Vec<String> = lead_names.iter().map(|n| cell_pattern(n)).collect();
        let cont = Regex::new(&format!("^{}{SEP}{matrix_run}$", lead_row.join(SEP)))
            .expect("generated regex must compile");
        let lead_probe = lead_names.first().map(|n| cell_capture(n))?;
        let mut names = lead_names;
        names.push(mname);
        let mut block = Block {
            matcher: self.name,
            container: Container::VerticalArrayMatrix,
            item: self.item.clone(),
            names,
            sizes: vec![String::new(), String::new()],
            origin: origin?,
            delimiter: None,
            cont: Some(cont),
            probe: SizeProbe::Bounds {
                lead: lead_probe,
                tail: tail_probe,
            },
        };
        block.update_sizes(line);
        Some(block)
    }

    /// `A_{1,1} .. A_{1,M} B_1` rows: a matrix row with trailing per-row
    /// scalars.
    fn open_matrix_varray(&self, line: &str) -> Option<Block> {
        let tokens = tokens_of(line);
        if tokens.len() < 2 {
            return None;
        }
        let (mname, first_idx) = parse_cell(tokens[0])?;
        let origin = pair_origin(&first_idx)?;
        let mname = mname.to_string();
        let mcell = cell_capture(&mname);
        let mut split = 1;
        while split < tokens.len() {
            let token = tokens[split];
            let is_matrix_cell = parse_cell(token).is_some_and(|(name, _)| name == mname);
            if !is_matrix_cell && token != ELLIPSIS {
                break;
            }
            split += 1;
        }
        if split >= tokens.len() {
            return None;
        }
        let head = tokens[..split].join(" ");
        if mcell.captures_iter(&head).count() < 2 && !head.contains(ELLIPSIS) {
            return None;
        }
        let mut trail_names: Vec<String> = Vec::new();
        for token in &tokens[split..] {
            let (name, index) = parse_cell(token)?;
            if single_origin(&index)? != origin {
                return None;
            }
            if name == mname || trail_names.iter().any(|n| n == name) {
                return None;
            }
            trail_names.push(name.to_string());
        }
        let matrix_run = matrix_run_pattern(&mname, false);
        let trail_row: Vec<String> = trail_names.iter().map(|n| cell_pattern(n)).collect();
        let cont = Regex::new(&format!("^{matrix_run}{SEP}{}$", trail_row.join(SEP)))
            .expect("generated regex must compile");
        let mut names = vec![mname];
        names.append(&mut trail_names);
        let mut block = Block {
            matcher: self.name,
            container: Container::MatrixVerticalArray,
            item: self.item.clone(),
            names,
            sizes: vec![String::new()],
            origin,
            delimiter: None,
            cont: Some(cont),
            probe: SizeProbe::Last(mcell),
        };
        block.update_sizes(line);
        Some(block)
    }

    /// `a_{1,1} b_{1,1}` rows: one cell per name with a shared two-part
    /// index, the matrix expanded one element group per line.
    fn open_vmatrix(&self, line: &str) -> Option<Block> {
        let tokens = tokens_of(line);
        if tokens.is_empty() {
            return None;
        }
        let mut names: Vec<String> = Vec::new();
        let mut origin: Option<IndexOrigin> = None;
        let mut shared_index: Option<String> = None;
        for token in &tokens {
            let (name, index) = parse_cell(token)?;
            let o = pair_origin(&index)?;
            if *origin.get_or_insert(o) != o {
                return None;
            }
            if *shared_index.get_or_insert(index.clone()) != index {
                return None;
            }
            if names.iter().any(|n| n == name) {
                return None;
            }
            names.push(name.to_string());
        }
        let row: Vec<String> = names.iter().map(|n| cell_pattern(n)).collect();
        let cont = Regex::new(&format!("^{}$", row.join(SEP))).expect("generated regex must compile");
        let probe_re = names.last().map(|n| cell_capture(n))?;
        let mut block = Block {
            matcher: self.name,
            container: Container::VerticalMatrix,
            item: self.item.clone(),
            names,
            sizes: vec![String::new()],
            origin: origin?,
            delimiter: None,
            cont: Some(cont),
            probe: SizeProbe::Last(probe_re),
        };
        block.update_sizes(line);
        Some(block)
    }

    /// `x_{1,1} y_{1,1} x_{1,2} y_{1,2} .. x_{N,M} y_{N,M}`: the whole
    /// matrix expanded onto a single line, names interleaved.
    fn open_hmatrix(&self, line: &str) -> Option<Block> {
        let tokens = tokens_of(line);
        if tokens.len() < 3 || !tokens.contains(&ELLIPSIS) {
            return None;
        }
        let (_, first_idx) = parse_cell(tokens[0])?;
        let origin = pair_origin(&first_idx)?;
        let mut names: Vec<String> = Vec::new();
        for token in &tokens {
            if *token == ELLIPSIS {
                continue;
            }
            let (name, _) = parse_cell(token)?;
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        if names.is_empty() {
            return None;
        }
        let any_cell = names
            .iter()
            .map(|n| regex::escape(n))
            .collect::<Vec<_>>()
            .join("|");
        let probe_re = Regex::new(&format!(r"(?:{any_cell})_{IDX_CAP}"))
            .expect("generated regex must compile");
        let mut block = Block {
            matcher: self.name,
            container: Container::HorizontalMatrix,
            item: self.item.clone(),
            names,
            sizes: vec![String::new()],
            origin,
            delimiter: None,
            cont: None,
            probe: SizeProbe::Last(probe_re),
        };
        block.update_sizes(line);
        Some(block)
    }

    /// The permissive fallback: a line of plain named values.
    fn open_scalar(&self, line: &str) -> Option<Block> {
        let tokens = tokens_of(line);
        if tokens.is_empty() || !line.chars().any(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        if !tokens.iter().all(|t| SCALAR_TOKEN_RE.is_match(t)) {
            return None;
        }
        let mut names: Vec<String> = Vec::new();
        for token in tokens {
            if !names.iter().any(|n| n == token) {
                names.push(token.to_string());
            }
        }
        Some(Block {
            matcher: self.name,
            container: Container::Scalar,
            item: self.item.clone(),
            names,
            sizes: Vec::new(),
            origin: IndexOrigin::One,
            delimiter: None,
            cont: None,
            probe: SizeProbe::None,
        })
    }
}

/// How a block re-extracts its size token from an absorbed line.
enum SizeProbe {
    None,
    /// `sizes[0]` ← the last cell index on the line.
    Last(Regex),
    /// `sizes[0]` ← the first leading-cell index; `sizes[1]` ← the last
    /// comma segment of the last matrix-cell index.
    Bounds { lead: Regex, tail: Regex },
}

/// An open block: one matcher's captured state while the scanner keeps
/// feeding it continuation lines.
pub(crate) struct Block {
    matcher: &'static str,
    container: Container,
    item: ItemKind,
    names: Vec<String>,
    sizes: Vec<String>,
    origin: IndexOrigin,
    delimiter: Option<char>,
    cont: Option<Regex>,
    probe: SizeProbe,
}

impl Block {
    pub(crate) fn matcher_name(&self) -> &'static str {
        self.matcher
    }

    /// Mid-block check: absorbs ellipsis placeholders and lines satisfying
    /// the continuation pattern; a concrete line updates the captured size
    /// so the closing line always wins.
    pub(crate) fn try_absorb(&mut self, line: &str) -> bool {
        let Some(cont) = &self.cont else {
            return false;
        };
        if line == ELLIPSIS {
            return true;
        }
        if !cont.is_match(line) {
            return false;
        }
        self.update_sizes(line);
        true
    }

    fn update_sizes(&mut self, line: &str) {
        match &self.probe {
            SizeProbe::None => {}
            SizeProbe::Last(re) => {
                if let Some(idx) = re.captures_iter(line).last().and_then(|c| c.get(1)) {
                    self.sizes[0] = strip_outer_braces(idx.as_str());
                }
            }
            SizeProbe::Bounds { lead, tail } => {
                if let Some(idx) = lead.captures(line).and_then(|c| c.get(1)) {
                    self.sizes[0] = strip_outer_braces(idx.as_str());
                }
                if let Some(idx) = tail.captures_iter(line).last().and_then(|c| c.get(1)) {
                    self.sizes[1] = last_segment(&strip_outer_braces(idx.as_str()));
                }
            }
        }
    }

    pub(crate) fn finish(self) -> RawDefinition {
        let mut definition = InputDefinition::new(self.container, self.item);
        definition.names = self.names;
        definition.size = self.sizes;
        definition.delimiter = self.delimiter;
        RawDefinition {
            definition,
            origin: self.origin,
        }
    }
}

fn cell_pattern(name: &str) -> String {
    format!(r"{}_{IDX}", regex::escape(name))
}

fn cell_capture(name: &str) -> Regex {
    Regex::new(&format!(r"{}_{IDX_CAP}", regex::escape(name)))
        .expect("generated regex must compile")
}

/// Full-line pattern for repeated cells of one name, spaced or adjacent.
fn same_name_row_pattern(name: &str, adjacent: bool) -> Regex {
    let cell = cell_pattern(name);
    let pattern = if adjacent {
        format!(r"^(?:{cell}|\.\.|\s+|,)+$")
    } else {
        format!(r"^{cell}(?:{SEP}(?:{cell}|\.\.))+$")
    };
    Regex::new(&pattern).expect("generated regex must compile")
}

/// Run of one matrix name's cells with interleaved ellipses.
fn matrix_run_pattern(name: &str, adjacent: bool) -> String {
    let cell = cell_pattern(name);
    if adjacent {
        format!(r"(?:{cell}|\.\.|\s+|,)+")
    } else {
        format!(r"(?:{cell}|\.\.)(?:{SEP}(?:{cell}|\.\.))*")
    }
}

fn tokens_of(line: &str) -> Vec<&str> {
    line.split_whitespace()
        .map(|t| t.trim_matches(','))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Splits a token into name and brace-stripped index, if it is a cell.
fn parse_cell(token: &str) -> Option<(&str, String)> {
    let (name, idx) = token.split_once('_')?;
    if !NAME_RE.is_match(name) || idx.is_empty() {
        return None;
    }
    let index = strip_outer_braces(idx);
    if index.is_empty()
        || !index
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, ',' | '_' | '\'' | '+' | '-' | '{' | '}'))
    {
        return None;
    }
    Some((name, index))
}

/// Strips one enclosing brace pair, when it actually encloses the whole
/// expression.
fn strip_outer_braces(s: &str) -> String {
    if let Some(inner) = s.strip_prefix('{').and_then(|r| r.strip_suffix('}')) {
        let mut depth = 0i32;
        let mut balanced = true;
        for c in inner.chars() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth < 0 {
                        balanced = false;
                        break;
                    }
                }
                _ => {}
            }
        }
        if balanced && depth == 0 {
            return inner.to_string();
        }
    }
    s.to_string()
}

fn last_segment(s: &str) -> String {
    s.rsplit(',').next().unwrap_or(s).to_string()
}

/// One-part origin index: the literal `0` or `1`.
fn single_origin(index: &str) -> Option<IndexOrigin> {
    match index {
        "0" => Some(IndexOrigin::Zero),
        "1" => Some(IndexOrigin::One),
        _ => None,
    }
}

/// Two-part origin index: both components 0/1 (`11`, `1,1`, `00`, `01`).
fn pair_origin(index: &str) -> Option<IndexOrigin> {
    let compact: String = index.chars().filter(|c| *c != ',').collect();
    if compact.len() != 2 || !compact.chars().all(|c| c == '0' || c == '1') {
        return None;
    }
    match compact.chars().next() {
        Some('0') => Some(IndexOrigin::Zero),
        _ => Some(IndexOrigin::One),
    }
}

/// Detects the `S_1-E_1` delimited form: returns the line with delimiters
/// replaced by spaces, plus the first delimiter found.
fn split_delimited(line: &str) -> (String, Option<char>) {
    let mut delimiter: Option<char> = None;
    let replaced = DELIM_SPLIT_RE.replace_all(line, |caps: &regex::Captures| {
        if delimiter.is_none() {
            delimiter = caps[2].chars().next();
        }
        format!("{} {}", &caps[1], &caps[3])
    });
    (replaced.into_owned(), delimiter)
}
