//! Format-text normalization.
//!
//! Canonicalizes the raw input-format section — full-width characters,
//! embedded HTML markup, LaTeX escapes, ad-hoc ellipsis notation — into a
//! clean, line-oriented token stream the matchers can work on. The passes
//! run in a fixed order and never fail: text they cannot make sense of
//! simply survives as lines that later match no shape.

use regex::Regex;
use std::sync::LazyLock;

/// Canonical ellipsis token every continuation notation collapses to.
pub const ELLIPSIS: &str = "..";

// SAFETY: these regexes are compile-time constants and are validated by tests.
static SUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<sup[^>]*>(.*?)</sup>").expect("static regex must compile"));
static SUB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<sub[^>]*>(.*?)</sub>").expect("static regex must compile"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<>]*>").expect("static regex must compile"));
static TEX_ENV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\(?:begin|end)\{[^}]*\}").expect("static regex must compile"));
static TEX_DOTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[lcv]?dots").expect("static regex must compile"));
static MULTI_DOT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{2,}").expect("static regex must compile"));
static CENTER_DOT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"・{2,}").expect("static regex must compile"));

/// Normalizes one raw format-text blob into trimmed lines.
///
/// Applies, in order: full-width → half-width conversion, whitespace
/// collapsing, sub/sup markup inlining (`x<sub>i</sub>` → `x_{i}`), tag
/// stripping, entity decoding, LaTeX-escape stripping, ellipsis
/// canonicalization to [`ELLIPSIS`], brace normalization, and per-line
/// trimming. The result is stable: normalizing already-normalized lines
/// yields the same lines.
pub fn normalize_format_text(raw: &str) -> Vec<String> {
    let text = to_half_width(raw);
    let text = collapse_whitespace(&text);
    let text = inline_script_markup(&text);
    let text = TAG_RE.replace_all(&text, "").into_owned();
    let text = decode_entities(&text);
    let text = strip_tex_escapes(&text);
    let text = normalize_braces(&text);
    text.lines()
        .map(|line| canonical_line(line.trim()))
        .collect()
}

/// Converts full-width digits and letters to their half-width equivalents.
fn to_half_width(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '０'..='９' | 'Ａ'..='Ｚ' | 'ａ'..='ｚ' => {
                char::from_u32(c as u32 - 0xFEE0).unwrap_or(c)
            }
            _ => c,
        })
        .collect()
}

/// Collapses runs of non-newline whitespace to a single ASCII space.
fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for c in s.chars() {
        if c == '\n' {
            out.push('\n');
            prev_space = false;
        } else if c.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(c);
            prev_space = false;
        }
    }
    out
}

/// Rewrites sub/sup markup to the inline convention: a superscript becomes
/// a `^` prefix, a subscript an `_{...}` suffix. Applied twice so one level
/// of nesting resolves.
fn inline_script_markup(s: &str) -> String {
    let mut text = s.to_string();
    for _ in 0..2 {
        text = SUP_RE.replace_all(&text, "^$1").into_owned();
        text = SUB_RE.replace_all(&text, "_{$1}").into_owned();
    }
    text
}

fn decode_entities(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&gt;", ">")
        .replace("&lt;", "<")
}

/// Strips the small fixed set of LaTeX-style escapes seen in statements and
/// collapses every ellipsis notation to [`ELLIPSIS`].
fn strip_tex_escapes(s: &str) -> String {
    let text = s
        .replace(r"\(", "")
        .replace(r"\)", "")
        .replace(r"\lvert", "")
        .replace(r"\rvert", "")
        .replace(r"\mathit", "")
        .replace(r"\times", "*");
    let text = TEX_ENV_RE.replace_all(&text, "");
    let text = TEX_DOTS_RE.replace_all(&text, ELLIPSIS);
    let text = text
        .replace('…', ELLIPSIS)
        .replace('⋯', ELLIPSIS)
        .replace('⋮', ELLIPSIS)
        .replace('：', ELLIPSIS);
    let text = CENTER_DOT_RE.replace_all(&text, ELLIPSIS);
    MULTI_DOT_RE.replace_all(&text, ELLIPSIS).into_owned()
}

/// Normalizes full-width parentheses and commas to their brace/comma
/// forms, then removes spaces embedded in balanced brace groups so sizes
/// like `{i, j}` become `{i,j}` without disturbing surrounding spacing.
fn normalize_braces(s: &str) -> String {
    let text = s.replace('（', "{").replace('）', "}").replace('，', ",");
    strip_spaces_in_braces(&text)
}

/// Depth-counting scan over one level or more of nested `{...}` groups.
/// Depth resets at newlines so an unbalanced brace cannot swallow the rest
/// of the text.
fn strip_spaces_in_braces(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '{' => {
                depth += 1;
                out.push(c);
            }
            '}' => {
                depth = depth.saturating_sub(1);
                out.push(c);
            }
            '\n' => {
                depth = 0;
                out.push(c);
            }
            ' ' if depth > 0 => {}
            _ => out.push(c),
        }
    }
    out
}

/// Rewrites a stray line consisting only of colons/dots into [`ELLIPSIS`].
fn canonical_line(line: &str) -> String {
    if !line.is_empty()
        && line
            .chars()
            .all(|c| c == ':' || c == '.' || c == ' ')
    {
        return ELLIPSIS.to_string();
    }
    line.to_string()
}
