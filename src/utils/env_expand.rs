//! Environment-variable interpolation for user supplied message text.
//!
//! `$VAR` and `${VAR}` references are replaced with values from the
//! environment, except when written as a single-quoted token such as
//! `'$VAR'`, which is passed through verbatim (quotes included).

use regex::Regex;
use std::collections::HashMap;
use std::env;
use std::sync::LazyLock;

static QUOTED_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"'\$[a-zA-Z0-9]+'").unwrap_or_else(|e| panic!("invalid quoted-ref regex: {e}"))
});

// Control characters never appear in a variable name, so `$` directly before a
// placeholder is left alone by the expansion pass.
const PLACEHOLDER_MARK: char = '\u{1}';

/// Expands environment variables in `s` using the process environment.
///
/// # Examples
///
/// ```
/// use slack_post_resource::utils::env_expand::expand_with;
///
/// let lookup = |name: &str| (name == "BUILD").then(|| "42".to_string());
/// assert_eq!(expand_with("build $BUILD", lookup), "build 42");
/// assert_eq!(expand_with("keep '$BUILD'", lookup), "keep '$BUILD'");
/// ```
#[must_use]
pub fn expand(s: &str) -> String {
    expand_with(s, |name| env::var(name).ok())
}

/// Same as [`expand`] but resolves variables through `lookup`. Unknown
/// variables expand to the empty string.
pub fn expand_with<F>(s: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut placeholders: HashMap<&str, String> = HashMap::new();
    for found in QUOTED_REFERENCE.find_iter(s) {
        let next = placeholders.len();
        placeholders
            .entry(found.as_str())
            .or_insert_with(|| format!("{PLACEHOLDER_MARK}{next}{PLACEHOLDER_MARK}"));
    }

    let mut protected = s.to_string();
    for (literal, placeholder) in &placeholders {
        protected = protected.replace(literal, placeholder);
    }

    let mut expanded = expand_shell_vars(&protected, &lookup);
    for (literal, placeholder) in &placeholders {
        expanded = expanded.replace(placeholder.as_str(), literal);
    }
    expanded
}

fn is_special_var(c: char) -> bool {
    matches!(c, '*' | '#' | '$' | '@' | '!' | '?' | '-') || c.is_ascii_digit()
}

fn is_name_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// Result of reading a variable reference that follows a `$`.
enum Reference<'a> {
    Name(&'a str, usize),
    /// Malformed `${...}`; the consumed text is dropped.
    Invalid(usize),
    /// Not a reference at all; the `$` is kept.
    None,
}

fn read_reference(rest: &str) -> Reference<'_> {
    let mut chars = rest.chars();
    match chars.next() {
        Some('{') => {
            let inner = &rest[1..];
            let mut inner_chars = inner.chars();
            if let (Some(c), Some('}')) = (inner_chars.next(), inner_chars.next()) {
                if is_special_var(c) {
                    return Reference::Name(&inner[..c.len_utf8()], c.len_utf8() + 2);
                }
            }
            match inner.find('}') {
                Some(0) => Reference::Invalid(2),
                Some(end) => Reference::Name(&inner[..end], end + 2),
                None => Reference::Invalid(1),
            }
        }
        Some(c) if is_special_var(c) => Reference::Name(&rest[..c.len_utf8()], c.len_utf8()),
        Some(_) => {
            let end = rest
                .char_indices()
                .find(|(_, c)| !is_name_char(*c))
                .map_or(rest.len(), |(i, _)| i);
            if end == 0 {
                Reference::None
            } else {
                Reference::Name(&rest[..end], end)
            }
        }
        None => Reference::None,
    }
}

fn expand_shell_vars<F>(s: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        match read_reference(after) {
            Reference::Name(name, consumed) => {
                out.push_str(&lookup(name).unwrap_or_default());
                rest = &after[consumed..];
            }
            Reference::Invalid(consumed) => {
                rest = &after[consumed..];
            }
            Reference::None => {
                out.push('$');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
