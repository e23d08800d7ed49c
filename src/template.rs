//! `{}` / `{n}` / `{name}` placeholder templating.
//!
//! Templates are scanned with a placeholder meta-pattern driven through the
//! crate's own matcher, so token ranges arrive in grapheme units and stay
//! safe to substitute into no matter what the surrounding text contains.
//! Substitution is validate-then-apply: every token is classified and every
//! argument or key resolved before the template is touched, so a failed call
//! never leaves partially rewritten output.

use crate::api::{Matcher, Range};
use crate::cursor::SubstitutionCursor;
use crate::indexing::{self, TranslationError};

use core::fmt;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::LazyLock;

/// Matches a `{...}` span, excluding spans immediately flanked by an extra
/// brace on either side (the `{{` / `}}` escape case). Group 1 captures the
/// interior.
static PLACEHOLDER: LazyLock<Matcher> = LazyLock::new(|| {
    // Constant pattern, exercised by every test in this module.
    Matcher::new(r"(?<!\{)\{(?!\{)(.*?)(?<!\})\}(?!\})").expect("placeholder pattern is valid")
});

/// An error produced while resolving a template against its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A positional template mixes `{}` with `{n}` placeholders, or a
    /// placeholder interior is neither empty nor all digits.
    InconsistentPlaceholderStyle,

    /// A placeholder referenced the argument at this index, but not enough
    /// arguments were supplied.
    IndexOutOfRange(usize),

    /// A named placeholder has no corresponding entry in the mapping.
    MissingKey(String),

    /// A placeholder boundary fell strictly inside a grapheme cluster.
    /// Defensive; see [`TranslationError`].
    Translation(TranslationError),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormatError::InconsistentPlaceholderStyle => {
                f.write_str("placeholders must all be empty, all indexed, or all named")
            }
            FormatError::IndexOutOfRange(index) => {
                write!(f, "placeholder index {} is out of range", index)
            }
            FormatError::MissingKey(key) => {
                write!(f, "no value supplied for key \"{}\"", key)
            }
            FormatError::Translation(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::Translation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TranslationError> for FormatError {
    fn from(err: TranslationError) -> Self {
        FormatError::Translation(err)
    }
}

/// What a placeholder refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PlaceholderKind {
    /// `{}`: takes the next argument in template order.
    Anonymous,
    /// `{n}`: takes the argument at index n.
    Indexed(usize),
    /// `{key}`: takes the mapping entry for key.
    Named(String),
}

/// A parsed placeholder and its grapheme range in the original template,
/// braces included.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlaceholderToken {
    kind: PlaceholderKind,
    range: Range,
}

/// Resolve `{}` and `{n}` placeholders in `template` against positional
/// arguments.
///
/// A template must use one style throughout: either every placeholder is
/// anonymous (`{}`), assigned arguments in left-to-right order, or every
/// placeholder is indexed (`{n}`), allowing reordering and reuse. `{{` and
/// `}}` produce literal braces. Any value with a `Display` impl can be an
/// argument; the engine never special-cases numeric formatting.
///
/// The brace collapse runs over the fully substituted text, so doubled
/// braces inside argument values collapse as well.
///
/// ```rust
/// use retext::format_positional;
/// assert_eq!(format_positional("{} and {}", &["x", "y"]).unwrap(), "x and y");
/// assert_eq!(format_positional("{0}-{0}", &["a"]).unwrap(), "a-a");
/// assert_eq!(format_positional("{{}}", &[""; 0]).unwrap(), "{}");
/// ```
pub fn format_positional<S>(template: &str, args: &[S]) -> Result<String, FormatError>
where
    S: fmt::Display,
{
    if memchr::memchr2(b'{', b'}', template.as_bytes()).is_none() {
        return Ok(template.to_string());
    }
    let tokens = classify_positional(scan(template)?)?;
    let items: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();

    // Bind every token to its argument before touching the template.
    let mut substitutions = Vec::with_capacity(tokens.len());
    for (position, token) in tokens.iter().enumerate() {
        let index = match token.kind {
            PlaceholderKind::Anonymous => position,
            PlaceholderKind::Indexed(index) => index,
            PlaceholderKind::Named(_) => {
                unreachable!("positional classification emits no named tokens")
            }
        };
        match items.get(index) {
            Some(item) => substitutions.push((token.range.clone(), item.as_str())),
            None => return Err(FormatError::IndexOutOfRange(index)),
        }
    }
    Ok(collapse_escapes(&apply(template, &substitutions)))
}

/// Resolve `{key}` placeholders in `template` against a key-value mapping.
///
/// Every key in the template must be present in the mapping; the whole call
/// fails with [`FormatError::MissingKey`] before any substitution is applied
/// otherwise. Escaping and brace collapsing behave exactly as in
/// [`format_positional`].
///
/// ```rust
/// use retext::format_named;
/// use std::collections::HashMap;
/// let mut vals = HashMap::new();
/// vals.insert("n", "Peter");
/// vals.insert("a", "21");
/// assert_eq!(
///     format_named("name: {n}, age: {a}", &vals).unwrap(),
///     "name: Peter, age: 21"
/// );
/// ```
pub fn format_named<K, V>(template: &str, mapping: &HashMap<K, V>) -> Result<String, FormatError>
where
    K: Borrow<str> + Eq + Hash,
    V: fmt::Display,
{
    if memchr::memchr2(b'{', b'}', template.as_bytes()).is_none() {
        return Ok(template.to_string());
    }

    // Resolve every key before touching the template.
    let mut tokens = Vec::new();
    let mut values = Vec::new();
    for (interior, range) in scan(template)? {
        match mapping.get(interior.as_str()) {
            Some(value) => values.push(value.to_string()),
            None => return Err(FormatError::MissingKey(interior)),
        }
        tokens.push(PlaceholderToken {
            kind: PlaceholderKind::Named(interior),
            range,
        });
    }
    let substitutions: Vec<(Range, &str)> = tokens
        .iter()
        .zip(&values)
        .map(|(token, value)| (token.range.clone(), value.as_str()))
        .collect();
    Ok(collapse_escapes(&apply(template, &substitutions)))
}

/// Scan a template for placeholder spans, yielding each interior and its
/// grapheme range in template order.
fn scan(template: &str) -> Result<Vec<(String, Range)>, FormatError> {
    let records = PLACEHOLDER.find_all(template)?;
    Ok(records
        .into_iter()
        .map(|record| {
            let range = record.range();
            let interior = record
                .groups
                .into_iter()
                .next()
                .flatten()
                .map(|group| group.text)
                .unwrap_or_default();
            (interior, range)
        })
        .collect())
}

/// Classify positional placeholders, rejecting templates that mix anonymous
/// and indexed styles or contain an interior that is neither.
fn classify_positional(
    interiors: Vec<(String, Range)>,
) -> Result<Vec<PlaceholderToken>, FormatError> {
    let mut tokens = Vec::with_capacity(interiors.len());
    let mut saw_anonymous = false;
    let mut saw_indexed = false;
    for (interior, range) in interiors {
        let kind = if interior.is_empty() {
            saw_anonymous = true;
            PlaceholderKind::Anonymous
        } else if interior.bytes().all(|b| b.is_ascii_digit()) {
            saw_indexed = true;
            // An index too large for usize is certainly out of range; let
            // argument binding report it.
            PlaceholderKind::Indexed(interior.parse().unwrap_or(usize::MAX))
        } else {
            return Err(FormatError::InconsistentPlaceholderStyle);
        };
        tokens.push(PlaceholderToken { kind, range });
    }
    if saw_anonymous && saw_indexed {
        return Err(FormatError::InconsistentPlaceholderStyle);
    }
    Ok(tokens)
}

/// Apply substitutions in original-token order, shifting each window by the
/// cumulative length drift of the substitutions before it.
fn apply(template: &str, substitutions: &[(Range, &str)]) -> String {
    let mut result = template.to_string();
    let mut cursor = SubstitutionCursor::new();
    for (range, replacement) in substitutions {
        let window = cursor.window(range.clone());
        indexing::replace_range(&mut result, window, replacement);
        cursor.advance(range.len(), indexing::grapheme_len(replacement));
    }
    result
}

/// Collapse every remaining `{{` into `{` and `}}` into `}`. Escaped pairs
/// are excluded from placeholder scanning, so they are still literally
/// doubled when this runs.
fn collapse_escapes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if (c == '{' || c == '}') && chars.peek() == Some(&c) {
            chars.next();
        }
        result.push(c);
    }
    result
}
