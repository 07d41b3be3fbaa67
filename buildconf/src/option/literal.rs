//! Minimal list-literal parser for string array options.
//!
//! Accepts a bracketed, comma-separated list of quoted strings such as
//! `['-Wall', "-O2"]`. Nothing is evaluated: unquoted items are recognised
//! only so they can be reported as non-string elements.

use std::iter::Peekable;
use std::str::Chars;

/// Reasons a list literal can be rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    /// The text is not a well-formed list literal.
    Malformed,
    /// The list is well formed but contains an item that is not a string.
    NonString(String),
}

/// Parses a list literal into its string elements.
///
/// Single and double quotes are both accepted. Inside a quoted string a
/// backslash escapes the quote character, another backslash, `n` and `t`.
/// A trailing comma before the closing bracket is allowed.
///
/// # Errors
///
/// Returns [`LiteralError::Malformed`] if the brackets, quotes or separators
/// are wrong, and [`LiteralError::NonString`] for the first unquoted item of an
/// otherwise well-formed list.
///
/// # Examples
///
/// ```
/// use buildconf::option::literal::{parse, LiteralError};
///
/// assert_eq!(parse("['a', \"b\"]").unwrap(), vec!["a", "b"]);
/// assert_eq!(parse("[]").unwrap(), Vec::<String>::new());
/// assert_eq!(parse("['a', 3]"), Err(LiteralError::NonString("3".to_string())));
/// assert_eq!(parse("['a'"), Err(LiteralError::Malformed));
/// ```
pub fn parse(text: &str) -> Result<Vec<String>, LiteralError> {
    let mut chars = text.chars().peekable();
    let mut items = Vec::new();
    let mut first_non_string = None;

    skip_whitespace(&mut chars);
    if chars.next() != Some('[') {
        return Err(LiteralError::Malformed);
    }
    skip_whitespace(&mut chars);

    if chars.peek() == Some(&']') {
        chars.next();
    } else {
        loop {
            skip_whitespace(&mut chars);
            match chars.peek() {
                Some(&quote @ ('\'' | '"')) => {
                    chars.next();
                    items.push(parse_quoted(&mut chars, quote)?);
                }
                Some(_) => {
                    let bare = parse_bare(&mut chars)?;
                    if first_non_string.is_none() {
                        first_non_string = Some(bare);
                    }
                }
                None => return Err(LiteralError::Malformed),
            }

            skip_whitespace(&mut chars);
            match chars.next() {
                Some(',') => {
                    skip_whitespace(&mut chars);
                    if chars.peek() == Some(&']') {
                        chars.next();
                        break;
                    }
                }
                Some(']') => break,
                _ => return Err(LiteralError::Malformed),
            }
        }
    }

    skip_whitespace(&mut chars);
    if chars.next().is_some() {
        return Err(LiteralError::Malformed);
    }

    match first_non_string {
        Some(item) => Err(LiteralError::NonString(item)),
        None => Ok(items),
    }
}

/// Renders strings as a single-quoted list literal that [`parse`] accepts.
///
/// # Examples
///
/// ```
/// use buildconf::option::literal::render;
///
/// assert_eq!(render(&["-O2".to_string(), "-g".to_string()]), "['-O2', '-g']");
/// assert_eq!(render(&[]), "[]");
/// ```
#[must_use]
pub fn render(items: &[String]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|item| {
            let escaped = item.replace('\\', "\\\\").replace('\'', "\\'");
            format!("'{escaped}'")
        })
        .collect();
    format!("[{}]", quoted.join(", "))
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }
}

fn parse_quoted(chars: &mut Peekable<Chars<'_>>, quote: char) -> Result<String, LiteralError> {
    let mut value = String::new();
    loop {
        match chars.next() {
            Some('\\') => match chars.next() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some(c) if c == quote || c == '\\' => value.push(c),
                Some(c) => {
                    value.push('\\');
                    value.push(c);
                }
                None => return Err(LiteralError::Malformed),
            },
            Some(c) if c == quote => return Ok(value),
            Some(c) => value.push(c),
            None => return Err(LiteralError::Malformed),
        }
    }
}

/// Consumes an unquoted item up to the next top-level `,` or `]`.
fn parse_bare(chars: &mut Peekable<Chars<'_>>) -> Result<String, LiteralError> {
    let mut item = String::new();
    let mut depth = 0usize;
    let mut quote = None;

    while let Some(&c) = chars.peek() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') if depth == 0 => break,
            (None, ']') => depth -= 1,
            (None, ',') if depth == 0 => break,
            (None, _) => {}
        }
        item.push(c);
        chars.next();
    }

    let item = item.trim().to_string();
    if item.is_empty() || quote.is_some() || depth > 0 {
        return Err(LiteralError::Malformed);
    }
    Ok(item)
}
