//! unquoting and requoting of the php string literals found in translation files
use crate::error::InvalidLiteralError;
use memchr::memchr;

type UnquoteResult<T> = Result<T, InvalidLiteralError>;

/// Unquote a single or double quoted php string literal.
///
/// Surrounding whitespace and one trailing comma are ignored. Only the escaped
/// form of the enclosing quote character is unescaped, every other backslash
/// sequence is kept as-is.
pub fn unquote(literal: &str) -> UnquoteResult<String> {
    let trimmed = literal.trim();
    let trimmed = trimmed.strip_suffix(',').unwrap_or(trimmed);

    let quote = match trimmed.as_bytes() {
        // a lone quote opens and closes an empty string
        [b'\'' | b'"'] => return Ok(String::new()),
        [first @ (b'\'' | b'"'), .., last] if first == last => *first,
        _ => return Err(InvalidLiteralError::new(trimmed)),
    };
    let inner = &trimmed[1..trimmed.len() - 1];

    // no backslash, nothing to unescape
    if memchr(b'\\', inner.as_bytes()).is_none() {
        return Ok(inner.into());
    }

    Ok(match quote {
        b'\'' => inner.replace("\\'", "'"),
        _ => inner.replace("\\\"", "\""),
    })
}

/// Unquote both sides of a `key => value` line
pub fn unquote_pair(key: &str, value: &str) -> UnquoteResult<(String, String)> {
    Ok((unquote(key)?, unquote(value)?))
}

/// Quote a string as a php single quoted literal
pub fn quote_single(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}
