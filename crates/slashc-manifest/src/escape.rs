//! Escaping of prompt bodies for a TOML multi-line basic string.
//!
//! Grammar, applied in this order:
//!
//! 1. `\` becomes `\\`
//! 2. each `"""` (left to right, non-overlapping) becomes `\"\"\"`
//! 3. carriage return becomes `\r`; other control characters except tab and
//!    line feed become `\uXXXX`
//!
//! Step 1 runs before step 2 so the backslashes step 2 inserts are not
//! doubled again. Since every backslash of the body is doubled, a body that
//! already contains `\"\"\"` still round-trips.

use std::str::CharIndices;

use crate::{ManifestError, Result};

/// Delimiter of a TOML multi-line basic string.
pub const DELIMITER: &str = "\"\"\"";

const ESCAPED_DELIMITER: &str = "\\\"\\\"\\\"";

/// Escape a raw prompt body so it can sit between two [`DELIMITER`]s.
pub fn escape_prompt_body(body: &str) -> String {
    let escaped = body
        .replace('\\', "\\\\")
        .replace(DELIMITER, ESCAPED_DELIMITER);
    escape_control_chars(escaped)
}

fn escape_control_chars(text: String) -> String {
    if !text.chars().any(needs_control_escape) {
        return text;
    }

    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '\r' => out.push_str("\\r"),
            c if needs_control_escape(c) => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Characters TOML forbids raw inside a multi-line basic string.
fn needs_control_escape(c: char) -> bool {
    c.is_ascii_control() && c != '\t' && c != '\n'
}

/// Decode an escaped body back into the raw text.
///
/// Accepts the full TOML basic-string escape set, not only the sequences
/// [`escape_prompt_body`] produces, so hand-edited manifests decode too.
pub fn unescape_prompt_body(escaped: &str) -> Result<String> {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.char_indices();

    while let Some((position, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some((_, next)) = chars.next() else {
            return Err(invalid(position, "dangling backslash"));
        };
        let decoded = match next {
            '\\' => '\\',
            '"' => '"',
            'b' => '\u{8}',
            't' => '\t',
            'n' => '\n',
            'f' => '\u{c}',
            'r' => '\r',
            'e' => '\u{1b}',
            'u' => read_code_point(&mut chars, 4, position)?,
            'U' => read_code_point(&mut chars, 8, position)?,
            _ => return Err(invalid(position, "unknown escape sequence")),
        };
        out.push(decoded);
    }

    Ok(out)
}

fn read_code_point(
    chars: &mut CharIndices<'_>,
    digits: usize,
    position: usize,
) -> Result<char> {
    let mut value: u32 = 0;
    for _ in 0..digits {
        let digit = chars
            .next()
            .and_then(|(_, d)| d.to_digit(16))
            .ok_or_else(|| invalid(position, "truncated unicode escape"))?;
        value = value * 16 + digit;
    }
    char::from_u32(value).ok_or_else(|| invalid(position, "escape is not a unicode scalar value"))
}

fn invalid(position: usize, reason: &'static str) -> ManifestError {
    ManifestError::InvalidEscape { position, reason }
}
