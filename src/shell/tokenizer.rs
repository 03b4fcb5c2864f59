#![forbid(unsafe_code)]

//! Splits a raw input line into typed argument tokens
//!
//! Grammar:
//! - Unquoted whitespace separates tokens; leading and trailing whitespace
//!   is ignored.
//! - A double-quoted span keeps interior whitespace and may be glued to
//!   unquoted text on either side (`a"b c"d` is the single token `ab cd`).
//! - Inside quotes, `\"` and `\\` are escapes. Any other backslash sequence
//!   is kept as written, and outside quotes a backslash is ordinary text.
//! - A quote with no closing partner is kept as a literal character.
//!
//! Tokenization never fails.

use super::token::ArgumentToken;

/// Tokenize a raw line into argument tokens
pub fn tokenize(line: &str) -> Vec<ArgumentToken> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();
    // Distinguishes an empty quoted token (`""`) from no token at all
    let mut in_token = false;
    let mut index = 0;

    while index < chars.len() {
        let c = chars[index];

        if c.is_whitespace() {
            if in_token {
                tokens.push(ArgumentToken::new(std::mem::take(&mut current)));
                in_token = false;
            }
            index += 1;
            continue;
        }

        in_token = true;

        if c == '"'
            && let Some((content, next)) = read_quoted(&chars, index + 1)
        {
            current.push_str(&content);
            index = next;
            continue;
        }

        current.push(c);
        index += 1;
    }

    if in_token {
        tokens.push(ArgumentToken::new(current));
    }

    tokens
}

/// Read a quoted span starting just after its opening quote
///
/// Returns the unescaped content and the index just past the closing quote,
/// or `None` when the quote is never closed.
fn read_quoted(chars: &[char], start: usize) -> Option<(String, usize)> {
    let mut content = String::new();
    let mut index = start;

    while index < chars.len() {
        match chars[index] {
            '"' => return Some((content, index + 1)),
            '\\' if matches!(chars.get(index + 1), Some('"') | Some('\\')) => {
                content.push(chars[index + 1]);
                index += 2;
            }
            other => {
                content.push(other);
                index += 1;
            }
        }
    }

    None
}
