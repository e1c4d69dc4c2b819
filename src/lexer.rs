//! Literal recognizers for a single line of a material file.
//!
//! Every recognizer skips leading whitespace, consumes a prefix of the
//! remaining text and reports the decoded value. On failure the cursor is
//! left where it was.

/// Position within one line of input.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Cursor { input, pos: 0 }
    }

    // ── Helpers ──────────────────────────────────────────────────────

    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// 0-based character column of the cursor.
    pub fn column(&self) -> usize {
        self.input[..self.pos].chars().count()
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn starts_with(&self, s: &str) -> bool {
        self.remaining().starts_with(s)
    }

    pub fn eat_char(&mut self, ch: char) -> bool {
        if self.peek_char() == Some(ch) {
            self.advance(ch.len_utf8());
            true
        } else {
            false
        }
    }

    pub fn skip_ws(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.advance(ch.len_utf8());
            } else {
                break;
            }
        }
    }

    /// Consume the rest of the line.
    pub fn take_rest(&mut self) -> &'a str {
        let rest = self.remaining();
        self.pos = self.input.len();
        rest
    }

    fn eat_digits(&mut self, radix: u32) -> usize {
        let start = self.pos;
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii() && ch.is_digit(radix) {
                self.advance(1);
            } else {
                break;
            }
        }
        self.pos - start
    }

    // ── Identifiers ─────────────────────────────────────────────────

    /// ASCII letters, digits and `_`. Returns an empty string when nothing
    /// matches. A leading digit is accepted, so `1abc` is an identifier.
    pub fn identifier(&mut self) -> &'a str {
        self.skip_ws();
        let start = self.pos;
        while let Some(ch) = self.peek_char() {
            if is_identifier_char(ch) {
                self.advance(1);
            } else {
                break;
            }
        }
        &self.input[start..self.pos]
    }

    // ── Strings ─────────────────────────────────────────────────────

    pub fn string_literal(&mut self) -> Option<String> {
        let start = self.pos;
        self.skip_ws();
        if !self.eat_char('"') {
            self.pos = start;
            return None;
        }

        let mut value = String::new();
        loop {
            match self.peek_char() {
                None => {
                    self.pos = start;
                    return None;
                }
                Some('"') => {
                    self.advance(1);
                    return Some(value);
                }
                Some('\\') => {
                    self.advance(1);
                    match self.peek_char() {
                        None => {
                            self.pos = start;
                            return None;
                        }
                        Some(ch) => {
                            self.advance(ch.len_utf8());
                            value.push(unescape(ch));
                        }
                    }
                }
                Some(ch) => {
                    self.advance(ch.len_utf8());
                    value.push(ch);
                }
            }
        }
    }

    // ── Numbers ─────────────────────────────────────────────────────

    /// Decimal, octal (`0` prefix) or hex (`0x` prefix) integer with an
    /// optional `-` and at most one `u`/`l` suffix character. Overflow wraps.
    pub fn integer_literal(&mut self) -> Option<i64> {
        let start = self.pos;
        self.skip_ws();

        let negative = self.eat_char('-');
        if negative {
            self.skip_ws();
        }

        let radix = if self.starts_with("0x") || self.starts_with("0X") {
            self.advance(2);
            16
        } else if self.starts_with("0") {
            self.advance(1);
            8
        } else {
            10
        };

        let mut magnitude: i64 = 0;
        let mut digits = 0;
        while let Some(digit) = self.peek_char().and_then(|ch| ch.to_digit(radix)) {
            magnitude = magnitude
                .wrapping_mul(i64::from(radix))
                .wrapping_add(i64::from(digit));
            digits += 1;
            self.advance(1);
        }

        // The leading `0` of an octal literal is itself a digit.
        if digits == 0 && radix != 8 {
            self.pos = start;
            return None;
        }

        if let Some('u' | 'U' | 'l' | 'L') = self.peek_char() {
            self.advance(1);
        }

        Some(if negative {
            magnitude.wrapping_neg()
        } else {
            magnitude
        })
    }

    /// C-like float: `[+-] digits [. digits] [(e|E) [+-] digits] [f|F]`.
    /// At least one mantissa digit is required, and an exponent marker must be
    /// followed by digits. Values that overflow `f32` are rejected.
    pub fn float_literal(&mut self) -> Option<f32> {
        let start = self.pos;
        self.skip_ws();
        let literal_start = self.pos;

        if let Some('+' | '-') = self.peek_char() {
            self.advance(1);
        }

        let mut digits = self.eat_digits(10);
        if self.eat_char('.') {
            digits += self.eat_digits(10);
        }
        if digits == 0 {
            self.pos = start;
            return None;
        }

        if let Some('e' | 'E') = self.peek_char() {
            self.advance(1);
            if let Some('+' | '-') = self.peek_char() {
                self.advance(1);
            }
            if self.eat_digits(10) == 0 {
                self.pos = start;
                return None;
            }
        }

        let value = match self.input[literal_start..self.pos].parse::<f32>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                self.pos = start;
                return None;
            }
        };

        if let Some('f' | 'F') = self.peek_char() {
            self.advance(1);
        }

        Some(value)
    }
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn unescape(ch: char) -> char {
    match ch {
        'a' => '\u{0007}',
        'b' => '\u{0008}',
        'f' => '\u{000C}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{000B}',
        other => other,
    }
}

// ── Slice-based API ─────────────────────────────────────────────────

/// Split off an identifier; the identifier is empty when none is present.
pub fn identifier(input: &str) -> (&str, &str) {
    let mut cursor = Cursor::new(input);
    let ident = cursor.identifier();
    (ident, cursor.remaining())
}

pub fn string_literal(input: &str) -> Option<(String, &str)> {
    let mut cursor = Cursor::new(input);
    let value = cursor.string_literal()?;
    Some((value, cursor.remaining()))
}

pub fn integer_literal(input: &str) -> Option<(i64, &str)> {
    let mut cursor = Cursor::new(input);
    let value = cursor.integer_literal()?;
    Some((value, cursor.remaining()))
}

pub fn float_literal(input: &str) -> Option<(f32, &str)> {
    let mut cursor = Cursor::new(input);
    let value = cursor.float_literal()?;
    Some((value, cursor.remaining()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_counts_characters() {
        let mut cursor = Cursor::new("é \"x\"");
        assert!(cursor.eat_char('é'));
        assert_eq!(cursor.pos(), 2);
        assert_eq!(cursor.column(), 1);
    }

    #[test]
    fn skip_ws_accepts_unicode_spaces() {
        let mut cursor = Cursor::new("\u{3000}\t 42");
        cursor.skip_ws();
        assert_eq!(cursor.remaining(), "42");
    }

    #[test]
    fn octal_zero_stops_at_non_octal_digit() {
        assert_eq!(integer_literal("08"), Some((0, "8")));
        assert_eq!(integer_literal("0x"), None);
    }

    #[test]
    fn single_suffix_character() {
        assert_eq!(integer_literal("1ul"), Some((1, "l")));
        assert_eq!(float_literal("1.5ff"), Some((1.5, "f")));
    }

    #[test]
    fn backslash_at_end_is_unterminated() {
        assert_eq!(string_literal("\"abc\\"), None);
    }
}
