//! Input reader for JSON tokens.
//!
//! [`Reader`] walks a byte slice and exposes the framing probes the
//! sequence decoder drives ([`Reader::read_nil`], [`Reader::read_array_start`],
//! [`Reader::read_array_more`])
//! together with the scalar reads used by the bundled element codecs.

use std::str::FromStr;

use num_traits::{NumCast, PrimInt};

use crate::error::{Error, Result};

/// Cursor over JSON input.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a reader positioned at the start of `input`.
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Creates a reader over UTF-8 text.
    pub fn from_text(input: &'a str) -> Self {
        Self::new(input.as_bytes())
    }

    /// Byte offset of the next unread byte
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Unread input
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.input.get(self.pos) {
            self.pos += 1;
        }
    }

    /// Skips whitespace and returns the next byte without consuming it.
    fn peek_token(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.input.get(self.pos).copied()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let byte = self.input.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        byte
    }

    fn describe(byte: Option<u8>) -> String {
        match byte {
            Some(b) if b.is_ascii_graphic() => format!("'{}'", b as char),
            Some(b) => format!("byte 0x{b:02x}"),
            None => "end of input".to_string(),
        }
    }

    fn expect_literal(&mut self, context: &'static str, literal: &'static [u8]) -> Result<()> {
        let start = self.pos;
        if self.input[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            Ok(())
        } else {
            Err(Error::syntax(
                context,
                format!(
                    "expect {}, but found {}",
                    String::from_utf8_lossy(literal),
                    Self::describe(self.input.get(start).copied())
                ),
                start,
            ))
        }
    }

    /// Consumes a `null` token if one is next.
    ///
    /// Returns [`Error::Eof`] when no token is left at all.
    pub fn read_nil(&mut self) -> Result<bool> {
        match self.peek_token() {
            None => Err(Error::Eof),
            Some(b'n') => {
                self.expect_literal("ReadNil", b"null")?;
                Ok(true)
            }
            Some(_) => Ok(false),
        }
    }

    /// Opens an array.
    ///
    /// `true` means an element follows and the reader is positioned on it,
    /// `false` means the array was `[]` (both brackets consumed).
    pub fn read_array_start(&mut self) -> Result<bool> {
        match self.peek_token() {
            Some(b'[') => {
                self.pos += 1;
                if self.peek_token() == Some(b']') {
                    self.pos += 1;
                    return Ok(false);
                }
                Ok(true)
            }
            other => Err(Error::syntax(
                "ReadArray",
                format!("expect [, but found {}", Self::describe(other)),
                self.pos,
            )),
        }
    }

    /// Probes after an element: `,` means another element follows, `]`
    /// closes the array.
    pub fn read_array_more(&mut self) -> Result<bool> {
        match self.peek_token() {
            Some(b',') => {
                self.pos += 1;
                Ok(true)
            }
            Some(b']') => {
                self.pos += 1;
                Ok(false)
            }
            other => Err(Error::syntax(
                "ReadArray",
                format!("expect , or ], but found {}", Self::describe(other)),
                self.pos,
            )),
        }
    }

    /// Reads an integer token into `T`.
    pub fn read_int<T: PrimInt>(&mut self) -> Result<T> {
        let start = match self.peek_token() {
            Some(b'-' | b'0'..=b'9') => self.pos,
            other => {
                return Err(Error::syntax(
                    "ReadInt",
                    format!("expect digit or -, but found {}", Self::describe(other)),
                    self.pos,
                ));
            }
        };
        let negative = self.input[self.pos] == b'-';
        if negative {
            self.pos += 1;
        }
        let digits_start = self.pos;
        let mut magnitude: u128 = 0;
        let mut overflow = false;
        while let Some(&b @ b'0'..=b'9') = self.input.get(self.pos) {
            match magnitude
                .checked_mul(10)
                .and_then(|m| m.checked_add(<u128 as From<u8>>::from(b - b'0')))
            {
                Some(m) => magnitude = m,
                None => overflow = true,
            }
            self.pos += 1;
        }
        let digits = self.pos - digits_start;
        if digits == 0 {
            let found = Self::describe(self.input.get(self.pos).copied());
            return Err(Error::syntax(
                "ReadInt",
                format!("expect digit after -, but found {found}"),
                self.pos,
            ));
        }
        if digits > 1 && self.input[digits_start] == b'0' {
            return Err(Error::syntax("ReadInt", "leading zero in number", digits_start));
        }
        let value = if overflow {
            None
        } else if negative {
            i128::try_from(magnitude)
                .ok()
                .and_then(|m| m.checked_neg())
                .and_then(<T as NumCast>::from)
        } else {
            <T as NumCast>::from(magnitude)
        };
        value.ok_or(Error::Overflow {
            context: "ReadInt",
            type_name: std::any::type_name::<T>(),
            offset: start,
        })
    }

    /// Reads a number token and parses it as `T`.
    pub fn read_float<T: FromStr>(&mut self) -> Result<T> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E') = self.input.get(self.pos) {
            self.pos += 1;
        }
        let token = &self.input[start..self.pos];
        let valid = is_json_number(token);
        // Number tokens only ever contain ASCII.
        let text = std::str::from_utf8(token).unwrap_or_default();
        match text.parse::<T>() {
            Ok(value) if valid => Ok(value),
            _ => Err(Error::syntax(
                "ReadFloat",
                if token.is_empty() {
                    format!(
                        "expect number, but found {}",
                        Self::describe(self.input.get(start).copied())
                    )
                } else {
                    format!("invalid number {text:?}")
                },
                start,
            )),
        }
    }

    /// Reads `true` or `false`.
    pub fn read_bool(&mut self) -> Result<bool> {
        match self.peek_token() {
            Some(b't') => self.expect_literal("ReadBool", b"true").map(|_| true),
            Some(b'f') => self.expect_literal("ReadBool", b"false").map(|_| false),
            other => Err(Error::syntax(
                "ReadBool",
                format!("expect t or f, but found {}", Self::describe(other)),
                self.pos,
            )),
        }
    }

    /// Reads a quoted string into `out`, replacing its previous contents.
    pub fn read_string_into(&mut self, out: &mut String) -> Result<()> {
        let open = self.peek_token();
        if open != Some(b'"') {
            return Err(Error::syntax(
                "ReadString",
                format!("expects \" or n, but found {}", Self::describe(open)),
                self.pos,
            ));
        }
        let start = self.pos;
        self.pos += 1;
        let mut bytes = std::mem::take(out).into_bytes();
        bytes.clear();
        loop {
            let offset = self.pos;
            match self.next_byte() {
                None => {
                    return Err(Error::syntax("ReadString", "unterminated string", start));
                }
                Some(b'"') => break,
                Some(b'\\') => self.read_escape(&mut bytes)?,
                Some(b) if b < 0x20 => {
                    return Err(Error::syntax(
                        "ReadString",
                        format!("control character 0x{b:02x} in string"),
                        offset,
                    ));
                }
                Some(b) => bytes.push(b),
            }
        }
        *out = String::from_utf8(bytes)
            .map_err(|_| Error::syntax("ReadString", "invalid UTF-8 in string", start))?;
        Ok(())
    }

    /// Reads a quoted string.
    pub fn read_string(&mut self) -> Result<String> {
        let mut out = String::new();
        self.read_string_into(&mut out)?;
        Ok(out)
    }

    fn read_escape(&mut self, bytes: &mut Vec<u8>) -> Result<()> {
        let offset = self.pos;
        let decoded = match self.next_byte() {
            Some(b'"') => '"',
            Some(b'\\') => '\\',
            Some(b'/') => '/',
            Some(b'b') => '\u{08}',
            Some(b'f') => '\u{0c}',
            Some(b'n') => '\n',
            Some(b'r') => '\r',
            Some(b't') => '\t',
            Some(b'u') => self.read_unicode_escape()?,
            other => {
                return Err(Error::syntax(
                    "ReadString",
                    format!("invalid escape char after \\, found {}", Self::describe(other)),
                    offset,
                ));
            }
        };
        let mut utf8 = [0u8; 4];
        bytes.extend_from_slice(decoded.encode_utf8(&mut utf8).as_bytes());
        Ok(())
    }

    fn read_hex4(&mut self) -> Result<u32> {
        let offset = self.pos;
        let digits = self
            .input
            .get(self.pos..self.pos + 4)
            .filter(|d| d.iter().all(u8::is_ascii_hexdigit))
            .and_then(|d| std::str::from_utf8(d).ok())
            .and_then(|d| u32::from_str_radix(d, 16).ok())
            .ok_or_else(|| Error::syntax("ReadString", "expect 4 hex digits after \\u", offset))?;
        self.pos += 4;
        Ok(digits)
    }

    fn read_unicode_escape(&mut self) -> Result<char> {
        let first = self.read_hex4()?;
        if !(0xD800..0xDC00).contains(&first) {
            return Ok(char::from_u32(first).unwrap_or(char::REPLACEMENT_CHARACTER));
        }
        // High surrogate: combine with a following low surrogate if present.
        if self.input[self.pos..].starts_with(b"\\u") {
            let checkpoint = self.pos;
            self.pos += 2;
            let second = self.read_hex4()?;
            if (0xDC00..0xE000).contains(&second) {
                let combined = 0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00);
                return Ok(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            self.pos = checkpoint;
        }
        Ok(char::REPLACEMENT_CHARACTER)
    }

    /// Checks that only whitespace remains.
    pub fn finish(&mut self) -> Result<()> {
        match self.peek_token() {
            None => Ok(()),
            Some(_) => Err(Error::syntax(
                "Decode",
                "there are bytes left after decoding",
                self.pos,
            )),
        }
    }
}

/// JSON number grammar: `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`
fn is_json_number(token: &[u8]) -> bool {
    let mut rest = token;
    if let [b'-', tail @ ..] = rest {
        rest = tail;
    }
    let int_len = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    if int_len == 0 || (int_len > 1 && rest[0] == b'0') {
        return false;
    }
    rest = &rest[int_len..];
    if let [b'.', tail @ ..] = rest {
        let frac_len = tail.iter().take_while(|b| b.is_ascii_digit()).count();
        if frac_len == 0 {
            return false;
        }
        rest = &tail[frac_len..];
    }
    if let [b'e' | b'E', tail @ ..] = rest {
        let tail = match tail {
            [b'+' | b'-', t @ ..] => t,
            t => t,
        };
        let exp_len = tail.iter().take_while(|b| b.is_ascii_digit()).count();
        if exp_len == 0 {
            return false;
        }
        rest = &tail[exp_len..];
    }
    rest.is_empty()
}
