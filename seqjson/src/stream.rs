//! Output stream for JSON tokens.
//!
//! [`Stream`] accumulates encoded bytes in memory. Writing a token never
//! fails; errors only arise from values without a wire representation (see
//! [`Stream::write_float`]) and when flushing to an [`std::io::Write`] sink.

use std::fmt::Display;
use std::io::Write;

use num_traits::Float;

use crate::config::Config;
use crate::error::{Error, Result};

/// Buffered JSON token writer.
#[derive(Debug, Clone)]
pub struct Stream {
    buf: Vec<u8>,
    indent_step: usize,
    indention: usize,
}

impl Stream {
    /// Creates an empty stream using the layout options of `config`.
    pub fn new(config: &Config) -> Self {
        Self::with_capacity(config, 512)
    }

    /// Creates an empty stream with `capacity` bytes preallocated.
    pub fn with_capacity(config: &Config, capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            indent_step: config.indent_step(),
            indention: 0,
        }
    }

    /// Bytes written so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the stream, returning the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Consumes the stream, returning the encoded text.
    pub fn into_string(self) -> Result<String> {
        Ok(String::from_utf8(self.buf)?)
    }

    /// Discards buffered output and indentation state.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.indention = 0;
    }

    /// Writes buffered output to `writer` and clears the buffer.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.buf)?;
        writer.flush()?;
        self.buf.clear();
        Ok(())
    }

    /// Appends pre-encoded JSON text.
    pub fn write_raw(&mut self, raw: &str) {
        self.buf.extend_from_slice(raw.as_bytes());
    }

    /// Writes `null`.
    pub fn write_nil(&mut self) {
        self.write_raw("null");
    }

    /// Writes `[]`.
    pub fn write_empty_array(&mut self) {
        self.write_raw("[]");
    }

    /// Opens an array and increases the nesting level.
    pub fn write_array_start(&mut self) {
        self.indention += self.indent_step;
        self.buf.push(b'[');
        self.write_indention(0);
    }

    /// Writes the separator between two array elements.
    pub fn write_more(&mut self) {
        self.buf.push(b',');
        self.write_indention(0);
    }

    /// Closes an array opened with [`Stream::write_array_start`].
    pub fn write_array_end(&mut self) {
        self.write_indention(self.indent_step);
        self.indention = self.indention.saturating_sub(self.indent_step);
        self.buf.push(b']');
    }

    fn write_indention(&mut self, delta: usize) {
        if self.indent_step == 0 {
            return;
        }
        self.buf.push(b'\n');
        let spaces = self.indention.saturating_sub(delta);
        self.buf.resize(self.buf.len() + spaces, b' ');
    }

    fn write_display<D: Display>(&mut self, value: D) {
        // Writes into a Vec<u8> cannot fail.
        let _ = write!(self.buf, "{value}");
    }

    /// Writes an integer token.
    pub fn write_int<T: num_traits::PrimInt + Display>(&mut self, value: T) {
        self.write_display(value);
    }

    /// Writes `true` or `false`.
    pub fn write_bool(&mut self, value: bool) {
        self.write_raw(if value { "true" } else { "false" });
    }

    /// Writes a float with the shortest representation that round-trips.
    ///
    /// NaN and infinities have no JSON form and are rejected.
    pub fn write_float<T: Float + Display>(&mut self, value: T) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::UnsupportedValue(value.to_string()));
        }
        self.write_display(value);
        Ok(())
    }

    /// Writes a float rounded to at most six fractional digits.
    ///
    /// Magnitudes below `1e-6` keep their exact representation so they do
    /// not collapse to zero.
    pub fn write_float_lossy<T: Float + Display>(&mut self, value: T) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::UnsupportedValue(value.to_string()));
        }
        let abs = value.abs();
        let threshold = <T as num_traits::NumCast>::from(1e-6).unwrap_or_else(T::epsilon);
        if abs < threshold && !value.is_zero() {
            self.write_display(value);
            return Ok(());
        }
        let text = format!("{value:.6}");
        let trimmed = text.trim_end_matches('0').trim_end_matches('.');
        self.write_raw(trimmed);
        Ok(())
    }

    /// Writes a quoted string, escaping as required by JSON.
    ///
    /// When `escape_html` is set, `<`, `>`, `&`, U+2028 and U+2029 are
    /// written as `\u` escapes as well.
    pub fn write_string(&mut self, value: &str, escape_html: bool) {
        self.buf.push(b'"');
        let mut start = 0;
        for (index, ch) in value.char_indices() {
            let escape: Option<&str> = match ch {
                '"' => Some("\\\""),
                '\\' => Some("\\\\"),
                '\n' => Some("\\n"),
                '\r' => Some("\\r"),
                '\t' => Some("\\t"),
                '\u{08}' => Some("\\b"),
                '\u{0c}' => Some("\\f"),
                '<' if escape_html => Some("\\u003c"),
                '>' if escape_html => Some("\\u003e"),
                '&' if escape_html => Some("\\u0026"),
                '\u{2028}' if escape_html => Some("\\u2028"),
                '\u{2029}' if escape_html => Some("\\u2029"),
                c if (c as u32) < 0x20 => None,
                _ => continue,
            };
            self.buf.extend_from_slice(&value.as_bytes()[start..index]);
            match escape {
                Some(text) => self.write_raw(text),
                None => self.write_display(format_args!("\\u{:04x}", ch as u32)),
            }
            start = index + ch.len_utf8();
        }
        self.buf.extend_from_slice(&value.as_bytes()[start..]);
        self.buf.push(b'"');
    }
}
