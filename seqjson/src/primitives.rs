//! Element codecs for scalar types
//!
//! Every scalar codec decodes `null` into the type's default value.

use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

use num_traits::{Float, PrimInt};

use crate::codec::ElementCodec;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::reader::Reader;
use crate::stream::Stream;

/// Codec for the primitive integer types.
#[derive(Debug, Clone, Copy)]
pub struct IntCodec<T>(PhantomData<fn() -> T>);

impl<T> IntCodec<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for IntCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PrimInt + Display + Default> ElementCodec<T> for IntCodec<T> {
    fn type_name(&self) -> &str {
        std::any::type_name::<T>()
    }

    fn encode(&self, value: &T, stream: &mut Stream) -> Result<()> {
        stream.write_int(*value);
        Ok(())
    }

    fn decode(&self, slot: &mut T, reader: &mut Reader<'_>) -> Result<()> {
        *slot = if reader.read_nil()? {
            T::default()
        } else {
            reader.read_int()?
        };
        Ok(())
    }

    fn is_empty(&self, value: &T) -> bool {
        value.is_zero()
    }
}

/// Codec for `f32` and `f64`.
#[derive(Debug, Clone, Copy)]
pub struct FloatCodec<T> {
    lossy: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T> FloatCodec<T> {
    /// Creates a codec honouring `config.lossy_floats()`.
    pub fn new(config: &Config) -> Self {
        Self {
            lossy: config.lossy_floats(),
            _marker: PhantomData,
        }
    }
}

impl<T: Float + Display + FromStr + Default> ElementCodec<T> for FloatCodec<T> {
    fn type_name(&self) -> &str {
        std::any::type_name::<T>()
    }

    fn encode(&self, value: &T, stream: &mut Stream) -> Result<()> {
        if self.lossy {
            stream.write_float_lossy(*value)
        } else {
            stream.write_float(*value)
        }
    }

    fn decode(&self, slot: &mut T, reader: &mut Reader<'_>) -> Result<()> {
        if reader.read_nil()? {
            *slot = T::default();
            return Ok(());
        }
        let offset = reader.offset();
        let value: T = reader.read_float()?;
        // Out-of-range literals parse to infinity, which cannot be written back.
        if !value.is_finite() {
            return Err(Error::Overflow {
                context: "ReadFloat",
                type_name: std::any::type_name::<T>(),
                offset,
            });
        }
        *slot = value;
        Ok(())
    }

    fn is_empty(&self, value: &T) -> bool {
        value.is_zero()
    }
}

/// Codec for `bool`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolCodec;

impl ElementCodec<bool> for BoolCodec {
    fn type_name(&self) -> &str {
        "bool"
    }

    fn encode(&self, value: &bool, stream: &mut Stream) -> Result<()> {
        stream.write_bool(*value);
        Ok(())
    }

    fn decode(&self, slot: &mut bool, reader: &mut Reader<'_>) -> Result<()> {
        *slot = !reader.read_nil()? && reader.read_bool()?;
        Ok(())
    }

    fn is_empty(&self, value: &bool) -> bool {
        !*value
    }
}

/// Codec for `String`.
#[derive(Debug, Clone, Copy)]
pub struct StringCodec {
    escape_html: bool,
}

impl StringCodec {
    /// Creates a codec honouring `config.escape_html()`.
    pub fn new(config: &Config) -> Self {
        Self {
            escape_html: config.escape_html(),
        }
    }
}

impl ElementCodec<String> for StringCodec {
    fn type_name(&self) -> &str {
        "String"
    }

    fn encode(&self, value: &String, stream: &mut Stream) -> Result<()> {
        stream.write_string(value, self.escape_html);
        Ok(())
    }

    fn decode(&self, slot: &mut String, reader: &mut Reader<'_>) -> Result<()> {
        if reader.read_nil()? {
            slot.clear();
            return Ok(());
        }
        reader.read_string_into(slot)
    }

    fn is_empty(&self, value: &String) -> bool {
        value.is_empty()
    }
}
