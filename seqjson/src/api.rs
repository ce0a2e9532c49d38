//! Default codec resolution and one-shot helpers.
//!
//! [`DefaultCodec`] maps a Rust type to the codec used for it. Resolution
//! happens once, when the codec is built; the returned handle is then reused
//! for every value.
//!
//! ```rust
//! use seqjson::{Config, SequenceBuffer};
//!
//! let config = Config::default();
//! let text = seqjson::to_string(&config, &SequenceBuffer::from_vec(vec![1i64, 2, 3]))?;
//! assert_eq!(text, "[1,2,3]");
//!
//! let mut decoded = SequenceBuffer::<i64>::absent();
//! seqjson::from_str(&config, &text, &mut decoded)?;
//! assert_eq!(decoded.as_slice(), &[1, 2, 3]);
//! # Ok::<(), seqjson::Error>(())
//! ```

use std::sync::Arc;

use crate::buffer::SequenceBuffer;
use crate::codec::ElementCodec;
use crate::config::Config;
use crate::error::Result;
use crate::primitives::{BoolCodec, FloatCodec, IntCodec, StringCodec};
use crate::reader::Reader;
use crate::sequence::SequenceCodec;
use crate::stream::Stream;

/// Types with a codec resolved from a [`Config`].
pub trait DefaultCodec: Sized + Default + 'static {
    /// Builds the codec for `Self`.
    fn codec(config: &Config) -> Arc<dyn ElementCodec<Self>>;
}

macro_rules! impl_int_codec {
    ($($ty:ty),*) => {
        $(
            impl DefaultCodec for $ty {
                fn codec(_config: &Config) -> Arc<dyn ElementCodec<Self>> {
                    Arc::new(IntCodec::<$ty>::new())
                }
            }
        )*
    };
}

impl_int_codec!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl DefaultCodec for f32 {
    fn codec(config: &Config) -> Arc<dyn ElementCodec<Self>> {
        Arc::new(FloatCodec::<f32>::new(config))
    }
}

impl DefaultCodec for f64 {
    fn codec(config: &Config) -> Arc<dyn ElementCodec<Self>> {
        Arc::new(FloatCodec::<f64>::new(config))
    }
}

impl DefaultCodec for bool {
    fn codec(_config: &Config) -> Arc<dyn ElementCodec<Self>> {
        Arc::new(BoolCodec)
    }
}

impl DefaultCodec for String {
    fn codec(config: &Config) -> Arc<dyn ElementCodec<Self>> {
        Arc::new(StringCodec::new(config))
    }
}

impl<T: DefaultCodec> DefaultCodec for SequenceBuffer<T> {
    fn codec(config: &Config) -> Arc<dyn ElementCodec<Self>> {
        Arc::new(SequenceCodec::<T>::for_type(config))
    }
}

impl<T: DefaultCodec> SequenceCodec<T> {
    /// Creates the sequence codec for `[]T` using `T`'s default codec.
    pub fn for_type(config: &Config) -> Self {
        Self::from_shared(T::codec(config))
    }
}

/// Encodes `value` into a byte vector.
pub fn to_vec<T: DefaultCodec>(config: &Config, value: &T) -> Result<Vec<u8>> {
    let codec = T::codec(config);
    let mut stream = Stream::new(config);
    codec.encode(value, &mut stream)?;
    Ok(stream.into_bytes())
}

/// Encodes `value` into a string.
pub fn to_string<T: DefaultCodec>(config: &Config, value: &T) -> Result<String> {
    let codec = T::codec(config);
    let mut stream = Stream::new(config);
    codec.encode(value, &mut stream)?;
    stream.into_string()
}

/// Decodes `input` into `value`, reusing the allocations `value` owns.
///
/// Fails if anything but whitespace follows the decoded value.
pub fn from_slice<T: DefaultCodec>(config: &Config, input: &[u8], value: &mut T) -> Result<()> {
    let codec = T::codec(config);
    let mut reader = Reader::new(input);
    codec.decode(value, &mut reader)?;
    reader.finish()
}

/// Decodes `input` into `value`. See [`from_slice`].
pub fn from_str<T: DefaultCodec>(config: &Config, input: &str, value: &mut T) -> Result<()> {
    from_slice(config, input.as_bytes(), value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_type_names() {
        let config = Config::default();
        assert_eq!(SequenceBuffer::<u16>::codec(&config).type_name(), "[]u16");
        assert_eq!(
            SequenceBuffer::<SequenceBuffer<String>>::codec(&config).type_name(),
            "[][]String"
        );
    }

    #[test]
    fn test_to_string_with_indent() {
        let config = Config::builder().indent_step(2).build();
        let value = SequenceBuffer::from_vec(vec![true, false]);
        assert_eq!(to_string(&config, &value).unwrap(), "[\n  true,\n  false\n]");
    }

    #[test]
    fn test_from_str_rejects_trailing_bytes() {
        let config = Config::default();
        let mut value = SequenceBuffer::<i32>::absent();
        let err = from_str(&config, "[1] [2]", &mut value).unwrap_err();
        assert!(err.to_string().starts_with("Decode: there are bytes left"));
        assert_eq!(value.as_slice(), &[1]);
    }

    #[test]
    fn test_to_vec_scalar() {
        assert_eq!(to_vec(&Config::default(), &42u32).unwrap(), b"42");
    }
}
