//! Sequence codec for JSON arrays
//!
//! This crate converts dynamically sized sequences ([`SequenceBuffer`]) to and
//! from JSON array text, keeping three states apart on every round trip:
//!
//! - absent: `null`, no allocation
//! - empty: `[]`, an allocated buffer with no elements
//! - populated: `[e0,e1,...]`
//!
//! Elements are handled by pluggable [`ElementCodec`] implementations bound
//! once when a [`SequenceCodec`] is constructed. Decoding grows the buffer in
//! place: a region of four slots is allocated up front, and longer sequences
//! grow by doubling below 1024 elements and by 25% above.
//!
//! # Features
//!
//! - `logging`: Enable `logger::init_logging` (tracing-subscriber + log bridge)
//!
//! # Example
//!
//! ```rust
//! use seqjson::{Config, IntCodec, Reader, SequenceBuffer, SequenceCodec, Stream};
//!
//! let config = Config::default();
//! let codec = SequenceCodec::new(IntCodec::<i32>::new());
//!
//! let mut buffer = SequenceBuffer::absent();
//! codec.decode(&mut buffer, &mut Reader::from_text("[1,2,3]"))?;
//! assert_eq!(buffer.as_slice(), &[1, 2, 3]);
//!
//! let mut stream = Stream::new(&config);
//! codec.encode(&buffer, &mut stream)?;
//! assert_eq!(stream.as_bytes(), b"[1,2,3]");
//! # Ok::<(), seqjson::Error>(())
//! ```
//!
//! `SequenceBuffer` also implements `serde::Serialize` and
//! `serde::Deserialize`, mapping absent to `None`.

mod api;
pub mod buffer;
pub mod codec;
mod config;
mod error;
pub mod growth;
#[cfg(feature = "logging")]
pub mod logger;
pub mod primitives;
pub mod reader;
pub mod sequence;
pub mod stream;

pub use api::{DefaultCodec, from_slice, from_str, to_string, to_vec};
pub use buffer::SequenceBuffer;
pub use codec::ElementCodec;
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use primitives::{BoolCodec, FloatCodec, IntCodec, StringCodec};
pub use reader::Reader;
pub use sequence::{PRESIZE_CAPACITY, SequenceCodec};
pub use stream::Stream;
