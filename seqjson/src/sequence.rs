//! Sequence encoder and decoder.
//!
//! [`SequenceCodec`] frames a [`SequenceBuffer`] as a JSON array and hands
//! each slot to the element codec it was constructed with.
//!
//! | Buffer state | Wire |
//! |---|---|
//! | absent | `null` |
//! | allocated, zero elements | `[]` |
//! | `n >= 1` elements | `[e0,e1,...]` |
//!
//! Errors leaving `encode`/`decode` are prefixed with the sequence type name
//! (`[]<element>`), except for the end-of-input sentinel [`Error::Eof`].

use std::sync::Arc;

use crate::buffer::SequenceBuffer;
use crate::codec::ElementCodec;
use crate::error::{Error, Result};
use crate::growth;
use crate::reader::Reader;
use crate::stream::Stream;

/// Capacity allocated before the first element is read.
///
/// Sequences of up to this many elements decode without any reallocation.
pub const PRESIZE_CAPACITY: usize = 4;

/// Codec for `SequenceBuffer<T>`.
pub struct SequenceCodec<T> {
    type_name: String,
    element: Arc<dyn ElementCodec<T>>,
}

impl<T> Clone for SequenceCodec<T> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name.clone(),
            element: Arc::clone(&self.element),
        }
    }
}

impl<T> std::fmt::Debug for SequenceCodec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceCodec")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

impl<T: Default + 'static> SequenceCodec<T> {
    /// Creates a sequence codec around `element`.
    pub fn new(element: impl ElementCodec<T> + 'static) -> Self {
        Self::from_shared(Arc::new(element))
    }

    /// Creates a sequence codec around an already shared element codec.
    pub fn from_shared(element: Arc<dyn ElementCodec<T>>) -> Self {
        Self {
            type_name: format!("[]{}", element.type_name()),
            element,
        }
    }

    /// Declared type name, e.g. `[]i64`.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns true when `buffer` holds no elements.
    pub fn is_empty(&self, buffer: &SequenceBuffer<T>) -> bool {
        buffer.is_empty()
    }

    /// Writes `buffer` to `stream` as `null`, `[]` or `[e0,...]`.
    pub fn encode(&self, buffer: &SequenceBuffer<T>, stream: &mut Stream) -> Result<()> {
        self.encode_elements(buffer, stream)
            .map_err(|err| err.attribute(&self.type_name))
    }

    fn encode_elements(&self, buffer: &SequenceBuffer<T>, stream: &mut Stream) -> Result<()> {
        let Some(items) = buffer.as_option() else {
            stream.write_nil();
            return Ok(());
        };
        let Some((first, rest)) = items.split_first() else {
            stream.write_empty_array();
            return Ok(());
        };
        stream.write_array_start();
        self.element.encode(first, stream)?;
        for item in rest {
            stream.write_more();
            self.element.encode(item, stream)?;
        }
        stream.write_array_end();
        Ok(())
    }

    /// Reads an array (or `null`) from `reader` into `buffer`.
    ///
    /// `null` releases the buffer's allocation. Otherwise the existing
    /// allocation is reused when it has at least [`PRESIZE_CAPACITY`]
    /// slots, and previously decoded values in those slots are overwritten.
    /// On error `buffer.len()` counts the fully decoded elements.
    pub fn decode(&self, buffer: &mut SequenceBuffer<T>, reader: &mut Reader<'_>) -> Result<()> {
        self.decode_elements(buffer, reader)
            .map_err(|err| err.attribute(&self.type_name))
    }

    fn decode_elements(&self, buffer: &mut SequenceBuffer<T>, reader: &mut Reader<'_>) -> Result<()> {
        if reader.read_nil()? {
            if !buffer.is_absent() {
                tracing::debug!(
                    type_name = %self.type_name,
                    capacity = buffer.capacity(),
                    "null input, releasing sequence buffer"
                );
            }
            buffer.release();
            return Ok(());
        }
        growth::presize(buffer, PRESIZE_CAPACITY);
        buffer.set_len(0);
        if !reader.read_array_start()? {
            return Ok(());
        }

        // The pre-sized slots need no capacity check.
        for index in 0..PRESIZE_CAPACITY {
            self.decode_element(&mut buffer.region_mut()[index], reader)?;
            buffer.set_len(index + 1);
            if !reader.read_array_more()? {
                return Ok(());
            }
        }

        loop {
            growth::grow_by_one(buffer);
            let last = buffer.len() - 1;
            if let Err(err) = self.decode_element(&mut buffer[last], reader) {
                buffer.set_len(last);
                return Err(err);
            }
            if !reader.read_array_more()? {
                return Ok(());
            }
        }
    }

    fn decode_element(&self, slot: &mut T, reader: &mut Reader<'_>) -> Result<()> {
        match self.element.decode(slot, reader) {
            // Running out of input after a separator is a truncated array,
            // not a clean end of input.
            Err(err) if err.is_eof() => Err(Error::syntax(
                "ReadArray",
                "unexpected end of input, expect array element",
                reader.offset(),
            )),
            other => other,
        }
    }
}

impl<T: Default + 'static> ElementCodec<SequenceBuffer<T>> for SequenceCodec<T> {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn encode(&self, value: &SequenceBuffer<T>, stream: &mut Stream) -> Result<()> {
        SequenceCodec::encode(self, value, stream)
    }

    fn decode(&self, slot: &mut SequenceBuffer<T>, reader: &mut Reader<'_>) -> Result<()> {
        SequenceCodec::decode(self, slot, reader)
    }

    fn is_empty(&self, value: &SequenceBuffer<T>) -> bool {
        SequenceCodec::is_empty(self, value)
    }
}
