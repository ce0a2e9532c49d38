//! Per-element codec trait
//!
//! An [`ElementCodec`] knows how to write and read exactly one value of a
//! fixed type. Codecs are bound once when a sequence codec is constructed and
//! are shared read-only afterwards.

use crate::error::Result;
use crate::reader::Reader;
use crate::stream::Stream;

/// Encodes and decodes one value of type `T`.
///
/// Implementations receive the value (or the slot to decode into) for the
/// duration of a single call only. Slots handed to [`ElementCodec::decode`]
/// may hold a stale value from an earlier decode; implementations overwrite
/// it and may reuse any allocation it owns.
pub trait ElementCodec<T>: Send + Sync {
    /// Type name used when attributing errors, e.g. `i64` or `[]String`.
    fn type_name(&self) -> &str;

    /// Writes `value` to `stream`.
    fn encode(&self, value: &T, stream: &mut Stream) -> Result<()>;

    /// Reads one value from `reader` into `slot`.
    fn decode(&self, slot: &mut T, reader: &mut Reader<'_>) -> Result<()>;

    /// Returns true if `value` is the "empty" value for its type.
    ///
    /// Callers that omit empty fields use this; it never affects encoding.
    fn is_empty(&self, value: &T) -> bool;
}
