//! Growth policy for [`SequenceBuffer`].
//!
//! Capacity doubles while the sequence is shorter than [`GROWTH_THRESHOLD`]
//! elements and grows by 25% afterwards, which bounds the slack kept around
//! large sequences while keeping appends amortized O(1).

use crate::buffer::SequenceBuffer;

/// Length at which growth switches from doubling to 25% steps.
pub const GROWTH_THRESHOLD: usize = 1024;

/// Computes the capacity to allocate so that `required` slots fit.
///
/// Starts from `capacity` (1 when unallocated). The result saturates at
/// `usize::MAX`; such an allocation fails fatally.
pub fn next_capacity(len: usize, capacity: usize, required: usize) -> usize {
    let mut new_capacity = capacity.max(1);
    while new_capacity < required {
        let step = if len < GROWTH_THRESHOLD {
            new_capacity
        } else {
            (new_capacity / 4).max(1)
        };
        new_capacity = new_capacity.saturating_add(step);
    }
    new_capacity
}

/// Makes room for one more element and increments the length.
///
/// Reallocates only when the region is full. On reallocation the present
/// elements move into the new region in order; stale slots are dropped.
pub fn grow_by_one<T: Default>(buffer: &mut SequenceBuffer<T>) {
    let len = buffer.len();
    let capacity = buffer.capacity();
    if len < capacity {
        buffer.set_len(len + 1);
        return;
    }
    let new_capacity = next_capacity(len, capacity, len + 1);
    tracing::trace!(len, capacity, new_capacity, "reallocating sequence buffer");

    let mut region = buffer
        .take_region()
        .map(<[T]>::into_vec)
        .unwrap_or_default();
    region.truncate(len);
    region.reserve_exact(new_capacity - len);
    region.resize_with(new_capacity, T::default);
    buffer.adopt(region.into_boxed_slice(), len + 1);
}

/// Ensures at least `minimum` slots are allocated.
///
/// A larger region replaces the current one without copying, so this is only
/// meant for buffers whose contents are about to be overwritten. The length
/// is reset to zero in that case.
pub fn presize<T: Default>(buffer: &mut SequenceBuffer<T>, minimum: usize) {
    if minimum <= buffer.capacity() {
        return;
    }
    tracing::trace!(
        capacity = buffer.capacity(),
        minimum,
        "pre-sizing sequence buffer"
    );
    let mut region = Vec::with_capacity(minimum);
    region.resize_with(minimum, T::default);
    buffer.adopt(region.into_boxed_slice(), 0);
}
