//! Backing storage for one sequence value.
//!
//! A [`SequenceBuffer`] is the triple (region, length, capacity). It has
//! three observable states:
//!
//! - **absent**: no region, encoded as `null`;
//! - **empty**: a region with zero logically present elements, encoded as `[]`;
//! - **populated**: `length >= 1` elements.
//!
//! The region is a boxed slice with one initialized slot per unit of
//! capacity. Slots past `length` hold default or stale values and are never
//! exposed through indexing, iteration or comparison.

use std::fmt;
use std::ops::{Index, IndexMut};

/// Dynamically sized, homogeneously typed sequence storage.
pub struct SequenceBuffer<T> {
    /// `None` iff capacity is zero. A present region has at least one slot.
    data: Option<Box<[T]>>,
    len: usize,
}

impl<T> SequenceBuffer<T> {
    /// Creates an absent sequence.
    pub const fn absent() -> Self {
        Self { data: None, len: 0 }
    }

    /// Returns true if the sequence holds no allocation (`null`).
    pub fn is_absent(&self) -> bool {
        self.data.is_none()
    }

    /// Number of logically present elements
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no element is present. Absent sequences are empty too.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated slots
    pub fn capacity(&self) -> usize {
        self.data.as_ref().map_or(0, |region| region.len())
    }

    /// Get a slice of the present elements
    pub fn as_slice(&self) -> &[T] {
        match &self.data {
            Some(region) => &region[..self.len],
            None => &[],
        }
    }

    /// Get a mutable slice of the present elements
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match &mut self.data {
            Some(region) => &mut region[..self.len],
            None => &mut [],
        }
    }

    /// Returns the elements, or `None` when absent.
    pub fn as_option(&self) -> Option<&[T]> {
        self.data.as_ref().map(|region| &region[..self.len])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Drops the region and returns to the absent state.
    pub fn release(&mut self) {
        self.data = None;
        self.len = 0;
    }

    /// Converts into a `Vec` of the present elements, `None` when absent.
    pub fn into_vec(self) -> Option<Vec<T>> {
        let len = self.len;
        self.data.map(|region| {
            let mut vec = region.into_vec();
            vec.truncate(len);
            vec
        })
    }

    /// All allocated slots, including those past `len`. Empty when absent.
    pub(crate) fn region_mut(&mut self) -> &mut [T] {
        self.data.as_deref_mut().unwrap_or_default()
    }

    pub(crate) fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.capacity());
        self.len = len;
    }

    /// Takes the region out, leaving the buffer absent.
    pub(crate) fn take_region(&mut self) -> Option<Box<[T]>> {
        self.len = 0;
        self.data.take()
    }

    pub(crate) fn adopt(&mut self, region: Box<[T]>, len: usize) {
        debug_assert!(!region.is_empty());
        debug_assert!(len <= region.len());
        self.data = Some(region);
        self.len = len;
    }
}

impl<T: Default> SequenceBuffer<T> {
    /// Creates an empty, allocated sequence.
    ///
    /// Allocates at least one slot so the result is distinct from absent.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.max(1));
        slots.resize_with(capacity.max(1), T::default);
        Self {
            data: Some(slots.into_boxed_slice()),
            len: 0,
        }
    }

    /// Takes ownership of `vec`'s elements as a populated (or empty) sequence.
    pub fn from_vec(vec: Vec<T>) -> Self {
        let len = vec.len();
        if len == 0 {
            return Self::with_capacity(1);
        }
        Self {
            data: Some(vec.into_boxed_slice()),
            len,
        }
    }
}

impl<T> Default for SequenceBuffer<T> {
    fn default() -> Self {
        Self::absent()
    }
}

impl<T> Index<usize> for SequenceBuffer<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for SequenceBuffer<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<'a, T> IntoIterator for &'a SequenceBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Default> From<Vec<T>> for SequenceBuffer<T> {
    fn from(vec: Vec<T>) -> Self {
        Self::from_vec(vec)
    }
}

impl<T: Default> From<Option<Vec<T>>> for SequenceBuffer<T> {
    fn from(vec: Option<Vec<T>>) -> Self {
        vec.map_or_else(Self::absent, Self::from_vec)
    }
}

impl<T: Default> FromIterator<T> for SequenceBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

// The whole region is cloned so capacity survives the copy.
impl<T: Clone> Clone for SequenceBuffer<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            len: self.len,
        }
    }
}

// Absent and empty never compare equal; otherwise elements are compared.
impl<T: PartialEq> PartialEq for SequenceBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_option() == other.as_option()
    }
}

impl<T: Eq> Eq for SequenceBuffer<T> {}

impl<T: fmt::Debug> fmt::Debug for SequenceBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_option() {
            None => f.write_str("SequenceBuffer(absent)"),
            Some(items) => f
                .debug_struct("SequenceBuffer")
                .field("len", &self.len)
                .field("capacity", &self.capacity())
                .field("items", &items)
                .finish(),
        }
    }
}

impl<T: serde::Serialize> serde::Serialize for SequenceBuffer<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self.as_option() {
            None => serializer.serialize_none(),
            Some(items) => serializer.collect_seq(items),
        }
    }
}

impl<'de, T: serde::Deserialize<'de> + Default> serde::Deserialize<'de> for SequenceBuffer<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let vec = Option::<Vec<T>>::deserialize(deserializer)?;
        Ok(Self::from(vec))
    }
}
