use std::ops::Range;

#[cfg(feature = "serde")]
mod serde;

/// Horizontal run of surface columns between two drag endpoints.
///
/// Spans produced by [`PixelSpan::from_endpoints`] are normalized so that
/// `min <= max`. Editing one edge with [`PixelSpan::with_min`] or
/// [`PixelSpan::with_max`] can cross the other; call
/// [`PixelSpan::normalized`] afterwards to reorder them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSpan {
    min: i32,
    max: i32,
}

impl PixelSpan {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Span between two drag endpoints, in either order.
    pub fn from_endpoints(a: i32, b: i32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn with_min(self, min: i32) -> Self {
        Self { min, ..self }
    }

    pub fn with_max(self, max: i32) -> Self {
        Self { max, ..self }
    }

    /// Reorders the edges after one of them was moved past the other.
    pub fn normalized(self) -> Self {
        Self::from_endpoints(self.min, self.max)
    }

    /// Width in columns, zero for inverted spans.
    pub fn width(&self) -> u32 {
        self.max.saturating_sub(self.min).max(0) as u32
    }

    pub fn contains(&self, x: i32) -> bool {
        x >= self.min && x <= self.max
    }

    pub fn as_range(&self) -> Range<i32> {
        self.min..self.max
    }
}

/// Pointer position in the same coordinate space as the spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerPos {
    pub x: i32,
    pub y: i32,
}

impl PointerPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
