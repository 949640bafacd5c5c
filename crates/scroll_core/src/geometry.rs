/// Scroll geometry sampled along the scroll axis during one layout pass.
///
/// Extents are clamped to be non-negative on construction; the offset is left
/// signed because overscroll past the leading edge reports negative values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeometrySnapshot {
    offset: f64,
    content_extent: f64,
    viewport_extent: f64,
}

impl GeometrySnapshot {
    pub fn new(offset: f64, content_extent: f64, viewport_extent: f64) -> Self {
        Self {
            offset,
            content_extent: content_extent.max(0.0),
            viewport_extent: viewport_extent.max(0.0),
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn content_extent(&self) -> f64 {
        self.content_extent
    }

    pub fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    /// False until the host has measured a viewport.
    pub fn is_measured(&self) -> bool {
        self.viewport_extent > 0.0
    }

    /// Distance between the trailing edge of the viewport and the end of the content.
    pub fn remaining_to_end(&self) -> f64 {
        self.content_extent - self.viewport_extent - self.offset
    }

    /// Largest offset that still keeps the viewport filled with content.
    pub fn end_offset(&self) -> f64 {
        (self.content_extent - self.viewport_extent).max(0.0)
    }

    /// Signed overscroll past the leading edge; positive while pulled down.
    pub fn leading_overscroll(&self) -> f64 {
        -self.offset
    }

    pub fn with_offset(self, offset: f64) -> Self {
        Self { offset, ..self }
    }
}

/// Which end of the content a load appends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LoadEdge {
    /// Older content prepended above the current position.
    Start,
    /// Newer content appended below the current position.
    End,
}

impl LoadEdge {
    pub(crate) fn index(self) -> usize {
        match self {
            LoadEdge::Start => 0,
            LoadEdge::End => 1,
        }
    }
}
