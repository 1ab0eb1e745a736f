// src/geometry.rs
//
// Maps normalized region boxes onto the rendered image surface. All
// functions are pure: identical inputs always produce identical output,
// and nothing here caches or touches the DOM. Callers own the measured
// geometry and must not ask for anchors before a measurement exists.

use crate::annotation::RegionBox;

/// On-screen size of the rendered image, in CSS pixels. Re-measured on
/// image load and on viewport resize, never per highlight change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedSize {
    pub width: f64,
    pub height: f64,
}

impl RenderedSize {
    /// A zero-area measurement means the image is not laid out yet and
    /// must be treated as "not measured".
    pub fn from_measurement(width: f64, height: f64) -> Option<Self> {
        (width > 0.0 && height > 0.0).then_some(Self { width, height })
    }
}

/// Pixel position of a region marker within the rendered image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerAnchor {
    pub left: f64,
    pub top: f64,
}

/// Anchor a marker at the top-right corner of its box: `top` from `ymin`,
/// `left` from `xmax`. Corner anchoring keeps overlapping regions
/// distinguishable where a center anchor would stack markers.
pub fn marker_anchor(bbox: &RegionBox, size: RenderedSize) -> MarkerAnchor {
    MarkerAnchor {
        left: bbox.xmax * size.width,
        top: bbox.ymin * size.height,
    }
}

/// Horizontal center for a tooltip of `tooltip_width`, pulled inside the
/// container so the tooltip never overflows either edge. When the
/// container is narrower than the tooltip, center on the container.
pub fn clamped_tooltip_left(anchor_left: f64, tooltip_width: f64, container_width: f64) -> f64 {
    let half = tooltip_width / 2.0;
    if container_width <= tooltip_width {
        return container_width / 2.0;
    }
    anchor_left.clamp(half, container_width - half)
}
