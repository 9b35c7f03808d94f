//! Coordinate conversions between the display surface and the source image.
//!
//! Two spaces are involved:
//! - display space: egui logical pixels, origin at the top-left of the window;
//! - source space: pixels of the loaded (possibly upscaled) source image.
//!
//! The source is drawn at `source_size * zoom`, centered in the viewport, so a
//! display point `p` corresponds to source point `(p - image_origin) / zoom`.

use eframe::egui::{Pos2, Rect, Vec2};

/// Display size of a source of `source_size` pixels at `zoom`.
pub fn scaled_size(source_size: Vec2, zoom: f32) -> Vec2 {
    source_size * zoom
}

/// Top-left corner that centers something of `size` inside `viewport`.
pub fn centered_origin(viewport: Rect, size: Vec2) -> Pos2 {
    viewport.center() - size / 2.0
}

/// Clamps `value` into `lo..=hi`, pinning to `lo` when the range is empty
/// or either bound is NaN.
fn clamp_axis(value: f32, lo: f32, hi: f32) -> f32 {
    if !(hi >= lo) { lo } else { value.clamp(lo, hi) }
}

/// Top-left of a frame of `frame_size` centered on `pointer`, pushed back
/// inside `image` so that the whole frame is covered by the image.
pub fn clamp_frame_origin(pointer: Pos2, frame_size: Vec2, image: Rect) -> Pos2 {
    let wanted = pointer - frame_size / 2.0;
    Pos2::new(
        clamp_axis(wanted.x, image.min.x, image.max.x - frame_size.x),
        clamp_axis(wanted.y, image.min.y, image.max.y - frame_size.y),
    )
}

/// A rectangle in source-image pixels, before rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SourceRect {
    /// Rounds to whole pixels and clips to an image of `width` x `height`.
    ///
    /// The result always has at least one pixel on each side.
    pub fn to_pixels(&self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let width = width.max(1);
        let height = height.max(1);
        let x = (self.x.round().max(0.0) as u32).min(width - 1);
        let y = (self.y.round().max(0.0) as u32).min(height - 1);
        let w = (self.width.round().max(1.0) as u32).min(width - x);
        let h = (self.height.round().max(1.0) as u32).min(height - y);
        (x, y, w, h)
    }
}

/// Maps a frame drawn in display space back to source pixels by undoing the
/// centering offset and the zoom.
pub fn display_to_source(frame: Rect, image_origin: Pos2, zoom: f32) -> SourceRect {
    SourceRect {
        x: (frame.min.x - image_origin.x) / zoom,
        y: (frame.min.y - image_origin.y) / zoom,
        width: frame.width() / zoom,
        height: frame.height() / zoom,
    }
}

/// Where the image and the frame end up on screen for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayGeometry {
    /// Scaled image, centered in the viewport.
    pub image_rect: Rect,
    /// Frame overlay, always inside `image_rect` when the image is large enough.
    pub frame_rect: Rect,
    pub zoom: f32,
}

impl DisplayGeometry {
    /// Lays out the image and the frame.
    ///
    /// Without a pointer position the frame follows the viewport center.
    pub fn compute(
        viewport: Rect,
        source_size: Vec2,
        zoom: f32,
        frame_size: Vec2,
        pointer: Option<Pos2>,
    ) -> Self {
        let size = scaled_size(source_size, zoom);
        let image_rect = Rect::from_min_size(centered_origin(viewport, size), size);
        let anchor = pointer.unwrap_or_else(|| viewport.center());
        let frame_origin = clamp_frame_origin(anchor, frame_size, image_rect);
        Self {
            image_rect,
            frame_rect: Rect::from_min_size(frame_origin, frame_size),
            zoom,
        }
    }

    /// The frame expressed in source pixels.
    pub fn crop_rect(&self) -> SourceRect {
        display_to_source(self.frame_rect, self.image_rect.min, self.zoom)
    }
}
