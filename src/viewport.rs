//! View state (zoom, zoom step, frame shape, pointer) and its pure reducer.

use crate::config::Settings;
use crate::geometry::DisplayGeometry;
use eframe::egui::{Pos2, Rect, Vec2, vec2};

/// The two frame presets. Both share the configured width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrameShape {
    #[default]
    Portrait,
    Square,
}

impl FrameShape {
    pub fn toggled(self) -> Self {
        match self {
            FrameShape::Portrait => FrameShape::Square,
            FrameShape::Square => FrameShape::Portrait,
        }
    }

    /// Frame size in pixels; also the size of every saved crop.
    pub fn pixel_size(self, settings: &Settings) -> (u32, u32) {
        match self {
            FrameShape::Portrait => (settings.frame_width, settings.portrait_height),
            FrameShape::Square => (settings.frame_width, settings.square_height),
        }
    }

    pub fn size(self, settings: &Settings) -> Vec2 {
        let (width, height) = self.pixel_size(settings);
        vec2(width as f32, height as f32)
    }

    pub fn label(self) -> &'static str {
        match self {
            FrameShape::Portrait => "Portrait",
            FrameShape::Square => "Square",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    In,
    Out,
}

impl ScrollDirection {
    /// Positive deltas (wheel away from the user) zoom in.
    pub fn from_delta(delta: f32) -> Option<Self> {
        if delta > 0.0 {
            Some(ScrollDirection::In)
        } else if delta < 0.0 {
            Some(ScrollDirection::Out)
        } else {
            None
        }
    }
}

/// Inputs that only change how the current image is viewed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewEvent {
    PointerMoved(Pos2),
    Scroll(ScrollDirection),
    /// Tunes the zoom step, then zooms in once at the new step.
    AcceleratedScroll(ScrollDirection),
    ToggleFrameShape,
    /// A new image was shown.
    Reset,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub zoom: f32,
    pub zoom_step: f32,
    pub frame_shape: FrameShape,
    /// Last pointer position over the canvas; the frame is centered on it.
    pub pointer: Option<Pos2>,
}

impl ViewState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            zoom: 1.0,
            zoom_step: settings.zoom_step,
            frame_shape: FrameShape::default(),
            pointer: None,
        }
    }

    pub fn frame_size(&self, settings: &Settings) -> Vec2 {
        self.frame_shape.size(settings)
    }

    /// Whether a source of `source_size` at `zoom` still covers the frame.
    fn frame_fits(&self, settings: &Settings, source_size: Vec2, zoom: f32) -> bool {
        let frame = self.frame_size(settings);
        source_size.x * zoom >= frame.x && source_size.y * zoom >= frame.y
    }

    /// Smallest zoom at which the frame fits inside the scaled source.
    fn min_zoom(&self, settings: &Settings, source_size: Vec2) -> f32 {
        let frame = self.frame_size(settings);
        if source_size.x <= 0.0 || source_size.y <= 0.0 {
            return self.zoom;
        }
        (frame.x / source_size.x).max(frame.y / source_size.y)
    }

    /// Raises the zoom just enough for the frame to fit, if it does not.
    fn fit_frame(mut self, settings: &Settings, source_size: Vec2) -> Self {
        if !self.frame_fits(settings, source_size, self.zoom) {
            self.zoom = self.zoom.max(self.min_zoom(settings, source_size));
        }
        self
    }

    /// Multiplies the zoom by the current step, up to `zoom_max` and only
    /// while the scaled source stays finite.
    fn zoom_in(&mut self, settings: &Settings, source_size: Vec2) {
        let candidate = (self.zoom * self.zoom_step).min(settings.zoom_max);
        if (source_size * candidate).is_finite() {
            self.zoom = candidate;
        }
    }

    /// Applies one view event. `source_size` is the size of the loaded source
    /// in pixels.
    pub fn reduce(mut self, event: ViewEvent, settings: &Settings, source_size: Vec2) -> Self {
        match event {
            ViewEvent::PointerMoved(pos) => {
                self.pointer = Some(pos);
            }
            ViewEvent::Scroll(ScrollDirection::In) => {
                self.zoom_in(settings, source_size);
            }
            ViewEvent::Scroll(ScrollDirection::Out) => {
                let candidate = self.zoom / self.zoom_step;
                if self.frame_fits(settings, source_size, candidate) {
                    self.zoom = candidate;
                }
            }
            ViewEvent::AcceleratedScroll(direction) => {
                self.zoom_step = match direction {
                    ScrollDirection::In => self.zoom_step + settings.zoom_step_increment,
                    ScrollDirection::Out => self.zoom_step - settings.zoom_step_increment,
                }
                .clamp(settings.zoom_step_min, settings.zoom_step_max);
                self.zoom_in(settings, source_size);
                log::debug!("Zoom step now {:.2}", self.zoom_step);
            }
            ViewEvent::ToggleFrameShape => {
                self.frame_shape = self.frame_shape.toggled();
            }
            ViewEvent::Reset => {
                self.zoom = 1.0;
            }
        }
        self.fit_frame(settings, source_size)
    }

    /// Lays out the source and the frame inside `viewport`.
    pub fn geometry(&self, settings: &Settings, viewport: Rect, source_size: Vec2) -> DisplayGeometry {
        DisplayGeometry::compute(
            viewport,
            source_size,
            self.zoom,
            self.frame_size(settings),
            self.pointer,
        )
    }
}
