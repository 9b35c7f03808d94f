/// Width of the sidebar panel in pixels.
pub const SIDEBAR_WIDTH: f32 = 300.0;

/// Outline thickness of the frame overlay.
pub const FRAME_STROKE_WIDTH: f32 = 12.0;

/// Font size of the "Image i of n" counter.
pub const COUNTER_FONT_SIZE: f32 = 20.0;

pub const INFO_TOAST_SECONDS: f64 = 4.0;
pub const ERROR_TOAST_SECONDS: f64 = 10.0;

/// Help text shown in the sidebar.
pub const CONTROLS_HELP: &str = "\
- Scroll Wheel: Zoom in/out.

- Shift: Toggle frame between square and vertical.

- Left Click: Save trim and move to next image.

- Ctrl+Left Click: Save trim without changing image.

- Ctrl+Scroll: Faster/slower zoom.

- Esc: Minimizes.";
