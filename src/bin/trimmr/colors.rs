//! Color constants for the canvas and frame overlay.

use eframe::egui::Color32;

// Frame overlay
pub const FRAME_STROKE: Color32 = Color32::from_rgb(50, 205, 50);

// Canvas
pub const CANVAS_BACKGROUND: Color32 = Color32::BLACK;
pub const CANVAS_HINT_TEXT: Color32 = Color32::from_rgb(160, 160, 160);
