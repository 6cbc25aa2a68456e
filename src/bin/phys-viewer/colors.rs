//! Color constants for scene layers and UI elements.

use eframe::egui::Color32;

// Bodies
pub const BODY_FILL: Color32 = Color32::from_rgba_premultiplied(70, 130, 180, 160);
pub const BODY_STROKE: Color32 = Color32::from_rgb(176, 196, 222);
pub const STATIC_BODY_FILL: Color32 = Color32::from_rgba_premultiplied(90, 90, 90, 160);
pub const STATIC_BODY_STROKE: Color32 = Color32::from_rgb(160, 160, 160);

// Joints and debug layers
pub const JOINT: Color32 = Color32::from_rgb(255, 215, 0);
pub const AABB: Color32 = Color32::from_rgba_premultiplied(0, 200, 0, 200);
pub const CENTER: Color32 = Color32::from_rgb(255, 255, 255);
pub const CONTACT: Color32 = Color32::from_rgb(220, 20, 60);

// World reference lines
pub const AXIS: Color32 = Color32::from_rgb(200, 200, 200);
pub const GRID: Color32 = Color32::from_rgba_premultiplied(60, 60, 60, 120);
pub const GROUND: Color32 = Color32::from_rgb(139, 69, 19);

// Toggle swatches in the sidebar
pub const LAYER_SWATCH_STROKE: Color32 = Color32::GRAY;
