//! Styling constants and colour conversion

use client_core::Rgba;
use iced::Color;

// Dimensions
pub const SQUARE_SIZE: f32 = 70.0;
pub const PANEL_WIDTH: f32 = 320.0;

pub const BOARD_BORDER: Color = Color::from_rgb(0.3, 0.3, 0.3);
pub const MODAL_BACKDROP: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.6);

pub fn to_color(rgba: Rgba) -> Color {
    Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a as f32 / 255.0)
}

/// Blend an overlay onto an opaque base colour
pub fn blend_colors(base: Color, overlay: Color) -> Color {
    let alpha = overlay.a;
    Color::from_rgb(
        base.r * (1.0 - alpha) + overlay.r * alpha,
        base.g * (1.0 - alpha) + overlay.g * alpha,
        base.b * (1.0 - alpha) + overlay.b * alpha,
    )
}
