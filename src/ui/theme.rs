use serde::Deserialize;

use super::frame::Align;
use super::geometry::{Size, Vec2};

/// Layout metrics shared by every widget in a menu.
///
/// Single theme per menu. Widgets read it at construction time (text
/// measurement) and at layout time (margins, scrollbar thickness).
/// Missing RON fields fall back to the defaults below.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Theme {
    // -- Top-level flow --
    /// Gap after each top-level widget: x between columns, y between rows.
    pub widget_margin: Vec2,
    /// Horizontal placement of top-level widgets inside their column.
    pub widget_alignment: Align,

    // -- Text measurement --
    /// Font size for buttons and labels, in pixels.
    pub font_size: f32,
    /// Average glyph advance as a fraction of the font size.
    pub glyph_width_factor: f32,
    /// Button internal horizontal padding in pixels.
    pub button_pad_h: f32,
    /// Button internal vertical padding in pixels.
    pub button_pad_v: f32,

    // -- Scrolling --
    /// Scrollbar thickness in pixels.
    pub scrollbar_thickness: f32,
    /// Minimum scrollbar thumb length in pixels.
    pub min_thumb_length: f32,
    /// Pixels scrolled per mouse wheel line.
    pub scroll_step: f32,

    // -- Joystick --
    /// Axis values with a smaller magnitude are ignored.
    pub joy_deadzone: f32,

    // -- Frame titles --
    /// Title label font size in pixels.
    pub title_font_size: f32,
    /// Padding around the title label and title buttons.
    pub title_padding: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            widget_margin: Vec2::new(0.0, 4.0),
            widget_alignment: Align::Center,

            font_size: 20.0,
            glyph_width_factor: 0.6,
            button_pad_h: 8.0,
            button_pad_v: 4.0,

            scrollbar_thickness: 10.0,
            min_thumb_length: 20.0,
            scroll_step: 40.0,

            joy_deadzone: 0.5,

            title_font_size: 18.0,
            title_padding: 4.0,
        }
    }
}

impl Theme {
    /// Approximate size of a single line of text, without padding.
    pub fn measure_text(&self, text: &str, font_size: f32) -> Size {
        Size::new(
            text.chars().count() as f32 * font_size * self.glyph_width_factor,
            font_size,
        )
    }

    pub fn button_size(&self, title: &str) -> Size {
        let text = self.measure_text(title, self.font_size);
        Size::new(
            text.width + self.button_pad_h * 2.0,
            text.height + self.button_pad_v * 2.0,
        )
    }

    pub fn label_size(&self, text: &str) -> Size {
        self.measure_text(text, self.font_size)
    }

    /// Height of a frame title strip.
    pub fn title_height(&self) -> f32 {
        self.title_font_size + self.title_padding * 2.0
    }
}

/// Menu-wide configuration: geometry and column layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Menu viewport size in pixels.
    pub width: f32,
    pub height: f32,
    /// Top-left corner of the menu viewport on screen.
    pub position: Vec2,
    /// Number of top-level columns.
    pub columns: usize,
    /// Rows per column. `None` with one column means unlimited.
    pub rows: Option<usize>,
    /// Hovering a selectable widget selects it.
    pub mouse_motion_selection: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 400.0,
            position: Vec2::ZERO,
            columns: 1,
            rows: None,
            mouse_motion_selection: false,
        }
    }
}

impl MenuConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
