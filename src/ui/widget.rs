use smallvec::SmallVec;

use super::WidgetId;
use super::frame::FrameData;
use super::geometry::Rect;

/// Flat enum widget identity.
/// Closed set: leaves only matter as packable items, frames carry the
/// container state.
#[derive(Debug, Clone)]
pub enum Widget {
    /// Selectable item with a title. Applying it fires its apply callback.
    Button { title: String },

    /// Static text. Never selectable.
    Label { text: String },

    /// Empty vertical spacer with zero width.
    VerticalMargin,

    /// Single-axis container (see `frame` module).
    Frame(Box<FrameData>),
}

impl Widget {
    pub fn is_frame(&self) -> bool {
        matches!(self, Widget::Frame(_))
    }

    /// Whether widgets of this kind can receive the selection.
    pub fn default_selectable(&self) -> bool {
        matches!(self, Widget::Button { .. })
    }

    pub fn as_frame(&self) -> Option<&FrameData> {
        match self {
            Widget::Frame(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_frame_mut(&mut self) -> Option<&mut FrameData> {
        match self {
            Widget::Frame(f) => Some(f),
            _ => None,
        }
    }

    /// Text shown for the widget, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Widget::Button { title } => Some(title),
            Widget::Label { text } => Some(text),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Listener table
// ---------------------------------------------------------------------------

pub type WidgetCallback = Box<dyn FnMut(WidgetId)>;
/// Receives the frame owning the title strip and the clicked button.
pub type TitleCallback = Box<dyn FnMut(WidgetId, WidgetId)>;
/// Receives the widget and its clipped on-screen rectangle.
pub type DrawCallback = Box<dyn FnMut(WidgetId, Rect)>;

/// Handle returned by `Menu::add_draw_callback`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(pub(crate) u64);

/// Callbacks registered on a single widget. Invoked synchronously by the
/// menu; they never receive the menu itself, so they cannot mutate the
/// tree while it is being walked.
#[derive(Default)]
pub struct Listeners {
    pub(crate) on_mouse_over: Option<WidgetCallback>,
    pub(crate) on_mouse_leave: Option<WidgetCallback>,
    pub(crate) on_apply: Option<WidgetCallback>,
    pub(crate) on_title_button: Option<TitleCallback>,
    pub(crate) on_draw: SmallVec<[(CallbackId, DrawCallback); 2]>,
}
