use thiserror::Error;

use super::WidgetId;
use super::geometry::Axis;

/// Broad failure category, for callers that only care about the class of
/// mistake rather than the exact variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Misuse of the API: wrong widget, wrong frame, wrong target.
    Configuration,
    /// Content does not fit a frame's fixed bounds.
    SizeConstraint,
    /// Internal state disagreed with itself (e.g. two selected widgets).
    Consistency,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MenuError {
    #[error("widget {0:?} does not exist")]
    UnknownWidget(WidgetId),
    #[error("widget {0:?} is not a frame")]
    NotAFrame(WidgetId),
    #[error("widget {0:?} is not configured for this menu")]
    NotConfigured(WidgetId),
    #[error("frame {0:?} is not attached to the menu")]
    FrameDetached(WidgetId),
    #[error("frame {0:?} must be attached to the menu before it can be packed")]
    WidgetDetached(WidgetId),
    #[error("widget {0:?} is not in the menu")]
    NotInMenu(WidgetId),
    #[error("widget {widget:?} is already packed in frame {frame:?}")]
    AlreadyPacked { widget: WidgetId, frame: WidgetId },
    #[error("cannot pack frame {0:?} into itself or one of its descendants")]
    PackCycle(WidgetId),
    #[error("widget {widget:?} is not a direct child of frame {frame:?}")]
    NotDirectChild { widget: WidgetId, frame: WidgetId },
    #[error("frame {0:?} has no widgets")]
    EmptyFrame(WidgetId),
    #[error("frame {0:?} does not accept a title")]
    TitleRejected(WidgetId),
    #[error("cannot move widget {0:?} to the requested position")]
    InvalidMove(WidgetId),
    #[error("widget {0:?} cannot be selected")]
    NotSelectable(WidgetId),
    #[error("invalid frame size: {0}")]
    InvalidFrameSize(String),
    #[error("{widgets} widgets do not fit in {columns} columns of {rows} rows")]
    ColumnOverflow {
        widgets: usize,
        columns: usize,
        rows: usize,
    },
    #[error(
        "frame {frame:?} needs {required:.1}px along {axis:?} but only {available:.1}px are available"
    )]
    FrameSize {
        frame: WidgetId,
        axis: Axis,
        required: f32,
        available: f32,
    },
    #[error("more than one widget is selected: {0:?}")]
    MultipleSelected(Vec<WidgetId>),
}

impl MenuError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MenuError::FrameSize { .. } => ErrorKind::SizeConstraint,
            MenuError::MultipleSelected(_) => ErrorKind::Consistency,
            _ => ErrorKind::Configuration,
        }
    }
}

pub type MenuResult<T> = Result<T, MenuError>;
