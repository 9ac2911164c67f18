use winit::event::{ElementState, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

pub use winit::event::MouseButton;

use super::geometry::{Size, Vec2};

/// Pixel wheel deltas are converted to lines at this rate.
const PIXELS_PER_LINE: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoyAxis {
    /// Positive is right.
    X,
    /// Positive is down.
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    /// Screen coordinates.
    MouseButtonDown { button: MouseButton, x: f32, y: f32 },
    MouseButtonUp { button: MouseButton, x: f32, y: f32 },
    MouseMotion { x: f32, y: f32 },
    /// Wheel lines; positive `dy` scrolls up.
    MouseWheel { dx: f32, dy: f32 },
    /// Touch coordinates are normalized to 0..=1 of the window size.
    TouchDown { x: f32, y: f32 },
    TouchUp { x: f32, y: f32 },
    TouchMotion { x: f32, y: f32 },
    /// Axis value in -1..=1.
    JoyAxisMotion { axis: JoyAxis, value: f32 },
    /// Hat direction; `y` is 1 for up.
    JoyHatMotion { x: i8, y: i8 },
    WindowActive(bool),
    CursorLeft,
}

/// Input event consumed by [`Menu::update`](super::Menu::update).
///
/// Test events bypass the inactive-window filter so scripted input stays
/// deterministic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub test: bool,
}

impl Event {
    pub fn new(kind: EventKind) -> Self {
        Self { kind, test: false }
    }

    pub fn test(kind: EventKind) -> Self {
        Self { kind, test: true }
    }

    pub fn key_down(key: KeyCode) -> Self {
        Self::new(EventKind::KeyDown(key))
    }

    pub fn mouse_down(x: f32, y: f32) -> Self {
        Self::new(EventKind::MouseButtonDown {
            button: MouseButton::Left,
            x,
            y,
        })
    }

    pub fn mouse_up(x: f32, y: f32) -> Self {
        Self::new(EventKind::MouseButtonUp {
            button: MouseButton::Left,
            x,
            y,
        })
    }

    pub fn motion(x: f32, y: f32) -> Self {
        Self::new(EventKind::MouseMotion { x, y })
    }

    pub fn wheel(dy: f32) -> Self {
        Self::new(EventKind::MouseWheel { dx: 0.0, dy })
    }

    /// Same event, flagged as a test event.
    pub fn as_test(mut self) -> Self {
        self.test = true;
        self
    }

    /// Pointer events are dropped while the window is inactive.
    pub(crate) fn is_pointer(&self) -> bool {
        matches!(
            self.kind,
            EventKind::MouseButtonDown { .. }
                | EventKind::MouseButtonUp { .. }
                | EventKind::MouseMotion { .. }
                | EventKind::MouseWheel { .. }
                | EventKind::TouchDown { .. }
                | EventKind::TouchUp { .. }
                | EventKind::TouchMotion { .. }
        )
    }

    /// Convert a winit window event. `cursor` is the last known pointer
    /// position (button events carry none); `window` is the inner size in
    /// physical pixels, used to normalize touch input.
    pub fn from_window_event(event: &WindowEvent, cursor: Vec2, window: Size) -> Option<Self> {
        let kind = match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return None;
                };
                match event.state {
                    ElementState::Pressed => EventKind::KeyDown(key),
                    ElementState::Released => EventKind::KeyUp(key),
                }
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => EventKind::MouseButtonDown {
                    button: *button,
                    x: cursor.x,
                    y: cursor.y,
                },
                ElementState::Released => EventKind::MouseButtonUp {
                    button: *button,
                    x: cursor.x,
                    y: cursor.y,
                },
            },
            WindowEvent::CursorMoved { position, .. } => EventKind::MouseMotion {
                x: position.x as f32,
                y: position.y as f32,
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let (dx, dy) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                    MouseScrollDelta::PixelDelta(p) => {
                        (p.x as f32 / PIXELS_PER_LINE, p.y as f32 / PIXELS_PER_LINE)
                    }
                };
                EventKind::MouseWheel { dx, dy }
            }
            WindowEvent::Touch(touch) => {
                let nx = if window.width > 0.0 {
                    touch.location.x as f32 / window.width
                } else {
                    0.0
                };
                let ny = if window.height > 0.0 {
                    touch.location.y as f32 / window.height
                } else {
                    0.0
                };
                match touch.phase {
                    TouchPhase::Started => EventKind::TouchDown { x: nx, y: ny },
                    TouchPhase::Moved => EventKind::TouchMotion { x: nx, y: ny },
                    TouchPhase::Ended | TouchPhase::Cancelled => EventKind::TouchUp { x: nx, y: ny },
                }
            }
            WindowEvent::Focused(active) => EventKind::WindowActive(*active),
            WindowEvent::CursorLeft { .. } => EventKind::CursorLeft,
            _ => return None,
        };
        Some(Self::new(kind))
    }
}
