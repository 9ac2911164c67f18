use super::geometry::{Axis, Rect};
use super::scroll::ScrollAreaId;
use super::widget::Widget;
use super::{CursorIcon, Menu, WidgetId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectKind {
    Frame,
    Button,
    TitleStrip,
    Scrollbar(Axis),
}

/// Intermediate draw command for a widget quad, in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCommand {
    pub widget: Option<WidgetId>,
    pub kind: RectKind,
    /// Unclipped screen rectangle.
    pub rect: Rect,
    /// Scissor rectangle for the quad.
    pub clip: Rect,
    pub selected: bool,
}

/// Text run emitted for a button, label or title.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub widget: WidgetId,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub clip: Rect,
}

/// Collects draw commands from the menu.
/// Decouples menu logic from whatever renders it.
#[derive(Debug, Default)]
pub struct DrawList {
    pub rects: Vec<RectCommand>,
    pub texts: Vec<TextCommand>,
    /// Four rectangles covering the menu around the selected widget.
    pub focus: Option<[Rect; 4]>,
    pub cursor: CursorIcon,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.rects.clear();
        self.texts.clear();
        self.focus = None;
    }
}

impl Menu {
    /// Fill `list` with the current frame. Draw callbacks fire with each
    /// widget's clipped rectangle, in draw order.
    pub fn draw(&mut self, list: &mut DrawList) {
        list.clear();
        for root in self.roots.clone() {
            self.draw_widget(root, list);
        }
        let root = self.root_area;
        self.draw_scrollbars(None, root, list);
        list.focus = self.selected.and_then(|s| self.focus_rects(s));
        list.cursor = self.cursor();
    }

    fn draw_widget(&mut self, id: WidgetId, list: &mut DrawList) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        if !node.visible {
            return;
        }
        let clip = self.absolute_view(node.area);
        let rect = self.to_screen(node.area, node.rect);
        let selected = node.selected;
        let font_size = self.theme.font_size;

        let mut children = Vec::new();
        let mut strip = None;
        let mut inner = None;
        match &node.widget {
            Widget::Button { title } => {
                list.rects.push(RectCommand {
                    widget: Some(id),
                    kind: RectKind::Button,
                    rect,
                    clip,
                    selected,
                });
                list.texts.push(self.centered_text(id, title, rect, clip, font_size));
            }
            Widget::Label { text } => {
                list.texts.push(self.centered_text(id, text, rect, clip, font_size));
            }
            Widget::VerticalMargin => {}
            Widget::Frame(data) => {
                let is_strip = node.title_of.is_some();
                list.rects.push(RectCommand {
                    widget: Some(id),
                    kind: if is_strip {
                        RectKind::TitleStrip
                    } else {
                        RectKind::Frame
                    },
                    rect,
                    clip,
                    selected: false,
                });
                strip = data.title.as_ref().map(|t| t.strip);
                children = data.children.iter().map(|c| c.id).collect();
                if data.is_scrollable_any() {
                    inner = data.inner_area;
                }
            }
        }

        let visible = rect.clip(&clip);
        if let Some(l) = self.listeners.get_mut(id) {
            for (_, cb) in l.on_draw.iter_mut() {
                cb(id, visible);
            }
        }

        if let Some(strip) = strip {
            self.draw_widget(strip, list);
        }
        for child in children {
            self.draw_widget(child, list);
        }
        if let Some(area) = inner {
            self.draw_scrollbars(Some(id), area, list);
        }
    }

    fn centered_text(
        &self,
        id: WidgetId,
        text: &str,
        rect: Rect,
        clip: Rect,
        font_size: f32,
    ) -> TextCommand {
        let size = self.theme.measure_text(text, font_size);
        TextCommand {
            widget: id,
            text: text.to_string(),
            x: rect.x + (rect.width - size.width) / 2.0,
            y: rect.y + (rect.height - size.height) / 2.0,
            font_size,
            clip,
        }
    }

    fn draw_scrollbars(
        &self,
        owner: Option<WidgetId>,
        area: ScrollAreaId,
        list: &mut DrawList,
    ) {
        let Some(a) = self.areas.get(area) else {
            return;
        };
        let clip = match a.parent {
            Some(parent) => self.absolute_view(parent),
            None => a.view_rect(),
        };
        for axis in [Axis::Vertical, Axis::Horizontal] {
            let Some(thumb) = a.scrollbar_thumb(axis, self.theme.min_thumb_length) else {
                continue;
            };
            let rect = match a.parent {
                Some(parent) => self.to_screen(parent, thumb),
                None => thumb,
            };
            list.rects.push(RectCommand {
                widget: owner,
                kind: RectKind::Scrollbar(axis),
                rect,
                clip,
                selected: false,
            });
        }
    }

    /// Top, bottom, left and right bands of the menu view around a
    /// widget's clipped rectangle.
    pub fn focus_rects(&self, id: WidgetId) -> Option<[Rect; 4]> {
        let s = self.real_rect(id)?;
        if s.is_empty() {
            return None;
        }
        let v = self.areas.get(self.root_area)?.view_rect();
        Some([
            Rect::new(v.x, v.y, v.width, (s.y - v.y).max(0.0)),
            Rect::new(v.x, s.bottom(), v.width, (v.bottom() - s.bottom()).max(0.0)),
            Rect::new(v.x, s.y, (s.x - v.x).max(0.0), s.height),
            Rect::new(s.right(), s.y, (v.right() - s.right()).max(0.0), s.height),
        ])
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::super::{FrameOptions, TitleButton, TitleOptions};
    use super::*;

    #[test]
    fn draw_emits_selected_button_and_text() {
        let mut menu = Menu::default();
        let a = menu.add_button("Play");
        menu.add_label("v1.0");
        let mut list = DrawList::new();
        menu.draw(&mut list);

        let button = list
            .rects
            .iter()
            .find(|r| r.widget == Some(a))
            .expect("button quad");
        assert_eq!(button.kind, RectKind::Button);
        assert!(button.selected);
        assert_eq!(list.texts.len(), 2);
        assert!(list.focus.is_some());
    }

    #[test]
    fn scrollable_frame_draws_thumb_and_clipped_children() {
        let mut menu = Menu::default();
        let f = menu
            .add_frame_v(150.0, 300.0, FrameOptions::default().max_height(100.0))
            .expect("f");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut last = None;
        for i in 0..4 {
            let b = menu.add_button(&format!("b{i}"));
            menu.resize_widget(b, 100.0, 49.0).expect("resize");
            menu.pack(f, b).expect("pack");
            last = Some(b);
        }
        let last = last.expect("button");
        let sink = seen.clone();
        menu.add_draw_callback(last, move |_, r| sink.borrow_mut().push(r))
            .expect("callback");

        let mut list = DrawList::new();
        menu.draw(&mut list);
        assert!(
            list.rects
                .iter()
                .any(|r| r.kind == RectKind::Scrollbar(Axis::Vertical) && r.widget == Some(f))
        );
        // Last button starts at 147, the view ends at 100.
        let clipped = seen.borrow()[0];
        assert!(clipped.is_empty());
    }

    #[test]
    fn title_strip_is_drawn_inside_frame() {
        let mut menu = Menu::default();
        let f = menu.add_frame_v(300.0, 200.0, FrameOptions::default()).expect("f");
        menu.set_title(f, "Options", TitleOptions::default()).expect("title");
        menu.add_title_button(f, TitleButton::Close, |_, _| {}).expect("button");
        let mut list = DrawList::new();
        menu.draw(&mut list);

        let strip = list
            .rects
            .iter()
            .find(|r| r.kind == RectKind::TitleStrip)
            .expect("strip");
        let frame = list
            .rects
            .iter()
            .find(|r| r.widget == Some(f))
            .expect("frame");
        assert!((strip.rect.width - frame.rect.width).abs() < 0.01);
        assert!((strip.rect.y - frame.rect.y).abs() < 0.01);
        assert!(list.texts.iter().any(|t| t.text == "Options"));
    }
}
