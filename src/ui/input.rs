use smallvec::SmallVec;

use super::event::{Event, EventKind, JoyAxis, MouseButton};
use super::geometry::{Axis, Size, Vec2};
use super::keybindings::Action;
use super::scroll::ScrollAreaId;
use super::{CursorIcon, Menu, Widget, WidgetId};

/// One level of the hover chain.
#[derive(Debug, Clone, Copy, PartialEq)]
struct HoverEntry {
    widget: WidgetId,
    /// Cursor in effect before this widget was entered.
    restore: CursorIcon,
}

/// Active scrollbar thumb drag.
#[derive(Debug, Clone, Copy)]
struct ScrollDrag {
    area: ScrollAreaId,
    axis: Axis,
    start_mouse: f32,
    start_offset: f32,
}

/// Pointer, hover and device state. Lives on the menu.
#[derive(Debug)]
pub(crate) struct InputState {
    /// Hovered widgets, outermost first.
    hover: SmallVec<[HoverEntry; 4]>,
    cursor: CursorIcon,
    cursor_changed: bool,
    /// Widget under the pointer at button-down.
    pressed: Option<WidgetId>,
    pressed_title: Option<WidgetId>,
    scroll_drag: Option<ScrollDrag>,
    pointer: Vec2,
    window_size: Size,
    window_active: bool,
    /// Last joystick direction per axis; a move needs a return to center.
    joy_latch: [i8; 2],
}

impl InputState {
    pub(crate) fn new(window_size: Size) -> Self {
        Self {
            hover: SmallVec::new(),
            cursor: CursorIcon::Default,
            cursor_changed: false,
            pressed: None,
            pressed_title: None,
            scroll_drag: None,
            pointer: Vec2::ZERO,
            window_size,
            window_active: true,
            joy_latch: [0; 2],
        }
    }
}

impl Menu {
    /// Feed a batch of events. Returns true if any of them changed menu
    /// state (selection, scroll, hover) or fired a callback.
    pub fn update(&mut self, events: &[Event]) -> bool {
        let mut updated = false;
        for event in events {
            updated |= self.handle_event(event);
        }
        updated
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        if event.is_pointer() && !event.test && !self.input.window_active {
            return false;
        }
        match event.kind {
            EventKind::KeyDown(key) => match self.keybindings.lookup(key) {
                Some(action) => self.run_action(action),
                None => false,
            },
            EventKind::KeyUp(_) => false,
            EventKind::MouseButtonDown { button, x, y } => {
                button == MouseButton::Left && self.pointer_down(x, y)
            }
            EventKind::MouseButtonUp { button, x, y } => {
                button == MouseButton::Left && self.pointer_up(x, y)
            }
            EventKind::MouseMotion { x, y } => self.pointer_motion(x, y),
            EventKind::MouseWheel { dx, dy } => self.wheel(dx, dy),
            EventKind::TouchDown { x, y } => {
                let p = self.touch_point(x, y);
                let hovered = self.pointer_motion(p.x, p.y);
                self.pointer_down(p.x, p.y) || hovered
            }
            EventKind::TouchMotion { x, y } => {
                let p = self.touch_point(x, y);
                self.pointer_motion(p.x, p.y)
            }
            EventKind::TouchUp { x, y } => {
                let p = self.touch_point(x, y);
                self.pointer_up(p.x, p.y)
            }
            EventKind::JoyAxisMotion { axis, value } => self.joy_axis(axis, value),
            EventKind::JoyHatMotion { x, y } => self.joy_hat(x, y),
            EventKind::WindowActive(active) => {
                self.input.window_active = active;
                if !active {
                    self.input.scroll_drag = None;
                    self.input.pressed = None;
                    self.input.pressed_title = None;
                    return self.clear_hover();
                }
                false
            }
            EventKind::CursorLeft => self.clear_hover(),
        }
    }

    fn run_action(&mut self, action: Action) -> bool {
        match action {
            Action::MoveUp => self.move_up(),
            Action::MoveDown => self.move_down(),
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::Apply => self.apply_selected(),
        }
    }

    fn touch_point(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            x * self.input.window_size.width,
            y * self.input.window_size.height,
        )
    }

    /// Window size used to scale normalized touch coordinates.
    pub fn set_window_size(&mut self, size: Size) {
        self.input.window_size = size;
    }

    pub fn is_window_active(&self) -> bool {
        self.input.window_active
    }

    // ------------------------------------------------------------------
    // Pointer
    // ------------------------------------------------------------------

    fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.input.pointer = Vec2::new(x, y);

        if let Some((area, axis)) = self.scrollbar_at(x, y)
            && let Some(a) = self.areas.get(area)
        {
            self.input.scroll_drag = Some(ScrollDrag {
                area,
                axis,
                start_mouse: Vec2::new(x, y).along(axis),
                start_offset: a.offset(axis),
            });
            return true;
        }

        if let Some(button) = self.title_button_at(x, y) {
            self.input.pressed_title = Some(button);
            return true;
        }

        let hit = self.hit_test(x, y);
        self.input.pressed = hit;
        match hit {
            Some(id) if self.is_navigable(id) => {
                self.set_selection(Some(id));
                true
            }
            Some(_) => true,
            None => false,
        }
    }

    fn pointer_up(&mut self, x: f32, y: f32) -> bool {
        self.input.pointer = Vec2::new(x, y);
        if self.input.scroll_drag.take().is_some() {
            return true;
        }
        if let Some(button) = self.input.pressed_title.take() {
            return self.title_button_at(x, y) == Some(button) && self.fire_title_button(button);
        }
        let Some(pressed) = self.input.pressed.take() else {
            return false;
        };
        if self.hit_test(x, y) == Some(pressed) && self.selected == Some(pressed) {
            return self.apply_selected();
        }
        false
    }

    fn pointer_motion(&mut self, x: f32, y: f32) -> bool {
        self.input.pointer = Vec2::new(x, y);

        if let Some(drag) = self.input.scroll_drag {
            self.drag_scrollbar(drag, Vec2::new(x, y).along(drag.axis));
            return true;
        }

        let hit = self.title_hit(x, y).or_else(|| self.hit_test(x, y));
        let mut changed = self.update_hover(hit);
        if self.config.mouse_motion_selection
            && let Some(id) = hit
            && self.selected != Some(id)
            && self.is_navigable(id)
        {
            self.set_selection(Some(id));
            changed = true;
        }
        changed
    }

    /// Offset follows the pointer at the rate that keeps the thumb under
    /// it: pointer delta over free track length, times max offset.
    fn drag_scrollbar(&mut self, drag: ScrollDrag, pos: f32) {
        let min_thumb = self.theme.min_thumb_length;
        let Some(area) = self.areas.get_mut(drag.area) else {
            self.input.scroll_drag = None;
            return;
        };
        let view_len = area.view_rect().size().along(drag.axis);
        let content_len = area.world_rect().size().along(drag.axis);
        if content_len <= 0.0 {
            return;
        }
        let thumb = (view_len * view_len / content_len)
            .max(min_thumb)
            .min(view_len);
        let available = view_len - thumb;
        if available > 0.0 {
            let max_scroll = area.max_offset(drag.axis);
            let delta = pos - drag.start_mouse;
            area.set_offset(drag.axis, drag.start_offset + delta * max_scroll / available);
        }
    }

    /// Scroll the deepest scrolling frame under the pointer, or the root.
    fn wheel(&mut self, dx: f32, dy: f32) -> bool {
        let p = self.input.pointer;
        let target = self
            .scrollable_frames
            .iter()
            .copied()
            .filter(|&f| self.is_visible(f, true))
            .find(|&f| self.real_rect(f).is_some_and(|r| r.contains(p.x, p.y)))
            .and_then(|f| self.arena.get(f))
            .and_then(|n| n.widget.as_frame())
            .and_then(|d| d.inner_area)
            .unwrap_or(self.root_area);
        let step = self.theme.scroll_step;
        let Some(area) = self.areas.get_mut(target) else {
            return false;
        };
        let before = area.offset_px();
        if dy != 0.0 {
            area.scroll_by(Axis::Vertical, -dy * step);
        }
        if dx != 0.0 {
            area.scroll_by(Axis::Horizontal, -dx * step);
        }
        area.offset_px() != before
    }

    /// Scrollbar thumb under a screen point, innermost area first.
    fn scrollbar_at(&self, x: f32, y: f32) -> Option<(ScrollAreaId, Axis)> {
        let min_thumb = self.theme.min_thumb_length;
        let frame_areas = self.scrollable_frames.iter().filter_map(|&f| {
            self.arena
                .get(f)
                .filter(|_| self.is_visible(f, true))
                .and_then(|n| n.widget.as_frame())
                .and_then(|d| d.inner_area)
        });
        for area_id in frame_areas.chain([self.root_area]) {
            let Some(area) = self.areas.get(area_id) else {
                continue;
            };
            for axis in [Axis::Vertical, Axis::Horizontal] {
                let Some(thumb) = area.scrollbar_thumb(axis, min_thumb) else {
                    continue;
                };
                let screen = match area.parent {
                    Some(parent) => self
                        .to_screen(parent, thumb)
                        .clip(&self.absolute_view(parent)),
                    None => thumb,
                };
                if screen.contains(x, y) {
                    return Some((area_id, axis));
                }
            }
        }
        None
    }

    fn title_button_at(&self, x: f32, y: f32) -> Option<WidgetId> {
        self.title_hit(x, y).filter(|&id| {
            self.arena
                .get(id)
                .is_some_and(|n| matches!(n.widget, Widget::Button { .. }))
        })
    }

    /// Title button, label or strip under a screen point, topmost frame
    /// first.
    fn title_hit(&self, x: f32, y: f32) -> Option<WidgetId> {
        self.widgets.iter().rev().find_map(|&id| {
            let title = self.arena.get(id)?.widget.as_frame()?.title.as_ref()?;
            if !self.is_visible(id, true) {
                return None;
            }
            title
                .buttons
                .iter()
                .copied()
                .chain([title.label, title.strip])
                .find(|&w| self.real_rect(w).is_some_and(|r| r.contains(x, y)))
        })
    }

    // ------------------------------------------------------------------
    // Joystick
    // ------------------------------------------------------------------

    fn joy_axis(&mut self, axis: JoyAxis, value: f32) -> bool {
        let slot = match axis {
            JoyAxis::X => 0,
            JoyAxis::Y => 1,
        };
        let deadzone = self.theme.joy_deadzone;
        let direction: i8 = if value > deadzone {
            1
        } else if value < -deadzone {
            -1
        } else {
            0
        };
        if direction == self.input.joy_latch[slot] {
            return false;
        }
        self.input.joy_latch[slot] = direction;
        match (axis, direction) {
            (_, 0) => false,
            (JoyAxis::X, 1) => self.move_right(),
            (JoyAxis::X, _) => self.move_left(),
            (JoyAxis::Y, 1) => self.move_down(),
            (JoyAxis::Y, _) => self.move_up(),
        }
    }

    fn joy_hat(&mut self, x: i8, y: i8) -> bool {
        let vertical = match y.signum() {
            1 => self.move_up(),
            -1 => self.move_down(),
            _ => false,
        };
        let horizontal = match x.signum() {
            1 => self.move_right(),
            -1 => self.move_left(),
            _ => false,
        };
        vertical || horizontal
    }

    // ------------------------------------------------------------------
    // Hover chain
    // ------------------------------------------------------------------

    /// Widgets currently hovered, outermost first.
    pub fn hover_chain(&self) -> Vec<WidgetId> {
        self.input.hover.iter().map(|e| e.widget).collect()
    }

    pub fn cursor(&self) -> CursorIcon {
        self.input.cursor
    }

    /// Cursor shape requested since the last call, if it changed.
    pub fn take_cursor_change(&mut self) -> Option<CursorIcon> {
        std::mem::take(&mut self.input.cursor_changed).then_some(self.input.cursor)
    }

    fn apply_cursor(&mut self, icon: CursorIcon) {
        if self.input.cursor != icon {
            self.input.cursor = icon;
            self.input.cursor_changed = true;
        }
    }

    /// Move the hover chain to `hit` and its frame ancestors. Only the
    /// differing suffix transitions: leaves fire innermost first, enters
    /// outermost first.
    fn update_hover(&mut self, hit: Option<WidgetId>) -> bool {
        let mut chain: SmallVec<[WidgetId; 4]> = SmallVec::new();
        let mut current = hit;
        while let Some(id) = current {
            chain.push(id);
            current = self.container_of(id);
        }
        chain.reverse();

        let common = self
            .input
            .hover
            .iter()
            .zip(&chain)
            .take_while(|(entry, id)| entry.widget == **id)
            .count();
        if common == chain.len() && common == self.input.hover.len() {
            return false;
        }

        while self.input.hover.len() > common {
            if let Some(entry) = self.input.hover.pop() {
                self.leave(entry);
            }
        }
        for &id in &chain[common..] {
            let restore = self.input.cursor;
            if let Some(icon) = self.arena.get(id).and_then(|n| n.cursor) {
                self.apply_cursor(icon);
            }
            self.input.hover.push(HoverEntry {
                widget: id,
                restore,
            });
            log::trace!("mouse over {:?}", id);
            self.fire_mouse_over(id);
        }
        true
    }

    fn leave(&mut self, entry: HoverEntry) {
        self.apply_cursor(entry.restore);
        log::trace!("mouse leave {:?}", entry.widget);
        self.fire_mouse_leave(entry.widget);
    }

    /// Leave every hovered widget, innermost first.
    pub(crate) fn clear_hover(&mut self) -> bool {
        if self.input.hover.is_empty() {
            return false;
        }
        while let Some(entry) = self.input.hover.pop() {
            self.leave(entry);
        }
        true
    }

    /// Drop the hover chain if `id` is part of it. Called before a widget
    /// is unpacked, removed or hidden.
    pub(crate) fn release_hover_of(&mut self, id: WidgetId) {
        if self.input.hover.iter().any(|e| e.widget == id) {
            self.clear_hover();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::super::{Align, FrameOptions, MenuConfig, Theme, TitleButton, TitleOptions};
    use super::*;
    use winit::keyboard::KeyCode;

    type Log = Rc<RefCell<Vec<(&'static str, WidgetId)>>>;

    fn record(menu: &mut Menu, id: WidgetId, log: &Log) {
        let l = log.clone();
        menu.set_on_mouse_over(id, move |w| l.borrow_mut().push(("enter", w)))
            .expect("listener");
        let l = log.clone();
        menu.set_on_mouse_leave(id, move |w| l.borrow_mut().push(("leave", w)))
            .expect("listener");
    }

    /// f1 > f2 > leaf, all anchored at the top-left of the menu.
    fn nested() -> (Menu, WidgetId, WidgetId, WidgetId) {
        let mut menu = Menu::default();
        let f1 = menu.add_frame_v(300.0, 300.0, FrameOptions::default()).expect("f1");
        let f2 = menu.add_frame_v(200.0, 200.0, FrameOptions::default()).expect("f2");
        let leaf = menu.add_button("leaf");
        menu.pack(f2, leaf).expect("leaf");
        menu.pack(f1, f2).expect("f2");
        (menu, f1, f2, leaf)
    }

    #[test]
    fn hover_enters_outermost_first_and_leaves_innermost_first() {
        let (mut menu, f1, f2, leaf) = nested();
        let log: Log = Rc::default();
        for id in [f1, f2, leaf] {
            record(&mut menu, id, &log);
        }

        assert!(menu.update(&[Event::motion(5.0, 5.0)]));
        assert_eq!(menu.hover_chain(), vec![f1, f2, leaf]);
        assert_eq!(
            log.borrow().as_slice(),
            &[("enter", f1), ("enter", f2), ("enter", leaf)]
        );

        log.borrow_mut().clear();
        // Inside f1 only: leaf and f2 leave, f1 stays hovered.
        menu.update(&[Event::motion(250.0, 250.0)]);
        assert_eq!(log.borrow().as_slice(), &[("leave", leaf), ("leave", f2)]);

        log.borrow_mut().clear();
        menu.update(&[Event::new(EventKind::CursorLeft)]);
        assert_eq!(log.borrow().as_slice(), &[("leave", f1)]);
        assert!(menu.hover_chain().is_empty());
    }

    #[test]
    fn cursor_applied_on_enter_and_restored_on_leave() {
        let (mut menu, f1, _, leaf) = nested();
        menu.set_cursor(f1, Some(CursorIcon::Move)).expect("cursor");
        menu.set_cursor(leaf, Some(CursorIcon::Pointer)).expect("cursor");

        menu.update(&[Event::motion(5.0, 5.0)]);
        assert_eq!(menu.cursor(), CursorIcon::Pointer);
        assert_eq!(menu.take_cursor_change(), Some(CursorIcon::Pointer));
        assert_eq!(menu.take_cursor_change(), None);

        menu.update(&[Event::motion(250.0, 250.0)]);
        assert_eq!(menu.cursor(), CursorIcon::Move);

        menu.update(&[Event::new(EventKind::WindowActive(false))]);
        assert_eq!(menu.cursor(), CursorIcon::Default);
        assert!(menu.hover_chain().is_empty());
    }

    #[test]
    fn inactive_window_ignores_live_pointer_events() {
        let (mut menu, _, _, _) = nested();
        menu.update(&[Event::new(EventKind::WindowActive(false))]);
        assert!(!menu.update(&[Event::motion(5.0, 5.0)]));
        assert!(menu.hover_chain().is_empty());
        assert!(menu.update(&[Event::motion(5.0, 5.0).as_test()]));
        assert_eq!(menu.hover_chain().len(), 3);
    }

    #[test]
    fn hiding_hovered_widget_clears_chain() {
        let (mut menu, _, f2, leaf) = nested();
        menu.update(&[Event::motion(5.0, 5.0)]);
        menu.hide(f2).expect("hide");
        assert!(menu.hover_chain().is_empty());
        assert!(!menu.is_navigable(leaf));
    }

    #[test]
    fn title_strip_hover_applies_its_cursor() {
        let mut menu = Menu::default();
        let f = menu.add_frame_v(300.0, 200.0, FrameOptions::default()).expect("f");
        let options = TitleOptions {
            align: Align::Left,
            cursor: Some(CursorIcon::Move),
        };
        menu.set_title(f, "Settings", options).expect("title");
        let strip = menu.title_strip(f).expect("f").expect("strip");
        let r = menu.real_rect(strip).expect("rect");

        // Right of the left-aligned label: the bare strip.
        menu.update(&[Event::motion(r.right() - 5.0, r.y + r.height / 2.0)]);
        assert_eq!(menu.hover_chain(), vec![f, strip]);
        assert_eq!(menu.cursor(), CursorIcon::Move);

        // Below the strip: the frame body restores the default.
        menu.update(&[Event::motion(r.right() - 5.0, r.bottom() + 20.0)]);
        assert_eq!(menu.hover_chain(), vec![f]);
        assert_eq!(menu.cursor(), CursorIcon::Default);
    }

    #[test]
    fn title_button_click_reports_frame_and_button() {
        let mut menu = Menu::default();
        let f = menu.add_frame_v(300.0, 200.0, FrameOptions::default()).expect("f");
        menu.set_title(f, "Settings", TitleOptions::default()).expect("title");
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let sink = clicks.clone();
        let close = menu
            .add_title_button(f, TitleButton::Close, move |frame, button| {
                sink.borrow_mut().push((frame, button));
            })
            .expect("button");

        let r = menu.real_rect(close).expect("rect");
        let (x, y) = (r.x + r.width / 2.0, r.y + r.height / 2.0);
        menu.update(&[Event::motion(x, y)]);
        let strip = menu.title_strip(f).expect("f").expect("strip");
        assert_eq!(menu.hover_chain(), vec![f, strip, close]);
        assert_eq!(menu.cursor(), CursorIcon::Pointer);

        assert!(menu.update(&[Event::mouse_down(x, y), Event::mouse_up(x, y)]));
        assert_eq!(clicks.borrow().as_slice(), &[(f, close)]);

        // Releasing off the button cancels the click.
        menu.update(&[Event::mouse_down(x, y), Event::mouse_up(x, r.bottom() + 40.0)]);
        assert_eq!(clicks.borrow().len(), 1);
    }

    #[test]
    fn click_selects_then_applies() {
        let mut menu = Menu::default();
        let a = menu.add_button("a");
        let b = menu.add_button("b");
        let applied = Rc::new(RefCell::new(Vec::new()));
        let sink = applied.clone();
        menu.set_on_apply(b, move |w| sink.borrow_mut().push(w)).expect("apply");

        let r = menu.real_rect(b).expect("rect");
        let (x, y) = (r.x + 2.0, r.y + 2.0);
        menu.update(&[Event::mouse_down(x, y)]);
        assert_eq!(menu.selected_widget(), Some(b));
        assert!(applied.borrow().is_empty());
        menu.update(&[Event::mouse_up(x, y)]);
        assert_eq!(applied.borrow().as_slice(), &[b]);

        // Release elsewhere does not apply.
        let ra = menu.real_rect(a).expect("rect");
        menu.update(&[Event::mouse_down(x, y), Event::mouse_up(ra.x + 2.0, ra.y + 2.0)]);
        assert_eq!(applied.borrow().len(), 1);
    }

    #[test]
    fn keys_route_through_bindings() {
        let mut menu = Menu::default();
        let a = menu.add_button("a");
        let b = menu.add_button("b");
        let hits = Rc::new(RefCell::new(0));
        let sink = hits.clone();
        menu.set_on_apply(b, move |_| *sink.borrow_mut() += 1).expect("apply");

        menu.update(&[Event::key_down(KeyCode::ArrowDown)]);
        assert_eq!(menu.selected_widget(), Some(b));
        menu.update(&[Event::key_down(KeyCode::Enter)]);
        assert_eq!(*hits.borrow(), 1);
        menu.update(&[Event::key_down(KeyCode::KeyW)]);
        assert_eq!(menu.selected_widget(), Some(a));
        assert!(!menu.update(&[Event::key_down(KeyCode::F5)]));
    }

    #[test]
    fn wheel_scrolls_frame_under_pointer() {
        let mut menu = Menu::default();
        let f = menu
            .add_frame_v(150.0, 300.0, FrameOptions::default().max_height(100.0))
            .expect("f");
        for i in 0..4 {
            let b = menu.add_button(&format!("b{i}"));
            menu.resize_widget(b, 100.0, 49.0).expect("resize");
            menu.pack(f, b).expect("pack");
        }
        let area = menu.frame_scroll_area(f).expect("frame").expect("area");
        let r = menu.real_rect(f).expect("rect");

        menu.update(&[Event::motion(r.x + 5.0, r.y + 5.0), Event::wheel(-1.0)]);
        let offset = menu.scroll_area(area).expect("area").offset(Axis::Vertical);
        assert!((offset - menu.theme().scroll_step).abs() < 0.01);

        // Already at the top: scrolling up further changes nothing.
        menu.update(&[Event::wheel(5.0)]);
        assert!(!menu.update(&[Event::wheel(1.0)]));
    }

    #[test]
    fn dragging_thumb_scrolls() {
        let mut menu = Menu::default();
        let f = menu
            .add_frame_v(150.0, 300.0, FrameOptions::default().max_height(100.0))
            .expect("f");
        for i in 0..4 {
            let b = menu.add_button(&format!("b{i}"));
            menu.resize_widget(b, 100.0, 50.0).expect("resize");
            menu.pack(f, b).expect("pack");
        }
        let area = menu.frame_scroll_area(f).expect("frame").expect("area");
        let sa = menu.scroll_area(area).expect("area");
        // view 100, content 200: thumb 50 long, 50px of free track.
        let thumb = sa.scrollbar_thumb(Axis::Vertical, 20.0).expect("thumb");
        let (x, y) = (thumb.x + 2.0, thumb.y + 5.0);

        menu.update(&[Event::mouse_down(x, y), Event::motion(x, y + 25.0)]);
        let pct = menu.scroll_area(area).expect("area").scroll_percent(Axis::Vertical);
        assert!((pct - 0.5).abs() < 0.01);
        menu.update(&[Event::mouse_up(x, y + 25.0)]);
        menu.update(&[Event::motion(x, y + 50.0)]);
        let pct = menu.scroll_area(area).expect("area").scroll_percent(Axis::Vertical);
        assert!((pct - 0.5).abs() < 0.01);
    }

    #[test]
    fn touch_scales_by_window_size() {
        let mut menu = Menu::default();
        menu.add_button("a");
        let b = menu.add_button("b");
        menu.set_window_size(Size::new(1000.0, 500.0));
        let r = menu.real_rect(b).expect("rect");
        let (nx, ny) = ((r.x + 2.0) / 1000.0, (r.y + 2.0) / 500.0);
        menu.update(&[Event::new(EventKind::TouchDown { x: nx, y: ny })]);
        assert_eq!(menu.selected_widget(), Some(b));
    }

    #[test]
    fn joystick_axis_latches_until_center() {
        let mut menu = Menu::default();
        let b: Vec<WidgetId> = (0..3).map(|i| menu.add_button(&format!("b{i}"))).collect();
        let axis = |value| {
            Event::new(EventKind::JoyAxisMotion {
                axis: JoyAxis::Y,
                value,
            })
        };
        menu.update(&[axis(0.9), axis(1.0)]);
        assert_eq!(menu.selected_widget(), Some(b[1]));
        menu.update(&[axis(0.1), axis(0.8)]);
        assert_eq!(menu.selected_widget(), Some(b[2]));
        menu.update(&[Event::new(EventKind::JoyHatMotion { x: 0, y: 1 })]);
        assert_eq!(menu.selected_widget(), Some(b[1]));
    }

    #[test]
    fn motion_selection_follows_pointer() {
        let config = MenuConfig {
            mouse_motion_selection: true,
            ..MenuConfig::default()
        };
        let mut menu = Menu::new(config, Theme::default());
        menu.add_button("a");
        let b = menu.add_button("b");
        let r = menu.real_rect(b).expect("rect");
        menu.update(&[Event::motion(r.x + 1.0, r.y + 1.0)]);
        assert_eq!(menu.selected_widget(), Some(b));
    }
}
