pub mod demo;
mod draw;
mod error;
mod event;
mod frame;
mod geometry;
mod input;
mod keybindings;
mod layout;
mod navigation;
mod scroll;
mod theme;
mod widget;

pub use draw::{DrawList, RectCommand, RectKind, TextCommand};
pub use error::{ErrorKind, MenuError, MenuResult};
pub use event::{Event, EventKind, JoyAxis, MouseButton};
pub use frame::{
    Align, FrameData, FrameOptions, PackOptions, TitleButton, TitleOptions, Unpack, VPos,
};
pub use geometry::{Axis, Rect, Size, Vec2};
pub use keybindings::{Action, KeyBindings};
pub use scroll::{ScrollArea, ScrollAreaId};
pub use theme::{MenuConfig, Theme};
pub use widget::{CallbackId, Widget};
pub use winit::window::CursorIcon;

use input::InputState;
use slotmap::{SecondaryMap, SlotMap, new_key_type};
use widget::Listeners;

new_key_type! {
    /// Widget handle. Survives removal of other widgets.
    pub struct WidgetId;
}

// ---------------------------------------------------------------------------
// Widget node (arena entry)
// ---------------------------------------------------------------------------

/// Arena entry pairing a widget with membership and layout metadata.
///
/// Back-references (`frame`, `area`) are plain handles into the menu's
/// arenas; the menu owns every node.
#[derive(Debug, Clone)]
pub struct WidgetNode {
    pub(crate) widget: Widget,
    /// Owning frame. Mirrors the frame's child list.
    pub(crate) frame: Option<WidgetId>,
    /// Frame whose title strip this is. Strips are not frame children.
    pub(crate) title_of: Option<WidgetId>,
    /// Intrinsic size; declared size for frames.
    pub(crate) size: Size,
    /// Computed layout rect in the coordinates of `area` (set by layout pass).
    pub(crate) rect: Rect,
    /// Scroll area whose content coordinates `rect` is expressed in.
    pub(crate) area: ScrollAreaId,
    /// Position before `translate`, in `area` coordinates (set by layout pass).
    pub(crate) anchor: Vec2,
    /// User offset applied on top of the computed position.
    pub(crate) translate: Vec2,
    /// Offset assigned by the owning frame, relative to its content origin.
    pub(crate) virtual_translate: Vec2,
    pub(crate) floating: bool,
    pub(crate) visible: bool,
    pub(crate) selectable: bool,
    pub(crate) selected: bool,
    /// Registered with this menu (may be packed).
    pub(crate) configured: bool,
    /// Present in the flat widget sequence.
    pub(crate) attached: bool,
    pub(crate) cursor: Option<CursorIcon>,
    pub(crate) col_row: Option<(usize, usize)>,
}

impl WidgetNode {
    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub fn frame(&self) -> Option<WidgetId> {
        self.frame
    }

    pub fn title_of(&self) -> Option<WidgetId> {
        self.title_of
    }

    /// Outer size after layout (frames include title strip and max clamp).
    pub fn size(&self) -> Size {
        self.rect.size()
    }

    /// Layout rect in the owning scroll area's content coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn scroll_area(&self) -> ScrollAreaId {
        self.area
    }

    pub fn translate(&self) -> Vec2 {
        self.translate
    }

    pub fn virtual_translate(&self) -> Vec2 {
        self.virtual_translate
    }

    pub fn is_floating(&self) -> bool {
        self.floating
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn cursor(&self) -> Option<CursorIcon> {
        self.cursor
    }
}

/// Destination for [`Menu::move_widget_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    /// Take the place of a sibling widget.
    Widget(WidgetId),
    /// Take the place of the sibling at this flat-sequence index.
    Index(usize),
}

impl From<WidgetId> for MoveTarget {
    fn from(id: WidgetId) -> Self {
        MoveTarget::Widget(id)
    }
}

impl From<usize> for MoveTarget {
    fn from(index: usize) -> Self {
        MoveTarget::Index(index)
    }
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

/// Owner of every widget, scroll area, and piece of interaction state.
///
/// Structural operations re-run layout before returning, so geometry
/// queries always reflect the current tree. `render` additionally runs the
/// consistency checks.
pub struct Menu {
    pub(crate) arena: SlotMap<WidgetId, WidgetNode>,
    pub(crate) areas: SlotMap<ScrollAreaId, ScrollArea>,
    pub(crate) root_area: ScrollAreaId,
    /// Attached widgets without an owning frame, in order.
    pub(crate) roots: Vec<WidgetId>,
    /// Flat widget sequence: pre-order walk of `roots`.
    pub(crate) widgets: Vec<WidgetId>,
    /// Frames currently scrolling, deepest first.
    pub(crate) scrollable_frames: Vec<WidgetId>,
    pub(crate) selected: Option<WidgetId>,
    pub(crate) listeners: SecondaryMap<WidgetId, Listeners>,
    pub(crate) input: InputState,
    pub(crate) theme: Theme,
    pub(crate) config: MenuConfig,
    pub(crate) keybindings: KeyBindings,
    /// Set by the layout pass when top-level widgets overflow the grid.
    pub(crate) column_overflow: Option<MenuError>,
    next_callback: u64,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new(MenuConfig::default(), Theme::default())
    }
}

impl Menu {
    pub fn new(config: MenuConfig, theme: Theme) -> Self {
        let mut areas = SlotMap::with_key();
        let mut root = ScrollArea::new(None, theme.scrollbar_thickness);
        root.view = Rect::from_origin(config.position, config.size());
        root.world = config.size();
        let root_area = areas.insert(root);
        let input = InputState::new(config.size());
        Self {
            arena: SlotMap::with_key(),
            areas,
            root_area,
            roots: Vec::new(),
            widgets: Vec::new(),
            scrollable_frames: Vec::new(),
            selected: None,
            listeners: SecondaryMap::new(),
            input,
            theme,
            config,
            keybindings: KeyBindings::defaults(),
            column_overflow: None,
            next_callback: 0,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn keybindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.keybindings
    }

    // ------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------

    pub(crate) fn insert_node(&mut self, widget: Widget, size: Size) -> WidgetId {
        let selectable = widget.default_selectable();
        self.arena.insert(WidgetNode {
            widget,
            frame: None,
            title_of: None,
            size,
            rect: Rect::from_origin(Vec2::ZERO, size),
            area: self.root_area,
            anchor: Vec2::ZERO,
            translate: Vec2::ZERO,
            virtual_translate: Vec2::ZERO,
            floating: false,
            visible: true,
            selectable,
            selected: false,
            configured: false,
            attached: false,
            cursor: None,
            col_row: None,
        })
    }

    /// Create a widget owned by this menu but not registered with it.
    /// It cannot be packed until [`Menu::configure`] is called.
    pub fn create_widget(&mut self, widget: Widget) -> WidgetId {
        let size = match &widget {
            Widget::Button { title } => self.theme.button_size(title),
            Widget::Label { text } => self.theme.label_size(text),
            Widget::VerticalMargin | Widget::Frame(_) => Size::ZERO,
        };
        self.insert_node(widget, size)
    }

    pub fn create_button(&mut self, title: &str) -> WidgetId {
        self.create_widget(Widget::Button {
            title: title.to_string(),
        })
    }

    /// Register a created widget with the menu without adding it to the
    /// flat sequence.
    pub fn configure(&mut self, id: WidgetId) -> MenuResult<()> {
        self.node_mut(id)?.configured = true;
        Ok(())
    }

    /// Append a configured widget at the end of the top-level list.
    pub(crate) fn attach(&mut self, id: WidgetId) {
        if let Some(node) = self.arena.get_mut(id) {
            node.configured = true;
            node.attached = true;
        }
        self.roots.push(id);
        self.relayout();
        if self.selected.is_none() && self.is_navigable(id) {
            self.set_selection(Some(id));
        }
    }

    pub fn add_widget(&mut self, widget: Widget) -> WidgetId {
        let id = self.create_widget(widget);
        self.attach(id);
        id
    }

    pub fn add_button(&mut self, title: &str) -> WidgetId {
        self.add_widget(Widget::Button {
            title: title.to_string(),
        })
    }

    pub fn add_label(&mut self, text: &str) -> WidgetId {
        self.add_widget(Widget::Label {
            text: text.to_string(),
        })
    }

    pub fn add_vertical_margin(&mut self, height: f32) -> WidgetId {
        let id = self.insert_node(Widget::VerticalMargin, Size::new(0.0, height));
        self.attach(id);
        id
    }

    // ------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------

    pub fn get(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.arena.get(id)
    }

    pub(crate) fn node(&self, id: WidgetId) -> MenuResult<&WidgetNode> {
        self.arena.get(id).ok_or(MenuError::UnknownWidget(id))
    }

    pub(crate) fn node_mut(&mut self, id: WidgetId) -> MenuResult<&mut WidgetNode> {
        self.arena.get_mut(id).ok_or(MenuError::UnknownWidget(id))
    }

    /// The flat widget sequence.
    pub fn widgets(&self) -> &[WidgetId] {
        &self.widgets
    }

    /// Attached widgets that have no owning frame, in order.
    pub fn top_level(&self) -> &[WidgetId] {
        &self.roots
    }

    pub fn index_of(&self, id: WidgetId) -> Option<usize> {
        self.widgets.iter().position(|&w| w == id)
    }

    pub fn selected_widget(&self) -> Option<WidgetId> {
        self.selected
    }

    /// First widget in the flat sequence whose text matches.
    pub fn find_by_text(&self, text: &str) -> Option<WidgetId> {
        self.widgets.iter().copied().find(|&id| {
            self.arena
                .get(id)
                .and_then(|n| n.widget.text())
                .is_some_and(|t| t == text)
        })
    }

    /// Column, row and flat index of an attached widget. Frame descendants
    /// share the cell of their top-level ancestor.
    pub fn col_row_index(&self, id: WidgetId) -> Option<(usize, usize, usize)> {
        let (col, row) = self.arena.get(id)?.col_row?;
        Some((col, row, self.index_of(id)?))
    }

    /// Number of frames between the widget and the top level.
    pub fn frame_depth(&self, id: WidgetId) -> usize {
        let mut depth = 0;
        let mut current = self.arena.get(id).and_then(|n| n.frame);
        while let Some(f) = current {
            depth += 1;
            current = self.arena.get(f).and_then(|n| n.frame);
        }
        depth
    }

    /// True if `ancestor` is a frame somewhere above `id`.
    pub fn is_ancestor(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut current = self.arena.get(id).and_then(|n| n.frame);
        while let Some(f) = current {
            if f == ancestor {
                return true;
            }
            current = self.arena.get(f).and_then(|n| n.frame);
        }
        false
    }

    /// Own visibility flag, and with `check_frames` every owning frame's too.
    pub fn is_visible(&self, id: WidgetId, check_frames: bool) -> bool {
        let Some(node) = self.arena.get(id) else {
            return false;
        };
        if !node.visible {
            return false;
        }
        if !check_frames {
            return true;
        }
        let mut current = node.frame.or(node.title_of);
        while let Some(f) = current {
            let Some(frame) = self.arena.get(f) else {
                return false;
            };
            if !frame.visible {
                return false;
            }
            current = frame.frame.or(frame.title_of);
        }
        true
    }

    /// Owning frame, or for a title strip the frame it titles.
    pub(crate) fn container_of(&self, id: WidgetId) -> Option<WidgetId> {
        self.arena.get(id).and_then(|n| n.frame.or(n.title_of))
    }

    /// Attached, selectable, visible through its frames, not floating.
    pub fn is_navigable(&self, id: WidgetId) -> bool {
        self.arena.get(id).is_some_and(|n| {
            n.attached && n.selectable && !n.floating && !n.widget.is_frame()
        }) && self.is_visible(id, true)
    }

    // ------------------------------------------------------------------
    // Widget state
    // ------------------------------------------------------------------

    pub fn hide(&mut self, id: WidgetId) -> MenuResult<()> {
        self.node_mut(id)?.visible = false;
        let successors = self.selection_successors();
        self.release_hover_of(id);
        self.relayout();
        self.reselect_if_stranded(&successors);
        Ok(())
    }

    pub fn show(&mut self, id: WidgetId) -> MenuResult<()> {
        self.node_mut(id)?.visible = true;
        self.relayout();
        if self.selected.is_none() {
            self.select_from(0);
        }
        Ok(())
    }

    /// Offset a widget from its computed position without moving others.
    pub fn translate(&mut self, id: WidgetId, dx: f32, dy: f32) -> MenuResult<()> {
        self.node_mut(id)?.translate = Vec2::new(dx, dy);
        self.relayout();
        Ok(())
    }

    /// Take a widget out of (or back into) flow layout. A floating frame
    /// child sits at the frame's content origin; a floating top-level
    /// widget keeps its current position.
    pub fn set_float(&mut self, id: WidgetId, floating: bool) -> MenuResult<()> {
        self.node_mut(id)?.floating = floating;
        let successors = self.selection_successors();
        self.relayout();
        self.reselect_if_stranded(&successors);
        Ok(())
    }

    pub fn set_selectable(&mut self, id: WidgetId, selectable: bool) -> MenuResult<()> {
        let node = self.node_mut(id)?;
        node.selectable = selectable && !node.widget.is_frame();
        let successors = self.selection_successors();
        self.relayout();
        self.reselect_if_stranded(&successors);
        Ok(())
    }

    pub fn set_cursor(&mut self, id: WidgetId, cursor: Option<CursorIcon>) -> MenuResult<()> {
        self.node_mut(id)?.cursor = cursor;
        Ok(())
    }

    /// Change a widget's intrinsic size (declared size for frames).
    /// Frame bounds are checked again on the next render.
    pub fn resize_widget(&mut self, id: WidgetId, width: f32, height: f32) -> MenuResult<()> {
        let node = self.node(id)?;
        if let Some(frame) = node.widget.as_frame() {
            frame::validate_frame_size(width, height, &frame.max)?;
        }
        self.node_mut(id)?.size = Size::new(width, height);
        self.relayout();
        Ok(())
    }

    /// Mark a widget selected without informing the menu. A render pass
    /// reports the inconsistency if this leaves two widgets selected.
    pub fn set_selected_flag(&mut self, id: WidgetId, selected: bool) -> MenuResult<()> {
        self.node_mut(id)?.selected = selected;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Flat sequence mutation
    // ------------------------------------------------------------------

    /// Remove a widget from the menu. A frame's direct children are
    /// unpacked first and become floating top-level widgets; a packed
    /// widget is unpacked from its frame. The widget stays configured and
    /// can be packed again.
    pub fn remove_widget(&mut self, id: WidgetId) -> MenuResult<()> {
        let node = self.node(id)?;
        if !node.attached {
            return Err(MenuError::NotInMenu(id));
        }
        let owner = node.frame;
        let children: Vec<WidgetId> = node
            .widget
            .as_frame()
            .map(|f| f.children.iter().map(|c| c.id).collect())
            .unwrap_or_default();
        let successors = self.selection_successors();

        self.release_hover_of(id);
        for child in children {
            self.detach_child(id, child);
        }
        if let Some(owner) = owner {
            self.detach_child(owner, id);
        }
        self.roots.retain(|&r| r != id);
        self.drop_inner_area(id);
        if let Some(node) = self.arena.get_mut(id) {
            node.attached = false;
        }
        log::debug!("removed widget {:?} from menu", id);

        self.relayout();
        self.reselect_if_stranded(&successors);
        Ok(())
    }

    /// Move `id` to the place of a sibling (same owning frame, or both top
    /// level). Frames move with their whole span. Out-of-band frame
    /// children travel with the attached sibling packed before them.
    pub fn move_widget_index(
        &mut self,
        id: WidgetId,
        target: impl Into<MoveTarget>,
    ) -> MenuResult<()> {
        let target = match target.into() {
            MoveTarget::Widget(t) => t,
            MoveTarget::Index(i) => *self.widgets.get(i).ok_or(MenuError::InvalidMove(id))?,
        };
        if id == target {
            return Err(MenuError::InvalidMove(id));
        }
        let node = self.node(id)?;
        let other = self.node(target)?;
        if !node.attached || !other.attached || node.frame != other.frame {
            return Err(MenuError::InvalidMove(id));
        }

        match node.frame {
            None => {
                let from = self.roots.iter().position(|&r| r == id);
                let to = self.roots.iter().position(|&r| r == target);
                let (Some(from), Some(to)) = (from, to) else {
                    return Err(MenuError::InvalidMove(id));
                };
                let moved = self.roots.remove(from);
                self.roots.insert(to, moved);
            }
            Some(frame) => self.move_within_frame(frame, id, target)?,
        }
        log::debug!("moved widget {:?} to the place of {:?}", id, target);
        self.relayout();
        Ok(())
    }

    /// Reverse the order of the top-level widgets. Frame contents keep
    /// their order.
    pub fn reverse_widgets(&mut self) {
        self.roots.reverse();
        self.relayout();
    }

    // ------------------------------------------------------------------
    // Render pass
    // ------------------------------------------------------------------

    /// Recompute layout and verify the menu is consistent: a single
    /// selected widget, frames within their fixed bounds, and top-level
    /// widgets within the column grid.
    pub fn render(&mut self) -> MenuResult<()> {
        self.relayout();
        self.check_selection()?;
        for id in self.widgets.clone() {
            let is_frame = self.arena.get(id).is_some_and(|n| n.widget.is_frame());
            if is_frame {
                self.check_frame_fits(id, None)?;
            }
        }
        if let Some(err) = self.column_overflow.clone() {
            return Err(err);
        }
        Ok(())
    }

    fn check_selection(&mut self) -> MenuResult<()> {
        let flagged: Vec<WidgetId> = self
            .arena
            .iter()
            .filter(|(_, n)| n.selected)
            .map(|(id, _)| id)
            .collect();
        // Adopt a widget that was selected behind the menu's back.
        let adopted = flagged
            .iter()
            .copied()
            .find(|&id| Some(id) != self.selected)
            .or(self.selected.filter(|s| flagged.contains(s)));

        if flagged.len() > 1 {
            for &id in &flagged {
                if Some(id) != adopted
                    && let Some(node) = self.arena.get_mut(id)
                {
                    node.selected = false;
                }
            }
            self.selected = adopted;
            return Err(MenuError::MultipleSelected(flagged));
        }
        self.selected = adopted;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------

    fn listeners_mut(&mut self, id: WidgetId) -> MenuResult<&mut Listeners> {
        self.listeners
            .entry(id)
            .map(|e| e.or_default())
            .ok_or(MenuError::UnknownWidget(id))
    }

    pub fn set_on_mouse_over(
        &mut self,
        id: WidgetId,
        callback: impl FnMut(WidgetId) + 'static,
    ) -> MenuResult<()> {
        self.listeners_mut(id)?.on_mouse_over = Some(Box::new(callback));
        Ok(())
    }

    pub fn set_on_mouse_leave(
        &mut self,
        id: WidgetId,
        callback: impl FnMut(WidgetId) + 'static,
    ) -> MenuResult<()> {
        self.listeners_mut(id)?.on_mouse_leave = Some(Box::new(callback));
        Ok(())
    }

    pub fn set_on_apply(
        &mut self,
        id: WidgetId,
        callback: impl FnMut(WidgetId) + 'static,
    ) -> MenuResult<()> {
        self.listeners_mut(id)?.on_apply = Some(Box::new(callback));
        Ok(())
    }

    pub fn add_draw_callback(
        &mut self,
        id: WidgetId,
        callback: impl FnMut(WidgetId, Rect) + 'static,
    ) -> MenuResult<CallbackId> {
        self.node(id)?;
        let cb = CallbackId(self.next_callback);
        self.next_callback += 1;
        self.listeners_mut(id)?.on_draw.push((cb, Box::new(callback)));
        Ok(cb)
    }

    /// Returns false if the callback was not registered on this widget.
    pub fn remove_draw_callback(&mut self, id: WidgetId, callback: CallbackId) -> bool {
        let Some(listeners) = self.listeners.get_mut(id) else {
            return false;
        };
        let before = listeners.on_draw.len();
        listeners.on_draw.retain(|(cb, _)| *cb != callback);
        listeners.on_draw.len() != before
    }

    pub(crate) fn fire_mouse_over(&mut self, id: WidgetId) {
        if let Some(l) = self.listeners.get_mut(id)
            && let Some(cb) = l.on_mouse_over.as_mut()
        {
            cb(id);
        }
    }

    pub(crate) fn fire_mouse_leave(&mut self, id: WidgetId) {
        if let Some(l) = self.listeners.get_mut(id)
            && let Some(cb) = l.on_mouse_leave.as_mut()
        {
            cb(id);
        }
    }

    /// Run the apply callback of the selected widget.
    pub fn apply_selected(&mut self) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        if let Some(l) = self.listeners.get_mut(id)
            && let Some(cb) = l.on_apply.as_mut()
        {
            cb(id);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buttons(menu: &mut Menu, n: usize) -> Vec<WidgetId> {
        (0..n).map(|i| menu.add_button(&format!("b{i}"))).collect()
    }

    #[test]
    fn first_selectable_widget_is_selected() {
        let mut menu = Menu::default();
        menu.add_label("title");
        let b = buttons(&mut menu, 2);
        assert_eq!(menu.selected_widget(), Some(b[0]));
        assert!(menu.get(b[0]).expect("exists").is_selected());
    }

    #[test]
    fn top_level_widgets_stack_in_one_column() {
        let mut menu = Menu::default();
        let b = buttons(&mut menu, 3);
        let margin = menu.theme().widget_margin.y;
        let h = menu.get(b[0]).expect("exists").size().height;
        let y2 = menu.get(b[2]).expect("exists").rect().y;
        assert!((y2 - 2.0 * (h + margin)).abs() < 0.01);
        assert_eq!(menu.col_row_index(b[2]), Some((0, 2, 2)));
    }

    #[test]
    fn remove_selected_moves_selection_forward() {
        let mut menu = Menu::default();
        let b = buttons(&mut menu, 3);
        menu.remove_widget(b[0]).expect("remove");
        assert_eq!(menu.widgets(), &[b[1], b[2]]);
        assert_eq!(menu.selected_widget(), Some(b[1]));
        assert!(!menu.get(b[0]).expect("exists").is_selected());
        assert!(matches!(
            menu.remove_widget(b[0]),
            Err(MenuError::NotInMenu(_))
        ));
    }

    #[test]
    fn move_top_level_widgets() {
        let mut menu = Menu::default();
        let b = buttons(&mut menu, 3);
        menu.move_widget_index(b[0], b[2]).expect("move");
        assert_eq!(menu.widgets(), &[b[1], b[2], b[0]]);
        menu.move_widget_index(b[0], 0).expect("move by index");
        assert_eq!(menu.widgets(), &[b[0], b[1], b[2]]);
        assert!(matches!(
            menu.move_widget_index(b[1], b[1]),
            Err(MenuError::InvalidMove(_))
        ));
        assert!(matches!(
            menu.move_widget_index(b[1], 7),
            Err(MenuError::InvalidMove(_))
        ));
        menu.reverse_widgets();
        assert_eq!(menu.widgets(), &[b[2], b[1], b[0]]);
    }

    #[test]
    fn external_selection_is_reported_then_adopted() {
        let mut menu = Menu::default();
        let b = buttons(&mut menu, 2);
        menu.set_selected_flag(b[1], true).expect("flag");
        assert!(matches!(
            menu.render(),
            Err(MenuError::MultipleSelected(ref ids)) if ids.len() == 2
        ));
        menu.render().expect("second render is consistent");
        assert_eq!(menu.selected_widget(), Some(b[1]));
        assert!(!menu.get(b[0]).expect("exists").is_selected());
    }

    #[test]
    fn draw_callbacks_register_and_remove() {
        let mut menu = Menu::default();
        let b = menu.add_button("b");
        let id = menu.add_draw_callback(b, |_, _| {}).expect("add");
        assert!(menu.remove_draw_callback(b, id));
        assert!(!menu.remove_draw_callback(b, id));
    }

    #[test]
    fn hidden_widget_keeps_flag_without_frame_check() {
        let mut menu = Menu::default();
        let b = buttons(&mut menu, 2);
        menu.hide(b[0]).expect("hide");
        assert!(!menu.is_visible(b[0], true));
        assert_eq!(menu.selected_widget(), Some(b[1]));
        menu.show(b[0]).expect("show");
        assert!(menu.is_visible(b[0], true));
        assert_eq!(menu.selected_widget(), Some(b[1]));
    }
}
