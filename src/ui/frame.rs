//! Frame container: single-axis packing, index ranges, titles.
//!
//! A frame owns an ordered child list. Children are laid out along the
//! frame's orientation in three groups (leading, center, trailing) picked
//! by the pack options; the other option positions the child across the
//! axis. When content outgrows a declared max the frame scrolls through an
//! inner [`ScrollArea`](super::ScrollArea) created by the layout pass.

use serde::Deserialize;

use super::error::{MenuError, MenuResult};
use super::geometry::{Axis, Size, Vec2};
use super::scroll::ScrollAreaId;
use super::widget::Widget;
use super::{CursorIcon, Menu, WidgetId};

/// Horizontal placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn factor(self) -> f32 {
        match self {
            Align::Left => 0.0,
            Align::Center => 0.5,
            Align::Right => 1.0,
        }
    }

    fn group(self) -> usize {
        self as usize
    }
}

/// Vertical placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum VPos {
    #[default]
    North,
    Center,
    South,
}

impl VPos {
    pub fn factor(self) -> f32 {
        match self {
            VPos::North => 0.0,
            VPos::Center => 0.5,
            VPos::South => 1.0,
        }
    }

    fn group(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PackOptions {
    pub align: Align,
    pub vertical_position: VPos,
    /// Offset added to the placement and to the packed extent.
    pub margin: Vec2,
}

impl PackOptions {
    pub fn new(align: Align, vertical_position: VPos) -> Self {
        Self {
            align,
            vertical_position,
            margin: Vec2::ZERO,
        }
    }

    pub fn with_margin(mut self, x: f32, y: f32) -> Self {
        self.margin = Vec2::new(x, y);
        self
    }

    /// Layout group (leading/center/trailing) along the packing axis.
    pub(crate) fn group(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.align.group(),
            Axis::Vertical => self.vertical_position.group(),
        }
    }

    /// Start/center/end factor across the packing axis.
    pub(crate) fn cross_factor(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.vertical_position.factor(),
            Axis::Vertical => self.align.factor(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PackedChild {
    pub id: WidgetId,
    pub options: PackOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameOptions {
    pub max_width: Option<f32>,
    pub max_height: Option<f32>,
    pub relax: bool,
    pub accepts_title: bool,
    pub cursor: Option<CursorIcon>,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            max_width: None,
            max_height: None,
            relax: false,
            accepts_title: true,
            cursor: None,
        }
    }
}

impl FrameOptions {
    pub fn max_width(mut self, v: f32) -> Self {
        self.max_width = Some(v);
        self
    }

    pub fn max_height(mut self, v: f32) -> Self {
        self.max_height = Some(v);
        self
    }

    pub fn relax(mut self) -> Self {
        self.relax = true;
        self
    }

    pub fn reject_title(mut self) -> Self {
        self.accepts_title = false;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleButton {
    Close,
    Maximize,
    Minimize,
}

impl TitleButton {
    fn glyph(self) -> &'static str {
        match self {
            TitleButton::Close => "x",
            TitleButton::Maximize => "+",
            TitleButton::Minimize => "_",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TitleOptions {
    pub align: Align,
    pub cursor: Option<CursorIcon>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FrameTitle {
    /// Horizontal frame holding the label and buttons. Never attached.
    pub strip: WidgetId,
    pub label: WidgetId,
    pub buttons: Vec<WidgetId>,
}

/// Which widgets [`Menu::frame_widgets`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unpack {
    /// Direct children only.
    Direct,
    /// Leaves of every nested frame, in order.
    Nested,
    /// Every descendant, frames included.
    NestedWithFrames,
}

/// Container state stored inside [`Widget::Frame`].
#[derive(Debug, Clone, PartialEq)]
pub struct FrameData {
    /// Packing axis.
    pub(crate) orientation: Axis,
    /// Max bounds, `[width, height]`.
    pub(crate) max: [Option<f32>; 2],
    pub(crate) children: Vec<PackedChild>,
    pub(crate) relax: bool,
    pub(crate) accepts_title: bool,
    pub(crate) title: Option<FrameTitle>,
    pub(crate) title_height: f32,
    pub(crate) inner_area: Option<ScrollAreaId>,
    /// Scrolling per axis, `[horizontal, vertical]` (set by layout pass).
    pub(crate) scrollable: [bool; 2],
    /// Bounding box of in-flow children from the content origin.
    pub(crate) content: Size,
    pub(crate) indices: Option<(usize, usize)>,
    pub(crate) control: Option<WidgetId>,
}

impl FrameData {
    pub(crate) fn new(orientation: Axis, options: &FrameOptions) -> Self {
        Self {
            orientation,
            max: [options.max_width, options.max_height],
            children: Vec::new(),
            relax: options.relax,
            accepts_title: options.accepts_title,
            title: None,
            title_height: 0.0,
            inner_area: None,
            scrollable: [false; 2],
            content: Size::ZERO,
            indices: None,
            control: None,
        }
    }

    pub fn orientation(&self) -> Axis {
        self.orientation
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_scrollable_any(&self) -> bool {
        self.scrollable[0] || self.scrollable[1]
    }

    pub fn content_size(&self) -> Size {
        self.content
    }
}

/// Max bounds must be positive and below the declared size.
pub(crate) fn validate_frame_size(width: f32, height: f32, max: &[Option<f32>; 2]) -> MenuResult<()> {
    if width < 0.0 || height < 0.0 {
        return Err(MenuError::InvalidFrameSize(format!(
            "size ({width}, {height}) must not be negative"
        )));
    }
    for (axis, declared) in [(Axis::Horizontal, width), (Axis::Vertical, height)] {
        if let Some(m) = max[axis.index()]
            && (m <= 0.0 || m >= declared)
        {
            return Err(MenuError::InvalidFrameSize(format!(
                "max {m} along {axis:?} must be positive and below {declared}"
            )));
        }
    }
    Ok(())
}

impl Menu {
    // ------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------

    fn add_frame(
        &mut self,
        orientation: Axis,
        width: f32,
        height: f32,
        options: FrameOptions,
    ) -> MenuResult<WidgetId> {
        validate_frame_size(width, height, &[options.max_width, options.max_height])?;
        let cursor = options.cursor;
        let data = FrameData::new(orientation, &options);
        let id = self.insert_node(Widget::Frame(Box::new(data)), Size::new(width, height));
        if let Some(node) = self.arena.get_mut(id) {
            node.cursor = cursor;
        }
        self.attach(id);
        Ok(id)
    }

    /// Frame packing top to bottom.
    pub fn add_frame_v(
        &mut self,
        width: f32,
        height: f32,
        options: FrameOptions,
    ) -> MenuResult<WidgetId> {
        self.add_frame(Axis::Vertical, width, height, options)
    }

    /// Frame packing left to right.
    pub fn add_frame_h(
        &mut self,
        width: f32,
        height: f32,
        options: FrameOptions,
    ) -> MenuResult<WidgetId> {
        self.add_frame(Axis::Horizontal, width, height, options)
    }

    pub(crate) fn frame_data(&self, id: WidgetId) -> MenuResult<&FrameData> {
        self.node(id)?
            .widget
            .as_frame()
            .ok_or(MenuError::NotAFrame(id))
    }

    pub(crate) fn frame_data_mut(&mut self, id: WidgetId) -> MenuResult<&mut FrameData> {
        self.node_mut(id)?
            .widget
            .as_frame_mut()
            .ok_or(MenuError::NotAFrame(id))
    }

    // ------------------------------------------------------------------
    // Pack / unpack
    // ------------------------------------------------------------------

    pub fn pack(&mut self, frame: WidgetId, widget: WidgetId) -> MenuResult<WidgetId> {
        self.pack_with(frame, widget, PackOptions::default())
    }

    /// Append `widget` to `frame`. Every precondition is checked before the
    /// first mutation, so a failed pack leaves the menu untouched.
    pub fn pack_with(
        &mut self,
        frame: WidgetId,
        widget: WidgetId,
        options: PackOptions,
    ) -> MenuResult<WidgetId> {
        self.frame_data(frame)?;
        if !self.node(frame)?.attached {
            return Err(MenuError::FrameDetached(frame));
        }
        let node = self.node(widget)?;
        if !node.configured {
            return Err(MenuError::NotConfigured(widget));
        }
        if widget == frame || self.is_ancestor(widget, frame) {
            return Err(MenuError::PackCycle(widget));
        }
        if let Some(owner) = node.frame {
            return Err(MenuError::AlreadyPacked {
                widget,
                frame: owner,
            });
        }
        if node.widget.is_frame() && !node.attached {
            return Err(MenuError::WidgetDetached(widget));
        }
        let extent = if node.visible {
            node.rect.size()
        } else {
            Size::ZERO
        };
        self.check_frame_fits(frame, Some((extent, options)))?;

        self.roots.retain(|&r| r != widget);
        self.frame_data_mut(frame)?.children.push(PackedChild {
            id: widget,
            options,
        });
        let node = self.node_mut(widget)?;
        node.frame = Some(frame);
        node.floating = false;
        log::debug!("packed {:?} into frame {:?}", widget, frame);

        self.relayout();
        Ok(widget)
    }

    /// Pack several widgets with the same options, stopping at the first
    /// failure. Widgets packed before the failure stay packed.
    pub fn pack_all(
        &mut self,
        frame: WidgetId,
        widgets: &[WidgetId],
        options: PackOptions,
    ) -> MenuResult<()> {
        for &w in widgets {
            self.pack_with(frame, w, options)?;
        }
        Ok(())
    }

    /// Detach a direct child. It becomes a floating top-level widget at its
    /// last on-screen position (or stays out of band if it never was in
    /// the flat sequence).
    pub fn unpack(&mut self, frame: WidgetId, widget: WidgetId) -> MenuResult<WidgetId> {
        let data = self.frame_data(frame)?;
        if data.children.is_empty() {
            return Err(MenuError::EmptyFrame(frame));
        }
        if !data.children.iter().any(|c| c.id == widget) {
            return Err(MenuError::NotDirectChild { widget, frame });
        }
        let successors = self.selection_successors();
        self.release_hover_of(widget);
        self.detach_child(frame, widget);
        self.relayout();
        self.reselect_if_stranded(&successors);
        Ok(widget)
    }

    /// Unpack every child in order and drop the frame's scroll area.
    /// Returns the unpacked widgets.
    pub fn clear(&mut self, frame: WidgetId) -> MenuResult<Vec<WidgetId>> {
        let ids: Vec<WidgetId> = self
            .frame_data(frame)?
            .children
            .iter()
            .map(|c| c.id)
            .collect();
        let successors = self.selection_successors();
        for &id in &ids {
            self.release_hover_of(id);
            self.detach_child(frame, id);
        }
        self.drop_inner_area(frame);
        self.relayout();
        self.reselect_if_stranded(&successors);
        Ok(ids)
    }

    /// Mutation half of unpack. Caller re-runs layout.
    pub(crate) fn detach_child(&mut self, frame: WidgetId, widget: WidgetId) {
        // Freeze the widget where it is on screen, in root coordinates.
        let frozen = self.arena.get(widget).map(|n| {
            let screen = self.to_screen(n.area, n.rect);
            let root = self.areas.get(self.root_area);
            root.map_or(screen.origin(), |a| a.from_parent(screen.origin()))
        });

        if let Some(data) = self.arena.get_mut(frame).and_then(|n| n.widget.as_frame_mut()) {
            data.children.retain(|c| c.id != widget);
        }
        let root_area = self.root_area;
        let Some(node) = self.arena.get_mut(widget) else {
            return;
        };
        node.frame = None;
        node.floating = true;
        node.virtual_translate = Vec2::ZERO;
        node.area = root_area;
        if let Some(pos) = frozen {
            node.rect.x = pos.x;
            node.rect.y = pos.y;
            node.anchor = pos - node.translate;
        }
        if node.attached {
            self.roots.push(widget);
        }
        log::debug!("unpacked {:?} from frame {:?}", widget, frame);
    }

    pub(crate) fn drop_inner_area(&mut self, frame: WidgetId) {
        let Some(data) = self.arena.get_mut(frame).and_then(|n| n.widget.as_frame_mut()) else {
            return;
        };
        data.scrollable = [false; 2];
        if let Some(area) = data.inner_area.take() {
            self.areas.remove(area);
            log::debug!("dropped scroll area of frame {:?}", frame);
        }
        self.scrollable_frames.retain(|&f| f != frame);
    }

    /// Reorder `id` to the place of `target` inside `frame`. Out-of-band
    /// children are carried along with the attached child before them.
    pub(crate) fn move_within_frame(
        &mut self,
        frame: WidgetId,
        id: WidgetId,
        target: WidgetId,
    ) -> MenuResult<()> {
        let children = self.frame_data(frame)?.children.clone();
        let mut units: Vec<Vec<PackedChild>> = Vec::new();
        for child in children {
            let attached = self.arena.get(child.id).is_some_and(|n| n.attached);
            match units.last_mut() {
                Some(unit) if !attached => unit.push(child),
                _ => units.push(vec![child]),
            }
        }
        let from = units.iter().position(|u| u[0].id == id);
        let to = units.iter().position(|u| u[0].id == target);
        let (Some(from), Some(to)) = (from, to) else {
            return Err(MenuError::InvalidMove(id));
        };
        let unit = units.remove(from);
        units.insert(to, unit);
        self.frame_data_mut(frame)?.children = units.into_iter().flatten().collect();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Size checks
    // ------------------------------------------------------------------

    /// Verify in-flow content (plus an optional widget about to be packed)
    /// fits the frame's declared size on every axis without a max.
    pub(crate) fn check_frame_fits(
        &self,
        frame: WidgetId,
        extra: Option<(Size, PackOptions)>,
    ) -> MenuResult<()> {
        let data = self.frame_data(frame)?;
        if data.relax {
            return Ok(());
        }
        let declared = self.node(frame)?.size;
        let axis = data.orientation;
        let cross = axis.cross();

        let mut along = 0.0_f32;
        let mut across = 0.0_f32;
        let extents = data.children.iter().filter_map(|c| {
            let n = self.arena.get(c.id)?;
            (n.visible && !n.floating).then(|| (n.rect.size(), c.options))
        });
        for (size, options) in extents.chain(extra) {
            along += size.along(axis) + options.margin.along(axis);
            across = across.max(size.along(cross) + options.margin.along(cross));
        }

        for (a, required) in [(axis, along), (cross, across)] {
            let available = declared.along(a);
            if data.max[a.index()].is_none() && required > available + 1e-3 {
                return Err(MenuError::FrameSize {
                    frame,
                    axis: a,
                    required,
                    available,
                });
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn frame_widgets(&self, frame: WidgetId, mode: Unpack) -> MenuResult<Vec<WidgetId>> {
        let data = self.frame_data(frame)?;
        let mut out = Vec::new();
        for child in &data.children {
            let is_frame = self.arena.get(child.id).is_some_and(|n| n.widget.is_frame());
            match mode {
                Unpack::Direct => out.push(child.id),
                _ if !is_frame => out.push(child.id),
                Unpack::Nested => out.extend(self.frame_widgets(child.id, mode)?),
                Unpack::NestedWithFrames => {
                    out.push(child.id);
                    out.extend(self.frame_widgets(child.id, mode)?);
                }
            }
        }
        Ok(out)
    }

    /// Flat-sequence span of the frame's navigable content, or `None`.
    pub fn frame_indices(&self, frame: WidgetId) -> MenuResult<Option<(usize, usize)>> {
        Ok(self.frame_data(frame)?.indices)
    }

    /// Navigation entry point when the frame is entered from outside.
    pub fn control_widget(&self, frame: WidgetId) -> MenuResult<Option<WidgetId>> {
        Ok(self.frame_data(frame)?.control)
    }

    pub fn is_scrollable(&self, frame: WidgetId, axis: Axis) -> MenuResult<bool> {
        Ok(self.frame_data(frame)?.scrollable[axis.index()])
    }

    /// Inner scroll area, created the first time content overflowed.
    pub fn frame_scroll_area(&self, frame: WidgetId) -> MenuResult<Option<ScrollAreaId>> {
        Ok(self.frame_data(frame)?.inner_area)
    }

    pub fn relax(&mut self, frame: WidgetId, relax: bool) -> MenuResult<()> {
        self.frame_data_mut(frame)?.relax = relax;
        Ok(())
    }

    /// Return every floating child of the frame to flow layout.
    pub fn unfloat(&mut self, frame: WidgetId) -> MenuResult<()> {
        let ids: Vec<WidgetId> = self
            .frame_data(frame)?
            .children
            .iter()
            .map(|c| c.id)
            .collect();
        for id in ids {
            if let Some(node) = self.arena.get_mut(id) {
                node.floating = false;
            }
        }
        self.relayout();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Title strip
    // ------------------------------------------------------------------

    /// Add (or replace) the frame's title. The strip sits above the content
    /// region and adds its height to the frame.
    pub fn set_title(
        &mut self,
        frame: WidgetId,
        text: &str,
        options: TitleOptions,
    ) -> MenuResult<()> {
        if !self.frame_data(frame)?.accepts_title {
            return Err(MenuError::TitleRejected(frame));
        }
        self.remove_title(frame)?;

        let strip_options = FrameOptions {
            relax: true,
            ..FrameOptions::default()
        };
        let strip = self.insert_node(
            Widget::Frame(Box::new(FrameData::new(Axis::Horizontal, &strip_options))),
            Size::ZERO,
        );
        let label_size = self
            .theme
            .measure_text(text, self.theme.title_font_size);
        let label = self.insert_node(
            Widget::Label {
                text: text.to_string(),
            },
            label_size,
        );
        let pad = self.theme.title_padding;
        self.push_strip_child(
            strip,
            label,
            PackOptions::new(options.align, VPos::Center).with_margin(pad, 0.0),
        );
        if let Some(node) = self.arena.get_mut(strip) {
            node.cursor = options.cursor;
            node.title_of = Some(frame);
        }

        self.frame_data_mut(frame)?.title = Some(FrameTitle {
            strip,
            label,
            buttons: Vec::new(),
        });
        log::debug!("frame {:?} titled {:?}", frame, text);
        self.relayout();
        Ok(())
    }

    pub fn remove_title(&mut self, frame: WidgetId) -> MenuResult<()> {
        let Some(title) = self.frame_data_mut(frame)?.title.take() else {
            return Ok(());
        };
        self.release_hover_of(title.strip);
        for id in title.buttons.into_iter().chain([title.label, title.strip]) {
            self.arena.remove(id);
            self.listeners.remove(id);
        }
        self.relayout();
        Ok(())
    }

    /// Add a square button at the right end of the title strip. The
    /// callback receives the frame and the button.
    pub fn add_title_button(
        &mut self,
        frame: WidgetId,
        kind: TitleButton,
        callback: impl FnMut(WidgetId, WidgetId) + 'static,
    ) -> MenuResult<WidgetId> {
        let strip = self
            .frame_data(frame)?
            .title
            .as_ref()
            .map(|t| t.strip)
            .ok_or(MenuError::TitleRejected(frame))?;
        let side = self.theme.title_font_size;
        let button = self.insert_node(
            Widget::Button {
                title: kind.glyph().to_string(),
            },
            Size::new(side, side),
        );
        if let Some(node) = self.arena.get_mut(button) {
            node.selectable = false;
            node.cursor = Some(CursorIcon::Pointer);
        }
        let pad = self.theme.title_padding;
        self.push_strip_child(
            strip,
            button,
            PackOptions::new(Align::Right, VPos::Center).with_margin(-pad, 0.0),
        );
        if let Some(listeners) = self.listeners.entry(button).map(|e| e.or_default()) {
            listeners.on_title_button = Some(Box::new(callback));
        }
        if let Some(title) = self.frame_data_mut(frame)?.title.as_mut() {
            title.buttons.push(button);
        }
        self.relayout();
        Ok(button)
    }

    /// Title strip widgets are never attached, so they bypass `pack`.
    fn push_strip_child(&mut self, strip: WidgetId, child: WidgetId, options: PackOptions) {
        if let Some(data) = self.arena.get_mut(strip).and_then(|n| n.widget.as_frame_mut()) {
            data.children.push(PackedChild { id: child, options });
        }
        if let Some(node) = self.arena.get_mut(child) {
            node.frame = Some(strip);
            node.configured = true;
        }
    }

    pub fn title_strip(&self, frame: WidgetId) -> MenuResult<Option<WidgetId>> {
        Ok(self.frame_data(frame)?.title.as_ref().map(|t| t.strip))
    }

    pub fn title_buttons(&self, frame: WidgetId) -> MenuResult<Vec<WidgetId>> {
        Ok(self
            .frame_data(frame)?
            .title
            .as_ref()
            .map(|t| t.buttons.clone())
            .unwrap_or_default())
    }

    /// Invoke the callback of a title button.
    pub(crate) fn fire_title_button(&mut self, button: WidgetId) -> bool {
        let Some(frame) = self
            .arena
            .get(button)
            .and_then(|n| n.frame)
            .and_then(|strip| self.arena.get(strip))
            .and_then(|n| n.title_of)
        else {
            return false;
        };
        if let Some(l) = self.listeners.get_mut(button)
            && let Some(cb) = l.on_title_button.as_mut()
        {
            cb(frame, button);
            return true;
        }
        false
    }
}
