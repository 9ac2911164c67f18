//! Two-pass layout: measure (bottom-up sizes) then place (top-down
//! positions), followed by the derived state that depends on both: the
//! flat sequence, scroll-area registration, index ranges and control
//! widgets.
//!
//! Every structural mutation ends with [`Menu::relayout`], so positions
//! are never stale between calls.

use slotmap::SecondaryMap;

use super::error::MenuError;
use super::geometry::{Axis, Rect, Size, Vec2};
use super::scroll::{ScrollArea, ScrollAreaId};
use super::{Menu, WidgetId};

impl Menu {
    pub(crate) fn relayout(&mut self) {
        self.rebuild_sequence();
        for root in self.roots.clone() {
            self.measure(root);
        }
        let mut scrollable = Vec::new();
        self.place_roots(&mut scrollable);
        self.refresh_root_area();
        self.refresh_scrollable_frames(scrollable);
        self.refresh_indices();
    }

    // ------------------------------------------------------------------
    // Flat sequence
    // ------------------------------------------------------------------

    fn rebuild_sequence(&mut self) {
        let mut flat = Vec::with_capacity(self.widgets.len());
        for &root in &self.roots {
            self.collect_attached(root, &mut flat);
        }
        self.widgets = flat;
    }

    fn collect_attached(&self, id: WidgetId, out: &mut Vec<WidgetId>) {
        let Some(node) = self.arena.get(id) else {
            return;
        };
        if !node.attached {
            return;
        }
        out.push(id);
        if let Some(frame) = node.widget.as_frame() {
            for child in &frame.children {
                self.collect_attached(child.id, out);
            }
        }
    }

    // ------------------------------------------------------------------
    // Measure
    // ------------------------------------------------------------------

    /// Compute the outer size of `id` and the virtual translate of every
    /// child of a frame. Hidden widgets measure as zero.
    fn measure(&mut self, id: WidgetId) -> Size {
        let Some(node) = self.arena.get_mut(id) else {
            return Size::ZERO;
        };
        if !node.visible {
            node.rect.width = 0.0;
            node.rect.height = 0.0;
            self.clear_scrollable(id);
            return Size::ZERO;
        }
        let declared = node.size;
        let Some(data) = node.widget.as_frame() else {
            node.rect.width = declared.width;
            node.rect.height = declared.height;
            return declared;
        };
        let axis = data.orientation;
        let cross = axis.cross();
        let max = data.max;
        let children = data.children.clone();
        let strip = data.title.as_ref().map(|t| t.strip);

        let mut flow = Vec::with_capacity(children.len());
        for child in &children {
            let size = self.measure(child.id);
            let Some(n) = self.arena.get_mut(child.id) else {
                continue;
            };
            n.virtual_translate = Vec2::ZERO;
            if n.visible && !n.floating {
                flow.push((child.id, size, child.options));
            }
        }

        let mut group_len = [0.0_f32; 3];
        let mut cross_len = 0.0_f32;
        for (_, size, options) in &flow {
            group_len[options.group(axis)] += size.along(axis) + options.margin.along(axis);
            cross_len = cross_len.max(size.along(cross) + options.margin.along(cross));
        }
        let total: f32 = group_len.iter().sum();
        let layout_len = declared.along(axis).max(total);
        let layout_cross = declared.along(cross).max(cross_len);

        let center = ((layout_len - group_len[1]) / 2.0).max(group_len[0]);
        let mut cursor = [
            0.0,
            center,
            (layout_len - group_len[2]).max(center + group_len[1]),
        ];

        let mut content = Size::ZERO;
        for (child, size, options) in flow {
            let g = options.group(axis);
            let mut vt = Vec2::ZERO;
            vt.set_along(axis, cursor[g] + options.margin.along(axis));
            vt.set_along(
                cross,
                (layout_cross - size.along(cross)) * options.cross_factor(axis)
                    + options.margin.along(cross),
            );
            cursor[g] += size.along(axis) + options.margin.along(axis);
            content.width = content.width.max(vt.x + size.width);
            content.height = content.height.max(vt.y + size.height);
            if let Some(n) = self.arena.get_mut(child) {
                n.virtual_translate = vt;
            }
        }

        // Axes with a max always show the max; content beyond it scrolls.
        let mut outer = declared;
        let mut scrollable = [false; 2];
        for a in [Axis::Horizontal, Axis::Vertical] {
            if let Some(m) = max[a.index()] {
                outer.set_along(a, m);
                scrollable[a.index()] = content.along(a) > m;
            }
        }

        let title_height = if strip.is_some() {
            self.theme.title_height()
        } else {
            0.0
        };
        if let Some(strip) = strip {
            if let Some(n) = self.arena.get_mut(strip) {
                n.size = Size::new(outer.width, title_height);
            }
            self.measure(strip);
        }

        let Some(node) = self.arena.get_mut(id) else {
            return Size::ZERO;
        };
        node.rect.width = outer.width;
        node.rect.height = outer.height + title_height;
        if let Some(data) = node.widget.as_frame_mut() {
            data.content = content;
            data.scrollable = scrollable;
            data.title_height = title_height;
        }
        node.rect.size()
    }

    /// A hidden subtree scrolls on no axis.
    fn clear_scrollable(&mut self, id: WidgetId) {
        let Some(data) = self.arena.get_mut(id).and_then(|n| n.widget.as_frame_mut()) else {
            return;
        };
        data.scrollable = [false; 2];
        let children: Vec<WidgetId> = data.children.iter().map(|c| c.id).collect();
        for child in children {
            self.clear_scrollable(child);
        }
    }

    // ------------------------------------------------------------------
    // Place
    // ------------------------------------------------------------------

    /// Arrange in-flow top-level widgets in the column grid, then place
    /// every subtree. Floating or hidden top-level widgets keep their
    /// anchor.
    fn place_roots(&mut self, scrollable: &mut Vec<WidgetId>) {
        let roots = self.roots.clone();
        let root_area = self.root_area;
        let in_flow: Vec<WidgetId> = roots
            .iter()
            .copied()
            .filter(|&id| self.arena.get(id).is_some_and(|n| n.visible && !n.floating))
            .collect();

        let columns = self.config.columns.max(1);
        let rows = self
            .config
            .rows
            .unwrap_or_else(|| in_flow.len().div_ceil(columns))
            .max(1);
        self.column_overflow = None;
        if in_flow.len() > rows * columns {
            log::warn!(
                "{} widgets exceed the {}x{} column grid",
                in_flow.len(),
                columns,
                rows
            );
            self.column_overflow = Some(MenuError::ColumnOverflow {
                widgets: in_flow.len(),
                columns,
                rows,
            });
        }

        let cell = |i: usize| ((i / rows).min(columns - 1), i % rows);
        let mut col_width = vec![0.0_f32; columns];
        for (i, &id) in in_flow.iter().enumerate() {
            let w = self.arena.get(id).map_or(0.0, |n| n.rect.width);
            let (col, _) = cell(i);
            col_width[col] = col_width[col].max(w);
        }
        let margin = self.theme.widget_margin;
        let factor = self.theme.widget_alignment.factor();
        let mut col_x = Vec::with_capacity(columns);
        let mut x = 0.0;
        for w in &col_width {
            col_x.push(x);
            x += w + margin.x;
        }

        let mut col_y = vec![0.0_f32; columns];
        for &id in &roots {
            let Some(node) = self.arena.get_mut(id) else {
                continue;
            };
            node.col_row = None;
            let origin = match in_flow.iter().position(|&r| r == id) {
                Some(i) => {
                    let (col, row) = cell(i);
                    let size = node.rect.size();
                    let origin = Vec2::new(
                        col_x[col] + (col_width[col] - size.width) * factor,
                        col_y[col],
                    );
                    col_y[col] += size.height + margin.y;
                    node.col_row = Some((col, row));
                    origin
                }
                None => node.anchor,
            };
            self.place(id, origin, root_area, scrollable);
        }
    }

    fn place(
        &mut self,
        id: WidgetId,
        origin: Vec2,
        area: ScrollAreaId,
        scrollable: &mut Vec<WidgetId>,
    ) {
        let Some(node) = self.arena.get_mut(id) else {
            return;
        };
        node.area = area;
        node.anchor = origin;
        let pos = origin + node.translate;
        node.rect.x = pos.x;
        node.rect.y = pos.y;
        let rect = node.rect;
        if !node.visible {
            return;
        }
        let Some(data) = node.widget.as_frame() else {
            return;
        };
        let children = data.children.clone();
        let strip = data.title.as_ref().map(|t| t.strip);
        let title_height = data.title_height;
        let content = data.content;
        let scrolls = data.is_scrollable_any();

        if let Some(strip) = strip {
            self.place(strip, rect.origin(), area, scrollable);
        }

        let content_box = Rect::new(rect.x, rect.y + title_height, rect.width, rect.height - title_height);
        let (child_area, base) = if scrolls {
            scrollable.push(id);
            (
                self.ensure_inner_area(id, area, content_box, content),
                Vec2::ZERO,
            )
        } else {
            self.demote_inner_area(id);
            (area, content_box.origin())
        };

        for child in children {
            let vt = self
                .arena
                .get(child.id)
                .map_or(Vec2::ZERO, |n| n.virtual_translate);
            self.place(child.id, base + vt, child_area, scrollable);
        }
    }

    /// Create or update the frame's inner scroll area. `view` is in the
    /// parent area's coordinates.
    fn ensure_inner_area(
        &mut self,
        frame: WidgetId,
        parent: ScrollAreaId,
        view: Rect,
        content: Size,
    ) -> ScrollAreaId {
        let depth = self.areas.get(parent).map_or(0, |a| a.depth) + 1;
        let existing = self
            .arena
            .get(frame)
            .and_then(|n| n.widget.as_frame())
            .and_then(|f| f.inner_area)
            .filter(|&a| self.areas.contains_key(a));
        let id = match existing {
            Some(id) => id,
            None => {
                let id = self
                    .areas
                    .insert(ScrollArea::new(Some(frame), self.theme.scrollbar_thickness));
                if let Some(data) = self.arena.get_mut(frame).and_then(|n| n.widget.as_frame_mut()) {
                    data.inner_area = Some(id);
                }
                log::debug!("created scroll area {:?} for frame {:?}", id, frame);
                id
            }
        };
        if let Some(area) = self.areas.get_mut(id) {
            area.parent = Some(parent);
            area.depth = depth;
            area.view = view;
            area.world = Size::new(
                content.width.max(view.width),
                content.height.max(view.height),
            );
        }
        id
    }

    /// A frame whose content fits again keeps its area object but stops
    /// scrolling: the offset resets and children share the parent area.
    fn demote_inner_area(&mut self, frame: WidgetId) {
        let area = self
            .arena
            .get(frame)
            .and_then(|n| n.widget.as_frame())
            .and_then(|f| f.inner_area);
        if let Some(area) = area.and_then(|a| self.areas.get_mut(a)) {
            area.reset();
        }
    }

    fn refresh_root_area(&mut self) {
        let view = Rect::from_origin(self.config.position, self.config.size());
        let mut world = self.config.size();
        for &id in &self.roots {
            if let Some(n) = self.arena.get(id) {
                world.width = world.width.max(n.rect.right());
                world.height = world.height.max(n.rect.bottom());
            }
        }
        if let Some(root) = self.areas.get_mut(self.root_area) {
            root.view = view;
            root.world = world;
        }
    }

    /// Replace the scrollable-frame list with the frames found during
    /// placement, deepest first.
    fn refresh_scrollable_frames(&mut self, mut found: Vec<WidgetId>) {
        let depth = |m: &Menu, id: WidgetId| {
            m.arena
                .get(id)
                .and_then(|n| n.widget.as_frame())
                .and_then(|f| f.inner_area)
                .and_then(|a| m.areas.get(a))
                .map_or(0, |a| a.depth)
        };
        found.sort_by_key(|&id| std::cmp::Reverse(depth(self, id)));
        for &id in &found {
            if !self.scrollable_frames.contains(&id) {
                log::debug!("frame {:?} is now scrollable", id);
            }
        }
        for &id in &self.scrollable_frames {
            if !found.contains(&id) {
                log::debug!("frame {:?} is no longer scrollable", id);
            }
        }
        self.scrollable_frames = found;
    }

    // ------------------------------------------------------------------
    // Derived navigation state
    // ------------------------------------------------------------------

    /// Index ranges (computed innermost first), control widgets, and the
    /// grid cell inherited from the top-level ancestor.
    fn refresh_indices(&mut self) {
        let mut position: SecondaryMap<WidgetId, usize> = SecondaryMap::new();
        for (i, &id) in self.widgets.iter().enumerate() {
            position.insert(id, i);
        }

        for &id in self.widgets.iter().rev() {
            let Some(data) = self.arena.get(id).and_then(|n| n.widget.as_frame()) else {
                continue;
            };
            let mut range: Option<(usize, usize)> = None;
            for child in &data.children {
                let (Some(&i), Some(n)) = (position.get(child.id), self.arena.get(child.id)) else {
                    continue;
                };
                if n.floating {
                    continue;
                }
                let counts = match n.widget.as_frame() {
                    Some(f) => f.indices.is_some(),
                    None => n.selectable && n.visible,
                };
                if counts {
                    range = Some(range.map_or((i, i), |(lo, hi)| (lo.min(i), hi.max(i))));
                }
            }
            let previous = data.control;
            let control = previous
                .filter(|&c| self.is_ancestor(id, c) && self.is_navigable(c))
                .or_else(|| self.first_navigable_in(id));
            if let Some(data) = self.arena.get_mut(id).and_then(|n| n.widget.as_frame_mut()) {
                data.indices = range;
                data.control = control;
            }
        }

        for i in 0..self.widgets.len() {
            let id = self.widgets[i];
            let inherited = self
                .arena
                .get(id)
                .and_then(|n| n.frame)
                .and_then(|f| self.arena.get(f))
                .and_then(|f| f.col_row);
            if let Some(n) = self.arena.get_mut(id)
                && n.frame.is_some()
            {
                n.col_row = inherited;
            }
        }
    }

    /// Navigable descendants of a frame, in flat order.
    pub(crate) fn navigable_in(&self, frame: WidgetId) -> Vec<WidgetId> {
        let Some(start) = self.index_of(frame) else {
            return Vec::new();
        };
        self.widgets[start + 1..]
            .iter()
            .copied()
            .take_while(|&w| self.is_ancestor(frame, w))
            .filter(|&w| self.is_navigable(w))
            .collect()
    }

    fn first_navigable_in(&self, frame: WidgetId) -> Option<WidgetId> {
        self.navigable_in(frame).first().copied()
    }

    // ------------------------------------------------------------------
    // Coordinates
    // ------------------------------------------------------------------

    /// Map a rectangle from `area` content coordinates to the screen.
    pub(crate) fn to_screen(&self, area: ScrollAreaId, rect: Rect) -> Rect {
        let mut r = rect;
        let mut current = Some(area);
        while let Some(a) = current.and_then(|id| self.areas.get(id)) {
            r = a.to_parent(r);
            current = a.parent;
        }
        r
    }

    /// Screen rectangle through which `area` content is visible.
    pub fn absolute_view(&self, area: ScrollAreaId) -> Rect {
        let Some(a) = self.areas.get(area) else {
            return Rect::default();
        };
        match a.parent {
            None => a.view,
            Some(parent) => self
                .to_screen(parent, a.view)
                .clip(&self.absolute_view(parent)),
        }
    }

    /// On-screen rectangle of a widget, clipped by every scroll area in its
    /// chain. May be zero-area when the widget is scrolled out of view.
    pub fn real_rect(&self, id: WidgetId) -> Option<Rect> {
        let node = self.arena.get(id)?;
        Some(
            self.to_screen(node.area, node.rect)
                .clip(&self.absolute_view(node.area)),
        )
    }

    pub fn is_in_view(&self, id: WidgetId) -> bool {
        self.real_rect(id).is_some_and(|r| !r.is_empty())
    }

    /// Topmost widget of the flat sequence under a screen point.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<WidgetId> {
        self.widgets.iter().rev().copied().find(|&id| {
            self.is_visible(id, true)
                && self
                    .real_rect(id)
                    .is_some_and(|r| !r.is_empty() && r.contains(x, y))
        })
    }

    // ------------------------------------------------------------------
    // Scroll accessors
    // ------------------------------------------------------------------

    pub fn root_scroll_area(&self) -> ScrollAreaId {
        self.root_area
    }

    pub fn scroll_area(&self, id: ScrollAreaId) -> Option<&ScrollArea> {
        self.areas.get(id)
    }

    /// Area a widget's rectangle is expressed in: the inner area of its
    /// innermost scrolling frame, or the root area.
    pub fn widget_scroll_area(&self, id: WidgetId) -> Option<ScrollAreaId> {
        self.arena.get(id).map(|n| n.area)
    }

    /// Currently scrolling frames, deepest first.
    pub fn scrollable_frames(&self) -> &[WidgetId] {
        &self.scrollable_frames
    }

    /// Set a scroll percentage, clamped to 0..=1. Returns false for an
    /// unknown area.
    pub fn scroll_to(&mut self, area: ScrollAreaId, axis: Axis, pct: f32) -> bool {
        match self.areas.get_mut(area) {
            Some(a) => {
                a.scroll_to(axis, pct);
                true
            }
            None => false,
        }
    }

    /// Scroll every area in the widget's chain, innermost first, by the
    /// minimal amount that makes it visible. Returns true if anything
    /// moved.
    pub fn scroll_to_widget(&mut self, id: WidgetId) -> bool {
        let Some(node) = self.arena.get(id) else {
            return false;
        };
        let mut rect = node.rect;
        let mut current = Some(node.area);
        let mut changed = false;
        while let Some(a) = current.and_then(|id| self.areas.get_mut(id)) {
            changed |= a.ensure_visible(rect);
            rect = a.to_parent(rect).clip(&a.view);
            current = a.parent;
        }
        changed
    }
}
