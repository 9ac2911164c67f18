//! Selection navigator: directional moves over the flat sequence.
//!
//! Up/down walk the navigable widgets in flat order with wrap-around.
//! Left/right first walk inside horizontal frames, then jump between
//! top-level columns. Every selection change scrolls the new widget into
//! view.

use super::error::{MenuError, MenuResult};
use super::geometry::Axis;
use super::{Menu, WidgetId};

impl Menu {
    /// Select a navigable widget.
    pub fn select_widget(&mut self, id: WidgetId) -> MenuResult<()> {
        self.node(id)?;
        if !self.is_navigable(id) {
            return Err(MenuError::NotSelectable(id));
        }
        self.set_selection(Some(id));
        Ok(())
    }

    pub(crate) fn set_selection(&mut self, id: Option<WidgetId>) {
        if self.selected != id {
            if let Some(old) = self.selected.and_then(|s| self.arena.get_mut(s)) {
                old.selected = false;
            }
            self.selected = id;
            log::trace!("selection -> {:?}", id);
        }
        let Some(id) = id else {
            return;
        };
        let mut owner = match self.arena.get_mut(id) {
            Some(node) => {
                node.selected = true;
                node.frame
            }
            None => return,
        };
        // Re-entering a frame resumes at the last selected descendant.
        while let Some(f) = owner {
            let Some(node) = self.arena.get_mut(f) else {
                break;
            };
            if let Some(data) = node.widget.as_frame_mut() {
                data.control = Some(id);
            }
            owner = node.frame;
        }
        self.scroll_to_widget(id);
    }

    /// Select the first navigable widget at or after flat index `start`,
    /// wrapping. Clears the selection when nothing is navigable.
    pub(crate) fn select_from(&mut self, start: usize) -> bool {
        let n = self.widgets.len();
        for k in 0..n {
            let id = self.widgets[(start + k) % n];
            if self.is_navigable(id) {
                self.set_selection(Some(id));
                return true;
            }
        }
        self.set_selection(None);
        false
    }

    /// Widgets following the selection in flat order. Captured before a
    /// structural change that may strand the selection.
    pub(crate) fn selection_successors(&self) -> Vec<WidgetId> {
        match self.selected.and_then(|s| self.index_of(s)) {
            Some(i) => self.widgets[i + 1..].to_vec(),
            None => Vec::new(),
        }
    }

    /// Move the selection off a widget that is no longer navigable: to the
    /// first successor that still is, else to the first navigable widget.
    pub(crate) fn reselect_if_stranded(&mut self, successors: &[WidgetId]) {
        let Some(sel) = self.selected else {
            return;
        };
        if self.is_navigable(sel) {
            return;
        }
        match successors.iter().copied().find(|&w| self.is_navigable(w)) {
            Some(next) => self.set_selection(Some(next)),
            None => {
                self.select_from(0);
            }
        }
    }

    fn navigable(&self) -> Vec<WidgetId> {
        self.widgets
            .iter()
            .copied()
            .filter(|&w| self.is_navigable(w))
            .collect()
    }

    // ------------------------------------------------------------------
    // Directional moves
    // ------------------------------------------------------------------

    /// Previous navigable widget, wrapping. Returns true if the selection
    /// changed.
    pub fn move_up(&mut self) -> bool {
        self.step(false)
    }

    /// Next navigable widget, wrapping.
    pub fn move_down(&mut self) -> bool {
        self.step(true)
    }

    pub fn move_left(&mut self) -> bool {
        self.move_horizontal(false)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_horizontal(true)
    }

    fn step(&mut self, forward: bool) -> bool {
        let nav = self.navigable();
        if nav.is_empty() {
            return false;
        }
        let len = nav.len();
        let next = match self.selected.and_then(|s| nav.iter().position(|&w| w == s)) {
            None => nav[0],
            Some(i) if forward => nav[(i + 1) % len],
            Some(i) => nav[(i + len - 1) % len],
        };
        if self.selected == Some(next) {
            return false;
        }
        self.set_selection(Some(next));
        true
    }

    fn move_horizontal(&mut self, forward: bool) -> bool {
        let Some(selected) = self.selected.filter(|&s| self.is_navigable(s)) else {
            return self.step(forward);
        };

        let mut owner = self.arena.get(selected).and_then(|n| n.frame);
        while let Some(frame) = owner {
            let horizontal = self
                .arena
                .get(frame)
                .and_then(|n| n.widget.as_frame())
                .is_some_and(|f| f.orientation() == Axis::Horizontal);
            if horizontal {
                let nav = self.navigable_in(frame);
                let next = nav.iter().position(|&w| w == selected).and_then(|i| {
                    if forward {
                        nav.get(i + 1)
                    } else {
                        i.checked_sub(1).and_then(|j| nav.get(j))
                    }
                });
                if let Some(&next) = next {
                    self.set_selection(Some(next));
                    return true;
                }
            }
            owner = self.arena.get(frame).and_then(|n| n.frame);
        }
        self.move_column(selected, forward)
    }

    /// Jump to the same (or nearest) row of the adjacent column that has
    /// something to select.
    fn move_column(&mut self, selected: WidgetId, forward: bool) -> bool {
        let columns = self.config.columns.max(1);
        if columns < 2 {
            return false;
        }
        let Some((col, row)) = self.arena.get(selected).and_then(|n| n.col_row) else {
            return false;
        };
        for step in 1..columns {
            let target = if forward {
                (col + step) % columns
            } else {
                (col + columns - step) % columns
            };
            let mut best: Option<(usize, WidgetId)> = None;
            for &root in &self.roots {
                let Some((c, r)) = self.arena.get(root).and_then(|n| n.col_row) else {
                    continue;
                };
                if c != target {
                    continue;
                }
                let Some(entry) = self.entry_widget(root, forward) else {
                    continue;
                };
                let distance = r.abs_diff(row);
                if best.is_none_or(|(d, _)| distance < d) {
                    best = Some((distance, entry));
                }
            }
            if let Some((_, entry)) = best {
                self.set_selection(Some(entry));
                return true;
            }
        }
        false
    }

    /// Widget selected when a top-level cell is entered sideways.
    fn entry_widget(&self, cell: WidgetId, forward: bool) -> Option<WidgetId> {
        let node = self.arena.get(cell)?;
        let Some(frame) = node.widget.as_frame() else {
            return self.is_navigable(cell).then_some(cell);
        };
        if frame.is_scrollable_any()
            && let Some(control) = frame.control
            && self.is_navigable(control)
        {
            return Some(control);
        }
        let nav = self.navigable_in(cell);
        if forward {
            nav.first().copied()
        } else {
            nav.last().copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{FrameOptions, MenuConfig, Theme};
    use super::*;

    #[test]
    fn up_down_wrap() {
        let mut menu = Menu::default();
        let a = menu.add_button("a");
        menu.add_label("skip");
        let b = menu.add_button("b");
        let c = menu.add_button("c");

        assert_eq!(menu.selected_widget(), Some(a));
        assert!(menu.move_down());
        assert_eq!(menu.selected_widget(), Some(b));
        assert!(menu.move_down());
        assert!(menu.move_down());
        assert_eq!(menu.selected_widget(), Some(a));
        assert!(menu.move_up());
        assert_eq!(menu.selected_widget(), Some(c));
        assert!(!menu.get(a).expect("exists").is_selected());
    }

    #[test]
    fn single_widget_does_not_move() {
        let mut menu = Menu::default();
        menu.add_button("only");
        assert!(!menu.move_down());
        assert!(!menu.move_left());
    }

    #[test]
    fn horizontal_frame_steps_before_columns() {
        let mut menu = Menu::default();
        let row = menu.add_frame_h(400.0, 40.0, FrameOptions::default()).expect("row");
        let a = menu.add_button("a");
        let b = menu.add_button("b");
        let c = menu.add_button("c");
        menu.pack(row, a).expect("a");
        menu.pack(row, b).expect("b");
        menu.pack(row, c).expect("c");
        menu.select_widget(a).expect("select");

        assert!(menu.move_right());
        assert_eq!(menu.selected_widget(), Some(b));
        assert!(menu.move_right());
        assert_eq!(menu.selected_widget(), Some(c));
        // End of the frame in a single-column menu.
        assert!(!menu.move_right());
        assert!(menu.move_left());
        assert_eq!(menu.selected_widget(), Some(b));
    }

    #[test]
    fn columns_wrap_and_keep_row() {
        let config = MenuConfig {
            columns: 3,
            rows: Some(2),
            ..MenuConfig::default()
        };
        let mut menu = Menu::new(config, Theme::default());
        let b: Vec<WidgetId> = (0..6).map(|i| menu.add_button(&format!("btn{i}"))).collect();

        assert_eq!(menu.col_row_index(b[3]), Some((1, 1, 3)));
        assert!(menu.move_right());
        assert_eq!(menu.selected_widget(), Some(b[2]));
        assert!(menu.move_right());
        assert_eq!(menu.selected_widget(), Some(b[4]));
        assert!(menu.move_right());
        assert_eq!(menu.selected_widget(), Some(b[0]));
        assert!(menu.move_left());
        assert_eq!(menu.selected_widget(), Some(b[4]));
        assert!(menu.move_down());
        assert_eq!(menu.selected_widget(), Some(b[5]));
        assert!(menu.move_left());
        assert_eq!(menu.selected_widget(), Some(b[3]));
    }

    #[test]
    fn column_move_skips_empty_columns() {
        let config = MenuConfig {
            columns: 3,
            rows: Some(1),
            ..MenuConfig::default()
        };
        let mut menu = Menu::new(config, Theme::default());
        let a = menu.add_button("a");
        menu.add_label("label");
        let c = menu.add_button("c");

        assert!(menu.move_right());
        assert_eq!(menu.selected_widget(), Some(c));
        assert!(menu.move_right());
        assert_eq!(menu.selected_widget(), Some(a));
    }

    #[test]
    fn select_widget_rejects_non_navigable() {
        let mut menu = Menu::default();
        let f = menu.add_frame_v(200.0, 200.0, FrameOptions::default()).expect("f");
        let label = menu.add_label("label");
        let b = menu.add_button("b");
        menu.set_float(b, true).expect("float");

        assert!(matches!(menu.select_widget(f), Err(MenuError::NotSelectable(_))));
        assert!(matches!(menu.select_widget(label), Err(MenuError::NotSelectable(_))));
        assert!(matches!(menu.select_widget(b), Err(MenuError::NotSelectable(_))));
    }

    #[test]
    fn selection_scrolls_frame() {
        let mut menu = Menu::default();
        let f = menu
            .add_frame_v(150.0, 300.0, FrameOptions::default().max_height(100.0))
            .expect("f");
        let b: Vec<WidgetId> = (0..4)
            .map(|i| {
                let id = menu.add_button(&format!("b{i}"));
                menu.resize_widget(id, 100.0, 49.0).expect("resize");
                menu.pack(f, id).expect("pack");
                id
            })
            .collect();

        assert_eq!(menu.selected_widget(), Some(b[0]));
        menu.move_up();
        assert_eq!(menu.selected_widget(), Some(b[3]));
        assert!(menu.is_in_view(b[3]));
        assert!(!menu.is_in_view(b[0]));
        let area = menu.frame_scroll_area(f).expect("frame").expect("area");
        let pct = menu.scroll_area(area).expect("area").scroll_percent(Axis::Vertical);
        assert!((pct - 1.0).abs() < 0.01);
    }

    /// `a`, frame `f` holding `x` and `y`, then `b`.
    fn framed_pair() -> (Menu, [WidgetId; 5]) {
        let mut menu = Menu::default();
        let a = menu.add_button("a");
        let f = menu.add_frame_v(200.0, 200.0, FrameOptions::default()).expect("f");
        let x = menu.add_button("x");
        let y = menu.add_button("y");
        menu.pack(f, x).expect("pack");
        menu.pack(f, y).expect("pack");
        let b = menu.add_button("b");
        (menu, [a, f, x, y, b])
    }

    #[test]
    fn unpacked_selection_moves_to_next_widget() {
        let (mut menu, [_, f, x, y, _]) = framed_pair();
        menu.select_widget(x).expect("select");
        menu.unpack(f, x).expect("unpack");
        assert_eq!(menu.selected_widget(), Some(y));
        assert!(!menu.get(x).expect("x").is_selected());
    }

    #[test]
    fn floating_selection_moves_to_next_widget() {
        let (mut menu, [a, _, _, y, b]) = framed_pair();
        menu.select_widget(y).expect("select");
        menu.set_float(y, true).expect("float");
        assert_eq!(menu.selected_widget(), Some(b));

        // Nothing after the last widget: wrap to the first.
        menu.set_selectable(b, false).expect("selectable");
        assert_eq!(menu.selected_widget(), Some(a));
    }

    #[test]
    fn removing_frame_moves_selection_out_of_it() {
        let (mut menu, [_, f, _, y, b]) = framed_pair();
        menu.select_widget(y).expect("select");
        menu.remove_widget(f).expect("remove");
        assert!(menu.get(y).expect("y").is_floating());
        assert_eq!(menu.selected_widget(), Some(b));
        assert!(!menu.get(y).expect("y").is_selected());
    }
}
