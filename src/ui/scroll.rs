use slotmap::new_key_type;

use super::WidgetId;
use super::geometry::{Axis, Rect, Size, Vec2};

new_key_type! {
    /// Handle into the scroll-area arena.
    pub struct ScrollAreaId;
}

/// Viewport over a virtual content rectangle.
///
/// `view` is expressed in the parent area's world coordinates (screen
/// coordinates for the root area). Content coordinates start at (0, 0)
/// and extend to `world`. The scroll position is kept as a percentage per
/// axis so it survives content growth.
#[derive(Debug, Clone)]
pub struct ScrollArea {
    pub(crate) parent: Option<ScrollAreaId>,
    /// Frame whose overflow created this area. `None` for the menu root.
    pub(crate) owner: Option<WidgetId>,
    pub(crate) view: Rect,
    pub(crate) world: Size,
    pub(crate) depth: usize,
    /// Scroll position per axis, `[horizontal, vertical]`, in 0..=1.
    percent: [f32; 2],
    pub(crate) scrollbar_thickness: f32,
}

impl ScrollArea {
    pub fn new(owner: Option<WidgetId>, scrollbar_thickness: f32) -> Self {
        Self {
            parent: None,
            owner,
            view: Rect::default(),
            world: Size::ZERO,
            depth: 0,
            percent: [0.0; 2],
            scrollbar_thickness,
        }
    }

    pub fn parent(&self) -> Option<ScrollAreaId> {
        self.parent
    }

    pub fn owner(&self) -> Option<WidgetId> {
        self.owner
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Visible rectangle in the parent's world coordinates.
    pub fn view_rect(&self) -> Rect {
        self.view
    }

    /// Virtual content rectangle in this area's own coordinates.
    pub fn world_rect(&self) -> Rect {
        Rect::from_origin(Vec2::ZERO, self.world)
    }

    /// Maximum scroll offset in pixels along an axis.
    /// Returns 0.0 if content fits in the viewport.
    pub fn max_offset(&self, axis: Axis) -> f32 {
        (self.world.along(axis) - self.view.size().along(axis)).max(0.0)
    }

    pub fn is_scrollable(&self, axis: Axis) -> bool {
        self.max_offset(axis) > 0.0
    }

    pub fn scroll_percent(&self, axis: Axis) -> f32 {
        self.percent[axis.index()]
    }

    /// Current scroll offset in pixels along an axis.
    pub fn offset(&self, axis: Axis) -> f32 {
        self.percent[axis.index()] * self.max_offset(axis)
    }

    pub fn offset_px(&self) -> Vec2 {
        Vec2::new(self.offset(Axis::Horizontal), self.offset(Axis::Vertical))
    }

    /// Set the scroll position, clamped to 0..=1.
    pub fn scroll_to(&mut self, axis: Axis, pct: f32) {
        let pct = if pct.is_nan() { 0.0 } else { pct };
        self.percent[axis.index()] = pct.clamp(0.0, 1.0);
    }

    /// Set the scroll offset in pixels, clamped to the valid range.
    pub fn set_offset(&mut self, axis: Axis, px: f32) {
        let max = self.max_offset(axis);
        if max <= 0.0 {
            self.percent[axis.index()] = 0.0;
            return;
        }
        self.scroll_to(axis, px / max);
    }

    /// Scroll by a pixel delta (positive = down/right).
    pub fn scroll_by(&mut self, axis: Axis, delta: f32) {
        let current = self.offset(axis);
        self.set_offset(axis, current + delta);
    }

    pub(crate) fn reset(&mut self) {
        self.percent = [0.0; 2];
    }

    /// Map a rectangle from this area's content coordinates into the
    /// parent's coordinates. No clipping.
    pub fn to_parent(&self, r: Rect) -> Rect {
        let off = self.offset_px();
        r.translated(self.view.x - off.x, self.view.y - off.y)
    }

    /// Inverse of [`ScrollArea::to_parent`] for a point.
    pub fn from_parent(&self, p: Vec2) -> Vec2 {
        let off = self.offset_px();
        Vec2::new(p.x - self.view.x + off.x, p.y - self.view.y + off.y)
    }

    /// Scroll the minimal amount so that `r` (content coordinates) is fully
    /// visible along both axes. Content larger than the view aligns to its
    /// start. Returns true if the offset changed.
    pub fn ensure_visible(&mut self, r: Rect) -> bool {
        let mut changed = false;
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let view_len = self.view.size().along(axis);
            if view_len <= 0.0 || !self.is_scrollable(axis) {
                continue;
            }
            let current = self.offset(axis);
            let start = r.start(axis);
            let end = r.end(axis);

            let target = if start < current || end - start > view_len {
                start
            } else if end > current + view_len {
                end - view_len
            } else {
                continue;
            };
            if (target - current).abs() > f32::EPSILON {
                self.set_offset(axis, target);
                changed = true;
            }
        }
        changed
    }

    /// Scrollbar track along an axis, in the parent's coordinates.
    /// The vertical bar sits on the right edge, the horizontal bar on the
    /// bottom edge.
    pub fn scrollbar_track(&self, axis: Axis) -> Option<Rect> {
        if !self.is_scrollable(axis) {
            return None;
        }
        let t = self.scrollbar_thickness;
        let v = self.view;
        Some(match axis {
            Axis::Vertical => Rect::new(v.right() - t, v.y, t, v.height),
            Axis::Horizontal => Rect::new(v.x, v.bottom() - t, v.width, t),
        })
    }

    /// Scrollbar thumb along an axis, in the parent's coordinates.
    pub fn scrollbar_thumb(&self, axis: Axis, min_length: f32) -> Option<Rect> {
        let track = self.scrollbar_track(axis)?;
        let (track_len, view_len) = (track.size().along(axis), self.view.size().along(axis));
        let thumb_len = (view_len * view_len / self.world.along(axis))
            .max(min_length)
            .min(track_len);
        let pos = (track_len - thumb_len) * self.scroll_percent(axis);
        Some(match axis {
            Axis::Vertical => Rect::new(track.x, track.y + pos, track.width, thumb_len),
            Axis::Horizontal => Rect::new(track.x + pos, track.y, thumb_len, track.height),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(view_h: f32, world_h: f32) -> ScrollArea {
        let mut a = ScrollArea::new(None, 10.0);
        a.view = Rect::new(0.0, 0.0, 100.0, view_h);
        a.world = Size::new(100.0, world_h);
        a
    }

    #[test]
    fn percent_is_clamped() {
        let mut a = area(100.0, 400.0);
        a.scroll_to(Axis::Vertical, 1.5);
        assert_eq!(a.scroll_percent(Axis::Vertical), 1.0);
        a.scroll_to(Axis::Vertical, -0.5);
        assert_eq!(a.scroll_percent(Axis::Vertical), 0.0);
    }

    #[test]
    fn offset_tracks_content_size() {
        let mut a = area(100.0, 400.0);
        a.scroll_to(Axis::Vertical, 0.5);
        assert!((a.offset(Axis::Vertical) - 150.0).abs() < 0.01);
        // Percentage survives growth; pixel offset follows.
        a.world.height = 500.0;
        assert!((a.offset(Axis::Vertical) - 200.0).abs() < 0.01);
    }

    #[test]
    fn no_offset_when_content_fits() {
        let mut a = area(100.0, 80.0);
        assert!(!a.is_scrollable(Axis::Vertical));
        a.set_offset(Axis::Vertical, 30.0);
        assert_eq!(a.offset(Axis::Vertical), 0.0);
        assert!(a.scrollbar_track(Axis::Vertical).is_none());
    }

    #[test]
    fn ensure_visible_minimal_delta() {
        let mut a = area(100.0, 400.0);
        // Below the view: scroll just enough to reveal the bottom edge.
        assert!(a.ensure_visible(Rect::new(0.0, 150.0, 50.0, 30.0)));
        assert!((a.offset(Axis::Vertical) - 80.0).abs() < 0.01);
        // Already visible: no change.
        assert!(!a.ensure_visible(Rect::new(0.0, 90.0, 50.0, 30.0)));
        // Above the view: align top.
        assert!(a.ensure_visible(Rect::new(0.0, 10.0, 50.0, 30.0)));
        assert!((a.offset(Axis::Vertical) - 10.0).abs() < 0.01);
    }

    #[test]
    fn to_parent_applies_view_origin_and_offset() {
        let mut a = area(100.0, 300.0);
        a.view.x = 20.0;
        a.view.y = 40.0;
        a.scroll_to(Axis::Vertical, 1.0);
        let r = a.to_parent(Rect::new(0.0, 250.0, 10.0, 10.0));
        assert!((r.x - 20.0).abs() < 0.01);
        assert!((r.y - 90.0).abs() < 0.01);
        let p = a.from_parent(Vec2::new(r.x, r.y));
        assert!((p.y - 250.0).abs() < 0.01);
    }

    #[test]
    fn thumb_moves_to_track_end() {
        let mut a = area(100.0, 400.0);
        a.scroll_to(Axis::Vertical, 1.0);
        let thumb = a.scrollbar_thumb(Axis::Vertical, 20.0).expect("thumb");
        assert!((thumb.height - 25.0).abs() < 0.01);
        assert!((thumb.bottom() - 100.0).abs() < 0.01);
        assert!((thumb.x - 90.0).abs() < 0.01);
    }
}
