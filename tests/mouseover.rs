//! Mouse-over and mouse-leave propagation through nested frames.

use std::cell::RefCell;
use std::rc::Rc;

use framepack::ui::{
    Axis, CursorIcon, Event, EventKind, FrameOptions, Menu, MenuConfig, Theme, WidgetId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hover {
    Over(WidgetId),
    Leave(WidgetId),
}

type Log = Rc<RefCell<Vec<Hover>>>;

fn watch(menu: &mut Menu, log: &Log, ids: &[WidgetId]) {
    for &id in ids {
        let l = log.clone();
        menu.set_on_mouse_over(id, move |w| l.borrow_mut().push(Hover::Over(w)))
            .expect("listener");
        let l = log.clone();
        menu.set_on_mouse_leave(id, move |w| l.borrow_mut().push(Hover::Leave(w)))
            .expect("listener");
    }
}

fn take(log: &Log) -> Vec<Hover> {
    std::mem::take(&mut *log.borrow_mut())
}

/// Two stacked 300x100 frames, each holding one button at its top-left.
fn siblings() -> (Menu, [WidgetId; 4]) {
    let mut menu = Menu::default();
    let f1 = menu.add_frame_v(300.0, 100.0, FrameOptions::default()).expect("f1");
    let f2 = menu.add_frame_v(300.0, 100.0, FrameOptions::default()).expect("f2");
    let one = menu.add_button("one");
    let two = menu.add_button("two");
    menu.pack(f1, one).expect("pack");
    menu.pack(f2, two).expect("pack");
    (menu, [f1, one, f2, two])
}

#[test]
fn crossing_between_sibling_frames() {
    let (mut menu, [f1, one, f2, two]) = siblings();
    let log: Log = Rc::default();
    watch(&mut menu, &log, &[f1, one, f2, two]);
    let second = menu.real_rect(two).expect("two");

    menu.update(&[Event::motion(5.0, 5.0)]);
    assert_eq!(take(&log), vec![Hover::Over(f1), Hover::Over(one)]);

    // Staying inside the same widget fires nothing.
    assert!(!menu.update(&[Event::motion(6.0, 6.0)]));
    assert!(take(&log).is_empty());

    menu.update(&[Event::motion(second.x + 5.0, second.y + 5.0)]);
    assert_eq!(
        take(&log),
        vec![
            Hover::Leave(one),
            Hover::Leave(f1),
            Hover::Over(f2),
            Hover::Over(two)
        ]
    );
    assert_eq!(menu.hover_chain(), vec![f2, two]);
}

#[test]
fn three_nested_frames_enter_outside_in() {
    let config = MenuConfig {
        height: 600.0,
        ..MenuConfig::default()
    };
    let mut menu = Menu::new(config, Theme::default());
    let f1 = menu.add_frame_v(500.0, 500.0, FrameOptions::default()).expect("f1");
    let f2 = menu.add_frame_v(400.0, 300.0, FrameOptions::default()).expect("f2");
    let f3 = menu.add_frame_v(100.0, 100.0, FrameOptions::default()).expect("f3");
    let b = menu.add_button("b");
    menu.pack(f3, b).expect("pack");
    menu.pack(f2, f3).expect("pack");
    menu.pack(f1, f2).expect("pack");
    let log: Log = Rc::default();
    watch(&mut menu, &log, &[f1, f2, f3, b]);

    menu.update(&[Event::motion(5.0, 5.0)]);
    assert_eq!(menu.hover_chain(), vec![f1, f2, f3, b]);
    assert_eq!(
        take(&log),
        vec![Hover::Over(f1), Hover::Over(f2), Hover::Over(f3), Hover::Over(b)]
    );

    // Inside f3, off the button.
    menu.update(&[Event::motion(60.0, 60.0)]);
    assert_eq!(take(&log), vec![Hover::Leave(b)]);
    menu.update(&[Event::motion(5.0, 5.0)]);
    take(&log);

    menu.update(&[Event::new(EventKind::CursorLeft)]);
    assert_eq!(
        take(&log),
        vec![Hover::Leave(b), Hover::Leave(f3), Hover::Leave(f2), Hover::Leave(f1)]
    );
    assert!(menu.hover_chain().is_empty());
}

#[test]
fn unpacking_hovered_widget_releases_chain() {
    let (mut menu, [f1, one, f2, two]) = siblings();
    let log: Log = Rc::default();
    watch(&mut menu, &log, &[f1, one, f2, two]);

    menu.update(&[Event::motion(5.0, 5.0)]);
    take(&log);
    menu.unpack(f1, one).expect("unpack");
    assert_eq!(take(&log), vec![Hover::Leave(one), Hover::Leave(f1)]);
    assert!(menu.hover_chain().is_empty());
}

#[test]
fn nested_cursors_restore_in_order() {
    let (mut menu, [f1, one, _, _]) = siblings();
    menu.set_cursor(f1, Some(CursorIcon::Move)).expect("cursor");
    menu.set_cursor(one, Some(CursorIcon::Pointer)).expect("cursor");
    let frame = menu.real_rect(f1).expect("f1");

    menu.update(&[Event::motion(5.0, 5.0)]);
    assert_eq!(menu.cursor(), CursorIcon::Pointer);
    menu.update(&[Event::motion(frame.right() - 5.0, frame.y + 5.0)]);
    assert_eq!(menu.cursor(), CursorIcon::Move);
    menu.update(&[Event::motion(frame.right() + 50.0, frame.y + 5.0)]);
    assert_eq!(menu.cursor(), CursorIcon::Default);
    assert!(menu.hover_chain().is_empty());
}

#[test]
fn scrolled_out_children_are_not_hovered() {
    let mut menu = Menu::default();
    let f = menu
        .add_frame_v(150.0, 300.0, FrameOptions::default().max_height(100.0))
        .expect("frame");
    let b: Vec<WidgetId> = (0..4)
        .map(|i| {
            let id = menu.add_button(&format!("b{i}"));
            menu.resize_widget(id, 100.0, 49.0).expect("resize");
            menu.pack(f, id).expect("pack");
            id
        })
        .collect();

    menu.update(&[Event::motion(5.0, 60.0)]);
    assert_eq!(menu.hover_chain(), vec![f, b[1]]);
    // Right of the buttons, still inside the frame.
    menu.update(&[Event::motion(120.0, 60.0)]);
    assert_eq!(menu.hover_chain(), vec![f]);

    let area = menu.frame_scroll_area(f).expect("frame").expect("area");
    menu.scroll_to(area, Axis::Vertical, 1.0);
    menu.update(&[Event::motion(5.0, 5.0)]);
    assert_eq!(menu.hover_chain(), vec![f, b[2]]);
    // Below the frame view, where the last button would be unclipped.
    menu.update(&[Event::motion(5.0, 120.0)]);
    assert!(menu.hover_chain().is_empty());
}
