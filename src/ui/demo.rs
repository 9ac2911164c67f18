//! Showcase menu exercising every container feature: nested frames, a
//! scrolling list, a horizontal button row, a titled frame with a close
//! button, and hover cursors.

use super::error::MenuResult;
use super::frame::{Align, FrameOptions, PackOptions, TitleButton, TitleOptions, VPos};
use super::{CursorIcon, Menu, WidgetId};

/// Handles to the interesting widgets of the demo menu.
pub struct Demo {
    pub settings: WidgetId,
    pub list: WidgetId,
    pub row: WidgetId,
    pub quit: WidgetId,
}

/// Populate `menu` with the showcase. Apply callbacks log the widget
/// that fired.
pub fn build_demo(menu: &mut Menu) -> MenuResult<Demo> {
    let theme = menu.theme().clone();
    let row_height = theme.button_size("x").height;

    let play = menu.add_button("Play");
    menu.set_on_apply(play, |id| log::info!("play ({:?})", id))?;

    // Titled settings frame holding a horizontal row and a scrolling list.
    let settings = menu.add_frame_v(
        360.0,
        260.0,
        FrameOptions {
            cursor: Some(CursorIcon::Default),
            ..FrameOptions::default()
        },
    )?;
    menu.set_title(
        settings,
        "Settings",
        TitleOptions {
            align: Align::Left,
            cursor: Some(CursorIcon::Move),
        },
    )?;
    menu.add_title_button(settings, TitleButton::Close, |frame, _| {
        log::info!("close requested for {:?}", frame);
    })?;

    let row = menu.add_frame_h(340.0, row_height + 8.0, FrameOptions::default())?;
    for label in ["Low", "Mid", "High"] {
        let b = menu.add_button(label);
        menu.set_on_apply(b, move |_| log::info!("quality {}", label))?;
        menu.set_cursor(b, Some(CursorIcon::Pointer))?;
        menu.pack_with(row, b, PackOptions::new(Align::Left, VPos::Center).with_margin(6.0, 0.0))?;
    }

    let list = menu.add_frame_v(
        340.0,
        400.0,
        FrameOptions::default().max_height(150.0),
    )?;
    for i in 0..8 {
        let b = menu.add_button(&format!("Slot {i}"));
        menu.set_on_apply(b, move |_| log::info!("load slot {}", i))?;
        menu.pack_with(list, b, PackOptions::new(Align::Center, VPos::North))?;
    }

    menu.pack_with(settings, row, PackOptions::new(Align::Center, VPos::North))?;
    menu.pack_with(
        settings,
        list,
        PackOptions::new(Align::Center, VPos::North).with_margin(0.0, 8.0),
    )?;

    menu.add_vertical_margin(12.0);
    let quit = menu.add_button("Quit");
    menu.set_on_apply(quit, |_| log::info!("quit"))?;

    Ok(Demo {
        settings,
        list,
        row,
        quit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Axis;

    #[test]
    fn demo_builds_and_renders() {
        let mut menu = Menu::default();
        let demo = build_demo(&mut menu).expect("demo");
        menu.render().expect("consistent");

        assert!(menu.is_scrollable(demo.list, Axis::Vertical).expect("frame"));
        assert_eq!(menu.scrollable_frames(), &[demo.list]);
        assert_eq!(menu.frame_depth(demo.row), 1);
        assert_eq!(menu.title_buttons(demo.settings).expect("frame").len(), 1);
        assert!(menu.index_of(demo.quit).is_some());
    }

    #[test]
    fn demo_navigation_wraps() {
        let mut menu = Menu::default();
        build_demo(&mut menu).expect("demo");
        let start = menu.selected_widget();
        // Play, three row buttons, eight slots, Quit.
        for _ in 0..13 {
            menu.move_down();
        }
        assert_eq!(menu.selected_widget(), start);
    }
}
