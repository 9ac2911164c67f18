use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use framepack::loading;
use framepack::ui::{self, DrawList, Event, Menu, Size, Vec2};

struct App {
    window: Option<Arc<Window>>,
    menu: Menu,
    draw_list: DrawList,
    /// Last pointer position; button events carry none.
    cursor_pos: Vec2,
}

impl App {
    fn window_size(&self) -> Size {
        self.window.as_ref().map_or(Size::ZERO, |w| {
            let s = w.inner_size();
            Size::new(s.width as f32, s.height as f32)
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let config = self.menu.config();
        let attrs = Window::default_attributes()
            .with_title("framepack")
            .with_inner_size(winit::dpi::LogicalSize::new(
                (config.position.x + config.width + config.position.x) as f64,
                (config.position.y + config.height + config.position.y) as f64,
            ));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));
        self.window = Some(window);
        let size = self.window_size();
        self.menu.set_window_size(size);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                return;
            }
            WindowEvent::Resized(_) => {
                let size = self.window_size();
                self.menu.set_window_size(size);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_pos = Vec2::new(position.x as f32, position.y as f32);
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.menu.render() {
                    log::error!("menu render failed: {}", e);
                }
                self.menu.draw(&mut self.draw_list);
                log::trace!(
                    "frame: {} quads, {} text runs",
                    self.draw_list.rects.len(),
                    self.draw_list.texts.len()
                );
                return;
            }
            _ => {}
        }

        let Some(menu_event) = Event::from_window_event(&event, self.cursor_pos, self.window_size())
        else {
            return;
        };
        if self.menu.update(&[menu_event])
            && let Some(window) = &self.window
        {
            if let Some(icon) = self.menu.take_cursor_change() {
                window.set_cursor(icon);
            }
            window.request_redraw();
        }
    }
}

fn main() {
    env_logger::init();

    let theme = loading::load_theme("data/theme.ron");
    let config = loading::load_menu_config("data/menu.ron");
    let mut menu = Menu::new(config, theme);
    let demo = ui::demo::build_demo(&mut menu).expect("build demo menu");
    log::info!(
        "demo menu: {} widgets, list frame {:?}",
        menu.widgets().len(),
        demo.list
    );

    let event_loop = EventLoop::new().expect("create event loop");
    let mut app = App {
        window: None,
        menu,
        draw_list: DrawList::new(),
        cursor_pos: Vec2::ZERO,
    };
    event_loop.run_app(&mut app).expect("event loop");
}
