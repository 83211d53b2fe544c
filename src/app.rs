//! Window and event loop.
//!
//! [`App`] creates the window once the event loop resumes, builds the
//! [`Renderer`] on a tokio runtime and forwards window events to it. Every
//! redraw renders one frame and requests the next, so the loop runs at the
//! display's refresh rate.

use std::sync::Arc;

use anyhow::Context as _;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{config::Config, input::keyboard, renderer::Renderer};

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: Config,
    renderer: Option<Renderer>,
    // Setup failures are kept here and returned from `run` after the loop exits.
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let async_runtime =
            tokio::runtime::Runtime::new().context("Cannot start the async runtime")?;
        Ok(Self {
            async_runtime,
            config,
            renderer: None,
            error: None,
        })
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<Renderer> {
        let window_attributes =
            Window::default_attributes().with_title(self.config.window_title.clone());
        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("Cannot create the window")?,
        );

        let mut renderer = self
            .async_runtime
            .block_on(Renderer::new(window.clone(), self.config.clone()))?;

        let size = window.inner_size();
        renderer.resize(size.width, size.height);
        window.request_redraw();
        Ok(renderer)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        match self.init(event_loop) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                log::error!("App initialization failed: {:#}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let renderer = match &mut self.renderer {
            Some(renderer) => renderer,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                let stats = renderer.stats();
                log::info!(
                    "Closing after {} presented and {} skipped frames",
                    stats.presented,
                    stats.skipped
                );
                event_loop.exit();
            }
            WindowEvent::Resized(size) => renderer.resize(size.width, size.height),
            WindowEvent::KeyboardInput { event, .. } => {
                keyboard::handle_key(&renderer.input(), event.physical_key, event.state.is_pressed());
            }
            WindowEvent::RedrawRequested => {
                renderer.render();
                renderer.ctx.window().request_redraw();
            }
            _ => {}
        }
    }
}

/// Runs the demo until the window is closed. Setup failures are returned.
pub fn run(config: Config) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
