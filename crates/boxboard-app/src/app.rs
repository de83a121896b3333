//! Core application state and lifecycle.

use boxboard_core::{BoardConfig, Canvas, ConfigError, ShortcutRegistry};
use kurbo::{Point, Size};
use std::sync::Arc;
use thiserror::Error;
use winit::application::ApplicationHandler;
#[cfg(not(target_arch = "wasm32"))]
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

use crate::clipboard::SystemClipboard;
use crate::event_handler::EventHandler;

/// Environment variable naming a JSON board configuration file.
pub const CONFIG_ENV_VAR: &str = "BOXBOARD_CONFIG";

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub board: BoardConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Boxboard".to_string(),
            width: 1280,
            height: 720,
            board: BoardConfig::default(),
        }
    }
}

impl AppConfig {
    /// Defaults, with the board configuration read from the file named by
    /// `BOXBOARD_CONFIG` when it is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let board = match config_path() {
            Some(path) => {
                log::info!("Loading board config from {:?}", path);
                BoardConfig::load(path)?
            }
            None => BoardConfig::default(),
        };
        Ok(Self { board, ..Self::default() })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn config_path() -> Option<std::ffi::OsString> {
    std::env::var_os(CONFIG_ENV_VAR)
}

#[cfg(target_arch = "wasm32")]
fn config_path() -> Option<std::ffi::OsString> {
    None
}

/// Runtime state for the application.
struct AppState {
    window: Arc<Window>,
    canvas: Canvas,
    clipboard: SystemClipboard,
    event_handler: EventHandler,
}

impl AppState {
    /// Window pixels to canvas units.
    fn to_canvas(&self, position: winit::dpi::PhysicalPosition<f64>) -> Point {
        let logical = position.to_logical::<f64>(self.window.scale_factor());
        Point::new(logical.x, logical.y)
    }

    fn sync_canvas_size(&mut self) {
        let size = self.window.inner_size().to_logical::<f64>(self.window.scale_factor());
        self.canvas.board_mut().set_canvas_size(Size::new(size.width, size.height));
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self { config, state: None }
    }

    /// Run the application.
    pub fn run() -> Result<(), AppError> {
        let config = AppConfig::from_env()?;
        let event_loop = EventLoop::new()?;
        let app = App::with_config(config);

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::EventLoopExtWebSys;
            event_loop.spawn_app(app);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut app = app;
            event_loop.run_app(&mut app)?;
        }

        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");

        #[cfg(not(target_arch = "wasm32"))]
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        #[cfg(target_arch = "wasm32")]
        let window_attrs = {
            use winit::platform::web::WindowAttributesExtWebSys;
            Window::default_attributes()
                .with_title(&self.config.title)
                .with_append(true)
        };

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let mut state = AppState {
            window: window.clone(),
            canvas: Canvas::new(self.config.board.clone()),
            clipboard: SystemClipboard::new(),
            event_handler: EventHandler::new(),
        };
        state.sync_canvas_size();

        let size = state.canvas.board().canvas_size();
        log::info!("Boxboard initialized - {}x{}", size.width, size.height);
        match state.canvas.editor().pen_preview() {
            Some(image) => log::info!("Pen: {}", image),
            None => log::warn!("Pen has no image"),
        }
        ShortcutRegistry::log_all();

        self.state = Some(state);
        window.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(state) = &mut self.state else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                state.sync_canvas_size();
                state.window.request_redraw();
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                state.event_handler.set_modifiers(modifiers.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                let point = state.to_canvas(position);
                let pointer = state.event_handler.cursor_moved(point, state.canvas.board());
                state.canvas.handle_pointer_event(pointer, Instant::now());
                if state.canvas.board().is_pressing() {
                    state.window.request_redraw();
                }
            }

            WindowEvent::MouseInput { state: btn_state, button, .. } => {
                let Some(pointer) = state.event_handler.mouse_input(btn_state, button, state.canvas.board()) else {
                    return;
                };
                state.canvas.handle_pointer_event(pointer, Instant::now());
                state.window.request_redraw();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let input = state.event_handler.key_pressed(&event.logical_key);
                let outcome = state.canvas.handle_key(&input, &mut state.clipboard);
                if outcome.prevent_default {
                    log::debug!("Handled {:?}", outcome.action);
                    state.window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                let board = state.canvas.board();
                log::trace!(
                    "Frame: {} box(es), {} selected, guides shown: {}",
                    board.len(),
                    board.selected_ids().len(),
                    !board.guides().is_empty()
                );
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &mut self.state else {
            return;
        };

        if let Some(text) = state.clipboard.take_pending_text() {
            if let Err(e) = state.canvas.paste_text(&text) {
                log::warn!("Paste failed: {}", e);
            }
            state.window.request_redraw();
        }

        state.canvas.tick(Instant::now());

        // Keep polling while a debounced recompute is waiting.
        if state.canvas.has_pending_work() {
            event_loop.set_control_flow(ControlFlow::Poll);
        } else {
            event_loop.set_control_flow(ControlFlow::Wait);
        }
    }
}
