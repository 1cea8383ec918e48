//! Windowed rotating-cube demo: GL surface setup, event loop, frame pacing.
//!
//! Everything interesting happens in `zenu-render`; this binary owns the
//! platform plumbing. Surface or context creation failure is fatal (logged,
//! process exits); from then on the loop runs until the cancel key or a
//! window close request latches the quit flag.

use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{anyhow, Context as _};
use clap::Parser;
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::prelude::*;
use glutin::surface::{SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};
use zenu_input::{Action, Controller};
use zenu_render::driver::{FrameDriver, SURFACE_HEIGHT, SURFACE_WIDTH};
use zenu_render_gl::GlowContext;

#[derive(Parser)]
#[command(name = "zenu-desktop", about = "Rotating cube demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Window plus current GL context and the surface to swap.
struct Surface {
    window: Window,
    context: PossiblyCurrentContext,
    surface: glutin::surface::Surface<WindowSurface>,
}

impl Surface {
    /// Creates the window and a GLES 2.0 context: 16-bit depth buffer,
    /// double buffered, vsync on, fixed 320x240.
    fn init(event_loop: &ActiveEventLoop) -> anyhow::Result<(Self, glow::Context)> {
        let window_attrs = Window::default_attributes()
            .with_title("zenu")
            .with_inner_size(PhysicalSize::new(SURFACE_WIDTH as u32, SURFACE_HEIGHT as u32))
            .with_resizable(false);

        let template = ConfigTemplateBuilder::new().with_depth_size(16);

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(window_attrs))
            .build(event_loop, template, |mut configs| {
                configs.next().expect("no GL config matches the template")
            })
            .map_err(|e| anyhow!("failed to build GL display: {e}"))?;
        let window = window.context("failed to create window")?;
        let gl_display = gl_config.display();

        let window_handle = window
            .window_handle()
            .context("failed to get window handle")?;

        let context_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(Some(Version::new(2, 0))))
            .build(Some(window_handle.into()));
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attrs) }
            .context("failed to create GL context")?;

        let size = window.inner_size();
        let surface_attrs = glutin::surface::SurfaceAttributesBuilder::<WindowSurface>::new()
            .build(
                window_handle.into(),
                NonZeroU32::new(size.width.max(1)).unwrap(),
                NonZeroU32::new(size.height.max(1)).unwrap(),
            );
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attrs) }
            .context("failed to create GL surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        // Vsync; presentation then blocks on the display refresh boundary.
        if let Err(e) =
            surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::new(1).unwrap()))
        {
            error!("could not enable vsync: {e}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| gl_display.get_proc_address(name))
        };

        info!(depth = gl_config.depth_size(), "GL surface created");
        Ok((Self { window, context, surface }, gl))
    }

    fn present(&self) -> anyhow::Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .context("failed to swap buffers")
    }
}

/// Blocks for a fixed inter-frame delay, roughly 60 Hz. Not adaptive.
struct Pacer {
    delay: Duration,
}

impl Pacer {
    fn new() -> Self {
        Self { delay: Duration::from_millis(16) }
    }

    fn delay(&self) {
        std::thread::sleep(self.delay);
    }
}

struct AppState {
    surface: Surface,
    driver: FrameDriver<GlowContext>,
    controller: Controller,
    pacer: Pacer,
}

#[derive(Default)]
struct App {
    state: Option<AppState>,
}

impl App {
    fn init_state(event_loop: &ActiveEventLoop) -> anyhow::Result<AppState> {
        let (surface, gl) = Surface::init(event_loop)?;
        let driver = FrameDriver::new(Rc::new(GlowContext::new(gl)))?;
        Ok(AppState {
            surface,
            driver,
            controller: Controller::new(),
            pacer: Pacer::new(),
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match Self::init_state(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                // Platform setup failure: log and exit, nothing to recover.
                error!("startup failed: {err:#}");
                std::process::exit(1);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                state.controller.apply(Action::Quit);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if !event.state.is_pressed() {
                    return;
                }
                let action = match event.logical_key {
                    Key::Named(NamedKey::Escape) => Action::Quit,
                    _ => Action::Noop,
                };
                state.controller.apply(action);
            }
            WindowEvent::RedrawRequested => {
                // Quit is checked before rendering: no partial frame.
                if state.controller.quit() {
                    event_loop.exit();
                    return;
                }
                state.driver.tick();
                if let Err(err) = state.surface.present() {
                    error!("{err:#}");
                    event_loop.exit();
                    return;
                }
                state.pacer.delay();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.as_ref() {
            state.surface.window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    info!("{}", zenu_render::crate_info());

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::default();
    event_loop.run_app(&mut app).context("event loop failed")?;
    Ok(())
}
