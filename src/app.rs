use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version,
};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use std::ffi::CString;
use std::num::NonZeroU32;
use std::time::Instant;

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event::{ElementState, Event, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use gl_wrapper::renderer::GlRenderer;

use crate::config::DemoConfig;
use crate::input::{InputAction, InputState, Key};
use crate::scene::Scene;

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    config: DemoConfig,
}

impl App {
    /// Opens the window and makes its GL context current.
    pub fn new(config: DemoConfig) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(config.width, config.height)))
            .with_title(config.title);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new();

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                configs
                    .reduce(|best, c| {
                        if c.num_samples() > best.num_samples() {
                            c
                        } else {
                            best
                        }
                    })
                    .expect("display offered no GL config")
            })
            .map_err(|e| AppError::Display(e.to_string()))?;

        let window = window.ok_or(AppError::NoWindow)?;
        let handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        let (profile, api) = context_request(&config);
        let context_attr = ContextAttributesBuilder::new()
            .with_profile(profile)
            .with_context_api(api)
            .build(Some(handle));

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr)? }
            .make_current(&gl_window.surface)?;

        gl::load_with(|s| match CString::new(s) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()).cast(),
            Err(_) => std::ptr::null(),
        });

        let (major, minor) = config.gl_version;
        log::info!("opened \"{}\" with OpenGL {major}.{minor} core", config.title);

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
            config,
        })
    }

    /// Draws `scene` every frame until the window is closed.
    pub fn run(self, scene: Scene) -> ! {
        let App {
            event_loop,
            gl_context,
            gl_window,
            config,
        } = self;

        let mut gl_renderer = GlRenderer::new();
        let (width, height): (u32, u32) = gl_window.window.inner_size().into();
        gl_renderer.resize(width, height);
        gl_renderer.set_wireframe(scene.wireframe());

        let mut input = InputState::default();
        let start = Instant::now();
        let mut scene = Some(scene);

        event_loop.run(move |event, _window_target, control_flow| {
            *control_flow = ControlFlow::Poll;
            match event {
                Event::MainEventsCleared => gl_window.window.request_redraw(),
                Event::RedrawRequested(_) => {
                    if let Some(scene) = &scene {
                        let [r, g, b] = config.clear_color;
                        gl_renderer.clear_color(r, g, b);
                        scene.draw(&mut gl_renderer, &input, start.elapsed().as_secs_f32());

                        if let Err(e) = gl_window.surface.swap_buffers(&gl_context) {
                            log::error!("could not swap buffers: {e}");
                            control_flow.set_exit();
                        }
                    }
                }
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::Resized(size) => {
                        if let (Some(w), Some(h)) =
                            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                        {
                            gl_window.surface.resize(&gl_context, w, h);
                            gl_renderer.resize(size.width, size.height);
                        }
                    }
                    WindowEvent::KeyboardInput { input: key, .. } => {
                        let Some(code) = key.virtual_keycode.and_then(map_key) else {
                            return;
                        };

                        match input.handle_key(code, key.state == ElementState::Pressed) {
                            Some(InputAction::Close) => {
                                log::info!("window closed by input");
                                control_flow.set_exit();
                            }
                            Some(InputAction::SpeedChanged(speed)) => {
                                log::info!("new color speed: {speed}");
                            }
                            None => {}
                        }
                    }
                    // key releases are not delivered while unfocused
                    WindowEvent::Focused(false) => input.release_keys(),
                    WindowEvent::CloseRequested => control_flow.set_exit(),
                    _ => (),
                },
                Event::LoopDestroyed => {
                    if let Some(mut scene) = scene.take() {
                        scene.release();
                    }
                    log::info!("terminated");
                }
                _ => (),
            }
        })
    }
}

fn map_key(code: VirtualKeyCode) -> Option<Key> {
    match code {
        VirtualKeyCode::Escape => Some(Key::Escape),
        VirtualKeyCode::K => Some(Key::K),
        VirtualKeyCode::J => Some(Key::J),
        _ => None,
    }
}

/// Core profile at the configured version; the demos use no legacy GL.
fn context_request(config: &DemoConfig) -> (GlProfile, ContextApi) {
    let (major, minor) = config.gl_version;

    (
        GlProfile::Core,
        ContextApi::OpenGl(Some(Version::new(major, minor))),
    )
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &Config) -> Result<Self, AppError> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).ok_or(AppError::ZeroSize)?,
            NonZeroU32::new(height).ok_or(AppError::ZeroSize)?,
        );

        let surface = unsafe { config.display().create_window_surface(config, &attrs)? };

        Ok(Self { window, surface })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not create display: {0}")]
    Display(String),
    #[error("display did not create a window")]
    NoWindow,
    #[error("window has zero size")]
    ZeroSize,
    #[error(transparent)]
    Gl(#[from] glutin::error::Error),
}
