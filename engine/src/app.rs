use std::error::Error;
use std::time::Instant;

use pixels::{PixelsBuilder, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::input::{Input, Key};
use crate::pixels_renderer::PixelsRenderer2d;
use crate::surface::SurfaceSize;
use crate::winit_input;
use crate::{AppControl, GameApp};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "game".to_string(),
            width: 800,
            height: 600,
            vsync: true,
        }
    }
}

/// Opens a window and drives `game` until it asks to quit.
///
/// Each frame: window events are folded into one [`Input`] snapshot, the game updates and renders
/// from it, the frame is presented, and then the snapshot's per-frame state is reset. Closing the
/// window is reported to the game as a [`Key::Quit`] press rather than exiting directly.
pub fn run_game<G: GameApp + 'static>(config: AppConfig, mut game: G) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(config.title.as_str())
        .with_inner_size(PhysicalSize::new(config.width.max(1), config.height.max(1)))
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let surface_size = SurfaceSize::new(window_size.width.max(1), window_size.height.max(1));
    let surface_texture = SurfaceTexture::new(surface_size.width, surface_size.height, &window);
    let pixels = PixelsBuilder::new(surface_size.width, surface_size.height, surface_texture)
        .enable_vsync(config.vsync)
        .build()?;
    let mut renderer = PixelsRenderer2d::new(pixels, surface_size)?;

    log::info!(
        "window opened at {}x{} (vsync {})",
        surface_size.width,
        surface_size.height,
        config.vsync
    );

    let mut input = Input::new();
    let mut last_frame = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match &event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    input.key_down(Key::Quit);
                    window.request_redraw();
                }
                WindowEvent::Resized(size) => {
                    if let Err(err) = renderer.resize(SurfaceSize::new(size.width, size.height)) {
                        log::warn!("resize failed: {err}");
                    }
                    window.request_redraw();
                }
                other => winit_input::apply_window_event(&mut input, other),
            },
            Event::RedrawRequested(_) => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(last_frame);
                last_frame = now;

                let control = game.update(&input, dt);
                input.begin_frame();
                if control == AppControl::Quit {
                    log::info!("quit requested, closing window");
                    *control_flow = ControlFlow::Exit;
                    return;
                }

                renderer.draw_frame(|gfx| game.render(gfx));
                if let Err(err) = renderer.present() {
                    log::error!("present failed: {err}");
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::MainEventsCleared => {
                window.request_redraw();
            }
            _ => {}
        }
    });

    #[allow(unreachable_code)]
    Ok(())
}
