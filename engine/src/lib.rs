pub mod app;
pub mod graphics;
pub mod input;
pub mod pixels_renderer;
pub mod surface;
pub mod winit_input;

use std::time::Duration;

use graphics::Renderer2d;
use input::Input;
use surface::{RgbaBufferSurface, SurfaceSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppControl {
    Continue,
    Quit,
}

/// A game driven by the platform loop: read the frame's input, advance, then draw.
///
/// `update` sees the whole [`Input`] snapshot for the frame, including key transitions and the
/// queued events. `render` must not mutate game state.
pub trait GameApp {
    fn update(&mut self, input: &Input, dt: Duration) -> AppControl;
    fn render(&self, gfx: &mut dyn Renderer2d);
}

/// Drives a [`GameApp`] without a window, rendering each frame into an in-memory RGBA surface.
#[derive(Debug)]
pub struct HeadlessRunner<G: GameApp> {
    app: G,
    surface: RgbaBufferSurface,
    frame: usize,
    quit: bool,
}

impl<G: GameApp> HeadlessRunner<G> {
    pub fn new(app: G, size: SurfaceSize) -> Self {
        Self {
            app,
            surface: RgbaBufferSurface::new(size),
            frame: 0,
            quit: false,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn app(&self) -> &G {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut G {
        &mut self.app
    }

    pub fn surface(&self) -> &RgbaBufferSurface {
        &self.surface
    }

    pub fn has_quit(&self) -> bool {
        self.quit
    }

    /// Runs one frame. Once the app has quit, further steps do nothing.
    pub fn step(&mut self, input: &Input, dt: Duration) -> AppControl {
        if self.quit {
            return AppControl::Quit;
        }
        let control = self.app.update(input, dt);
        self.frame += 1;
        if control == AppControl::Quit {
            self.quit = true;
            return control;
        }

        let size = self.surface.size();
        let mut gfx = self.surface.renderer();
        gfx.begin_frame(size);
        self.app.render(&mut gfx);
        control
    }

    /// Steps through `frames` until they run out or the app quits. Returns the frame counter.
    pub fn run<'a, I>(&mut self, frames: I) -> usize
    where
        I: IntoIterator<Item = (&'a Input, Duration)>,
    {
        for (input, dt) in frames {
            if self.step(input, dt) == AppControl::Quit {
                break;
            }
        }
        self.frame
    }
}
