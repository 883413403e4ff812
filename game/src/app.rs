use std::time::Duration;

use engine::graphics::Renderer2d;
use engine::input::Input;
use engine::{AppControl, GameApp};

use crate::intents::{Bindings, translate};
use crate::render::draw_session;
use crate::session::GameSession;
use crate::settings::Settings;

/// Glue between the engine's frame loop and a [`GameSession`].
#[derive(Debug, Clone)]
pub struct FallingBlocksApp {
    session: GameSession,
    bindings: Bindings,
    cell_size: u32,
}

impl FallingBlocksApp {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self {
            session: GameSession::new(settings.session_config(seed)),
            bindings: settings.bindings.clone(),
            cell_size: settings.video.cell_size,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }
}

impl GameApp for FallingBlocksApp {
    fn update(&mut self, input: &Input, dt: Duration) -> AppControl {
        let intents = translate(input, &self.bindings);
        if intents.quit {
            log::info!(
                "quit after {} game(s), {} line(s) in the current one",
                self.session.games_played(),
                self.session.lines()
            );
            return AppControl::Quit;
        }

        let report = self.session.update(&intents, dt.as_secs_f64());
        if report.locked() {
            log::debug!(
                "locked {} piece(s), cleared {} row(s), {} line(s) total",
                report.pieces_locked,
                report.rows_cleared,
                self.session.lines()
            );
        }
        AppControl::Continue
    }

    fn render(&self, gfx: &mut dyn Renderer2d) {
        draw_session(gfx, &self.session, self.cell_size);
    }
}
