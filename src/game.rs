use log::{debug, info};

use crate::clock::FixedRateClock;
use crate::config::Config;
use crate::error::Result;
use crate::field::Field;
use crate::input::{InputEvent, wait_for_fresh_event};
use crate::session::{EndReason, Session, run_session};
use crate::term::{CellMap, TermInput, TermManager};

pub struct SnakeGame {
    config: Config,
    term: TermManager,
    input: TermInput,
}

impl SnakeGame {
    /// Fails before touching the screen if the config or terminal won't do.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let field = Field::new(config.field.width, config.field.height)?;
        let map = CellMap::new(&field, config.marker_size);
        let term = TermManager::new(map)?;
        debug!("terminal {:?}, field needs {:?}", term.terminal_size(), map.required_size());
        Ok(SnakeGame { config, term, input: TermInput })
    }

    /// Runs intro and one session, always handing the terminal back.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let res = self.intro_then_play();
        let restored = self.term.restore();
        res.and(restored)
    }

    fn intro_then_play(&mut self) -> Result<()> {
        self.term.clear_screen()?;
        self.term.draw_borders()?;

        if !self.show_intro()? {
            info!("quit from intro");
            return Ok(());
        }

        let mut session = Session::new(&self.config)?;
        let mut clock = FixedRateClock::new(self.config.ticks_per_second);
        info!("running at {} ticks per second", self.config.ticks_per_second);

        let reason = run_session(&mut session, &mut self.input, &mut self.term, &mut clock)?;

        if reason == EndReason::LeftField {
            self.game_over(&session)?;
        }
        Ok(())
    }

    /// Returns false if the player quit instead of starting.
    fn show_intro(&mut self) -> Result<bool> {
        self.term.show_message(&[
            "Arrow keys or WASD to move",
            "Esc, Q or CTRL+C to quit",
            "",
            "Press any key to begin",
        ])?;

        let ev = wait_for_fresh_event(&mut self.input)?;
        self.term.hide_message()?;

        Ok(ev != InputEvent::Quit)
    }

    fn game_over(&mut self, session: &Session) -> Result<()> {
        self.term.show_message(&[
            "Game over!",
            &*format!("Survived {} ticks", session.ticks()),
            "",
            "Press any key to exit",
        ])?;
        wait_for_fresh_event(&mut self.input)?;
        Ok(())
    }
}
