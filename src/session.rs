use crossterm::style::Color;
use log::{debug, info, trace};

use crate::clock::Clock;
use crate::config::Config;
use crate::error::Result;
use crate::field::Field;
use crate::input::{self, InputEvent, InputSource};
use crate::snake::Snake;
use crate::term::Renderer;

const BACKGROUND: Color = Color::White;
const MARKER: Color = Color::Black;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EndReason {
    Quit,
    LeftField,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    Running,
    GameOver(EndReason),
}

/// Outcome of one tick's update, fed to [`next_state`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Signal {
    Quit,
    Stepped { in_bounds: bool },
}

/// GameOver is absorbing.
pub fn next_state(state: SessionState, signal: Signal) -> SessionState {
    match (state, signal) {
        (SessionState::GameOver(reason), _) => SessionState::GameOver(reason),
        (SessionState::Running, Signal::Quit) => SessionState::GameOver(EndReason::Quit),
        (SessionState::Running, Signal::Stepped { in_bounds: false }) => SessionState::GameOver(EndReason::LeftField),
        (SessionState::Running, Signal::Stepped { in_bounds: true }) => SessionState::Running,
    }
}

/// One run from Running to GameOver. Build a new one to play again.
pub struct Session {
    field: Field,
    snake: Snake,
    state: SessionState,
    marker_size: i32,
    ticks: u64,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let field = Field::new(config.field.width, config.field.height)?;
        let snake = Snake::new(field.center(), config.step);
        Ok(Session::with_snake(field, snake, config.marker_size))
    }

    pub fn with_snake(field: Field, snake: Snake, marker_size: i32) -> Self {
        Session { field, snake, state: SessionState::Running, marker_size, ticks: 0 }
    }

    #[cfg(test)]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Ticks fully survived so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Applies one tick's input batch and moves the snake. Does nothing once
    /// the session is over.
    pub fn tick<I>(&mut self, events: I) -> SessionState
    where
        I: IntoIterator<Item = InputEvent>,
    {
        if !self.is_running() {
            return self.state;
        }

        let command = input::drain(events);
        let signal = if command.quit {
            Signal::Quit
        } else {
            if let Some(dir) = command.direction {
                if self.snake.direction() != Some(dir) {
                    debug!("direction -> {:?}", dir);
                }
                self.snake.apply_direction(dir);
            }
            self.snake.advance();
            trace!("tick {}: {:?}", self.ticks, self.snake.position());
            Signal::Stepped { in_bounds: self.field.contains(self.snake.position()) }
        };

        self.state = next_state(self.state, signal);
        if self.is_running() {
            self.ticks += 1;
        }
        self.state
    }

    fn draw<R: Renderer>(&self, renderer: &mut R) -> Result<()> {
        renderer.clear(BACKGROUND)?;
        renderer.draw_marker(self.snake.position(), self.marker_size, MARKER)?;
        renderer.present()
    }
}

/// Drives a session to completion: poll, update, draw, wait. Any collaborator
/// error ends the run immediately.
pub fn run_session<I, R, C>(session: &mut Session, input: &mut I, renderer: &mut R, clock: &mut C) -> Result<EndReason>
where
    I: InputSource,
    R: Renderer,
    C: Clock,
{
    info!(
        "session started: field {}x{}, snake at {:?}",
        session.field.width(),
        session.field.height(),
        session.snake.position()
    );

    let reason = loop {
        match session.state() {
            SessionState::GameOver(reason) => break reason,
            SessionState::Running => {
                let events = input.poll_events()?;
                if session.tick(events) == SessionState::Running {
                    session.draw(renderer)?;
                    clock.wait_next_tick();
                }
            }
        }
    };

    info!("game over ({:?}) after {} ticks at {:?}", reason, session.ticks, session.snake.position());
    Ok(reason)
}
