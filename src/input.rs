use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;

use crate::error::Result;
use crate::snake::Direction::{self, *};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Direction(Direction),
    Other,
}

/// Something that can be drained once per tick without blocking.
pub trait InputSource {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;

    /// Blocks until the next key press.
    fn wait_event(&mut self) -> Result<InputEvent>;
}

/// Waits for a key pressed from now on. Anything already queued, such as
/// auto-repeat from steering during play, is thrown away first.
pub fn wait_for_fresh_event<I: InputSource>(input: &mut I) -> Result<InputEvent> {
    let stale = input.poll_events()?;
    if !stale.is_empty() {
        debug!("discarding {} queued events", stale.len());
    }
    input.wait_event()
}

/// What a tick's batch of events amounts to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct TickCommand {
    pub quit: bool,
    pub direction: Option<Direction>,
}

/// Folds one tick's events in arrival order. The last direction wins; a quit
/// stops processing and drops any direction seen so far.
pub fn drain<I>(events: I) -> TickCommand
where
    I: IntoIterator<Item = InputEvent>,
{
    let mut command = TickCommand::default();

    for ev in events {
        match ev {
            InputEvent::Quit => {
                debug!("quit requested");
                return TickCommand { quit: true, direction: None };
            }
            InputEvent::Direction(dir) => command.direction = Some(dir),
            InputEvent::Other => {}
        }
    }

    command
}

pub fn map_event(ev: &Event) -> InputEvent {
    match ev {
        Event::Key(key) => map_key(key),
        _ => InputEvent::Other,
    }
}

pub fn map_key(key: &KeyEvent) -> InputEvent {
    if key.kind == KeyEventKind::Release {
        return InputEvent::Other;
    }

    match key {
        ev if is_ctrl_c(ev) => InputEvent::Quit,
        KeyEvent { code, .. } => match code {
            KeyCode::Esc | KeyCode::Char('q') => InputEvent::Quit,
            KeyCode::Char('w') | KeyCode::Up => InputEvent::Direction(Up),
            KeyCode::Char('a') | KeyCode::Left => InputEvent::Direction(Left),
            KeyCode::Char('s') | KeyCode::Down => InputEvent::Direction(Down),
            KeyCode::Char('d') | KeyCode::Right => InputEvent::Direction(Right),
            _ => InputEvent::Other,
        }
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    /// Events already queued, then what the next blocking read sees.
    struct Queued {
        pending: Vec<InputEvent>,
        next: InputEvent,
    }

    impl InputSource for Queued {
        fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
            Ok(std::mem::take(&mut self.pending))
        }

        fn wait_event(&mut self) -> Result<InputEvent> {
            Ok(self.next)
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn empty_batch_does_nothing() {
        assert_eq!(drain(vec![]), TickCommand::default());
    }

    #[test]
    fn last_direction_wins() {
        let cmd = drain(vec![InputEvent::Direction(Left), InputEvent::Direction(Right)]);
        assert_eq!(cmd, TickCommand { quit: false, direction: Some(Right) });
    }

    #[test]
    fn other_events_are_ignored() {
        let cmd = drain(vec![InputEvent::Direction(Down), InputEvent::Other]);
        assert_eq!(cmd.direction, Some(Down));
        assert_eq!(drain(vec![InputEvent::Other]), TickCommand::default());
    }

    #[test]
    fn quit_drops_pending_direction() {
        let cmd = drain(vec![InputEvent::Direction(Up), InputEvent::Quit]);
        assert_eq!(cmd, TickCommand { quit: true, direction: None });
    }

    #[test]
    fn quit_short_circuits_later_events() {
        let cmd = drain(vec![InputEvent::Quit, InputEvent::Direction(Left)]);
        assert_eq!(cmd, TickCommand { quit: true, direction: None });
    }

    #[test]
    fn fresh_wait_skips_queued_keys() {
        let mut input = Queued {
            pending: vec![InputEvent::Direction(Right), InputEvent::Direction(Right)],
            next: InputEvent::Quit,
        };
        assert_eq!(wait_for_fresh_event(&mut input).unwrap(), InputEvent::Quit);
        assert!(input.pending.is_empty());
    }

    #[test]
    fn fresh_wait_with_empty_queue_blocks_once() {
        let mut input = Queued { pending: vec![], next: InputEvent::Direction(Up) };
        assert_eq!(wait_for_fresh_event(&mut input).unwrap(), InputEvent::Direction(Up));
    }

    #[test]
    fn maps_arrows_and_wasd() {
        assert_eq!(map_key(&key(KeyCode::Up)), InputEvent::Direction(Up));
        assert_eq!(map_key(&key(KeyCode::Char('a'))), InputEvent::Direction(Left));
        assert_eq!(map_key(&key(KeyCode::Char('s'))), InputEvent::Direction(Down));
        assert_eq!(map_key(&key(KeyCode::Right)), InputEvent::Direction(Right));
        assert_eq!(map_key(&key(KeyCode::Char('x'))), InputEvent::Other);
    }

    #[test]
    fn maps_quit_keys() {
        assert_eq!(map_key(&key(KeyCode::Esc)), InputEvent::Quit);
        assert_eq!(map_key(&key(KeyCode::Char('q'))), InputEvent::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&ctrl_c), InputEvent::Quit);
        assert_eq!(map_key(&key(KeyCode::Char('c'))), InputEvent::Other);
    }

    #[test]
    fn releases_and_non_key_events_are_other() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(map_key(&release), InputEvent::Other);
        assert_eq!(map_event(&Event::Resize(80, 24)), InputEvent::Other);
        assert_eq!(map_event(&Event::Key(key(KeyCode::Down))), InputEvent::Direction(Down));
    }
}
