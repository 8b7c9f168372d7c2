use std::io::{Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{cursor, execute, queue, terminal};
use crossterm::event::{Event, KeyEventKind, poll, read};
use crossterm::style::{Color, Print, PrintStyledContent, Stylize};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

use crate::error::{GameError, Result};
use crate::field::Field;
use crate::input::{InputEvent, InputSource, map_event, map_key};
use crate::snake::Position;

pub type Coords = (u16, u16);

const MARKER_CHAR: char = '█';
/// Room the intro and game-over boxes need, whatever the field size.
const MESSAGE_AREA: Coords = (30, 8);

/// Drawing surface the game loop renders to once per tick.
pub trait Renderer {
    fn clear(&mut self, color: Color) -> Result<()>;
    fn draw_marker(&mut self, pos: Position, size: i32, color: Color) -> Result<()>;
    fn present(&mut self) -> Result<()>;
}

/// Field units -> terminal cells. The field sits inside a one-cell border at
/// the top left of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMap {
    cell_size: i32,
    cells: Coords,
}

impl CellMap {
    pub fn new(field: &Field, cell_size: i32) -> Self {
        let cells_for = |len: i32| {
            let cells = len / cell_size + (len % cell_size != 0) as i32;
            cells.clamp(1, u16::MAX as i32 - 2) as u16
        };
        CellMap { cell_size, cells: (cells_for(field.width()), cells_for(field.height())) }
    }

    /// Field area in cells, border excluded.
    pub fn cells(&self) -> Coords {
        self.cells
    }

    /// Field plus its border.
    pub fn field_area(&self) -> Coords {
        (self.cells.0 + 2, self.cells.1 + 2)
    }

    /// Terminal size needed for the bordered field and any message box.
    pub fn required_size(&self) -> Coords {
        let (w, h) = self.field_area();
        (w.max(MESSAGE_AREA.0), h.max(MESSAGE_AREA.1))
    }

    /// Top left of a box of `size` centered over the field, pulled back so it
    /// stays inside `required_size`.
    pub fn message_origin(&self, size: Coords) -> Coords {
        let (area_w, area_h) = self.field_area();
        let (max_w, max_h) = self.required_size();
        let place = |area: u16, max: u16, len: u16| (area / 2).saturating_sub(len / 2).min(max.saturating_sub(len));
        (place(area_w, max_w, size.0), place(area_h, max_h, size.1))
    }

    /// Screen cells covered by a square of `size` units at `pos`, clipped to the field.
    pub fn cover(&self, pos: Position, size: i32) -> Vec<Coords> {
        if size <= 0 {
            return vec![];
        }

        let span = |from: i32, max: u16| {
            let first = from.div_euclid(self.cell_size).max(0);
            let last = from.saturating_add(size - 1).div_euclid(self.cell_size).min(max as i32 - 1);
            first..=last
        };

        let mut cells = vec![];
        for y in span(pos.y, self.cells.1) {
            for x in span(pos.x, self.cells.0) {
                cells.push((x as u16 + 1, y as u16 + 1));
            }
        }
        cells
    }
}

pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
    map: CellMap,
    current_msg: Option<Message>,
}

struct Message {
    top_left: Coords,
    width: u16,
    height: u16,
}

impl TermManager {
    pub fn new(map: CellMap) -> Result<Self> {
        let (width, height) = terminal::size()?;
        let need = map.required_size();
        if width < need.0 || height < need.1 {
            return Err(GameError::TerminalTooSmall { have: (width, height), need });
        }

        Ok(TermManager { width, height, stdout: stdout(), map, current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    pub fn clear_screen(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.current_msg = None;
        Ok(())
    }

    pub fn draw_borders(&mut self) -> Result<()> {
        let (width, height) = self.map.field_area();
        let end_x = width - 1;
        let end_y = height - 1;

        for x in 0..width {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            self.print_at((x, 0), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in 1..end_y {
            self.print_at((0, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        self.flush()
    }

    /// Boxed, centered over the field where it fits.
    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        self.hide_message()?;

        let msg_height = (lines.len() + 2) as u16;
        let msg_width = (lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2) as u16;
        let top_left = self.map.message_origin((msg_width, msg_height));

        for y in [top_left.1, top_left.1 + msg_height - 1] {
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), Print(" ".repeat(msg_width as usize)))?;
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            queue!(self.stdout, cursor::MoveTo(top_left.0, top_left.1 + i as u16 + 1), Print(padded_line))?;
        }

        self.current_msg = Some(Message { top_left, width: msg_width, height: msg_height });
        self.flush()
    }

    /// Blanks the message box; the next frame repaints what was under it.
    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        for y in msg.top_left.1..msg.top_left.1 + msg.height {
            queue!(self.stdout, cursor::MoveTo(msg.top_left.0, y), Print(" ".repeat(msg.width as usize)))?;
        }
        self.draw_borders()
    }

    pub fn terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), Print(ch))?;
        Ok(())
    }
}

impl Renderer for TermManager {
    fn clear(&mut self, color: Color) -> Result<()> {
        let (w, h) = self.map.cells();
        let row = " ".repeat(w as usize);
        for y in 0..h {
            queue!(self.stdout, cursor::MoveTo(1, y + 1), PrintStyledContent(row.as_str().on(color)))?;
        }
        Ok(())
    }

    fn draw_marker(&mut self, pos: Position, size: i32, color: Color) -> Result<()> {
        for (x, y) in self.map.cover(pos, size) {
            queue!(self.stdout, cursor::MoveTo(x, y), PrintStyledContent(MARKER_CHAR.with(color)))?;
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.flush()
    }
}

/// Keyboard side of the terminal. crossterm's event queue is process-wide, so
/// this holds no state of its own.
pub struct TermInput;

impl InputSource for TermInput {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::ZERO)? {
            events.push(map_event(&read()?));
        }

        Ok(events)
    }

    fn wait_event(&mut self) -> Result<InputEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind != KeyEventKind::Release {
                    return Ok(map_key(&ev));
                }
            }
        }
    }
}
