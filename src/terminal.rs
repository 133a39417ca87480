use crate::grid::Grid;
use crate::palette::Palette;
use crate::render::{compose_row, escape_glyph, style_for, Style};
use crate::reveal::RevealSchedule;
use crate::session::Viewport;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode},
    execute, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::warn;
use std::io::{self, stdout, Stdout, Write};
use std::time::{Duration, Instant};

const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Outcome of playing something the user may interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal abstraction for drawing trees
pub struct Terminal {
    width: u16,
    height: u16,
    out: Stdout,
    alternate_screen: bool,
}

impl Terminal {
    /// Initialize the terminal for drawing
    pub fn new(alternate_screen: bool) -> io::Result<Self> {
        let (width, height) = size()?;

        if alternate_screen {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
        }

        Ok(Self {
            width,
            height,
            out: stdout(),
            alternate_screen,
        })
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.height as usize, self.width as usize)
    }

    /// Clear the actual terminal
    pub fn clear_screen(&mut self) -> io::Result<()> {
        execute!(self.out, Clear(ClearType::All))?;
        Ok(())
    }

    /// Render the entire grid to screen
    pub fn render(&mut self, grid: &Grid, palette: &Palette) -> io::Result<()> {
        for row in 0..grid.rows().min(self.height as usize) {
            queue!(self.out, MoveTo(0, row as u16))?;
            for (ch, style) in compose_row(grid, row, palette) {
                self.queue_char(ch, style)?;
            }
        }
        self.out.flush()
    }

    /// Draw a single cell in place (live mode)
    pub fn draw_cell(&mut self, grid: &Grid, row: usize, col: usize, palette: &Palette) -> io::Result<()> {
        if row >= self.height as usize || col >= self.width as usize {
            return Ok(());
        }
        let cell = grid.get(row as i32, col as i32);
        let Some(style) = style_for(cell, palette) else {
            return Ok(());
        };

        queue!(self.out, MoveTo(col as u16, row as u16))?;
        let row_cells = grid.row(row);
        for (offset, ch) in escape_glyph(&cell.glyph).enumerate() {
            let target = col + offset;
            if target >= row_cells.len() || (offset > 0 && !row_cells[target].is_empty()) {
                break;
            }
            self.queue_char(ch, Some(style))?;
        }
        self.out.flush()
    }

    fn queue_char(&mut self, ch: char, style: Option<Style>) -> io::Result<()> {
        match style {
            Some(style) => {
                if style.bold {
                    queue!(self.out, SetAttribute(Attribute::Bold))?;
                }
                queue!(self.out, SetForegroundColor(style.fg), Print(ch), ResetColor)?;
                if style.bold {
                    queue!(self.out, SetAttribute(Attribute::Reset))?;
                }
            }
            None => queue!(self.out, Print(ch))?,
        }
        Ok(())
    }

    /// Reveal cells on their schedule. Quitting abandons the rest of the
    /// schedule; the grid itself is never touched.
    pub fn play(
        &mut self,
        grid: &Grid,
        schedule: &RevealSchedule,
        palette: &Palette,
    ) -> io::Result<Flow> {
        let started = Instant::now();
        for step in schedule.steps() {
            loop {
                let elapsed = started.elapsed();
                if elapsed >= step.delay {
                    break;
                }
                if quit_requested(self.wait_key(step.delay - elapsed)?) {
                    return Ok(Flow::Quit);
                }
            }
            if quit_requested(self.check_key()?) {
                return Ok(Flow::Quit);
            }
            self.draw_cell(grid, step.row, step.col, palette)?;
        }
        Ok(Flow::Continue)
    }

    /// Check for keypress (non-blocking)
    pub fn check_key(&self) -> io::Result<Option<KeyCode>> {
        self.wait_key(Duration::ZERO)
    }

    /// Wait for a keypress with timeout
    pub fn wait_key(&self, timeout: Duration) -> io::Result<Option<KeyCode>> {
        if poll(timeout)? {
            if let Event::Key(key_event) = read()? {
                return Ok(Some(key_event.code));
            }
        }
        Ok(None)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.alternate_screen {
            let _ = execute!(self.out, Show, LeaveAlternateScreen);
            let _ = disable_raw_mode();
        }
    }
}

pub fn quit_requested(key: Option<KeyCode>) -> bool {
    matches!(key, Some(KeyCode::Char('q') | KeyCode::Esc))
}

/// Viewport of the attached terminal, or 80x24 when there is none
pub fn detect_viewport() -> Viewport {
    let (cols, rows) = size().unwrap_or_else(|e| {
        warn!("cannot query terminal size ({}), assuming {}x{}", e, FALLBACK_SIZE.0, FALLBACK_SIZE.1);
        FALLBACK_SIZE
    });
    Viewport::new(rows as usize, cols as usize)
}
