use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Upper half block: foreground paints the top pixel, background the bottom one
const HALF_BLOCK: char = '▀';

/// Full-screen terminal surface with two vertical pixels per character cell
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Cell>,
}

/// A single character cell in the back buffer
#[derive(Clone, Copy, PartialEq)]
pub struct Cell {
    pub top: Color,
    pub bottom: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            top: Color::Black,
            bottom: Color::Black,
        }
    }
}

impl Terminal {
    /// Enter the alternate screen in raw mode
    pub fn new() -> io::Result<Self> {
        let (width, height) = size()?;
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide, Clear(ClearType::All))?;

        Ok(Self {
            width,
            height,
            buffer: vec![Cell::default(); width as usize * height as usize],
        })
    }

    /// Terminal size in character cells
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Drawable area in pixels (two per row)
    pub fn pixel_size(&self) -> (usize, usize) {
        (self.width as usize, self.height as usize * 2)
    }

    /// Re-read the terminal size. Returns true if it changed.
    pub fn refresh_size(&mut self) -> io::Result<bool> {
        let (width, height) = size()?;
        if (width, height) == (self.width, self.height) {
            return Ok(false);
        }
        self.width = width;
        self.height = height;
        self.buffer = vec![Cell::default(); width as usize * height as usize];
        execute!(stdout(), Clear(ClearType::All))?;
        Ok(true)
    }

    /// Paint one pixel. Out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x >= self.width as usize || y >= self.height as usize * 2 {
            return;
        }
        let cell = &mut self.buffer[x + (y / 2) * self.width as usize];
        if y % 2 == 0 {
            cell.top = color;
        } else {
            cell.bottom = color;
        }
    }

    /// Write the back buffer to the screen in one flush
    pub fn present(&self) -> io::Result<()> {
        let mut out = stdout().lock();
        for (y, row) in self.buffer.chunks(self.width.max(1) as usize).enumerate() {
            queue!(out, MoveTo(0, y as u16))?;
            for cell in row {
                queue!(
                    out,
                    SetForegroundColor(cell.top),
                    SetBackgroundColor(cell.bottom),
                    Print(HALF_BLOCK)
                )?;
            }
        }
        queue!(out, ResetColor)?;
        out.flush()
    }

    /// Wait up to `timeout` for a keypress
    pub fn poll_key(&self, timeout: Duration) -> io::Result<Option<(KeyCode, KeyModifiers)>> {
        if poll(timeout)? {
            if let Event::Key(key_event) = read()? {
                return Ok(Some((key_event.code, key_event.modifiers)));
            }
        }
        Ok(None)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(stdout(), ResetColor, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}
