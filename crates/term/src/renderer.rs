//! TerminalRenderer: flushes frames to the real terminal.
//!
//! The first frame (and any frame after a resize) is painted whole. After that
//! each row is compared with the previous frame and only the span between its
//! first and last changed cell is repainted. A frame is a 10x20 board plus a
//! narrow panel, so one span per row is cheaper than tracking every run.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb, Weight};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    entered: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
            entered: false,
        }
    }

    /// Switch to raw mode and the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.entered = true;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next draw (terminal resized or scrambled).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Show `fb`, then hand back the previous frame in its place.
    ///
    /// The caller redraws into the returned buffer, so frames are recycled
    /// instead of cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        match &self.last {
            Some(prev) => encode_diff_into(prev, fb, &mut self.buf)?,
            None => encode_full_into(fb, &mut self.buf)?,
        }
        self.flush_buf()?;

        match self.last.as_mut() {
            Some(prev) => std::mem::swap(prev, fb),
            None => self.last = Some(std::mem::replace(fb, FrameBuffer::new(0, 0))),
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Clear the screen and paint every cell of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut painter = Painter::new(out);
    for y in 0..fb.height() {
        for (x, cell) in fb.row(y).iter().enumerate() {
            painter.paint(x as u16, y, *cell)?;
        }
    }
    painter.finish()
}

/// Paint the dirty span of every row that differs between `prev` and `next`.
///
/// Falls back to a full paint when the sizes differ.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        return encode_full_into(next, out);
    }

    let mut painter = Painter::new(out);
    for y in 0..next.height() {
        let row = next.row(y);
        if let Some((start, end)) = dirty_span(prev.row(y), row) {
            for (x, cell) in row.iter().enumerate().take(end).skip(start) {
                painter.paint(x as u16, y, *cell)?;
            }
        }
    }
    painter.finish()
}

/// Columns `[start, end)` from the first to the last cell that differs.
pub fn dirty_span(prev: &[Cell], next: &[Cell]) -> Option<(usize, usize)> {
    let start = prev.iter().zip(next).position(|(a, b)| a != b)?;
    let end = prev.iter().zip(next).rposition(|(a, b)| a != b)? + 1;
    Some((start, end))
}

/// Writes cells while remembering where the cursor is and which pen is
/// loaded, so only moves and style changes that matter are emitted.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    pen: Option<CellStyle>,
    cursor: Option<(u16, u16)>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            out,
            pen: None,
            cursor: None,
        }
    }

    fn paint(&mut self, x: u16, y: u16, cell: Cell) -> Result<()> {
        if self.cursor != Some((x, y)) {
            self.out.queue(cursor::MoveTo(x, y))?;
        }
        self.load_pen(cell.style)?;
        self.out.queue(Print(cell.ch))?;
        self.cursor = Some((x.saturating_add(1), y));
        Ok(())
    }

    fn load_pen(&mut self, style: CellStyle) -> Result<()> {
        let prev = self.pen.replace(style);
        if prev == Some(style) {
            return Ok(());
        }
        if prev.map(|p| p.fg) != Some(style.fg) {
            self.out.queue(SetForegroundColor(term_color(style.fg)))?;
        }
        if prev.map(|p| p.bg) != Some(style.bg) {
            self.out.queue(SetBackgroundColor(term_color(style.bg)))?;
        }
        if prev.map(|p| p.weight) != Some(style.weight) {
            self.out.queue(SetAttribute(Attribute::NormalIntensity))?;
            match style.weight {
                Weight::Bold => {
                    self.out.queue(SetAttribute(Attribute::Bold))?;
                }
                Weight::Dim => {
                    self.out.queue(SetAttribute(Attribute::Dim))?;
                }
                Weight::Normal => {}
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
