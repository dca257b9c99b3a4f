//! Terminal output: flushes framebuffers through crossterm.
//!
//! The renderer keeps the previous frame and only rewrites cell runs that
//! changed, so a steady game loop costs a few hundred bytes per frame
//! instead of a full screen repaint.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Switch the terminal into game mode: raw input, alternate screen,
    /// hidden cursor, no line wrap.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    /// Restore the terminal. Safe to call after a partial `enter`.
    pub fn exit(&mut self) -> Result<()> {
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

    /// Force the next draw to repaint everything.
    ///
    /// Call this on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer and swap it into internal state.
    ///
    /// Callers keep one `FrameBuffer` and pass it in every frame; after the
    /// call it holds the retired previous frame, ready to be cleared and
    /// redrawn. No frame is ever cloned in steady state.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let same_size = self
            .last
            .as_ref()
            .is_some_and(|prev| prev.width() == fb.width() && prev.height() == fb.height());

        if same_size {
            if let Some(prev) = self.last.as_ref() {
                encode_diff_into(prev, fb, &mut self.buf)?;
            }
        } else {
            // First frame, or the viewport changed under us.
            encode_full_into(fb, &mut self.buf)?;
        }
        self.flush_buf()?;

        match self.last.as_mut() {
            Some(prev) => {
                prev.resize(fb.width(), fb.height());
                std::mem::swap(prev, fb);
            }
            None => {
                let mut retired = FrameBuffer::new(fb.width(), fb.height());
                std::mem::swap(&mut retired, fb);
                self.last = Some(retired);
            }
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full repaint of `fb` into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let w = fb.width() as usize;
    let mut styles = StyleWriter::new();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        let row = (y as usize) * w;
        for cell in &fb.cells()[row..row + w] {
            styles.apply(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the cell runs that differ between `prev` and `next`.
///
/// Falls back to a full repaint when the two frames disagree on size.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        return encode_full_into(next, out);
    }

    let w = next.width() as usize;
    let mut styles = StyleWriter::new();
    for y in 0..next.height() {
        let row = (y as usize) * w;
        let before = &prev.cells()[row..row + w];
        let after = &next.cells()[row..row + w];
        if before == after {
            continue;
        }
        for_each_run(before, after, |start, len| {
            out.queue(cursor::MoveTo(start as u16, y))?;
            for cell in &after[start..start + len] {
                styles.apply(out, cell.style)?;
                out.queue(Print(cell.ch))?;
            }
            Ok(())
        })?;
    }

    // An unchanged frame encodes to zero bytes.
    if styles.active.is_some() {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

/// Visit maximal runs of differing cells in one row as `(start, len)`.
fn for_each_run(
    before: &[Cell],
    after: &[Cell],
    mut f: impl FnMut(usize, usize) -> Result<()>,
) -> Result<()> {
    let w = after.len();
    let mut x = 0;
    while x < w {
        if before[x] == after[x] {
            x += 1;
            continue;
        }
        let start = x;
        while x < w && before[x] != after[x] {
            x += 1;
        }
        f(start, x - start)?;
    }
    Ok(())
}

/// Queues SGR changes, skipping the escape sequence when the style already
/// matches. Reset comes first so stale bold/dim never leaks into the next run.
struct StyleWriter {
    active: Option<CellStyle>,
}

impl StyleWriter {
    fn new() -> Self {
        Self { active: None }
    }

    fn apply(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        if self.active == Some(style) {
            return Ok(());
        }
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(SetForegroundColor(color(style.fg)))?;
        out.queue(SetBackgroundColor(color(style.bg)))?;
        if style.bold {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
        self.active = Some(style);
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
