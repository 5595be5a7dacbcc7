//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Each frame is compared with the one before it and only the changed runs of
//! a row are written. The first frame, a size change, or `invalidate` sends
//! the whole screen.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Frame currently on screen, if known.
    shown: Option<FrameBuffer>,
    out: Vec<u8>,
    /// Raw mode and the alternate screen are active.
    active: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            out: Vec::with_capacity(32 * 1024),
            active: false,
        }
    }

    /// Switch to raw mode on the alternate screen and set the window title.
    pub fn enter(&mut self, title: &str) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;

        self.out.clear();
        self.out
            .queue(terminal::EnterAlternateScreen)?
            .queue(terminal::SetTitle(title))?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.flush()?;
        self.shown = None;
        Ok(())
    }

    /// Undo `enter`. Calling it twice is harmless.
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        self.out.clear();
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget what is on screen so the next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `fb`, then hand back the previous frame's buffer in its place.
    ///
    /// Keep passing the same `FrameBuffer`; the two buffers trade places on
    /// every call, so nothing is cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.out.clear();
        let mut spare = match self.shown.take() {
            Some(shown) if shown.width() == fb.width() && shown.height() == fb.height() => {
                encode_diff_into(&shown, fb, &mut self.out)?;
                shown
            }
            Some(mut shown) => {
                encode_full_into(fb, &mut self.out)?;
                shown.resize(fb.width(), fb.height());
                shown
            }
            None => {
                encode_full_into(fb, &mut self.out)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush()?;

        std::mem::swap(&mut spare, fb);
        self.shown = Some(spare);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
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
        // Best effort: a panic between enter and exit must not leave a raw terminal.
        let _ = self.exit();
    }
}

/// Emits SGR sequences only when the style actually changes.
struct StyleTracker {
    current: Option<CellStyle>,
}

impl StyleTracker {
    fn new() -> Self {
        Self { current: None }
    }

    fn print(&mut self, out: &mut Vec<u8>, ch: char, style: CellStyle) -> Result<()> {
        if self.current != Some(style) {
            // SGR reset clears colors too, so it must come first.
            out.queue(SetAttribute(Attribute::Reset))?
                .queue(SetForegroundColor(rgb_to_color(style.fg)))?
                .queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.current = Some(style);
        }
        out.queue(Print(ch))?;
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Encode a whole-screen repaint of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?
        .queue(cursor::MoveTo(0, 0))?;

    let mut styles = StyleTracker::new();
    let width = fb.width() as usize;
    for (y, row) in fb.cells().chunks(width.max(1)).enumerate() {
        if y > 0 {
            out.queue(Print("\r\n"))?;
        }
        for cell in row {
            styles.print(out, cell.ch, cell.style)?;
        }
    }
    styles.finish(out)
}

/// Encode only the cells of `next` that differ from `prev`.
///
/// Both frames must share a size; `draw_swap` repaints fully otherwise.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut styles = StyleTracker::new();
    let width = next.width() as usize;
    if width == 0 {
        return styles.finish(out);
    }

    let rows = prev.cells().chunks(width).zip(next.cells().chunks(width));
    for (y, (old, new)) in rows.enumerate() {
        for (start, len) in changed_runs(old, new) {
            out.queue(cursor::MoveTo(start as u16, y as u16))?;
            for cell in &new[start..start + len] {
                styles.print(out, cell.ch, cell.style)?;
            }
        }
    }
    styles.finish(out)
}

/// `(start, len)` of each maximal run where two rows differ.
fn changed_runs<'a, T: PartialEq>(
    old: &'a [T],
    new: &'a [T],
) -> impl Iterator<Item = (usize, usize)> + 'a {
    let n = old.len().min(new.len());
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < n && old[x] == new[x] {
            x += 1;
        }
        if x >= n {
            return None;
        }
        let start = x;
        while x < n && old[x] != new[x] {
            x += 1;
        }
        Some((start, x - start))
    })
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
