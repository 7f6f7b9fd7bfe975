//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame and every resize are full redraws; other frames only
//! emit the runs of glyphs that changed.

use std::io::{self, Write};
use std::ops::Range;

use anyhow::Result;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, Rgb, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    /// Set when the terminal agreed to report key releases.
    release_events: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            release_events: false,
        }
    }

    /// Switch to raw mode on the alternate screen.
    ///
    /// Key release and bare modifier reporting is requested where the terminal
    /// supports it.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);

        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        if self.release_events {
            self.buf.queue(PushKeyboardEnhancementFlags(keyboard_flags()))?;
        }
        self.flush_buf()?;
        Ok(())
    }

    /// Whether key release events will arrive.
    pub fn reports_key_release(&self) -> bool {
        self.release_events
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.release_events {
            self.buf.queue(PopKeyboardEnhancementFlags)?;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, then swap it with the previous frame.
    ///
    /// Callers keep one `FrameBuffer` and pass it in every frame; after the
    /// call it holds stale content and is fully redrawn by `GameView`.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            _ => {
                encode_full_into(fb, &mut self.buf)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Release events for auto-repeat, and bare modifier presses so Shift can hold.
fn keyboard_flags() -> KeyboardEnhancementFlags {
    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full-frame redraw into `out`.
///
/// Every row starts with an absolute cursor move, so the encoding does not
/// depend on line wrapping being disabled.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut pen = Pen::new(out);
    for (y, row) in rows(fb).enumerate() {
        pen.move_to(0, y)?;
        for glyph in row {
            pen.glyph(*glyph)?;
        }
    }
    pen.finish()
}

/// Encode only the runs of glyphs that differ between `prev` and `next`.
///
/// Frames of different sizes fall back to a full redraw of `next`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        return encode_full_into(next, out);
    }

    let mut pen = Pen::new(out);
    for (y, (old, new)) in rows(prev).zip(rows(next)).enumerate() {
        for run in changed_runs(old, new) {
            pen.move_to(run.start, y)?;
            for glyph in &new[run] {
                pen.glyph(*glyph)?;
            }
        }
    }
    pen.finish()
}

fn rows(fb: &FrameBuffer) -> impl Iterator<Item = &[Glyph]> {
    // `chunks` panics on zero; a zero-width buffer has no glyphs anyway.
    fb.glyphs().chunks(usize::from(fb.width().max(1)))
}

/// Index ranges of consecutive glyphs that differ between two rows.
fn changed_runs<'a>(old: &'a [Glyph], new: &'a [Glyph]) -> impl Iterator<Item = Range<usize>> + 'a {
    let mut x = 0;
    std::iter::from_fn(move || {
        let differs = |i: usize| old.get(i) != new.get(i);
        while x < new.len() && !differs(x) {
            x += 1;
        }
        if x == new.len() {
            return None;
        }
        let start = x;
        while x < new.len() && differs(x) {
            x += 1;
        }
        Some(start..x)
    })
}

/// Tracks the terminal's current style so only what changed is emitted.
struct Pen<'a> {
    out: &'a mut Vec<u8>,
    style: Option<Style>,
}

impl<'a> Pen<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn move_to(&mut self, x: usize, y: usize) -> Result<()> {
        let x = u16::try_from(x)?;
        let y = u16::try_from(y)?;
        self.out.queue(cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn glyph(&mut self, glyph: Glyph) -> Result<()> {
        let next = glyph.style;
        match self.style {
            Some(current) if current == next => {}
            // SGR reset also clears colors, so attribute changes restate everything.
            Some(current) if current.bold == next.bold && current.dim == next.dim => {
                if current.fg != next.fg {
                    self.out.queue(SetForegroundColor(rgb_to_color(next.fg)))?;
                }
                if current.bg != next.bg {
                    self.out.queue(SetBackgroundColor(rgb_to_color(next.bg)))?;
                }
            }
            _ => {
                self.out.queue(SetAttribute(Attribute::Reset))?;
                if next.bold {
                    self.out.queue(SetAttribute(Attribute::Bold))?;
                }
                if next.dim {
                    self.out.queue(SetAttribute(Attribute::Dim))?;
                }
                self.out.queue(SetForegroundColor(rgb_to_color(next.fg)))?;
                self.out.queue(SetBackgroundColor(rgb_to_color(next.bg)))?;
            }
        }
        self.style = Some(next);
        self.out.queue(Print(glyph.ch))?;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
