//! Terminal game renderer.
//!
//! Renders a [`core::GameSnapshot`] into a plain framebuffer of styled glyphs
//! and flushes it through `crossterm`. No widget toolkit is involved, which
//! keeps full control over the playfield's aspect ratio (2 columns per cell).

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{AnchorY, GameView, Overlay, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
