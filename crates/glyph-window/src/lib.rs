//! # glyph-window — Window layer for glyphdesk
//!
//! Mouse-driven windows built on the [`glyph_term`] screen buffer:
//!
//! - **[`window`]** — `Window`: drag by the title bar, resize from the corner,
//!   close from the `[█]` button, scroll overflowing content with arrows,
//!   track pages, or a draggable thumb on either axis
//! - **[`desktop`]** — `Desktop`: window z-order and focus, dotted
//!   background, pointer marker, status bar; implements
//!   [`App`](glyph_term::session::App)
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod desktop;
mod scrollbar;
pub mod window;

pub use desktop::Desktop;
pub use window::Window;
