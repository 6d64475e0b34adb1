// SPDX-License-Identifier: MPL-2.0
//! `sticker_sheet` is the engine behind a printable sticker sheet.
//!
//! A sheet is a 4×4 grid of cells. The active layout mode groups the cells
//! so that every cell of a group shows the same image with the same crop;
//! editing any one of them re-crops its siblings. Emoji and text stamps sit
//! on top, and the whole sheet can be driven with a gamepad or the keyboard
//! through geometric focus navigation.
//!
//! The crate is split the usual way:
//!
//! - [`domain`]: pure types and rules
//! - [`application`]: the grid, stamp and navigation engines, and the ports
//!   their hosts implement
//! - [`infrastructure`]: image decoding and a headless crop widget
//! - [`config`]: `settings.toml` preferences
//! - [`diagnostics`]: a bounded log of user actions and recovered failures

pub mod application;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod infrastructure;
