// SPDX-License-Identifier: MPL-2.0
//! Application layer - engines and orchestration.
//!
//! - [`port`]: traits the infrastructure and the host surface implement
//! - [`grid`]: group image store, crop synchronization, grid controller
//! - [`stamps`]: freely placed decorations
//! - [`navigation`]: gamepad and keyboard navigation
//! - [`snapshot`] / [`sheet`]: the whole sheet and its portable form
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Nothing here touches the filesystem except explicit save/load

pub mod grid;
pub mod navigation;
pub mod port;
pub mod scheduler;
pub mod sheet;
pub mod snapshot;
pub mod stamps;

pub use sheet::StickerSheet;
