// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! These traits use only domain types, so the grid and navigation engines
//! stay independent of how images are decoded, how crop widgets are drawn
//! and which toolkit hosts the controls.
//!
//! # Available Ports
//!
//! - [`image_source`]: acquiring and releasing image handles
//! - [`crop_widget`]: per-cell pan/zoom widgets
//! - [`navigation_host`]: the element surface directional navigation drives
//!
//! # Design Notes
//!
//! - Everything is single-threaded and frame-driven; no trait is `Send`
//! - Widget teardown is `Drop`
//! - Methods return `Result` with port error types

pub mod crop_widget;
pub mod image_source;
pub mod navigation_host;

pub use crop_widget::{CropWidget, CropWidgetError, CropWidgetFactory};
pub use image_source::{ImageSource, ImageSourceError};
pub use navigation_host::{NavigationHost, NavigationStatus};
