// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`image_source`]: image decoding via the `image` crate (implements [`ImageSource`])
//! - [`crop_widget`]: headless crop widgets (implements [`CropWidgetFactory`])
//!
//! [`ImageSource`]: crate::application::port::ImageSource
//! [`CropWidgetFactory`]: crate::application::port::CropWidgetFactory

pub mod crop_widget;
pub mod image_source;

pub use crop_widget::{HeadlessCropFactory, HeadlessCropWidget};
pub use image_source::DecodedImageSource;
