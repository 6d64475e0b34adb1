// SPDX-License-Identifier: MPL-2.0
use std::fmt;

use crate::application::port::ImageSourceError;
use crate::application::snapshot::RestoreError;
use crate::domain::grid::GridError;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    /// A project file could not be encoded or decoded.
    Project(String),
    Grid(GridError),
    Image(ImageSourceError),
    Restore(RestoreError),
    /// Bad command-line usage.
    Usage(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {e}"),
            Error::Config(e) => write!(f, "Config Error: {e}"),
            Error::Project(e) => write!(f, "Project Error: {e}"),
            Error::Grid(e) => write!(f, "Grid Error: {e}"),
            Error::Image(e) => write!(f, "Image Error: {e}"),
            Error::Restore(e) => write!(f, "Restore Error: {e}"),
            Error::Usage(e) => write!(f, "Usage Error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Project(err.to_string())
    }
}

impl From<GridError> for Error {
    fn from(err: GridError) -> Self {
        Error::Grid(err)
    }
}

impl From<ImageSourceError> for Error {
    fn from(err: ImageSourceError) -> Self {
        Error::Image(err)
    }
}

impl From<RestoreError> for Error {
    fn from(err: RestoreError) -> Self {
        Error::Restore(err)
    }
}

impl From<pico_args::Error> for Error {
    fn from(err: pico_args::Error) -> Self {
        Error::Usage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
