#[macro_use]
extern crate tracing;

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use miette::{Context as _, IntoDiagnostic as _};

pub mod animations;
pub mod appearance;
pub mod theme;
pub mod utils;

pub use crate::animations::{Animation, Animations};
pub use crate::appearance::{Color, FontWeight, TextStyle};
pub use crate::theme::{CrownSensitivity, Theme};
pub use crate::utils::FloatOrInt;

#[derive(knuffel::Decode, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[knuffel(child, default)]
    pub theme: Theme,
    #[knuffel(child, default)]
    pub animations: Animations,
}

impl Config {
    pub fn load(path: &Path) -> miette::Result<Self> {
        let contents = fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let config = Self::parse(
            path.file_name()
                .and_then(OsStr::to_str)
                .unwrap_or("config.kdl"),
            &contents,
        )
        .context("error parsing")?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        let _span = tracy_client::span!("Config::parse");
        knuffel::parse(filename, text)
    }

    /// The configuration shipped with the crate, with every default spelled out.
    pub fn bundled() -> Self {
        Config::parse(
            "default-config.kdl",
            include_str!("../../resources/default-config.kdl"),
        )
        .map_err(miette::Report::new)
        .unwrap()
    }
}
