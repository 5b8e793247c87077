//! Preset discovery and selection.
//!
//! Presets come from a [`PresetSource`]. The default source asks
//! `cmake --list-presets` and scrapes its text output; [`PresetsFileSource`]
//! reads `CMakePresets.json` instead. The resolver never caches: every call
//! asks the source again.

mod file;
mod listing;

pub use file::PresetsFileSource;
pub use listing::{FOOTER_LINES, HEADER_LINES, ListingSource, parse_listing};

use std::fmt;

/// A named configure preset, opaque beyond being accepted by cmake.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Preset(String);

impl Preset {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Preset {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for Preset {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Anything that can report the presets available right now, in order.
pub trait PresetSource {
    fn presets(&self) -> Vec<Preset>;
}

impl<S: PresetSource + ?Sized> PresetSource for &S {
    fn presets(&self) -> Vec<Preset> {
        (**self).presets()
    }
}

impl<S: PresetSource + ?Sized> PresetSource for Box<S> {
    fn presets(&self) -> Vec<Preset> {
        (**self).presets()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetError {
    /// No presets could be discovered at all.
    UnsupportedPlatform,
}

impl fmt::Display for PresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetError::UnsupportedPlatform => write!(f, "Platform not supported."),
        }
    }
}

impl std::error::Error for PresetError {}

pub struct PresetResolver<S> {
    source: S,
}

impl<S: PresetSource> PresetResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn list_presets(&self) -> Vec<Preset> {
        self.source.presets()
    }

    /// The first discovered preset is the conventional default.
    pub fn resolve_default(&self) -> Result<Preset, PresetError> {
        self.list_presets()
            .into_iter()
            .next()
            .ok_or(PresetError::UnsupportedPlatform)
    }

    pub fn validate(&self, name: &str) -> bool {
        self.list_presets().iter().any(|p| p.as_str() == name)
    }
}
