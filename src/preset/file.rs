use super::{Preset, PresetSource};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const PRESETS_FILE: &str = "CMakePresets.json";
pub const USER_PRESETS_FILE: &str = "CMakeUserPresets.json";

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct PresetsFile {
    #[serde(default)]
    configure_presets: Vec<ConfigurePreset>,
}

#[derive(Deserialize, Debug)]
struct ConfigurePreset {
    name: String,
    #[serde(default)]
    hidden: bool,
}

/// Reads configure presets straight from `CMakePresets.json` and
/// `CMakeUserPresets.json`, in that order, skipping hidden ones.
pub struct PresetsFileSource {
    dir: PathBuf,
}

impl PresetsFileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read(path: &Path) -> Result<PresetsFile> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}

impl PresetSource for PresetsFileSource {
    fn presets(&self) -> Vec<Preset> {
        [PRESETS_FILE, USER_PRESETS_FILE]
            .iter()
            .map(|name| self.dir.join(name))
            .filter(|path| path.exists())
            .filter_map(|path| Self::read(&path).ok())
            .flat_map(|file| file.configure_presets)
            .filter(|p| !p.hidden)
            .map(|p| Preset::new(p.name))
            .collect()
    }
}
