//! Orchestration: list, resolve, configure, build, clean, install.
//!
//! Steps run strictly one after another. Any failed step ends the run with a
//! [`DriverError`]; nothing is retried.

use crate::cmake::{self, Invocation, Output, Tool};
use crate::feedback;
use crate::options::{Action, Options};
use crate::preset::{Preset, PresetError, PresetResolver, PresetSource};
use crate::stopwatch::{millis, timed};
use crate::ui;
use std::fmt;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Generation,
    Build,
    Clean,
    Install,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Generation => "CMake generation",
            Stage::Build => "CMake build",
            Stage::Clean => "CMake clean",
            Stage::Install => "CMake installation",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub enum DriverError {
    /// No presets could be discovered.
    UnsupportedPlatform,
    /// Generation failed and the preset is not in the listing.
    UnknownPreset(Preset),
    GenerationFailed,
    BuildFailed,
    CleanFailed,
    InstallFailed,
    /// `--install` on a platform with no way to elevate.
    InstallUnsupported,
    /// cmake (or sudo) could not be started at all.
    Spawn { stage: Stage, source: io::Error },
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::UnsupportedPlatform => write!(f, "Platform not supported."),
            DriverError::UnknownPreset(preset) => write!(
                f,
                "Build failed because '{}' is not an actual preset.",
                preset
            ),
            DriverError::GenerationFailed => write!(f, "Build failed for unknown reason(s)."),
            DriverError::BuildFailed => write!(f, "CMake build unexpectedly failed."),
            DriverError::CleanFailed => write!(f, "CMake clean unexpectedly failed."),
            DriverError::InstallFailed => write!(f, "CMake install unexpectedly failed."),
            DriverError::InstallUnsupported => write!(
                f,
                "Installing needs administrator privileges, which cannot be requested on this platform."
            ),
            DriverError::Spawn { stage, source } => {
                write!(f, "Could not start {}: {}", stage, source)
            }
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriverError::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<PresetError> for DriverError {
    fn from(e: PresetError) -> Self {
        match e {
            PresetError::UnsupportedPlatform => DriverError::UnsupportedPlatform,
        }
    }
}

pub fn run<T: Tool, S: PresetSource>(
    options: &Options,
    tool: &T,
    source: S,
) -> Result<(), DriverError> {
    let resolver = PresetResolver::new(source);

    if options.listing {
        ui::info("Listing available presets");
        for preset in resolver.list_presets() {
            println!("{}", preset);
        }
    }

    match options.action {
        Action::None => {}
        Action::Build => build(options, tool, &resolver)?,
        Action::Clear => clear(options, tool, &resolver)?,
    }

    ui::success("Done.");
    Ok(())
}

fn resolve<S: PresetSource>(
    options: &Options,
    resolver: &PresetResolver<S>,
) -> Result<Preset, DriverError> {
    if let Some(preset) = &options.preset {
        return Ok(preset.clone());
    }
    let preset = resolver.resolve_default()?;
    ui::info(format!("Defaulting to: {}", preset));
    Ok(preset)
}

fn build<T: Tool, S: PresetSource>(
    options: &Options,
    tool: &T,
    resolver: &PresetResolver<S>,
) -> Result<(), DriverError> {
    if options.install && !cmake::can_elevate() {
        return Err(DriverError::InstallUnsupported);
    }

    let preset = resolve(options, resolver)?;

    if !run_stage(tool, &cmake::configure(&preset), options.output, Stage::Generation)? {
        if resolver.validate(preset.as_str()) {
            if let Some(hint) = feedback::generation_failed(options.output) {
                ui::hint(hint);
            }
            return Err(DriverError::GenerationFailed);
        }
        if let Some(hint) = feedback::unknown_preset(&resolver.list_presets()) {
            ui::hint(hint);
        }
        return Err(DriverError::UnknownPreset(preset));
    }

    let build = cmake::build(&preset, options.parallel);
    if !run_stage(tool, &build, options.output, Stage::Build)? {
        return Err(DriverError::BuildFailed);
    }

    if options.install {
        let install = cmake::install(&preset);
        if !run_stage(tool, &install, options.output, Stage::Install)? {
            return Err(DriverError::InstallFailed);
        }
    }

    Ok(())
}

fn clear<T: Tool, S: PresetSource>(
    options: &Options,
    tool: &T,
    resolver: &PresetResolver<S>,
) -> Result<(), DriverError> {
    let preset = resolve(options, resolver)?;
    if !run_stage(tool, &cmake::clean(&preset), options.output, Stage::Clean)? {
        return Err(DriverError::CleanFailed);
    }
    Ok(())
}

/// Run one step with timing. `Ok(false)` means cmake ran and failed.
fn run_stage<T: Tool>(
    tool: &T,
    inv: &Invocation,
    output: Output,
    stage: Stage,
) -> Result<bool, DriverError> {
    ui::info(format!("{} started.", stage));

    // sudo may prompt for a password; keep the terminal free for it.
    let spinner = (output == Output::Silent && !inv.elevated)
        .then(|| ui::Spinner::start(inv.to_string()));
    let (result, elapsed) = timed(|| tool.run(inv, output));
    if let Some(spinner) = spinner {
        spinner.finish();
    }

    let ok = result.map_err(|source| DriverError::Spawn { stage, source })?;
    if ok {
        ui::success(format!("{} finished. Took: {}", stage, millis(elapsed)));
    }
    Ok(ok)
}
