//! CMake command construction and execution.
//!
//! Every external step is first described as an [`Invocation`] and then handed
//! to a [`Tool`]. The driver only ever looks at whether a step succeeded.
//!
//! ## Commands
//!
//! - `cmake --list-presets`
//! - `cmake --preset=<name>`
//! - `cmake --build builds/<name> [--parallel]`
//! - `cmake --build builds/<name> --target clean`
//! - `sudo cmake --install builds/<name>` (Unix only)

use crate::preset::Preset;
use std::fmt;
use std::io;
use std::process::{Command, Stdio};

pub const CMAKE: &str = "cmake";

/// Relative directory every preset builds into, followed by the preset name.
pub const BUILD_ROOT: &str = "builds";

/// Where the child's stdout/stderr go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Output {
    #[default]
    Inherit,
    Silent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Needs administrator rights (install step).
    pub elevated: bool,
}

impl Invocation {
    fn cmake<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: CMAKE.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            elevated: false,
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elevated {
            write!(f, "sudo ")?;
        }
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

fn build_dir_arg(preset: &Preset) -> String {
    // Forward slash on every platform; cmake accepts it and it keeps logs stable.
    format!("{}/{}", BUILD_ROOT, preset)
}

pub fn list_presets() -> Invocation {
    Invocation::cmake(["--list-presets"])
}

pub fn configure(preset: &Preset) -> Invocation {
    Invocation::cmake([format!("--preset={}", preset)])
}

pub fn build(preset: &Preset, parallel: bool) -> Invocation {
    let mut inv = Invocation::cmake(["--build".to_string(), build_dir_arg(preset)]);
    if parallel {
        inv.args.push("--parallel".to_string());
    }
    inv
}

pub fn clean(preset: &Preset) -> Invocation {
    Invocation::cmake([
        "--build".to_string(),
        build_dir_arg(preset),
        "--target".to_string(),
        "clean".to_string(),
    ])
}

pub fn install(preset: &Preset) -> Invocation {
    let mut inv = Invocation::cmake(["--install".to_string(), build_dir_arg(preset)]);
    inv.elevated = true;
    inv
}

/// True when this platform has a way to run elevated invocations.
pub fn can_elevate() -> bool {
    cfg!(unix)
}

/// Executes invocations. The real implementation shells out; tests record.
pub trait Tool {
    /// Run and collect stdout as text. Stderr is discarded.
    fn capture(&self, inv: &Invocation) -> io::Result<String>;

    /// Run to completion and report whether the exit status was zero.
    fn run(&self, inv: &Invocation, output: Output) -> io::Result<bool>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTool;

impl SystemTool {
    fn command(inv: &Invocation) -> io::Result<Command> {
        if !inv.elevated {
            let mut cmd = Command::new(&inv.program);
            cmd.args(&inv.args);
            return Ok(cmd);
        }
        if !can_elevate() {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "no elevation mechanism on this platform",
            ));
        }
        let mut cmd = Command::new("sudo");
        cmd.arg(&inv.program).args(&inv.args);
        Ok(cmd)
    }
}

impl Tool for SystemTool {
    fn capture(&self, inv: &Invocation) -> io::Result<String> {
        let output = Self::command(inv)?.stderr(Stdio::null()).output()?;
        String::from_utf8(output.stdout).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn run(&self, inv: &Invocation, output: Output) -> io::Result<bool> {
        let mut cmd = Self::command(inv)?;
        if output == Output::Silent {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }
        Ok(cmd.status()?.success())
    }
}
