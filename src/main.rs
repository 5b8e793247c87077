//! # pbuild CLI Entry Point
//!
//! Parses the command line with clap, turns it into an immutable
//! [`Options`] and hands it to the driver.
//!
//! ## Usage
//!
//! ```text
//! pbuild                        # configure + build the first preset
//! pbuild list                   # print presets and exit
//! pbuild preset=linux-release   # configure + build a named preset
//! pbuild --clear                # clean the default preset's build dir
//! pbuild --install              # build, then sudo cmake --install
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};

use pbuild::cmake::SystemTool;
use pbuild::driver;
use pbuild::options::{self, Flags, Options, Source};
use pbuild::preset::{ListingSource, PresetSource, PresetsFileSource};
use pbuild::ui;

#[cfg(windows)]
#[link(name = "kernel32")]
unsafe extern "system" {
    fn SetConsoleOutputCP(wCodePageID: u32) -> i32;
}

#[cfg(windows)]
fn enable_windows_utf8_console() {
    unsafe {
        SetConsoleOutputCP(65001);
    }
}

#[cfg(not(windows))]
fn enable_windows_utf8_console() {}

#[derive(Parser)]
#[command(name = "pbuild")]
#[command(about = "Configure, build and install CMake presets", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
struct Cli {
    /// list, build or preset=<name> (processed in order, case-insensitive)
    #[arg(value_name = "COMMAND")]
    words: Vec<String>,
    /// Hide cmake's stdout and stderr
    #[arg(long)]
    no_out: bool,
    /// Don't pass --parallel to the build step
    #[arg(long)]
    no_parallel: bool,
    /// Run the clean target instead of building
    #[arg(long)]
    clear: bool,
    /// Install after a successful build (uses sudo)
    #[arg(long)]
    install: bool,
    /// Read presets from CMakePresets.json instead of `cmake --list-presets`
    #[arg(long)]
    from_json: bool,
    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn main() -> Result<()> {
    enable_windows_utf8_console();

    let (args, ignored_flags) = options::normalize_args(std::env::args());
    let cli = Cli::parse_from(args);

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        return Ok(());
    }

    let (words, ignored_words) = options::parse_words(&cli.words);
    for arg in ignored_flags.iter().chain(&ignored_words) {
        ui::warn(format!("Ignoring unknown argument '{}'", arg));
    }

    let options = Options::from_args(
        &words,
        Flags {
            no_out: cli.no_out,
            no_parallel: cli.no_parallel,
            clear: cli.clear,
            install: cli.install,
            from_json: cli.from_json,
        },
    );

    let tool = SystemTool;
    let source: Box<dyn PresetSource> = match options.source {
        Source::Listing => Box::new(ListingSource::new(tool)),
        Source::PresetsFile => {
            let dir = std::env::current_dir().context("Failed to read current directory")?;
            Box::new(PresetsFileSource::new(dir))
        }
    };

    if let Err(e) = driver::run(&options, &tool, source) {
        ui::error(e.to_string());
        std::process::exit(1);
    }
    Ok(())
}
