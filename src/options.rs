//! Run configuration.
//!
//! Built once from the command line and only read afterwards.

use crate::cmake::Output;
use crate::preset::Preset;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// Nothing beyond an optional listing.
    None,
    #[default]
    Build,
    Clear,
}

/// Where presets are discovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    /// Scrape `cmake --list-presets`.
    #[default]
    Listing,
    /// Read `CMakePresets.json` / `CMakeUserPresets.json`.
    PresetsFile,
}

/// A positional word on the command line: `list`, `build` or `preset=<name>`.
///
/// Keywords are case-insensitive; the preset name keeps its case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Word {
    List,
    Build,
    Preset(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordError(String);

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown command '{}' (expected list, build or preset=<name>)",
            self.0
        )
    }
}

impl std::error::Error for WordError {}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "list" => Ok(Word::List),
            "build" => Ok(Word::Build),
            _ if lower.starts_with("preset=") => {
                // Only the text up to a second '=' is the name: `preset=a=b` selects `a`.
                let name = s.split('=').nth(1).unwrap_or_default();
                if name.is_empty() {
                    Err(WordError(s.to_string()))
                } else {
                    Ok(Word::Preset(name.to_string()))
                }
            }
            _ => Err(WordError(s.to_string())),
        }
    }
}

/// Long flags understood by the CLI, compared without regard to case.
pub const KNOWN_FLAGS: &[&str] = &[
    "--no-out",
    "--no-parallel",
    "--clear",
    "--install",
    "--from-json",
    "--completions",
    "--help",
    "--version",
];

/// Prepare raw arguments for clap.
///
/// Long flags are lowercased so `--NO-OUT` works like `--no-out`. Unknown long
/// flags are dropped and returned separately so the caller can warn about them.
pub fn normalize_args<I>(args: I) -> (Vec<String>, Vec<String>)
where
    I: IntoIterator<Item = String>,
{
    let mut kept = Vec::new();
    let mut ignored = Vec::new();

    for arg in args {
        if !arg.starts_with("--") || arg == "--" {
            kept.push(arg);
            continue;
        }
        let lower = arg.to_lowercase();
        let flag = lower.split_once('=').map_or(lower.as_str(), |(f, _)| f);
        if KNOWN_FLAGS.contains(&flag) {
            kept.push(lower);
        } else {
            ignored.push(arg);
        }
    }

    (kept, ignored)
}

/// Split positional words into recognized ones and the rest.
pub fn parse_words(raw: &[String]) -> (Vec<Word>, Vec<String>) {
    let mut words = Vec::new();
    let mut ignored = Vec::new();
    for arg in raw {
        match arg.parse::<Word>() {
            Ok(word) => words.push(word),
            Err(_) => ignored.push(arg.clone()),
        }
    }
    (words, ignored)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub action: Action,
    pub preset: Option<Preset>,
    /// Print discovered presets before anything else.
    pub listing: bool,
    pub output: Output,
    pub parallel: bool,
    pub install: bool,
    pub source: Source,
}

/// Raw flags as parsed from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flags {
    pub no_out: bool,
    pub no_parallel: bool,
    pub clear: bool,
    pub install: bool,
    pub from_json: bool,
}

impl Options {
    /// Fold positional words in order, then apply flags.
    ///
    /// The last of `list`/`build`/`preset=` decides between listing only and
    /// building; `--clear` overrides both.
    pub fn from_args(words: &[Word], flags: Flags) -> Self {
        let mut action = Action::Build;
        let mut preset = None;
        let mut listing = false;

        for word in words {
            match word {
                Word::List => {
                    listing = true;
                    action = Action::None;
                }
                Word::Build => action = Action::Build,
                Word::Preset(name) => {
                    preset = Some(Preset::new(name.clone()));
                    action = Action::Build;
                }
            }
        }

        if flags.clear {
            action = Action::Clear;
        }

        Self {
            action,
            preset,
            listing,
            output: if flags.no_out {
                Output::Silent
            } else {
                Output::Inherit
            },
            parallel: !flags.no_parallel,
            install: flags.install,
            source: if flags.from_json {
                Source::PresetsFile
            } else {
                Source::Listing
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(args: &[&str]) -> Vec<Word> {
        args.iter()
            .map(|a| a.parse().expect("valid word"))
            .collect()
    }

    #[test]
    fn test_word_parsing_is_case_insensitive() {
        assert_eq!("LIST".parse::<Word>(), Ok(Word::List));
        assert_eq!("Build".parse::<Word>(), Ok(Word::Build));
        assert_eq!(
            "PreSet=Linux-Debug".parse::<Word>(),
            Ok(Word::Preset("Linux-Debug".to_string()))
        );
    }

    #[test]
    fn test_word_parsing_rejects_unknown() {
        assert!("deploy".parse::<Word>().is_err());
        assert!("preset=".parse::<Word>().is_err());
        let err = "deploy".parse::<Word>().unwrap_err();
        assert!(err.to_string().contains("deploy"));
    }

    #[test]
    fn test_preset_name_stops_at_second_equals() {
        assert_eq!(
            "preset=linux-debug=x".parse::<Word>(),
            Ok(Word::Preset("linux-debug".to_string()))
        );
    }

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_normalize_lowercases_known_flags() {
        let (kept, ignored) =
            normalize_args(strings(&["--NO-OUT", "Preset=X", "--No-Parallel", "--completions=Bash"]));
        assert_eq!(
            kept,
            vec!["--no-out", "Preset=X", "--no-parallel", "--completions=bash"]
        );
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_normalize_drops_unknown_flags() {
        let (kept, ignored) = normalize_args(strings(&["--verbose", "build", "--clear"]));
        assert_eq!(kept, vec!["build", "--clear"]);
        assert_eq!(ignored, vec!["--verbose"]);
    }

    #[test]
    fn test_parse_words_keeps_unknown_aside() {
        let (words, ignored) = parse_words(&strings(&["verbose", "LIST", "preset=x64"]));
        assert_eq!(words, vec![Word::List, Word::Preset("x64".to_string())]);
        assert_eq!(ignored, vec!["verbose"]);
    }

    #[test]
    fn test_defaults() {
        let opts = Options::from_args(&[], Flags::default());
        assert_eq!(opts.action, Action::Build);
        assert_eq!(opts.preset, None);
        assert!(!opts.listing);
        assert_eq!(opts.output, Output::Inherit);
        assert!(opts.parallel);
        assert!(!opts.install);
        assert_eq!(opts.source, Source::Listing);
    }

    #[test]
    fn test_list_alone_does_not_build() {
        let opts = Options::from_args(&words(&["list"]), Flags::default());
        assert!(opts.listing);
        assert_eq!(opts.action, Action::None);
    }

    #[test]
    fn test_last_word_wins() {
        let opts = Options::from_args(&words(&["list", "build"]), Flags::default());
        assert!(opts.listing);
        assert_eq!(opts.action, Action::Build);

        let opts = Options::from_args(&words(&["preset=x64", "list"]), Flags::default());
        assert_eq!(opts.action, Action::None);
        assert_eq!(opts.preset, Some(Preset::new("x64")));
    }

    #[test]
    fn test_flags() {
        let flags = Flags {
            no_out: true,
            no_parallel: true,
            clear: true,
            install: true,
            from_json: true,
        };
        let opts = Options::from_args(&words(&["preset=linux-debug"]), flags);
        assert_eq!(opts.action, Action::Clear);
        assert_eq!(opts.output, Output::Silent);
        assert!(!opts.parallel);
        assert!(opts.install);
        assert_eq!(opts.source, Source::PresetsFile);
    }
}
