use super::{Preset, PresetSource};
use crate::cmake::{self, Tool};

/// Banner lines printed by `cmake --list-presets` before the first preset.
pub const HEADER_LINES: usize = 2;

/// Lines after the last preset (the empty string after the final newline).
pub const FOOTER_LINES: usize = 1;

/// Presets reported by `cmake --list-presets` in the working directory.
pub struct ListingSource<T> {
    tool: T,
}

impl<T: Tool> ListingSource<T> {
    pub fn new(tool: T) -> Self {
        Self { tool }
    }
}

impl<T: Tool> PresetSource for ListingSource<T> {
    fn presets(&self) -> Vec<Preset> {
        match self.tool.capture(&cmake::list_presets()) {
            Ok(output) => parse_listing(&output),
            Err(_) => Vec::new(),
        }
    }
}

/// Parse the human-readable preset listing.
///
/// ```text
/// Available configure presets:
///
///   "linux-debug"   - Linux Debug
///   "linux-release" - Linux Release
/// ```
///
/// The header and footer are dropped by count, whitespace is removed from each
/// remaining line and the name is whatever sits between its last two quotes.
pub fn parse_listing(output: &str) -> Vec<Preset> {
    if output.is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = output.split('\n').collect();
    if lines.len() <= HEADER_LINES + FOOTER_LINES {
        return Vec::new();
    }

    lines[HEADER_LINES..lines.len() - FOOTER_LINES]
        .iter()
        .filter_map(|line| quoted_name(line))
        .map(Preset::new)
        .collect()
}

fn quoted_name(line: &str) -> Option<String> {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    let close = compact.rfind('"')?;
    let open = compact[..close].rfind('"')?;
    Some(compact[open + 1..close].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmake::{Invocation, Output};
    use std::io;

    fn names(output: &str) -> Vec<String> {
        parse_listing(output)
            .into_iter()
            .map(|p| p.to_string())
            .collect()
    }

    #[test]
    fn test_parse_basic_listing() {
        let output = "Available configure presets:\n\n  \"linux-debug\"\n  \"linux-release\"\n";
        assert_eq!(names(output), vec!["linux-debug", "linux-release"]);
    }

    #[test]
    fn test_parse_real_cmake_output_with_display_names() {
        let output = "Available configure presets:\n\n  \"x64-debug\"   - x64 Debug\n  \"x64-release\" - x64 Release\n";
        assert_eq!(names(output), vec!["x64-debug", "x64-release"]);
    }

    #[test]
    fn test_parse_tolerates_prefix_and_crlf() {
        let output = "Available configure presets:\r\n\r\n * \"win-debug\"\r\n\t>\"win-release\"\r\n";
        assert_eq!(names(output), vec!["win-debug", "win-release"]);
    }

    #[test]
    fn test_parse_strips_whitespace_inside_quotes() {
        let output = "header\n\n  \"my preset\"\n";
        assert_eq!(names(output), vec!["mypreset"]);
    }

    #[test]
    fn test_parse_empty_and_header_only() {
        assert!(parse_listing("").is_empty());
        assert!(parse_listing("Available configure presets:\n").is_empty());
        assert!(parse_listing("Available configure presets:\n\n").is_empty());
    }

    #[test]
    fn test_parse_skips_unquoted_lines() {
        let output = "header\n\n  \"a\"\n  garbage\n  \"b\n  \"c\"\n";
        assert_eq!(names(output), vec!["a", "c"]);
    }

    #[test]
    fn test_parse_drops_last_line_even_without_newline() {
        // The footer count is fixed; a missing trailing newline loses the last entry.
        let output = "header\n\n  \"a\"\n  \"b\"";
        assert_eq!(names(output), vec!["a"]);
    }

    struct FakeTool(io::Result<String>);

    impl Tool for FakeTool {
        fn capture(&self, inv: &Invocation) -> io::Result<String> {
            assert_eq!(inv.args, vec!["--list-presets"]);
            match &self.0 {
                Ok(s) => Ok(s.clone()),
                Err(e) => Err(io::Error::new(e.kind(), "fake")),
            }
        }

        fn run(&self, _inv: &Invocation, _output: Output) -> io::Result<bool> {
            unreachable!("listing never runs steps")
        }
    }

    #[test]
    fn test_listing_source_uses_tool_output() {
        let source = ListingSource::new(FakeTool(Ok(
            "Available configure presets:\n\n  \"default\"\n".to_string(),
        )));
        assert_eq!(source.presets(), vec![Preset::new("default")]);
    }

    #[test]
    fn test_listing_source_spawn_failure_is_empty() {
        let source = ListingSource::new(FakeTool(Err(io::Error::from(io::ErrorKind::NotFound))));
        assert!(source.presets().is_empty());
    }
}
