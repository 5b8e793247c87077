//! Follow-up hints printed after a failed configure step.

use crate::cmake::Output;
use crate::preset::Preset;
use colored::*;

/// The preset was not in the listing: show what is.
pub fn unknown_preset(available: &[Preset]) -> Option<String> {
    if available.is_empty() {
        return None;
    }
    let names: Vec<&str> = available.iter().map(Preset::as_str).collect();
    Some(format!("Available presets: {}", names.join(", ").cyan()))
}

/// The preset exists but cmake still failed.
pub fn generation_failed(output: Output) -> Option<String> {
    match output {
        Output::Silent => Some(format!(
            "CMake output was hidden. Rerun without {} to see it.",
            "--no-out".bold().yellow()
        )),
        Output::Inherit => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_preset_lists_alternatives() {
        let available = vec![Preset::new("linux-debug"), Preset::new("linux-release")];
        let hint = unknown_preset(&available).unwrap_or_default();
        assert!(hint.contains("linux-debug"));
        assert!(hint.contains("linux-release"));
    }

    #[test]
    fn test_unknown_preset_without_alternatives() {
        assert_eq!(unknown_preset(&[]), None);
    }

    #[test]
    fn test_generation_failed_hint_depends_on_output() {
        assert!(generation_failed(Output::Silent).is_some_and(|h| h.contains("--no-out")));
        assert_eq!(generation_failed(Output::Inherit), None);
    }
}
