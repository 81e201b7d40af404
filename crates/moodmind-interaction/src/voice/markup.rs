//! Light markup handling for scripted text.
//!
//! Script strings may carry `<br>` line breaks. Speech engines read them out
//! literally, so text is normalized before it is spoken or printed.

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*<br\s*/?>").expect("valid line break regex"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static REPEATED_STOP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(\s*\.)+").expect("valid repeated stop regex"));
static BLANKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").expect("valid blank regex"));

/// Prepares text for a speech engine.
///
/// Line breaks become a sentence pause, other tags are removed and
/// whitespace is collapsed to single spaces.
pub fn speech_text(text: &str) -> String {
    let paused = LINE_BREAK.replace_all(text, ". ");
    let untagged = TAG.replace_all(&paused, "");
    let collapsed = untagged.split_whitespace().collect::<Vec<_>>().join(" ");
    let stops = REPEATED_STOP.replace_all(&collapsed, ".");
    stops.trim_start_matches(['.', ' ']).to_string()
}

/// Prepares text for a terminal: line breaks become newlines, other tags are
/// removed.
pub fn plain_text(text: &str) -> String {
    let broken = LINE_BREAK.replace_all(text, "\n");
    let untagged = TAG.replace_all(&broken, "");
    untagged
        .lines()
        .map(|line| BLANKS.replace_all(line.trim(), " ").into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_break_becomes_pause() {
        assert_eq!(speech_text("Hello<br>World"), "Hello. World");
        assert_eq!(speech_text("Hello<BR/>World"), "Hello. World");
        assert_eq!(speech_text("Hello <br /> World"), "Hello. World");
    }

    #[test]
    fn test_pause_after_full_stop_is_not_doubled() {
        assert_eq!(
            speech_text("Focus on positive things. <br> Stay healthy!"),
            "Focus on positive things. Stay healthy!"
        );
    }

    #[test]
    fn test_other_tags_are_stripped() {
        assert_eq!(speech_text("<b>Bold</b>   and\n plain"), "Bold and plain");
        assert_eq!(speech_text("<br>Leading"), "Leading");
    }

    #[test]
    fn test_plain_text_keeps_lines() {
        assert_eq!(
            plain_text("Take care. <br> Stay <i>healthy</i>!"),
            "Take care.\nStay healthy!"
        );
        assert_eq!(plain_text("No markup"), "No markup");
    }
}
