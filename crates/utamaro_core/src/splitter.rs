//! Splits generated text into per-channel variants.
//!
//! The generation prompt asks the model to write two sections separated by
//! the literal markers `【Google投稿】` and `【Instagram】`. This module cuts
//! the raw text along those markers and strips leftover markdown emphasis.
//!
//! The split is total: missing or malformed markers degrade to the full raw
//! text on both channels rather than producing an empty post silently.

use serde::{Deserialize, Serialize};

/// Marker opening the Google Business Profile section.
pub const GOOGLE_MARKER: &str = "【Google投稿】";
/// Marker opening the Instagram section.
pub const INSTAGRAM_MARKER: &str = "【Instagram】";

/// The two channel texts produced from one raw generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitContent {
    /// Text for the Google Business Profile post.
    pub google: String,
    /// Caption for the Instagram post.
    pub instagram: String,
}

/// Split raw generated text into per-channel variants.
///
/// When both markers are present, the text between them becomes the first
/// channel's text and the remainder after the second marker becomes the
/// other's, whichever order the model emitted them in. When either marker is
/// missing, both channels receive the full raw text.
///
/// # Examples
///
/// ```
/// use utamaro_core::splitter::split;
///
/// let parsed = split("【Google投稿】A【Instagram】B");
/// assert_eq!(parsed.google, "A");
/// assert_eq!(parsed.instagram, "B");
///
/// let fallback = split("no markers here");
/// assert_eq!(fallback.google, "no markers here");
/// assert_eq!(fallback.instagram, "no markers here");
/// ```
pub fn split(raw: &str) -> SplitContent {
    let mut google = raw;
    let mut instagram = raw;

    if let (Some(g_idx), Some(i_idx)) = (raw.find(GOOGLE_MARKER), raw.find(INSTAGRAM_MARKER)) {
        let g_start = g_idx + GOOGLE_MARKER.len();
        if g_start <= i_idx {
            google = &raw[g_start..i_idx];
            instagram = &raw[i_idx + INSTAGRAM_MARKER.len()..];
        } else {
            // Instagram section came first.
            google = &raw[g_start..];
            instagram = &raw[i_idx + INSTAGRAM_MARKER.len()..g_idx];
        }
    }

    SplitContent {
        google: clean(google),
        instagram: clean(instagram),
    }
}

/// Strip residual `**` emphasis and leading `### ` heading markers.
fn clean(text: &str) -> String {
    let without_bold = text.replace("**", "");
    let lines: Vec<&str> = without_bold
        .lines()
        .map(|line| match line.strip_prefix("###") {
            Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
            _ => line,
        })
        .collect();
    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_both_markers() {
        let parsed = split("【Google投稿】Spring is here.【Instagram】Spring is here! #spring");
        assert_eq!(parsed.google, "Spring is here.");
        assert_eq!(parsed.instagram, "Spring is here! #spring");
    }

    #[test]
    fn trims_section_whitespace() {
        let parsed = split("【Google投稿】\n本日のご案内です。\n\n【Instagram】\n本日のご案内です♪ #salon\n");
        assert_eq!(parsed.google, "本日のご案内です。");
        assert_eq!(parsed.instagram, "本日のご案内です♪ #salon");
    }

    #[test]
    fn missing_markers_fall_back_to_full_text() {
        let parsed = split("no markers here");
        assert_eq!(parsed.google, "no markers here");
        assert_eq!(parsed.instagram, "no markers here");
    }

    #[test]
    fn single_marker_falls_back_to_full_text() {
        let parsed = split("【Google投稿】only one side");
        assert_eq!(parsed.google, "【Google投稿】only one side");
        assert_eq!(parsed.instagram, "【Google投稿】only one side");
    }

    #[test]
    fn reversed_marker_order_still_extracts_sections() {
        let parsed = split("【Instagram】insta text【Google投稿】google text");
        assert_eq!(parsed.google, "google text");
        assert_eq!(parsed.instagram, "insta text");
    }

    #[test]
    fn strips_emphasis_and_headings() {
        let parsed = split("【Google投稿】### 見出し\n**強調**された文。【Instagram】**каption**");
        assert_eq!(parsed.google, "見出し\n強調された文。");
        assert_eq!(parsed.instagram, "каption");
    }

    #[test]
    fn split_is_stable_on_clean_markerless_text() {
        let once = split("シンプルな本文です。");
        let twice = split(&once.google);
        assert_eq!(once.google, twice.google);
        assert_eq!(once.instagram, twice.instagram);
    }

    #[test]
    fn degraded_mode_gives_both_channels_the_same_text() {
        for raw in ["a", "【Instagram】のみ", "【Google投稿】x"] {
            let parsed = split(raw);
            assert_eq!(parsed.google, parsed.instagram);
            assert!(!parsed.google.is_empty());
        }
    }
}
