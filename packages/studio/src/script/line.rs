//! Line classification for the screenplay dialect.
//!
//! Each non-blank line is matched against an ordered list of patterns and
//! reduced to a tagged [`LineKind`] so the precedence rules stay auditable:
//! bracket tag first, then solo narrative, then the old-school `Name:` form,
//! and finally continuation of the previous speaker's text.

use once_cell::sync::Lazy;
use regex::Regex;

/// `[ Name - Attr1, Attr2, ..., Emotion ] trailing text`
static BRACKET_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\s*([^\]]+?)\s*\]").expect("hard-coded pattern"));

/// `Solo: Name's remainder`. The possessive apostrophe slot deliberately
/// matches ANY single character; the looseness is inherited behavior and
/// kept as-is.
static SOLO_NARRATIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Solo:\s*([A-Za-z_]+).s\s+(.+)$").expect("hard-coded pattern"));

/// `Name: dialogue`
static OLD_SCHOOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_]+):\s*(.+)$").expect("hard-coded pattern"));

/// One classified script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace-only line; skipped.
    Blank,
    /// `[Name - Style..., Emotion] dialogue`
    BracketTag {
        speaker: String,
        /// Comma-joined attributes before the last one, if two or more.
        style: Option<String>,
        /// Last attribute, if any attributes were given.
        emotion: Option<String>,
        dialogue: String,
    },
    /// `Solo: Name's thoughts` narrative aside.
    SoloNarrative { speaker: String, dialogue: String },
    /// `Name: dialogue`
    OldSchool { speaker: String, dialogue: String },
    /// No pattern matched; appended to the previous segment when a speaker
    /// is active, silently dropped otherwise.
    Continuation { text: String },
}

/// Classify one raw script line.
pub fn classify(raw: &str) -> LineKind {
    let line = raw.trim();
    if line.is_empty() {
        return LineKind::Blank;
    }

    if let Some(caps) = BRACKET_TAG.captures(line) {
        let tag = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let dialogue = line[caps.get(0).map(|m| m.end()).unwrap_or(0)..]
            .trim()
            .to_string();
        let (speaker, style, emotion) = split_tag(tag);
        return LineKind::BracketTag {
            speaker,
            style,
            emotion,
            dialogue,
        };
    }

    if let Some(caps) = SOLO_NARRATIVE.captures(line) {
        let speaker = caps.get(1).map(|m| m.as_str()).unwrap_or_default().to_string();
        let remainder = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        return LineKind::SoloNarrative {
            speaker,
            dialogue: format!("({remainder})"),
        };
    }

    if let Some(caps) = OLD_SCHOOL.captures(line) {
        return LineKind::OldSchool {
            speaker: caps.get(1).map(|m| m.as_str()).unwrap_or_default().to_string(),
            dialogue: caps.get(2).map(|m| m.as_str()).unwrap_or_default().to_string(),
        };
    }

    LineKind::Continuation {
        text: line.to_string(),
    }
}

/// Split a bracket-tag body `Name - Attr1, ..., Emotion`.
///
/// Attributes before the last comma become the voice-style suffix, the last
/// attribute becomes the emotion. A tag without the `" - "` separator is a
/// speaker name only.
fn split_tag(tag: &str) -> (String, Option<String>, Option<String>) {
    match tag.split_once(" - ") {
        Some((name, attr_part)) => {
            let attrs: Vec<&str> = attr_part.split(',').map(str::trim).collect();
            if attrs.len() >= 2 {
                let style = attrs[..attrs.len() - 1].join(", ");
                let emotion = attrs[attrs.len() - 1].to_string();
                (name.trim().to_string(), Some(style), Some(emotion))
            } else {
                (
                    name.trim().to_string(),
                    None,
                    attrs.first().map(|a| a.to_string()),
                )
            }
        }
        None => (tag.trim().to_string(), None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_tag_with_style_and_emotion() {
        let kind = classify(r#"[Elena - Sexy, Cold] "Hello there""#);
        assert_eq!(
            kind,
            LineKind::BracketTag {
                speaker: "Elena".into(),
                style: Some("Sexy".into()),
                emotion: Some("Cold".into()),
                dialogue: r#""Hello there""#.into(),
            }
        );
    }

    #[test]
    fn bracket_tag_multiple_style_attrs() {
        let kind = classify("[Marcus - Formal, Clipped, Neutral] Understood.");
        match kind {
            LineKind::BracketTag { style, emotion, .. } => {
                assert_eq!(style.as_deref(), Some("Formal, Clipped"));
                assert_eq!(emotion.as_deref(), Some("Neutral"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn bracket_tag_single_attr_is_emotion_only() {
        match classify("[Julian - Breathless] text") {
            LineKind::BracketTag { style, emotion, .. } => {
                assert_eq!(style, None);
                assert_eq!(emotion.as_deref(), Some("Breathless"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn bracket_tag_name_only() {
        match classify("[Narrator] Once upon a time") {
            LineKind::BracketTag {
                speaker,
                style,
                emotion,
                dialogue,
            } => {
                assert_eq!(speaker, "Narrator");
                assert_eq!(style, None);
                assert_eq!(emotion, None);
                assert_eq!(dialogue, "Once upon a time");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn solo_narrative_wraps_in_parentheses() {
        match classify("Solo: Sarah's heart was racing") {
            LineKind::SoloNarrative { speaker, dialogue } => {
                assert_eq!(speaker, "Sarah");
                assert_eq!(dialogue, "(heart was racing)");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn solo_apostrophe_slot_matches_any_character() {
        // Known looseness: the possessive apostrophe may be any character.
        match classify("Solo: Sarahxs thoughts drifted") {
            LineKind::SoloNarrative { speaker, .. } => assert_eq!(speaker, "Sarah"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn old_school_line() {
        match classify("Julian: I never agreed to this.") {
            LineKind::OldSchool { speaker, dialogue } => {
                assert_eq!(speaker, "Julian");
                assert_eq!(dialogue, "I never agreed to this.");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn bracket_beats_old_school() {
        // A line can start with both shapes; bracket tag has priority.
        assert!(matches!(
            classify("[Elena - Cold] Marcus: drive."),
            LineKind::BracketTag { .. }
        ));
    }

    #[test]
    fn solo_narrative_beats_old_school() {
        // Without the possessive form, `Solo:` falls through to old-school.
        assert!(matches!(
            classify("Solo: Sarah's quiet dread"),
            LineKind::SoloNarrative { .. }
        ));
        assert!(matches!(
            classify("Solo: a bare thought"),
            LineKind::OldSchool { .. }
        ));
    }

    #[test]
    fn blank_and_continuation() {
        assert_eq!(classify("   "), LineKind::Blank);
        assert_eq!(
            classify("and the rain kept falling."),
            LineKind::Continuation {
                text: "and the rain kept falling.".into()
            }
        );
    }
}
