//! Screenplay-dialect compiler: classified lines → resolved segments.

use once_cell::sync::Lazy;
use regex::Regex;
use voicestage_domain::{CharacterTable, Segment};

use super::line::{LineKind, classify};

/// Inline `(Solo ...)` delivery marker.
static SOLO_INLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\(Solo[^)]*\)").expect("hard-coded pattern"));

/// Inner `[...]` emotion override inside dialogue text.
static INNER_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]").expect("hard-coded pattern"));

/// Compile a screenplay script against its character table.
///
/// Lines compile in order; continuation lines append to the previous
/// segment's text, empty-dialogue candidates are dropped, and text before
/// any speaker tag is silently discarded.
pub fn compile_screenplay(script: &str, characters: &CharacterTable) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut current_speaker: Option<String> = None;

    for raw in script.lines() {
        let (speaker, dialogue, style, emotion, is_solo) = match classify(raw) {
            LineKind::Blank => continue,
            LineKind::BracketTag {
                speaker,
                style,
                emotion,
                dialogue,
            } => (
                speaker,
                dialogue,
                style,
                emotion.unwrap_or_else(|| Segment::NEUTRAL.to_string()),
                false,
            ),
            LineKind::SoloNarrative { speaker, dialogue } => {
                (speaker, dialogue, None, "Introspective".to_string(), true)
            }
            LineKind::OldSchool { speaker, dialogue } => (
                speaker,
                dialogue,
                None,
                Segment::NEUTRAL.to_string(),
                false,
            ),
            LineKind::Continuation { text } => {
                if current_speaker.is_some() {
                    if let Some(last) = segments.last_mut() {
                        last.text.push(' ');
                        last.text.push_str(&text);
                    }
                }
                continue;
            }
        };

        current_speaker = Some(speaker.clone());

        let (text, emotion, is_solo, is_interrupted) = refine_dialogue(dialogue, emotion, is_solo);
        if text.is_empty() {
            continue;
        }

        let voice = resolve_voice(characters, &speaker, style.as_deref());
        segments.push(Segment {
            speaker: Some(speaker),
            text,
            voice,
            emotion,
            is_solo,
            is_interrupted,
            pause_after: false,
            tones: Vec::new(),
        });
    }

    tracing::debug!(segments = segments.len(), "screenplay compiled");
    segments
}

/// Strip inline markers from extracted dialogue and finalize its flags.
///
/// Order matters: inline `(Solo)` markers first, then surrounding quotes,
/// then inner `[...]` tags (the last one overrides the bracket-tag
/// emotion), then the trailing interruption mark.
fn refine_dialogue(dialogue: String, emotion: String, solo: bool) -> (String, String, bool, bool) {
    let mut text = dialogue;
    let mut emotion = emotion;
    let mut is_solo = solo;

    if SOLO_INLINE.is_match(&text) || emotion.to_lowercase().contains("solo") {
        is_solo = true;
        text = SOLO_INLINE.replace_all(&text, "").trim().to_string();
    }

    text = text.trim_matches(['"', '\'', ' ']).to_string();

    let inner: Vec<String> = INNER_TAG
        .captures_iter(&text)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect();
    if let Some(last) = inner.last() {
        emotion = last.clone();
        text = INNER_TAG.replace_all(&text, "").trim().to_string();
    }

    let is_interrupted = text.ends_with('\u{2014}') || text.ends_with("--");
    if is_interrupted {
        text = text.trim_end_matches(['\u{2014}', '-']).trim_end().to_string();
    }

    (text, emotion, is_solo, is_interrupted)
}

/// Identity lock: the base description is a pure function of the speaker
/// and the table; only the per-line style suffix varies.
fn resolve_voice(characters: &CharacterTable, speaker: &str, style: Option<&str>) -> String {
    let base = characters.base_voice(speaker);
    match style {
        Some(style) if !style.is_empty() => format!("{base}. Style: {style}"),
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voicestage_domain::CharacterVoice;

    fn cast() -> CharacterTable {
        let mut table = CharacterTable::default();
        table.insert(
            "Elena",
            CharacterVoice::Plain("British woman, cold, high-status voice".into()),
        );
        table.insert(
            "Julian",
            CharacterVoice::Profile {
                voice: Some("Deep, rugged male".into()),
            },
        );
        table
    }

    #[test]
    fn bracket_line_compiles_fully() {
        let segs = compile_screenplay(r#"[Elena - Sexy, Cold] "Hello there""#, &cast());
        assert_eq!(segs.len(), 1);
        let seg = &segs[0];
        assert_eq!(seg.speaker.as_deref(), Some("Elena"));
        assert_eq!(seg.text, "Hello there");
        assert_eq!(
            seg.voice,
            "British woman, cold, high-status voice. Style: Sexy"
        );
        assert_eq!(seg.emotion, "Cold");
        assert!(!seg.is_solo);
        assert!(!seg.is_interrupted);
    }

    #[test]
    fn identity_lock_across_emotions() {
        let script = "[Julian - Calm] First line\n[Julian - Furious] Second line";
        let segs = compile_screenplay(script, &cast());
        assert_eq!(segs[0].voice, segs[1].voice);
        assert_ne!(segs[0].emotion, segs[1].emotion);
    }

    #[test]
    fn unknown_speaker_gets_placeholder_voice() {
        let segs = compile_screenplay("[Marcus - Formal] Understood, Madam.", &cast());
        assert_eq!(segs[0].voice, "A voice for Marcus");
    }

    #[test]
    fn continuation_appends_to_previous_segment() {
        let script = "Elena: The leather was cold\nand the night was colder.";
        let segs = compile_screenplay(script, &cast());
        assert_eq!(segs.len(), 1);
        assert_eq!(
            segs[0].text,
            "The leather was cold and the night was colder."
        );
    }

    #[test]
    fn text_before_any_speaker_is_dropped() {
        let script = "stray stage direction\nElena: Finally, dialogue.";
        let segs = compile_screenplay(script, &cast());
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].text, "Finally, dialogue.");
    }

    #[test]
    fn inline_solo_marker_sets_flag_and_strips() {
        let segs = compile_screenplay("[Elena - Cold] (Solo) The backseat was cold.", &cast());
        assert!(segs[0].is_solo);
        assert_eq!(segs[0].text, "The backseat was cold.");
    }

    #[test]
    fn solo_in_emotion_sets_flag() {
        let segs = compile_screenplay("[Julian - Solo/Internal] She kept watching.", &cast());
        assert!(segs[0].is_solo);
        assert_eq!(segs[0].emotion, "Solo/Internal");
    }

    #[test]
    fn last_inner_tag_overrides_emotion() {
        let segs = compile_screenplay(
            "[Elena - Cold] You [Whispering] should not [Hissing] be here.",
            &cast(),
        );
        assert_eq!(segs[0].emotion, "Hissing");
        assert_eq!(segs[0].text, "You  should not  be here.");
    }

    #[test]
    fn em_dash_marks_interruption() {
        let segs = compile_screenplay("[Julian - Intense] It matters when I have a\u{2014}", &cast());
        assert!(segs[0].is_interrupted);
        assert_eq!(segs[0].text, "It matters when I have a");
    }

    #[test]
    fn double_hyphen_marks_interruption() {
        let segs = compile_screenplay("Julian: I was only trying to--", &cast());
        assert!(segs[0].is_interrupted);
        assert_eq!(segs[0].text, "I was only trying to");
    }

    #[test]
    fn solo_narrative_line() {
        let segs = compile_screenplay("Solo: Julian's pulse would not settle", &cast());
        let seg = &segs[0];
        assert_eq!(seg.speaker.as_deref(), Some("Julian"));
        assert_eq!(seg.text, "(pulse would not settle)");
        assert_eq!(seg.emotion, "Introspective");
        assert!(seg.is_solo);
    }

    #[test]
    fn empty_dialogue_is_dropped() {
        let segs = compile_screenplay("[Elena - Cold]\nElena: Actual words.", &cast());
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].text, "Actual words.");
    }
}
