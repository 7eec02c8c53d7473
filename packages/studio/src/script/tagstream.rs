//! Tag-stream-dialect compiler: one ambient identity, inline `[...]` tags.

use once_cell::sync::Lazy;
use regex::Regex;
use voicestage_domain::{DirectiveMap, Segment};

/// `[...]` directive token.
static TAG_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]").expect("hard-coded pattern"));

/// Compile a tag-stream document against one ambient voice identity.
///
/// Literal text accumulates between tokens and is flushed into a segment,
/// carrying a snapshot of the ambient directive map, whenever a token
/// arrives (and once more at end of input). Directives are ambient state:
/// they persist across segments until overwritten. A `[Pause]` token emits
/// no segment; it marks `pause_after` on the most recently emitted one.
pub fn compile_tagstream(text: &str, identity: &str) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut directives = DirectiveMap::new();
    let mut buffer = String::new();
    let mut cursor = 0usize;

    for caps in TAG_TOKEN.captures_iter(text) {
        let whole = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };
        buffer.push_str(&text[cursor..whole.start()]);
        cursor = whole.end();

        flush(&mut buffer, &directives, identity, &mut segments);

        let token = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
        if token.eq_ignore_ascii_case("pause") {
            if let Some(last) = segments.last_mut() {
                last.pause_after = true;
            }
        } else if let Some((key, value)) = token.split_once(':') {
            directives.set(key, value.trim().to_string());
        } else {
            directives.set(DirectiveMap::MOOD, token.to_string());
        }
    }

    buffer.push_str(&text[cursor..]);
    flush(&mut buffer, &directives, identity, &mut segments);

    tracing::debug!(segments = segments.len(), "tag-stream compiled");
    segments
}

/// Emit the buffered text as a segment if it holds anything non-blank.
fn flush(buffer: &mut String, directives: &DirectiveMap, identity: &str, out: &mut Vec<Segment>) {
    let text = buffer.trim();
    if !text.is_empty() {
        out.push(Segment {
            speaker: None,
            text: text.to_string(),
            voice: identity.to_string(),
            emotion: directives.mood().to_string(),
            is_solo: false,
            is_interrupted: false,
            pause_after: false,
            tones: directives
                .tones()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
    }
    buffer.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDENTITY: &str = "A warm narrator voice";

    #[test]
    fn pause_token_marks_previous_segment() {
        let segs = compile_tagstream("[Excited] Hi there [Pause] [Calm] Goodbye", IDENTITY);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].text, "Hi there");
        assert_eq!(segs[0].emotion, "Excited");
        assert!(segs[0].pause_after);
        assert_eq!(segs[1].text, "Goodbye");
        assert_eq!(segs[1].emotion, "Calm");
        assert!(!segs[1].pause_after);
    }

    #[test]
    fn directives_persist_until_overwritten() {
        let segs = compile_tagstream(
            "[Excited] [pace: slow] One. Two. [Sad] Three.",
            IDENTITY,
        );
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].emotion, "Excited");
        assert_eq!(segs[0].tones, vec![("pace".to_string(), "slow".to_string())]);
        // The pace directive survives the mood change.
        assert_eq!(segs[1].emotion, "Sad");
        assert_eq!(segs[1].tones, vec![("pace".to_string(), "slow".to_string())]);
    }

    #[test]
    fn snapshot_is_independent_of_later_mutation() {
        let segs = compile_tagstream("[pace: slow] First [pace: fast] Second", IDENTITY);
        assert_eq!(segs[0].tones[0].1, "slow");
        assert_eq!(segs[1].tones[0].1, "fast");
    }

    #[test]
    fn leading_text_before_any_tag_is_kept_neutral() {
        let segs = compile_tagstream("Plain opening. [Excited] Then this.", IDENTITY);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].text, "Plain opening.");
        assert_eq!(segs[0].emotion, "Neutral");
    }

    #[test]
    fn ambient_identity_is_applied_to_every_segment() {
        let segs = compile_tagstream("[Excited] One [Calm] Two", IDENTITY);
        assert!(segs.iter().all(|s| s.voice == IDENTITY && s.speaker.is_none()));
    }

    #[test]
    fn directive_keys_are_lower_cased() {
        let segs = compile_tagstream("[Pace: slow] Words", IDENTITY);
        assert_eq!(segs[0].tones[0].0, "pace");
    }

    #[test]
    fn blank_buffer_never_emits() {
        let segs = compile_tagstream("[Excited]   [Calm] Only this", IDENTITY);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].text, "Only this");
        assert_eq!(segs[0].emotion, "Calm");
    }

    #[test]
    fn pause_with_no_previous_segment_is_a_no_op() {
        let segs = compile_tagstream("[Pause] Hello", IDENTITY);
        assert_eq!(segs.len(), 1);
        assert!(!segs[0].pause_after);
    }
}
