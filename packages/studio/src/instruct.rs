//! Deterministic synthesis-instruction rendering.
//!
//! The instruction string is the only channel carrying voice identity and
//! delivery into the synthesis collaborator, so identical segment
//! attributes must render byte-identical strings on every call: fixed
//! templates, fixed field order, no locale-dependent formatting.

use voicestage_domain::Segment;

/// Render a segment's synthesis instruction.
pub fn build_instruction(segment: &Segment) -> String {
    let mut instruction = if segment.is_solo {
        format!(
            "Voice Identity: {}. Delivery: Internal monologue, whispery close-mic feel. Emotion: {}.",
            segment.voice, segment.emotion
        )
    } else {
        format!(
            "Voice Identity: {}. Delivery Emotion: {}.",
            segment.voice, segment.emotion
        )
    };

    if !segment.tones.is_empty() {
        instruction.push_str(" Additional Tones: ");
        for (i, (key, value)) in segment.tones.iter().enumerate() {
            if i > 0 {
                instruction.push_str(", ");
            }
            instruction.push_str(&capitalize(key));
            instruction.push_str(": ");
            instruction.push_str(value);
        }
    }

    instruction
}

/// Upper-case the first character of a directive key for display.
fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
