//! One resolved unit of text to synthesize, with speaker and pacing metadata.

/// A fully resolved dialogue or narration unit.
///
/// Segments are produced once by a script compiler and are immutable
/// afterward: the orchestrator consumes them in emission order and never
/// revisits one after its waveform exists. `voice` is the identity-locked
/// base description for the speaker — the same speaker always resolves to
/// the same base text within one compilation, whatever the per-line emotion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Identity key of the speaker. `None` in the tag-stream dialect,
    /// which assumes one ambient identity for the whole document.
    pub speaker: Option<String>,
    /// Literal text to speak, with quoting and directive markup stripped.
    /// Never empty at emission time.
    pub text: String,
    /// Resolved voice-identity description, optionally style-suffixed.
    pub voice: String,
    /// Current mood label. Defaults to `"Neutral"`.
    pub emotion: String,
    /// Internal-monologue delivery: changes instruction wording, not content.
    pub is_solo: bool,
    /// Line is cut off by the next speaker: trailing audio is truncated and
    /// the pre-next-segment gap shrinks.
    pub is_interrupted: bool,
    /// Tag-stream dialect only: a fixed silence follows this segment
    /// regardless of speaker continuity.
    pub pause_after: bool,
    /// Tag-stream dialect only: non-mood delivery tones active at flush
    /// time, in insertion order.
    pub tones: Vec<(String, String)>,
}

impl Segment {
    /// Default emotion carried by segments that never saw a mood directive.
    pub const NEUTRAL: &'static str = "Neutral";

    /// Speaker name for status/progress display.
    pub fn speaker_label(&self) -> &str {
        self.speaker.as_deref().unwrap_or("Narrator")
    }
}
