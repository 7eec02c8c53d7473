//! Script grammars and segment compilers.
//!
//! Two dialects compile to the same [`Segment`] shape:
//!
//! * **Screenplay** (line-oriented): `[Name - Style, Emotion] dialogue`,
//!   `Solo: Name's thoughts`, and `Name: dialogue` lines, resolved against
//!   a character table.
//! * **Tag-stream** (document-oriented): `[...]` directive tokens over one
//!   ambient voice identity, with `[Pause]` pacing markers.

pub mod line;
pub mod screenplay;
pub mod tagstream;

use voicestage_domain::{CharacterTable, Segment};

/// Which grammar to apply, plus the identity inputs it needs.
#[derive(Debug, Clone)]
pub enum ScriptSource {
    /// Multi-character screenplay resolved against a cast table.
    Screenplay { characters: CharacterTable },
    /// Single ambient identity; directives arrive as inline `[...]` tags.
    TagStream { identity: String },
}

impl ScriptSource {
    /// True for the screenplay dialect (speaker-change pacing applies).
    pub fn is_screenplay(&self) -> bool {
        matches!(self, ScriptSource::Screenplay { .. })
    }
}

/// Compile a script into its ordered, immutable segment list.
pub fn compile(script: &str, source: &ScriptSource) -> Vec<Segment> {
    match source {
        ScriptSource::Screenplay { characters } => {
            screenplay::compile_screenplay(script, characters)
        }
        ScriptSource::TagStream { identity } => tagstream::compile_tagstream(script, identity),
    }
}
