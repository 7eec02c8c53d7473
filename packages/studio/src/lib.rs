//! # Voicestage
//!
//! Screenplay-to-speech compiler and audio assembly pipeline.
//!
//! The crate turns a multi-character script into an ordered list of
//! [`Segment`](voicestage_domain::Segment)s, renders each one through an
//! external synthesis engine, applies inter-speaker pacing and interruption
//! effects, and stitches the clips into one master track while streaming a
//! live preview event per segment.
//!
//! Pipeline, leaves first: `script` (tokenizers and compilers) →
//! `instruct` (deterministic instruction strings) → `render` (the
//! orchestrator stream) → `assemble` + `audio` (master concatenation and
//! WAV persistence). The neural TTS model itself stays behind the traits
//! in `synth`.

pub mod assemble;
pub mod audio;
pub mod instruct;
pub mod render;
pub mod script;
pub mod synth;

pub use render::{RenderRequest, RenderStream, Renderer, ScriptInput};
pub use script::{ScriptSource, compile};
pub use synth::{CloneSynthesizer, SpeechSynthesizer, ToneSynthesizer};

/// Commonly used types for driving the pipeline.
pub mod prelude {
    pub use crate::audio::{AudioWriter, WavFileWriter};
    pub use crate::render::{RenderRequest, RenderStream, Renderer, ScriptInput};
    pub use crate::script::{ScriptSource, compile};
    pub use crate::synth::{CloneSynthesizer, SpeechSynthesizer, ToneSynthesizer};
    pub use voicestage_domain::{
        AudioClip, CharacterTable, CharacterVoice, Language, RenderError, RenderEvent, Segment,
    };
}
