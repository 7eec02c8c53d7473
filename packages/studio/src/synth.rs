//! Synthesis-engine seams and the built-in reference engine.
//!
//! The neural model stays behind these traits: the orchestrator only ever
//! sees text + language + instruction in, waveform + sample rate out.
//! Failures surface as [`RenderError::Synthesis`] and terminate the
//! request.

use voicestage_domain::{AudioClip, Language, RenderError};

/// Black-box speech synthesis, callable once per segment.
pub trait SpeechSynthesizer: Send {
    /// Render one segment's text under the given delivery instruction.
    fn synthesize(
        &mut self,
        text: &str,
        language: Language,
        instruction: &str,
    ) -> Result<AudioClip, RenderError>;

    /// Release any device or accelerator state held by the engine.
    ///
    /// The orchestrator calls this exactly once per request, on success and
    /// on failure alike.
    fn release(&mut self) {}
}

/// Voice-cloning synthesis: a reference clip is distilled into an opaque
/// prompt once, then reused for every segment of the request.
pub trait CloneSynthesizer: SpeechSynthesizer {
    /// Engine-specific conditioning token extracted from reference audio.
    type Prompt: Send;

    /// Build the conditioning prompt from the mandatory reference clip.
    fn build_clone_prompt(&mut self, reference: &AudioClip) -> Result<Self::Prompt, RenderError>;

    /// Render one segment's text in the cloned voice.
    fn synthesize_clone(
        &mut self,
        text: &str,
        language: Language,
        instruction: &str,
        prompt: &Self::Prompt,
    ) -> Result<AudioClip, RenderError>;
}

/// Deterministic offline engine for CLI dry runs and pipeline tests.
///
/// Each instruction hashes to a fixed tone frequency, so identity lock is
/// audible: the same voice description always hums at the same pitch while
/// the emotion only changes segment length via the text.
#[derive(Debug, Clone)]
pub struct ToneSynthesizer {
    sample_rate: u32,
}

impl ToneSynthesizer {
    pub fn new() -> Self {
        Self {
            sample_rate: 24_000,
        }
    }

    /// FNV-1a over the voice-identity prefix of the instruction, mapped
    /// into a comfortable 120..=500 Hz band.
    fn frequency(instruction: &str) -> f32 {
        let identity = instruction.split("Delivery").next().unwrap_or(instruction);
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in identity.bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x100_0000_01b3);
        }
        120.0 + (hash % 380) as f32
    }
}

impl Default for ToneSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechSynthesizer for ToneSynthesizer {
    fn synthesize(
        &mut self,
        text: &str,
        _language: Language,
        instruction: &str,
    ) -> Result<AudioClip, RenderError> {
        if text.is_empty() {
            return Err(RenderError::Synthesis("empty segment text".into()));
        }
        let freq = Self::frequency(instruction);
        let seconds = (text.chars().count() as f32 * 0.05).max(0.3);
        let len = (self.sample_rate as f32 * seconds) as usize;
        let samples = (0..len)
            .map(|i| {
                let t = i as f32 / self.sample_rate as f32;
                0.2 * (std::f32::consts::TAU * freq * t).sin()
            })
            .collect();
        Ok(AudioClip::new(self.sample_rate, samples))
    }
}

impl CloneSynthesizer for ToneSynthesizer {
    type Prompt = f32;

    fn build_clone_prompt(&mut self, reference: &AudioClip) -> Result<Self::Prompt, RenderError> {
        if reference.samples.is_empty() {
            return Err(RenderError::Synthesis("empty reference audio".into()));
        }
        // Peak amplitude stands in for the cloned voice's character.
        let peak = reference
            .samples
            .iter()
            .fold(0.0f32, |acc, s| acc.max(s.abs()));
        Ok(peak.clamp(0.05, 1.0))
    }

    fn synthesize_clone(
        &mut self,
        text: &str,
        language: Language,
        instruction: &str,
        prompt: &Self::Prompt,
    ) -> Result<AudioClip, RenderError> {
        let mut clip = self.synthesize(text, language, instruction)?;
        for sample in &mut clip.samples {
            *sample *= prompt / 0.2;
        }
        Ok(clip)
    }
}
