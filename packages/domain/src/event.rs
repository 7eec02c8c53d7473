//! Render progress events — the pipeline's entire observable surface.

/// A mono waveform plus the rate it was synthesized at.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    /// Samples per second reported by the synthesis collaborator.
    pub sample_rate: u32,
    /// 32-bit float samples, -1.0..=1.0.
    pub samples: Vec<f32>,
}

impl AudioClip {
    pub fn new(sample_rate: u32, samples: Vec<f32>) -> Self {
        Self {
            sample_rate,
            samples,
        }
    }

    /// Clip duration in seconds.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// One progress event from the synthesis orchestrator.
///
/// The stream yields one `live`-only event per rendered segment, then
/// exactly one terminal event: either a success carrying the concatenated
/// `master` track, or an error with both audio slots empty. The stream is
/// finite and non-restartable.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderEvent {
    /// The segment waveform just produced, if any.
    pub live: Option<AudioClip>,
    /// The full master track; populated only on the terminal success event.
    pub master: Option<AudioClip>,
    /// Human-readable progress, success, or error text.
    pub status: String,
}

impl RenderEvent {
    /// Per-segment preview event.
    pub fn preview(clip: AudioClip, status: impl Into<String>) -> Self {
        Self {
            live: Some(clip),
            master: None,
            status: status.into(),
        }
    }

    /// Terminal success event.
    pub fn finished(last: AudioClip, master: AudioClip, status: impl Into<String>) -> Self {
        Self {
            live: Some(last),
            master: Some(master),
            status: status.into(),
        }
    }

    /// Terminal failure event.
    pub fn error(err: &crate::RenderError) -> Self {
        Self {
            live: None,
            master: None,
            status: format!("Error: {err}"),
        }
    }

    /// True for either terminal shape.
    pub fn is_terminal(&self) -> bool {
        self.master.is_some() || self.live.is_none()
    }
}
