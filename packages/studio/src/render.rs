//! Synthesis orchestrator: segments in, a finite event stream out.
//!
//! One render request walks `Idle → Parsing → (per segment: Instructing →
//! Synthesizing → Pacing) → Compiling → Saved`, with `Failed` reachable
//! from every step. The caller observes it as a non-restartable
//! [`RenderStream`]: one live-preview event per rendered segment, then
//! exactly one terminal event carrying either the master track or an error
//! status. Synthesis is strictly sequential; later segments depend on the
//! running sample rate established by earlier calls.

use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use voicestage_domain::{AudioClip, CharacterTable, Language, RenderError, RenderEvent, Segment};

use crate::assemble::{concat, silence};
use crate::audio::AudioWriter;
use crate::instruct::build_instruction;
use crate::script::{ScriptSource, compile};
use crate::synth::{CloneSynthesizer, SpeechSynthesizer};

/// Running sample rate seed, used only until the first synthesis call
/// reports a real rate.
pub const INITIAL_SAMPLE_RATE: u32 = 24_000;

/// Gap inserted on a speaker change (screenplay dialect).
const SPEAKER_GAP_SECS: f32 = 0.4;
/// Shortened gap after an interrupted line.
const INTERRUPT_GAP_SECS: f32 = 0.1;
/// Fixed gap after a `[Pause]` tag (tag-stream dialect).
const PAUSE_GAP_SECS: f32 = 0.8;
/// Trailing audio cut from an interrupted line.
const INTERRUPT_CUT_SECS: f32 = 0.15;

/// Raw script-and-identity inputs for one request.
///
/// The character table arrives as its JSON document form so that a
/// malformed table fails inside the pipeline, as an error event, rather
/// than at the call site.
#[derive(Debug, Clone)]
pub enum ScriptInput {
    /// Multi-character screenplay plus its cast table document.
    Screenplay { characters_json: String },
    /// Tag-stream document voiced by one ambient identity.
    TagStream { identity: String },
}

/// Everything one render request needs.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub script: String,
    pub input: ScriptInput,
    pub language: Language,
    /// Where the master track is persisted.
    pub output: PathBuf,
}

/// Finite, non-restartable stream of [`RenderEvent`]s.
pub struct RenderStream {
    inner: Pin<Box<dyn Stream<Item = RenderEvent> + Send>>,
}

impl RenderStream {
    fn new(inner: Pin<Box<dyn Stream<Item = RenderEvent> + Send>>) -> Self {
        Self { inner }
    }

    /// A stream that yields the single terminal error event.
    fn failed(err: RenderError) -> Self {
        Self::new(Box::pin(tokio_stream::once(RenderEvent::error(&err))))
    }
}

impl Stream for RenderStream {
    type Item = RenderEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<RenderEvent>> {
        self.inner.as_mut().poll_next(cx)
    }
}

/// Orchestrator entry point: a synthesis engine paired with a writer.
pub struct Renderer<S, W> {
    engine: S,
    writer: W,
}

impl<S, W> Renderer<S, W>
where
    S: SpeechSynthesizer + 'static,
    W: AudioWriter + 'static,
{
    pub fn new(engine: S, writer: W) -> Self {
        Self { engine, writer }
    }

    /// Render in voice-design mode.
    pub fn render(self, request: RenderRequest) -> RenderStream {
        let Self { mut engine, writer } = self;
        match prepare(&request) {
            Ok((segments, screenplay)) => drive(
                DesignCall(engine),
                writer,
                segments,
                screenplay,
                request.language,
                request.output,
            ),
            Err(err) => {
                engine.release();
                RenderStream::failed(err)
            }
        }
    }

    /// Render in clone mode: the reference clip is mandatory and is
    /// distilled into the engine's prompt before any synthesis call.
    pub fn render_clone(self, request: RenderRequest, reference: Option<AudioClip>) -> RenderStream
    where
        S: CloneSynthesizer,
    {
        let Self { mut engine, writer } = self;
        let reference = match reference {
            Some(clip) => clip,
            None => {
                engine.release();
                return RenderStream::failed(RenderError::InvalidInput(
                    "clone mode requires reference audio".into(),
                ));
            }
        };
        let (segments, screenplay) = match prepare(&request) {
            Ok(compiled) => compiled,
            Err(err) => {
                engine.release();
                return RenderStream::failed(err);
            }
        };
        let prompt = match engine.build_clone_prompt(&reference) {
            Ok(prompt) => prompt,
            Err(err) => {
                engine.release();
                return RenderStream::failed(err);
            }
        };
        drive(
            CloneCall { engine, prompt },
            writer,
            segments,
            screenplay,
            request.language,
            request.output,
        )
    }
}

/// Entry validation and compilation. Returns the segment list plus whether
/// screenplay pacing rules apply.
fn prepare(request: &RenderRequest) -> Result<(Vec<Segment>, bool), RenderError> {
    if request.script.trim().is_empty() {
        return Err(RenderError::InvalidInput("empty script".into()));
    }
    let (source, screenplay) = match &request.input {
        ScriptInput::Screenplay { characters_json } => {
            let characters = CharacterTable::from_json(characters_json)?;
            (ScriptSource::Screenplay { characters }, true)
        }
        ScriptInput::TagStream { identity } => (
            ScriptSource::TagStream {
                identity: identity.clone(),
            },
            false,
        ),
    };
    let segments = compile(&request.script, &source);
    if segments.is_empty() {
        return Err(RenderError::NoSegments);
    }
    Ok((segments, screenplay))
}

/// Mode-erased per-segment synthesis call.
trait SegmentSynth: Send {
    fn render_segment(
        &mut self,
        text: &str,
        language: Language,
        instruction: &str,
    ) -> Result<AudioClip, RenderError>;

    fn release(&mut self);
}

struct DesignCall<S>(S);

impl<S: SpeechSynthesizer> SegmentSynth for DesignCall<S> {
    fn render_segment(
        &mut self,
        text: &str,
        language: Language,
        instruction: &str,
    ) -> Result<AudioClip, RenderError> {
        self.0.synthesize(text, language, instruction)
    }

    fn release(&mut self) {
        self.0.release();
    }
}

struct CloneCall<C: CloneSynthesizer> {
    engine: C,
    prompt: C::Prompt,
}

impl<C: CloneSynthesizer> SegmentSynth for CloneCall<C> {
    fn render_segment(
        &mut self,
        text: &str,
        language: Language,
        instruction: &str,
    ) -> Result<AudioClip, RenderError> {
        self.engine
            .synthesize_clone(text, language, instruction, &self.prompt)
    }

    fn release(&mut self) {
        self.engine.release();
    }
}

/// The sequential synthesis loop, suspended between events.
fn drive<E, W>(
    mut engine: E,
    mut writer: W,
    segments: Vec<Segment>,
    screenplay: bool,
    language: Language,
    output: PathBuf,
) -> RenderStream
where
    E: SegmentSynth + 'static,
    W: AudioWriter + 'static,
{
    let stream = async_stream::stream! {
        let total = segments.len();
        let mut master: Vec<Vec<f32>> = Vec::new();
        let mut sample_rate = INITIAL_SAMPLE_RATE;
        let mut last_clip: Option<AudioClip> = None;

        for i in 0..total {
            let segment = &segments[i];

            // Pacing: silence goes into the master mix before this
            // segment, at the running sample rate.
            if i > 0 {
                let prev = &segments[i - 1];
                if screenplay {
                    if prev.speaker != segment.speaker {
                        let gap = if prev.is_interrupted {
                            INTERRUPT_GAP_SECS
                        } else {
                            SPEAKER_GAP_SECS
                        };
                        master.push(silence(sample_rate, gap));
                    }
                } else if prev.pause_after {
                    master.push(silence(sample_rate, PAUSE_GAP_SECS));
                }
            }

            let instruction = build_instruction(segment);
            tracing::debug!(
                segment = i,
                total,
                speaker = segment.speaker_label(),
                emotion = %segment.emotion,
                "synthesizing"
            );

            let clip = match engine.render_segment(&segment.text, language, &instruction) {
                Ok(clip) => clip,
                Err(err) => {
                    engine.release();
                    tracing::error!(segment = i, error = %err, "synthesis failed");
                    yield RenderEvent::error(&err);
                    return;
                }
            };

            sample_rate = clip.sample_rate;
            let mut samples = clip.samples;
            if segment.is_interrupted {
                let cut = (sample_rate as f32 * INTERRUPT_CUT_SECS) as usize;
                if samples.len() > cut {
                    samples.truncate(samples.len() - cut);
                }
            }
            master.push(samples.clone());

            let clip = AudioClip::new(sample_rate, samples);
            last_clip = Some(clip.clone());
            yield RenderEvent::preview(
                clip,
                format!("Rendering: {} | {}", segment.speaker_label(), segment.emotion),
            );
        }

        let master_clip = AudioClip::new(sample_rate, concat(&master));
        if let Err(err) = writer.write(&output, &master_clip) {
            engine.release();
            tracing::error!(error = %err, "persistence failed");
            yield RenderEvent::error(&err);
            return;
        }
        engine.release();
        tracing::info!(
            path = %output.display(),
            samples = master_clip.samples.len(),
            sample_rate,
            "master saved"
        );

        let last = last_clip.unwrap_or_else(|| AudioClip::new(sample_rate, Vec::new()));
        yield RenderEvent::finished(last, master_clip, format!("Saved: {}", output.display()));
    };
    RenderStream::new(Box::pin(stream))
}
