//! WAV persistence for the master track.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use voicestage_domain::{AudioClip, RenderError};

/// Storage seam for the assembled master track.
///
/// Write failures are terminal for the request; the orchestrator never
/// leaves a partially written master behind because the concatenated
/// buffer is handed over in one call.
pub trait AudioWriter: Send {
    fn write(&mut self, path: &Path, clip: &AudioClip) -> Result<(), RenderError>;
}

/// 16-bit mono PCM WAV writer.
#[derive(Debug, Clone, Default)]
pub struct WavFileWriter;

impl AudioWriter for WavFileWriter {
    fn write(&mut self, path: &Path, clip: &AudioClip) -> Result<(), RenderError> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: clip.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec)
            .map_err(|e| RenderError::Persistence(format!("create {}: {e}", path.display())))?;
        for &sample in &clip.samples {
            // clip -1.0..=1.0, scale to i16 full range
            let value = (sample.clamp(-1.0, 1.0) * 32767.0) as i16;
            writer
                .write_sample(value)
                .map_err(|e| RenderError::Persistence(format!("write {}: {e}", path.display())))?;
        }
        writer
            .finalize()
            .map_err(|e| RenderError::Persistence(format!("finalize {}: {e}", path.display())))?;
        Ok(())
    }
}

/// `prod_<HHMMSS>.wav` inside `dir`, clocked in UTC.
pub fn timestamped_path(dir: &Path) -> PathBuf {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let (h, m, s) = ((secs / 3600) % 24, (secs / 60) % 60, secs % 60);
    dir.join(format!("prod_{h:02}{m:02}{s:02}.wav"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_a_readable_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let clip = AudioClip::new(24_000, vec![0.0, 0.5, -0.5, 1.0, -1.0]);
        WavFileWriter.write(&path, &clip).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 24_000);
        assert_eq!(reader.spec().channels, 1);
        let samples: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
        assert_eq!(samples, vec![0, 16383, -16383, 32767, -32767]);
    }

    #[test]
    fn timestamped_path_shape() {
        let path = timestamped_path(Path::new("outputs"));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("prod_") && name.ends_with(".wav"));
        assert_eq!(name.len(), "prod_HHMMSS.wav".len());
    }
}
