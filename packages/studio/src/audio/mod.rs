//! Audio persistence collaborators.

pub mod wav;

pub use wav::{AudioWriter, WavFileWriter, timestamped_path};
