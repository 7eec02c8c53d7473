//! Master-track assembly: silence generation and ordered concatenation.

/// A silence buffer of `seconds` at `sample_rate`.
pub fn silence(sample_rate: u32, seconds: f32) -> Vec<f32> {
    vec![0.0; (sample_rate as f32 * seconds) as usize]
}

/// Concatenate already-paced buffers, in emission order, into one track.
///
/// Pure concatenation: every buffer is assumed to share the orchestrator's
/// running sample rate, so no resampling or mixing happens here.
pub fn concat(buffers: &[Vec<f32>]) -> Vec<f32> {
    let total: usize = buffers.iter().map(Vec::len).sum();
    let mut master = Vec::with_capacity(total);
    for buffer in buffers {
        master.extend_from_slice(buffer);
    }
    master
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_length_scales_with_rate() {
        assert_eq!(silence(24_000, 0.4).len(), 9_600);
        assert_eq!(silence(48_000, 0.1).len(), 4_800);
        assert_eq!(silence(24_000, 0.8).len(), 19_200);
    }

    #[test]
    fn concat_preserves_order_and_length() {
        let parts = vec![vec![1.0, 2.0], vec![], vec![3.0]];
        assert_eq!(concat(&parts), vec![1.0, 2.0, 3.0]);
    }
}
