//! Microphone capture behind the optional `microphone` feature.
//!
//! Without the feature every capture attempt reports
//! [`VoiceError::CaptureUnavailable`] immediately, before any device or
//! network access. With it, audio is recorded from the default input
//! device via `cpal` and trimmed against an ambient-noise calibration
//! window taken from the start of the recording.

use crate::error::VoiceError;

/// One recorded utterance as 16-bit PCM.
#[derive(Debug, Clone)]
pub struct Utterance {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

/// Capture settings for one utterance.
pub struct MicrophoneCapture {
    /// Leading seconds used to calibrate the ambient noise floor.
    calibration_secs: f32,
    /// Maximum utterance length in seconds.
    max_record_secs: f32,
}

impl MicrophoneCapture {
    pub fn new() -> Self {
        Self {
            calibration_secs: 0.5,
            max_record_secs: 8.0,
        }
    }

    /// Override the maximum recording window.
    pub fn with_max_record_secs(mut self, secs: f32) -> Self {
        self.max_record_secs = secs;
        self
    }

    /// Whether capture can be attempted at all.
    #[cfg(not(feature = "microphone"))]
    pub fn is_available(&self) -> bool {
        false
    }

    /// Record one utterance from the default input device.
    #[cfg(not(feature = "microphone"))]
    pub fn record(&self) -> Result<Utterance, VoiceError> {
        Err(VoiceError::CaptureUnavailable)
    }

    #[cfg(feature = "microphone")]
    pub fn is_available(&self) -> bool {
        use cpal::traits::HostTrait;
        cpal::default_host().default_input_device().is_some()
    }

    #[cfg(feature = "microphone")]
    pub fn record(&self) -> Result<Utterance, VoiceError> {
        use std::sync::{Arc, Mutex};
        use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

        let device = cpal::default_host()
            .default_input_device()
            .ok_or(VoiceError::CaptureUnavailable)?;
        let config = device
            .default_input_config()
            .map_err(|e| VoiceError::Capture(e.to_string()))?;
        if config.sample_format() != cpal::SampleFormat::F32 {
            return Err(VoiceError::Capture(format!(
                "unsupported sample format {:?}",
                config.sample_format()
            )));
        }
        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;

        let buffer: Arc<Mutex<Vec<f32>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buffer);
        let stream = device
            .build_input_stream(
                &config.into(),
                move |data: &[f32], _| {
                    let mut sink = sink.lock().unwrap();
                    // Fold multi-channel frames down to mono.
                    for frame in data.chunks(channels) {
                        let sum: f32 = frame.iter().sum();
                        sink.push(sum / channels as f32);
                    }
                },
                |e| tracing::warn!(error = %e, "Audio input stream error"),
                None,
            )
            .map_err(|e| VoiceError::Capture(e.to_string()))?;

        stream
            .play()
            .map_err(|e| VoiceError::Capture(e.to_string()))?;
        tracing::info!(secs = self.max_record_secs, "Listening");
        std::thread::sleep(std::time::Duration::from_secs_f32(self.max_record_secs));
        drop(stream);

        let samples = buffer.lock().unwrap().clone();
        let trimmed = trim_to_utterance(&samples, sample_rate, self.calibration_secs);
        Ok(Utterance {
            samples: to_linear16(&trimmed),
            sample_rate,
        })
    }
}

impl Default for MicrophoneCapture {
    fn default() -> Self {
        Self::new()
    }
}

/// Root-mean-square level of a sample window.
fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

/// Trim a recording to the speech it contains.
///
/// The leading `calibration_secs` establish the ambient noise floor; the
/// utterance is the span between the first and last sample clearly above
/// it. A recording with nothing above the floor trims to empty.
pub(crate) fn trim_to_utterance(
    samples: &[f32],
    sample_rate: u32,
    calibration_secs: f32,
) -> Vec<f32> {
    let calibration_len = ((sample_rate as f32 * calibration_secs) as usize).min(samples.len());
    let floor = rms(&samples[..calibration_len]);
    let threshold = (floor * 2.0).max(0.01);

    let speech = &samples[calibration_len..];
    let first = speech.iter().position(|s| s.abs() > threshold);
    let last = speech.iter().rposition(|s| s.abs() > threshold);
    match (first, last) {
        (Some(first), Some(last)) if first <= last => speech[first..=last].to_vec(),
        _ => Vec::new(),
    }
}

/// Convert float samples to 16-bit PCM, clamping out-of-range values.
pub(crate) fn to_linear16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rms_of_silence_is_zero() {
        assert_eq!(rms(&[0.0; 64]), 0.0);
        assert_eq!(rms(&[]), 0.0);
    }

    #[test]
    fn test_trim_extracts_loud_span() {
        // 1s calibration of silence at 8 samples/sec, then quiet-loud-quiet.
        let mut samples = vec![0.0f32; 8];
        samples.extend_from_slice(&[0.0, 0.0, 0.5, 0.6, 0.5, 0.0, 0.0]);
        let trimmed = trim_to_utterance(&samples, 8, 1.0);
        assert_eq!(trimmed, vec![0.5, 0.6, 0.5]);
    }

    #[test]
    fn test_trim_all_silence_is_empty() {
        let samples = vec![0.001f32; 32];
        assert!(trim_to_utterance(&samples, 16, 1.0).is_empty());
    }

    #[test]
    fn test_trim_threshold_scales_with_ambient_noise() {
        // Noisy calibration window: levels below 2x ambient are not speech.
        let mut samples = vec![0.2f32; 8];
        samples.extend_from_slice(&[0.3, 0.3, 0.9, 0.3]);
        let trimmed = trim_to_utterance(&samples, 8, 1.0);
        assert_eq!(trimmed, vec![0.9]);
    }

    #[test]
    fn test_to_linear16_scales_and_clamps() {
        let converted = to_linear16(&[0.0, 1.0, -1.0, 2.0]);
        assert_eq!(converted[0], 0);
        assert_eq!(converted[1], i16::MAX);
        assert_eq!(converted[3], i16::MAX); // clamped
        assert!(converted[2] <= -i16::MAX);
    }

    #[cfg(not(feature = "microphone"))]
    #[test]
    fn test_record_without_feature_is_unavailable() {
        let capture = MicrophoneCapture::new();
        assert!(!capture.is_available());
        let err = capture.record().unwrap_err();
        assert!(matches!(err, VoiceError::CaptureUnavailable));
    }
}
