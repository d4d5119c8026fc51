//! Export encoder adapters, one per format

pub mod aac;
pub mod mp3;
pub mod wav;

pub use aac::AacCaptureEncoder;
pub use mp3::LameMp3Encoder;
pub use wav::WavEncoder;

use crate::application::ports::AudioEncoder;

/// The full encoder set, one per export format
pub fn default_encoders() -> Vec<Box<dyn AudioEncoder>> {
    vec![
        Box::new(WavEncoder::new()),
        Box::new(LameMp3Encoder::new()),
        Box::new(AacCaptureEncoder::new()),
    ]
}
