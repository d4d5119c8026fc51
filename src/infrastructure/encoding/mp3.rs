//! MP3 encoder using LAME
//!
//! Software block encoder: samples are fed to LAME in fixed blocks of
//! 1152 (one MPEG frame granule pair), emitted chunks are collected,
//! and a final flush drains the frames LAME still buffers.

use async_trait::async_trait;
use mp3lame_encoder::{Birtate, Builder, FlushNoGap, MonoPcm, Quality};

use crate::application::ports::{AudioEncoder, EncodeError};
use crate::domain::audio::{ExportFormat, PcmAudio};

/// Samples fed to LAME per call
pub const SAMPLE_BLOCK: usize = 1152;

/// Output bitrate
const BITRATE: Birtate = Birtate::Kbps128;

/// MP3 encoder adapter
pub struct LameMp3Encoder;

impl LameMp3Encoder {
    /// Create a new LAME-backed encoder
    pub fn new() -> Self {
        Self
    }
}

impl Default for LameMp3Encoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioEncoder for LameMp3Encoder {
    fn format(&self) -> ExportFormat {
        ExportFormat::Mp3
    }

    async fn encode(&self, audio: &PcmAudio) -> Result<Vec<u8>, EncodeError> {
        let samples = audio.samples().to_vec();
        let sample_rate = audio.sample_rate();

        // LAME is CPU-bound; keep it off the async runtime
        tokio::task::spawn_blocking(move || encode_blocks(&samples, sample_rate))
            .await
            .map_err(|e| EncodeError::EncodingFailed(format!("encode task failed: {}", e)))?
    }
}

/// Feed the samples through LAME block by block and flush the tail
fn encode_blocks(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>, EncodeError> {
    let mut builder = Builder::new().ok_or_else(|| unavailable("failed to allocate context"))?;
    builder.set_num_channels(1).map_err(unavailable)?;
    builder.set_sample_rate(sample_rate).map_err(unavailable)?;
    builder.set_brate(BITRATE).map_err(unavailable)?;
    builder.set_quality(Quality::Best).map_err(unavailable)?;
    let mut encoder = builder.build().map_err(unavailable)?;

    let mut chunks: Vec<Vec<u8>> = Vec::new();

    for block in samples.chunks(SAMPLE_BLOCK) {
        let mut buf: Vec<u8> =
            Vec::with_capacity(mp3lame_encoder::max_required_buffer_size(block.len()));
        let written = encoder
            .encode(MonoPcm(block), buf.spare_capacity_mut())
            .map_err(|e| EncodeError::EncodingFailed(format!("{:?}", e)))?;
        // Safety: LAME wrote exactly `written` bytes into the spare capacity
        unsafe { buf.set_len(written) };
        if !buf.is_empty() {
            chunks.push(buf);
        }
    }

    let mut tail: Vec<u8> =
        Vec::with_capacity(mp3lame_encoder::max_required_buffer_size(SAMPLE_BLOCK));
    let written = encoder
        .flush::<FlushNoGap>(tail.spare_capacity_mut())
        .map_err(|e| EncodeError::EncodingFailed(format!("{:?}", e)))?;
    unsafe { tail.set_len(written) };
    if !tail.is_empty() {
        chunks.push(tail);
    }

    Ok(chunks.concat())
}

fn unavailable<E: std::fmt::Debug>(err: E) -> EncodeError {
    EncodeError::EncoderUnavailable {
        format: ExportFormat::Mp3,
        reason: format!("{:?}", err),
    }
}
