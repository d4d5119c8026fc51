//! AAC capture encoder with M4A muxing
//!
//! Capture-style pipeline: a producer task streams the PCM through the
//! FDK AAC encoder and emits encoded frames over a channel; the
//! consumer collects frames until the stream ends, with a deadline of
//! the audio's real duration plus a safety margin as the backstop. The
//! margin is also fed through the encoder as trailing silence so the
//! codec delay cannot clip the end of the audio. Collected frames are
//! muxed into an M4A container.
//!
//! Codec support is probed before any capture starts; a capture that
//! yields no frames reports an empty recording.

use std::io::Cursor;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use fdk_aac::enc as aac;
use mp4::{
    AacConfig, AudioObjectType, ChannelConfig, MediaConfig, Mp4Config, Mp4Sample, Mp4Writer,
    SampleFreqIndex, TrackConfig, TrackType,
};
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::application::ports::{AudioEncoder, EncodeError};
use crate::domain::audio::{ExportFormat, PcmAudio};

/// AAC-LC frame granule, in samples per channel
const FRAME_SAMPLES: usize = 1024;

/// Slack added to the capture deadline and appended to the input as
/// silence. Keeps scheduling jitter and encoder delay from truncating
/// the tail of the audio.
pub const CAPTURE_MARGIN: Duration = Duration::from_millis(100);

/// Output bitrate
const BITRATE: u32 = 128_000;

/// AAC/M4A capture encoder adapter
pub struct AacCaptureEncoder;

impl AacCaptureEncoder {
    /// Create a new AAC capture encoder
    pub fn new() -> Self {
        Self
    }

    /// Map a sample rate onto the MPEG-4 frequency index table.
    /// Rates outside the table cannot be represented in the container.
    fn freq_index(sample_rate: u32) -> Result<SampleFreqIndex, EncodeError> {
        match sample_rate {
            96_000 => Ok(SampleFreqIndex::Freq96000),
            88_200 => Ok(SampleFreqIndex::Freq88200),
            64_000 => Ok(SampleFreqIndex::Freq64000),
            48_000 => Ok(SampleFreqIndex::Freq48000),
            44_100 => Ok(SampleFreqIndex::Freq44100),
            32_000 => Ok(SampleFreqIndex::Freq32000),
            24_000 => Ok(SampleFreqIndex::Freq24000),
            22_050 => Ok(SampleFreqIndex::Freq22050),
            16_000 => Ok(SampleFreqIndex::Freq16000),
            12_000 => Ok(SampleFreqIndex::Freq12000),
            11_025 => Ok(SampleFreqIndex::Freq11025),
            8_000 => Ok(SampleFreqIndex::Freq8000),
            other => Err(EncodeError::UnsupportedFormat {
                format: ExportFormat::M4a,
                reason: format!("sample rate {} Hz has no MPEG-4 frequency index", other),
            }),
        }
    }

    /// Construct an FDK encoder for the given stream parameters
    fn new_encoder(sample_rate: u32, channels: u16) -> Result<aac::Encoder, EncodeError> {
        let channel_mode = match channels {
            1 => aac::ChannelMode::Mono,
            2 => aac::ChannelMode::Stereo,
            other => {
                return Err(EncodeError::UnsupportedFormat {
                    format: ExportFormat::M4a,
                    reason: format!("{} channels not supported", other),
                })
            }
        };

        aac::Encoder::new(aac::EncoderParams {
            bit_rate: aac::BitRate::Cbr(BITRATE),
            sample_rate,
            transport: aac::Transport::Raw,
            channels: channel_mode,
        })
        .map_err(|e| EncodeError::UnsupportedFormat {
            format: ExportFormat::M4a,
            reason: format!("{:?}", e),
        })
    }
}

impl Default for AacCaptureEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioEncoder for AacCaptureEncoder {
    fn format(&self) -> ExportFormat {
        ExportFormat::M4a
    }

    async fn encode(&self, audio: &PcmAudio) -> Result<Vec<u8>, EncodeError> {
        let sample_rate = audio.sample_rate();
        let channels = audio.channels();

        // Probe codec support before starting any capture
        let freq_index = Self::freq_index(sample_rate)?;
        Self::new_encoder(sample_rate, channels).map(drop)?;

        let deadline = audio.duration() + CAPTURE_MARGIN;

        let mut samples = audio.samples().to_vec();
        if !samples.is_empty() {
            // Trailing margin of silence pushes the real tail through
            // the encoder delay
            let margin_samples =
                (CAPTURE_MARGIN.as_secs_f64() * sample_rate as f64) as usize * channels as usize;
            samples.extend(std::iter::repeat(0i16).take(margin_samples));
        }

        let (tx, mut rx) = mpsc::unbounded_channel::<Vec<u8>>();
        let producer =
            tokio::task::spawn_blocking(move || capture_frames(sample_rate, channels, &samples, tx));

        // Collect until the stream ends; the deadline is the safety net
        let mut frames: Vec<Vec<u8>> = Vec::new();
        let drained = timeout(deadline, async {
            while let Some(frame) = rx.recv().await {
                frames.push(frame);
            }
        })
        .await;

        if drained.is_err() {
            // Deadline fired first: close the stream so the producer
            // winds down instead of capturing past the cut
            rx.close();
        }

        // Join the producer on every exit path so no capture session
        // outlives the export
        producer
            .await
            .map_err(|e| EncodeError::EncodingFailed(format!("capture task failed: {}", e)))??;

        if frames.is_empty() {
            return Err(EncodeError::EmptyRecording);
        }

        mux_m4a(&frames, sample_rate, freq_index, channels)
    }
}

/// Producer side of the capture: run the PCM through the encoder and
/// emit each encoded frame. Returns early when the consumer hangs up.
fn capture_frames(
    sample_rate: u32,
    channels: u16,
    samples: &[i16],
    tx: mpsc::UnboundedSender<Vec<u8>>,
) -> Result<(), EncodeError> {
    let mut encoder = AacCaptureEncoder::new_encoder(sample_rate, channels)?;
    let mut out = vec![0u8; 8192];

    let frame_len = FRAME_SAMPLES * channels as usize;
    for chunk in samples.chunks(frame_len) {
        let mut fed = 0;
        while fed < chunk.len() {
            let info = encoder
                .encode(&chunk[fed..], &mut out)
                .map_err(|e| EncodeError::EncodingFailed(format!("{:?}", e)))?;

            if info.input_consumed == 0 && info.output_size == 0 {
                // Encoder made no progress; buffered waiting for more input
                break;
            }
            fed += info.input_consumed;

            if info.output_size > 0 && tx.send(out[..info.output_size].to_vec()).is_err() {
                // Consumer hit the deadline and hung up
                return Ok(());
            }
        }
    }

    Ok(())
}

/// Wrap raw AAC frames in an M4A container
fn mux_m4a(
    frames: &[Vec<u8>],
    sample_rate: u32,
    freq_index: SampleFreqIndex,
    channels: u16,
) -> Result<Vec<u8>, EncodeError> {
    let chan_conf = match channels {
        1 => ChannelConfig::Mono,
        _ => ChannelConfig::Stereo,
    };

    let config = Mp4Config {
        major_brand: str::parse("M4A ").map_err(mux_err)?,
        minor_version: 512,
        compatible_brands: vec![
            str::parse("isom").map_err(mux_err)?,
            str::parse("M4A ").map_err(mux_err)?,
        ],
        timescale: 1000,
    };

    let mut writer = Mp4Writer::write_start(Cursor::new(Vec::new()), &config).map_err(mux_err)?;

    writer
        .add_track(&TrackConfig {
            track_type: TrackType::Audio,
            timescale: sample_rate,
            language: "und".to_string(),
            media_conf: MediaConfig::AacConfig(AacConfig {
                bitrate: BITRATE,
                profile: AudioObjectType::AacLowComplexity,
                freq_index,
                chan_conf,
            }),
        })
        .map_err(mux_err)?;

    let mut start_time = 0u64;
    for frame in frames {
        writer
            .write_sample(
                1,
                &Mp4Sample {
                    start_time,
                    duration: FRAME_SAMPLES as u32,
                    rendering_offset: 0,
                    is_sync: true,
                    bytes: Bytes::copy_from_slice(frame),
                },
            )
            .map_err(mux_err)?;
        start_time += FRAME_SAMPLES as u64;
    }

    writer.write_end().map_err(mux_err)?;
    Ok(writer.into_writer().into_inner())
}

fn mux_err<E: std::fmt::Debug>(err: E) -> EncodeError {
    EncodeError::EncodingFailed(format!("{:?}", err))
}
