//! Export orchestration integration tests
//!
//! Exercises the read-aloud use case against mock ports: payload
//! caching, invalidation, the single-active-playback invariant, and the
//! failure scenarios for unavailable or empty-capture encoders.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::Engine;

use aloud::application::ports::{
    ArtifactStore, AudioEncoder, AudioPlayer, EncodeError, PlaybackError, PlaybackSession,
    PlaybackState, SaveError, SpeechSynthesizer, SynthesisError,
};
use aloud::application::{ReadAloudError, ReadAloudUseCase};
use aloud::domain::audio::pcm::samples_to_bytes;
use aloud::domain::audio::{ExportArtifact, ExportFormat, PcmAudio};
use aloud::domain::passage::Passage;
use aloud::infrastructure::WavEncoder;

// Mock ports

struct CountingSynthesizer {
    calls: Arc<AtomicUsize>,
    payload: String,
}

impl CountingSynthesizer {
    fn with_samples(samples: &[i16]) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let payload = base64::engine::general_purpose::STANDARD.encode(samples_to_bytes(samples));
        (
            Self {
                calls: Arc::clone(&calls),
                payload,
            },
            calls,
        )
    }
}

#[async_trait]
impl SpeechSynthesizer for CountingSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<String, SynthesisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.payload.clone())
    }
}

struct FailingSynthesizer;

#[async_trait]
impl SpeechSynthesizer for FailingSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<String, SynthesisError> {
        Err(SynthesisError::RequestFailed("connection refused".into()))
    }
}

struct StubPlayer;

#[async_trait]
impl AudioPlayer for StubPlayer {
    async fn play(&self, _audio: PcmAudio) -> Result<PlaybackSession, PlaybackError> {
        let (session, driver) = PlaybackSession::channel();
        driver.mark_playing();
        tokio::spawn(async move {
            loop {
                if driver.should_stop() {
                    driver.mark_stopped();
                    break;
                }
                tokio::time::sleep(std::time::Duration::from_millis(2)).await;
            }
        });
        Ok(session)
    }
}

struct BrokenPlayer;

#[async_trait]
impl AudioPlayer for BrokenPlayer {
    async fn play(&self, _audio: PcmAudio) -> Result<PlaybackSession, PlaybackError> {
        Err(PlaybackError::NoOutputDevice("no default device".into()))
    }
}

#[derive(Clone, Default)]
struct RecordingStore {
    saved: Arc<Mutex<Vec<ExportArtifact>>>,
}

impl RecordingStore {
    fn saved(&self) -> Vec<ExportArtifact> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtifactStore for RecordingStore {
    async fn save(&self, artifact: &ExportArtifact) -> Result<PathBuf, SaveError> {
        self.saved.lock().unwrap().push(artifact.clone());
        Ok(PathBuf::from(artifact.file_name()))
    }
}

/// Encoder that always fails with a fixed error
struct FailingEncoder {
    format: ExportFormat,
    error: EncodeError,
}

#[async_trait]
impl AudioEncoder for FailingEncoder {
    fn format(&self) -> ExportFormat {
        self.format
    }

    async fn encode(&self, _audio: &PcmAudio) -> Result<Vec<u8>, EncodeError> {
        Err(self.error.clone())
    }
}

// Scenarios

#[tokio::test]
async fn consecutive_exports_synthesize_at_most_once() {
    let (synthesizer, calls) = CountingSynthesizer::with_samples(&[1, 2, 3, 4]);
    let store = RecordingStore::default();
    let use_case = ReadAloudUseCase::new(
        synthesizer,
        StubPlayer,
        store.clone(),
        vec![Box::new(WavEncoder::new())],
    );
    use_case.set_passage(Passage::new("My Poem", "Some verses")).await;

    use_case.export(ExportFormat::Wav).await.unwrap();
    use_case.export(ExportFormat::Wav).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.saved().len(), 2);
}

#[tokio::test]
async fn switching_passage_triggers_exactly_one_new_synthesis() {
    let (synthesizer, calls) = CountingSynthesizer::with_samples(&[5, 6]);
    let store = RecordingStore::default();
    let use_case = ReadAloudUseCase::new(
        synthesizer,
        StubPlayer,
        store,
        vec![Box::new(WavEncoder::new())],
    );

    use_case.set_passage(Passage::new("First", "body")).await;
    use_case.export(ExportFormat::Wav).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    use_case.set_passage(Passage::new("Second", "body")).await;
    use_case.export(ExportFormat::Wav).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn wav_export_of_two_seconds_is_96044_bytes() {
    let (synthesizer, _calls) = CountingSynthesizer::with_samples(&vec![0i16; 48_000]);
    let store = RecordingStore::default();
    let use_case = ReadAloudUseCase::new(
        synthesizer,
        StubPlayer,
        store.clone(),
        vec![Box::new(WavEncoder::new())],
    );
    use_case.set_passage(Passage::new("Long Poem", "text")).await;

    let saved = use_case.export(ExportFormat::Wav).await.unwrap();

    assert_eq!(saved.size_bytes, 96_044);
    let artifacts = store.saved();
    let data = artifacts[0].data();
    let riff_size = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    assert_eq!(riff_size, 96_036);
}

#[tokio::test]
async fn empty_payload_still_exports_a_valid_wav() {
    let (synthesizer, _calls) = CountingSynthesizer::with_samples(&[]);
    let store = RecordingStore::default();
    let use_case = ReadAloudUseCase::new(
        synthesizer,
        StubPlayer,
        store.clone(),
        vec![Box::new(WavEncoder::new())],
    );
    use_case.set_passage(Passage::new("Silence", "")).await;

    let saved = use_case.export(ExportFormat::Wav).await.unwrap();

    assert_eq!(saved.size_bytes, 44);
    let artifacts = store.saved();
    let data = artifacts[0].data();
    let data_size = u32::from_le_bytes([data[40], data[41], data[42], data[43]]);
    assert_eq!(data_size, 0);
}

#[tokio::test]
async fn export_file_name_collapses_whitespace() {
    let (synthesizer, _calls) = CountingSynthesizer::with_samples(&[1, 2]);
    let store = RecordingStore::default();
    let use_case = ReadAloudUseCase::new(
        synthesizer,
        StubPlayer,
        store.clone(),
        vec![Box::new(WavEncoder::new())],
    );
    use_case
        .set_passage(Passage::new("A  Winter   Night", "text"))
        .await;

    use_case.export(ExportFormat::Wav).await.unwrap();

    assert_eq!(store.saved()[0].file_name(), "A_Winter_Night_voice.wav");
}

#[tokio::test]
async fn unavailable_mp3_encoder_reports_without_saving() {
    let (synthesizer, _calls) = CountingSynthesizer::with_samples(&[1, 2]);
    let store = RecordingStore::default();
    let use_case = ReadAloudUseCase::new(
        synthesizer,
        StubPlayer,
        store.clone(),
        vec![Box::new(FailingEncoder {
            format: ExportFormat::Mp3,
            error: EncodeError::EncoderUnavailable {
                format: ExportFormat::Mp3,
                reason: "library failed to load".into(),
            },
        })],
    );
    use_case.set_passage(Passage::new("Poem", "text")).await;

    let result = use_case.export(ExportFormat::Mp3).await;

    assert!(matches!(
        result,
        Err(ReadAloudError::Encode(
            EncodeError::EncoderUnavailable { .. }
        ))
    ));
    assert!(store.saved().is_empty());
}

#[tokio::test]
async fn empty_aac_capture_reports_without_saving() {
    let (synthesizer, _calls) = CountingSynthesizer::with_samples(&[1, 2]);
    let store = RecordingStore::default();
    let use_case = ReadAloudUseCase::new(
        synthesizer,
        StubPlayer,
        store.clone(),
        vec![Box::new(FailingEncoder {
            format: ExportFormat::M4a,
            error: EncodeError::EmptyRecording,
        })],
    );
    use_case.set_passage(Passage::new("Poem", "text")).await;

    let result = use_case.export(ExportFormat::M4a).await;

    assert!(matches!(
        result,
        Err(ReadAloudError::Encode(EncodeError::EmptyRecording))
    ));
    assert!(store.saved().is_empty());
}

#[tokio::test]
async fn synthesis_failure_aborts_before_encoding() {
    let store = RecordingStore::default();
    let use_case = ReadAloudUseCase::new(
        FailingSynthesizer,
        StubPlayer,
        store.clone(),
        vec![Box::new(WavEncoder::new())],
    );
    use_case.set_passage(Passage::new("Poem", "text")).await;

    let result = use_case.export(ExportFormat::Wav).await;

    assert!(matches!(result, Err(ReadAloudError::Synthesis(_))));
    assert!(store.saved().is_empty());
}

#[tokio::test]
async fn second_playback_leaves_exactly_one_active_session() {
    let (synthesizer, _calls) = CountingSynthesizer::with_samples(&[1, 2]);
    let use_case = ReadAloudUseCase::new(
        synthesizer,
        StubPlayer,
        RecordingStore::default(),
        vec![Box::new(WavEncoder::new())],
    );
    use_case.set_passage(Passage::new("Poem", "text")).await;

    let mut first = use_case.play().await.unwrap();
    let second = use_case.play().await.unwrap();

    assert_eq!(first.wait().await, PlaybackState::Stopped);
    assert!(second.is_active());
    assert!(use_case.is_playing().await);

    use_case.stop_playback().await;
    assert!(!use_case.is_playing().await);
}

#[tokio::test]
async fn playback_failure_returns_to_idle() {
    let (synthesizer, _calls) = CountingSynthesizer::with_samples(&[1, 2]);
    let use_case = ReadAloudUseCase::new(
        synthesizer,
        BrokenPlayer,
        RecordingStore::default(),
        vec![Box::new(WavEncoder::new())],
    );
    use_case.set_passage(Passage::new("Poem", "text")).await;

    let result = use_case.play().await;

    assert!(matches!(result, Err(ReadAloudError::Playback(_))));
    assert!(!use_case.is_playing().await);
}

#[tokio::test]
async fn selecting_new_passage_stops_active_playback() {
    let (synthesizer, _calls) = CountingSynthesizer::with_samples(&[1, 2]);
    let use_case = ReadAloudUseCase::new(
        synthesizer,
        StubPlayer,
        RecordingStore::default(),
        vec![Box::new(WavEncoder::new())],
    );
    use_case.set_passage(Passage::new("First", "text")).await;

    let mut session = use_case.play().await.unwrap();
    use_case.set_passage(Passage::new("Second", "text")).await;

    assert_eq!(session.wait().await, PlaybackState::Stopped);
    assert!(!use_case.is_playing().await);
}

#[tokio::test]
async fn concurrent_exports_share_one_synthesis_call() {
    let (synthesizer, calls) = CountingSynthesizer::with_samples(&[1, 2, 3, 4]);
    let store = RecordingStore::default();
    let use_case = Arc::new(ReadAloudUseCase::new(
        synthesizer,
        StubPlayer,
        store,
        vec![Box::new(WavEncoder::new())],
    ));
    use_case.set_passage(Passage::new("Poem", "text")).await;

    let a = {
        let uc = Arc::clone(&use_case);
        tokio::spawn(async move { uc.export(ExportFormat::Wav).await })
    };
    let b = {
        let uc = Arc::clone(&use_case);
        tokio::spawn(async move { uc.export(ExportFormat::Wav).await })
    };

    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
