//! Read-aloud use case
//!
//! Orchestrates the audio pipeline for the currently selected passage:
//! lazy synthesis with payload caching, live playback with cancellation,
//! and format-specific export. The cached payload and the active
//! playback session live behind one lock, so selecting a new passage
//! invalidates both together and a concurrent export never triggers a
//! second synthesis call while one is in flight.

use std::path::PathBuf;

use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::audio::{human_readable_size, ExportArtifact, ExportFormat, PcmAudio};
use crate::domain::passage::Passage;

use super::ports::{
    ArtifactStore, AudioEncoder, AudioPlayer, EncodeError, PlaybackError, PlaybackSession,
    SaveError, SpeechSynthesizer, SynthesisError, TTS_CHANNELS, TTS_SAMPLE_RATE,
};

/// Errors from the read-aloud use case
#[derive(Debug, Error)]
pub enum ReadAloudError {
    #[error("No passage selected")]
    NoPassage,

    #[error("Speech synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("Audio payload is malformed: {0}")]
    Decode(#[from] crate::domain::audio::DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("Playback failed: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Could not save audio file: {0}")]
    Save(#[from] SaveError),

    #[error("No encoder registered for {0}")]
    UnknownFormat(ExportFormat),
}

/// Result of a play/stop toggle
pub enum PlaybackToggle {
    /// A new session started
    Started(PlaybackSession),
    /// The active session was stopped
    Stopped,
}

/// A successfully saved export
#[derive(Debug, Clone)]
pub struct SavedArtifact {
    pub format: ExportFormat,
    pub path: PathBuf,
    pub size_bytes: usize,
}

impl SavedArtifact {
    /// Human-readable file size for status output
    pub fn human_readable_size(&self) -> String {
        human_readable_size(self.size_bytes)
    }
}

/// Mutable session state: the passage, its cached payload, and the
/// active playback session. One writer at a time via the mutex.
#[derive(Default)]
struct SessionState {
    passage: Option<Passage>,
    payload: Option<String>,
    playback: Option<PlaybackSession>,
}

/// Read-aloud and export use case
pub struct ReadAloudUseCase<S, P, F>
where
    S: SpeechSynthesizer,
    P: AudioPlayer,
    F: ArtifactStore,
{
    synthesizer: S,
    player: P,
    store: F,
    encoders: Vec<Box<dyn AudioEncoder>>,
    state: Mutex<SessionState>,
}

impl<S, P, F> ReadAloudUseCase<S, P, F>
where
    S: SpeechSynthesizer,
    P: AudioPlayer,
    F: ArtifactStore,
{
    /// Create a new use case instance
    pub fn new(synthesizer: S, player: P, store: F, encoders: Vec<Box<dyn AudioEncoder>>) -> Self {
        Self {
            synthesizer,
            player,
            store,
            encoders,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Select the passage to read. Invalidates the cached payload and
    /// tears down any active playback in the same step.
    pub async fn set_passage(&self, passage: Passage) {
        let mut state = self.state.lock().await;
        if let Some(previous) = state.playback.take() {
            previous.stop();
        }
        state.payload = None;
        state.passage = Some(passage);
    }

    /// Whether a playback session is currently sounding
    pub async fn is_playing(&self) -> bool {
        let state = self.state.lock().await;
        state
            .playback
            .as_ref()
            .map(|s| s.is_active())
            .unwrap_or(false)
    }

    /// Start playback of the selected passage, synthesizing first if no
    /// payload is cached. Any previous session is stopped so at most one
    /// session is ever active.
    pub async fn play(&self) -> Result<PlaybackSession, ReadAloudError> {
        let mut state = self.state.lock().await;
        self.play_locked(&mut state).await
    }

    /// Toggle playback: stop the active session, or start a new one
    pub async fn toggle_playback(&self) -> Result<PlaybackToggle, ReadAloudError> {
        let mut state = self.state.lock().await;

        let active = state
            .playback
            .as_ref()
            .map(|s| s.is_active())
            .unwrap_or(false);
        if active {
            if let Some(session) = state.playback.take() {
                session.stop();
            }
            return Ok(PlaybackToggle::Stopped);
        }

        let session = self.play_locked(&mut state).await?;
        Ok(PlaybackToggle::Started(session))
    }

    /// Stop the active playback session, if any. Safe to call when idle.
    pub async fn stop_playback(&self) {
        let mut state = self.state.lock().await;
        if let Some(session) = state.playback.take() {
            session.stop();
        }
    }

    /// Export the selected passage's audio in the given format and save
    /// it as `<sanitized-title>_voice.<ext>`.
    pub async fn export(&self, format: ExportFormat) -> Result<SavedArtifact, ReadAloudError> {
        // Resolve passage and payload under the lock; encoding itself
        // runs outside it so exports for other formats can proceed.
        let (passage, payload) = {
            let mut state = self.state.lock().await;
            let passage = state.passage.clone().ok_or(ReadAloudError::NoPassage)?;
            let payload = self.payload_locked(&mut state, &passage).await?;
            (passage, payload)
        };

        let audio = PcmAudio::from_base64(&payload, TTS_SAMPLE_RATE, TTS_CHANNELS)?;

        let encoder = self
            .encoders
            .iter()
            .find(|e| e.format() == format)
            .ok_or(ReadAloudError::UnknownFormat(format))?;

        let data = encoder.encode(&audio).await?;
        let artifact = ExportArtifact::named(&passage.file_stem(), format, data);
        let size_bytes = artifact.size_bytes();
        let path = self.store.save(&artifact).await?;

        Ok(SavedArtifact {
            format,
            path,
            size_bytes,
        })
    }

    async fn play_locked(
        &self,
        state: &mut SessionState,
    ) -> Result<PlaybackSession, ReadAloudError> {
        // Tear down any previous session before starting a new one
        if let Some(previous) = state.playback.take() {
            previous.stop();
        }

        let passage = state.passage.clone().ok_or(ReadAloudError::NoPassage)?;
        let payload = self.payload_locked(state, &passage).await?;
        let audio = PcmAudio::from_base64(&payload, TTS_SAMPLE_RATE, TTS_CHANNELS)?;

        // On failure the session slot stays empty: back to Idle
        let session = self.player.play(audio).await?;
        state.playback = Some(session.clone());
        Ok(session)
    }

    /// Return the cached payload, synthesizing it if absent. Runs with
    /// the state lock held, which is what makes synthesis single-flight.
    async fn payload_locked(
        &self,
        state: &mut SessionState,
        passage: &Passage,
    ) -> Result<String, ReadAloudError> {
        if let Some(payload) = state.payload.as_ref() {
            return Ok(payload.clone());
        }

        let payload = self.synthesizer.synthesize(&passage.spoken_text()).await?;
        state.payload = Some(payload.clone());
        Ok(payload)
    }
}
