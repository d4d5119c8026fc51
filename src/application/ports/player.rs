//! Playback port interfaces
//!
//! A playback adapter turns decoded PCM into a live, cancellable
//! session. The session moves `Idle -> Playing -> {Finished, Stopped}`
//! and never returns to `Playing`; resuming means starting a new
//! session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

use crate::domain::audio::PcmAudio;

/// Playback errors
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    #[error("No audio output device available: {0}")]
    NoOutputDevice(String),

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),
}

/// Lifecycle state of a playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Finished,
    Stopped,
}

impl PlaybackState {
    /// Whether the session has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Stopped)
    }
}

/// Port for audio playback
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Start playing the given audio.
    ///
    /// # Arguments
    /// * `audio` - The decoded PCM to render
    ///
    /// # Returns
    /// A handle for the live session, already in the `Playing` state
    async fn play(&self, audio: PcmAudio) -> Result<PlaybackSession, PlaybackError>;
}

/// Handle to a live playback session.
///
/// Cloning yields another handle to the same session; stop and state
/// are shared.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    stop_flag: Arc<AtomicBool>,
    state_rx: watch::Receiver<PlaybackState>,
}

impl PlaybackSession {
    /// Create a session handle and the driver the adapter uses to run it
    pub fn channel() -> (PlaybackSession, SessionDriver) {
        let stop_flag = Arc::new(AtomicBool::new(false));
        let (state_tx, state_rx) = watch::channel(PlaybackState::Idle);

        (
            PlaybackSession {
                stop_flag: Arc::clone(&stop_flag),
                state_rx,
            },
            SessionDriver {
                stop_flag,
                state_tx,
            },
        )
    }

    /// Request the session to stop. Idempotent; safe to call on a
    /// session that already finished or stopped.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Current session state
    pub fn state(&self) -> PlaybackState {
        *self.state_rx.borrow()
    }

    /// Whether the session is still playing
    pub fn is_active(&self) -> bool {
        self.state() == PlaybackState::Playing
    }

    /// Wait for the session to reach a terminal state. Resolves once
    /// per session, whether it completed naturally or was stopped.
    pub async fn wait(&mut self) -> PlaybackState {
        loop {
            let state = *self.state_rx.borrow_and_update();
            if state.is_terminal() {
                return state;
            }
            if self.state_rx.changed().await.is_err() {
                // Driver went away without reporting completion
                return PlaybackState::Stopped;
            }
        }
    }
}

/// Adapter-side controller for a playback session.
///
/// The adapter marks the session playing once output starts and reports
/// a terminal state exactly once; later reports are ignored.
#[derive(Debug)]
pub struct SessionDriver {
    stop_flag: Arc<AtomicBool>,
    state_tx: watch::Sender<PlaybackState>,
}

impl SessionDriver {
    /// Whether a stop has been requested through any session handle
    pub fn should_stop(&self) -> bool {
        self.stop_flag.load(Ordering::SeqCst)
    }

    /// Transition the session to `Playing`
    pub fn mark_playing(&self) {
        self.transition(PlaybackState::Playing);
    }

    /// Report natural completion
    pub fn mark_finished(&self) {
        self.transition(PlaybackState::Finished);
    }

    /// Report an explicit or error-forced stop
    pub fn mark_stopped(&self) {
        self.transition(PlaybackState::Stopped);
    }

    fn transition(&self, next: PlaybackState) {
        self.state_tx.send_if_modified(|state| {
            if state.is_terminal() {
                return false;
            }
            *state = next;
            true
        });
    }
}
