//! Rodio-based playback adapter
//!
//! Renders decoded PCM through the default output device. The rodio
//! stream handle is not `Send`, so a dedicated thread owns the stream
//! and drives the session: it polls for stop requests and for natural
//! completion, then reports the terminal state through the session
//! driver.

use std::time::Duration;

use async_trait::async_trait;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, Sink};
use tokio::sync::oneshot;

use crate::application::ports::{
    AudioPlayer, PlaybackError, PlaybackSession, SessionDriver,
};
use crate::domain::audio::PcmAudio;

/// How often the playback thread checks for stop/completion
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Playback adapter using rodio
pub struct RodioPlayer;

impl RodioPlayer {
    /// Create a new rodio-based player
    pub fn new() -> Self {
        Self
    }
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioPlayer for RodioPlayer {
    async fn play(&self, audio: PcmAudio) -> Result<PlaybackSession, PlaybackError> {
        let (session, driver) = PlaybackSession::channel();
        let (ready_tx, ready_rx) = oneshot::channel();

        std::thread::spawn(move || drive_playback(audio, driver, ready_tx));

        // Surface device/sink setup errors to the caller before
        // reporting a live session
        ready_rx
            .await
            .map_err(|_| PlaybackError::PlaybackFailed("playback thread exited".to_string()))??;

        Ok(session)
    }
}

/// Run one playback session to completion on the dedicated thread
fn drive_playback(
    audio: PcmAudio,
    driver: SessionDriver,
    ready_tx: oneshot::Sender<Result<(), PlaybackError>>,
) {
    let (_stream, stream_handle) = match OutputStream::try_default() {
        Ok(out) => out,
        Err(e) => {
            let _ = ready_tx.send(Err(PlaybackError::NoOutputDevice(e.to_string())));
            driver.mark_stopped();
            return;
        }
    };

    let sink = match Sink::try_new(&stream_handle) {
        Ok(sink) => sink,
        Err(e) => {
            let _ = ready_tx.send(Err(PlaybackError::PlaybackFailed(e.to_string())));
            driver.mark_stopped();
            return;
        }
    };

    let channels = audio.channels();
    let sample_rate = audio.sample_rate();
    sink.append(SamplesBuffer::new(channels, sample_rate, audio.to_f32()));

    driver.mark_playing();
    let _ = ready_tx.send(Ok(()));

    loop {
        if driver.should_stop() {
            sink.stop();
            driver.mark_stopped();
            return;
        }
        if sink.empty() {
            driver.mark_finished();
            return;
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}
