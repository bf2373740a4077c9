//! Exclusive playback of synthesized chat replies.
//!
//! At most one message plays at a time. Toggling the playing message stops it;
//! toggling another stops the current one before the new one starts. Playback
//! belongs to a session epoch: after a reset or restore the old clip is stopped
//! on the next toggle instead of being matched against the new transcript.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::speech::pcm::{encode_wav, PcmAudio};

/// Called once when a clip ends on its own. Never called after `stop`.
pub type FinishHook = Box<dyn FnOnce() + Send + 'static>;

/// Audio sink. `play` must not invoke `on_finished` before returning.
pub trait AudioOutput: Send + Sync {
    /// Starts `audio`. Returns the clip when the output hands audio back to the caller.
    fn play(&self, audio: &PcmAudio, on_finished: FinishHook) -> Option<AudioClip>;
    fn stop(&self);
}

pub enum SpeechCapability {
    Available(Arc<dyn AudioOutput>),
    Unavailable,
}

/// Audio for the client to play, as a ready-to-use WAV file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioClip {
    pub mime_type: String,
    /// Base64 WAV.
    pub data: String,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackView {
    pub playing_index: Option<usize>,
    pub audio: Option<AudioClip>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackTicket {
    index: usize,
    token: u64,
}

#[derive(Debug, PartialEq)]
pub enum Toggle {
    /// The requested message was playing and is now stopped.
    Stopped,
    /// Anything playing was stopped; synthesize and hand the audio to `start`.
    Start(PlaybackTicket),
}

#[derive(Debug, Default)]
struct PlaybackState {
    playing: Option<usize>,
    /// Bumped on every toggle; hooks and tickets from older tokens are ignored.
    token: u64,
    /// Session epoch `playing` refers to.
    epoch: u64,
}

pub struct PlaybackController {
    capability: SpeechCapability,
    state: Arc<Mutex<PlaybackState>>,
}

impl PlaybackController {
    pub fn new(capability: SpeechCapability) -> Self {
        Self {
            capability,
            state: Arc::new(Mutex::new(PlaybackState::default())),
        }
    }

    pub fn playing(&self) -> Option<usize> {
        lock(&self.state).playing
    }

    fn output(&self) -> Result<&Arc<dyn AudioOutput>, AppError> {
        match &self.capability {
            SpeechCapability::Available(output) => Ok(output),
            SpeechCapability::Unavailable => Err(AppError::Unavailable(
                "Speech playback is not available".to_string(),
            )),
        }
    }

    /// Toggles message `index` of the session at `epoch`.
    pub fn toggle(&self, index: usize, epoch: u64) -> Result<Toggle, AppError> {
        let output = self.output()?;
        let mut state = lock(&self.state);
        state.token += 1;

        let was_playing = state.playing.take();
        if was_playing.is_some() {
            output.stop();
        }
        if state.epoch != epoch {
            if let Some(stale) = was_playing {
                warn!(
                    "Stopped message {stale} left playing by epoch {}",
                    state.epoch
                );
            }
            state.epoch = epoch;
        } else if was_playing == Some(index) {
            debug!("Stopped playback of message {index}");
            return Ok(Toggle::Stopped);
        }

        Ok(Toggle::Start(PlaybackTicket {
            index,
            token: state.token,
        }))
    }

    /// Plays `audio` unless another toggle happened since `ticket` was issued.
    pub fn start(&self, ticket: PlaybackTicket, audio: &PcmAudio) -> Option<AudioClip> {
        let output = self.output().ok()?;
        let mut state = lock(&self.state);
        if state.token != ticket.token {
            debug!("Playback of message {} was superseded", ticket.index);
            return None;
        }
        state.playing = Some(ticket.index);

        let hook_state = self.state.clone();
        let token = ticket.token;
        let on_finished: FinishHook = Box::new(move || {
            let mut state = lock(&hook_state);
            if state.token == token {
                state.playing = None;
            }
        });
        output.play(audio, on_finished)
    }

    pub fn view(&self, audio: Option<AudioClip>) -> PlaybackView {
        PlaybackView {
            playing_index: self.playing(),
            audio,
        }
    }
}

fn lock(state: &Mutex<PlaybackState>) -> MutexGuard<'_, PlaybackState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Output for a headless server: the clip goes back to the HTTP caller as WAV
/// and a timer marks the natural end after its duration.
#[derive(Default)]
pub struct ClientRelay {
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl ClientRelay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioOutput for ClientRelay {
    fn play(&self, audio: &PcmAudio, on_finished: FinishHook) -> Option<AudioClip> {
        let duration_ms = audio.duration_ms();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(duration_ms)).await;
            on_finished();
        });
        if let Some(previous) = self
            .timer
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .replace(timer)
        {
            previous.abort();
        }

        Some(AudioClip {
            mime_type: "audio/wav".to_string(),
            data: STANDARD.encode(encode_wav(audio)),
            duration_ms,
        })
    }

    fn stop(&self) {
        if let Some(timer) = self.timer.lock().unwrap_or_else(|p| p.into_inner()).take() {
            timer.abort();
        }
    }
}
