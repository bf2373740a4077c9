// Speech capabilities: PCM decoding, exclusive reply playback, and dictation.
// Both capabilities are injected as Available/Unavailable; nothing here probes
// the environment.

pub mod dictation;
pub mod handlers;
pub mod pcm;
pub mod playback;
