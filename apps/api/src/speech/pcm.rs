//! Decoding of the speech payload: base64 of raw 16-bit little-endian mono PCM at 24 kHz.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

pub const SAMPLE_RATE_HZ: u32 = 24_000;
pub const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;

#[derive(Debug, Error)]
pub enum PcmError {
    #[error("Audio payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Audio payload has an odd byte count ({0}); expected 16-bit samples")]
    OddLength(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PcmAudio {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl PcmAudio {
    pub fn duration_ms(&self) -> u64 {
        let frames = self.samples.len() as u64 / u64::from(self.channels.max(1));
        frames * 1000 / u64::from(self.sample_rate)
    }
}

pub fn decode_pcm(payload: &str) -> Result<PcmAudio, PcmError> {
    let bytes = STANDARD.decode(payload.trim())?;
    if bytes.len() % 2 != 0 {
        return Err(PcmError::OddLength(bytes.len()));
    }
    let samples = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    Ok(PcmAudio {
        samples,
        sample_rate: SAMPLE_RATE_HZ,
        channels: CHANNELS,
    })
}

/// Wraps the samples in a canonical 44-byte RIFF/WAVE header.
pub fn encode_wav(audio: &PcmAudio) -> Vec<u8> {
    let data_len = (audio.samples.len() * 2) as u32;
    let block_align = audio.channels * BITS_PER_SAMPLE / 8;
    let byte_rate = audio.sample_rate * u32::from(block_align);

    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&audio.channels.to_le_bytes());
    wav.extend_from_slice(&audio.sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    for sample in &audio.samples {
        wav.extend_from_slice(&sample.to_le_bytes());
    }
    wav
}
