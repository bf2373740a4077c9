//! Text-to-speech: returns the provider's base64 PCM payload untouched.
//! Decoding lives in `speech::pcm`.

use crate::generation::ModelError;
use crate::llm_client::wire::{Part, SpeechConfig};
use crate::llm_client::{Content, GeminiClient, GenerateContentRequest, GenerationConfig};

pub const TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";
const VOICE_NAME: &str = "Kore";

pub async fn synthesize_speech(llm: &GeminiClient, text: &str) -> Result<String, ModelError> {
    let request = GenerateContentRequest {
        contents: vec![Content {
            role: None,
            parts: vec![Part::text(text)],
        }],
        generation_config: Some(GenerationConfig {
            response_modalities: Some(vec!["AUDIO".to_string()]),
            speech_config: Some(SpeechConfig::prebuilt(VOICE_NAME)),
            ..Default::default()
        }),
        ..Default::default()
    };

    let response = llm.call(TTS_MODEL, &request).await?;
    response
        .inline_data()
        .map(str::to_string)
        .ok_or(ModelError::NoAudio)
}
