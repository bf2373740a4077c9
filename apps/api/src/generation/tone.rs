//! Tone calibration: maps the user's chosen tone to a style guide for the asset prompt.
//!
//! The model gets the tone name plus concrete verbs and phrasing to avoid, so
//! "Academic" and "Enthusiastic" drafts differ in wording and not only in label.

use serde::{Deserialize, Serialize};

/// Writing tone for generated documents. Serialized with the browser's spelling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Professional,
    Enthusiastic,
    Academic,
    Creative,
    Confident,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Professional,
        Tone::Enthusiastic,
        Tone::Academic,
        Tone::Creative,
        Tone::Confident,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Enthusiastic => "Enthusiastic",
            Tone::Academic => "Academic",
            Tone::Creative => "Creative",
            Tone::Confident => "Confident",
        }
    }
}

/// Verb sets and register calibrated to a specific tone.
#[derive(Debug, Clone)]
pub struct ToneExamples {
    pub register: &'static str,
    pub strong_verbs: Vec<&'static str>,
    pub avoid_phrases: Vec<&'static str>,
}

/// Returns the style guide for a tone.
pub fn get_tone_examples(tone: Tone) -> ToneExamples {
    match tone {
        Tone::Professional => ToneExamples {
            register: "polished and concise; plain business English",
            strong_verbs: vec!["Delivered", "Coordinated", "Implemented", "Managed", "Improved"],
            avoid_phrases: vec!["super excited", "rockstar", "ninja", "passionate about everything"],
        },
        Tone::Enthusiastic => ToneExamples {
            register: "warm and energetic while staying specific",
            strong_verbs: vec!["Launched", "Championed", "Built", "Jumped into", "Grew"],
            avoid_phrases: vec!["to whom it may concern", "per your request", "herewith"],
        },
        Tone::Academic => ToneExamples {
            register: "precise and evidence-led; emphasise coursework, research and method",
            strong_verbs: vec!["Investigated", "Analyzed", "Evaluated", "Published", "Designed"],
            avoid_phrases: vec!["crushed it", "game-changer", "hustle"],
        },
        Tone::Creative => ToneExamples {
            register: "vivid and personal; a light narrative hook is welcome",
            strong_verbs: vec!["Crafted", "Imagined", "Designed", "Reinvented", "Storyboarded"],
            avoid_phrases: vec!["responsible for", "duties included", "various tasks"],
        },
        Tone::Confident => ToneExamples {
            register: "direct and assured; lead with outcomes",
            strong_verbs: vec!["Led", "Drove", "Owned", "Shipped", "Achieved"],
            avoid_phrases: vec!["I think", "I hope", "helped with", "tried to"],
        },
    }
}

/// One-paragraph style guide inserted into the asset prompt.
pub fn tone_guide(tone: Tone) -> String {
    let examples = get_tone_examples(tone);
    format!(
        "Tone: {} ({}). Prefer verbs like: {}. Avoid phrases like: {}.",
        tone.label(),
        examples.register,
        examples.strong_verbs.join(", "),
        examples
            .avoid_phrases
            .iter()
            .map(|p| format!("\"{p}\""))
            .collect::<Vec<_>>()
            .join(", ")
    )
}
