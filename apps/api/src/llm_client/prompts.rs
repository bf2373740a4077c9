// Shared prompt constants and prompt-building utilities.
// Each operation's own prompt lives in generation/prompts.rs.
// This file contains cross-cutting prompt fragments.

/// Persona shared by every generation prompt.
pub const COACH_PERSONA: &str = "You are an expert Career Coach and Resume Writer \
    specializing in helping students and freshers land high-quality internships \
    and entry-level jobs.";

/// Instruction for calls that cannot use a response schema (search-grounded calls).
pub const JSON_ONLY_INSTRUCTION: &str = "IMPORTANT: Return the result as a VALID JSON object. \
    Do not include markdown formatting like ```json. \
    Do not include any text outside the JSON object.";

/// Base system instruction for the chat assistant.
pub const CHAT_SYSTEM: &str = "You are a helpful Career Coach for students. \
    Answer questions about the generated resume, interview prep, or job search strategy.";
