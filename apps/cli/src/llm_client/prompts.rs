// Shared prompt fragments. Each stage that calls the LLM keeps its own
// prompts.rs alongside it; only cross-cutting text lives here.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to every prompt that rewrites the user's own material.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Use ONLY facts present in the candidate data provided. \
    Do NOT invent skills, employers, titles, dates, metrics or achievements. \
    If the candidate data does not support a claim, leave it out.";

/// Keeps rewritten text sounding like a person wrote it.
pub const VOICE_INSTRUCTION: &str = "\
    Write naturally, the way a thoughtful candidate would. \
    Avoid buzzword stacking and corporate jargon.";
