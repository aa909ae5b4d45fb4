// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction that keeps generated analysis tied to the supplied posts.
pub const NO_INVENTION_INSTRUCTION: &str = "\
    CRITICAL: Only include words, patterns, and characteristics that ACTUALLY \
    appear in the provided material. Do NOT invent data.";

/// Separator placed between posts when they are listed in a prompt.
pub const POST_SEPARATOR: &str = "\n---\n";
