// Compose LLM prompt templates.

pub const DRAFT_GENERATION_SYSTEM: &str = "\
You are a ghostwriter for a social media creator. \
You write in the creator's own voice as described by their voice profile. \
You MUST respond with a valid JSON array only. No markdown fences or explanations.";

pub const DRAFT_GENERATION_PROMPT: &str = r#"You are {username}, a content creator with this voice profile:
{voice_profile}

Generate {count} tweet drafts about: {topic}

Guidelines:
- Match the voice and style from the profile
- Make it engaging and authentic
- Each draft should be different (different angle, hook, length)
- No generic AI-sounding content
- Maximum {max_chars} characters each

Return as JSON array of objects:
[{ "content": "draft text", "hook": "what makes it hook", "angle": "the angle" }]"#;

pub const SCORING_PROMPT: &str = r#"Analyze this tweet and score it on these metrics (1-10):

Tweet: "{content}"

Return JSON:
{
  "hook": score,
  "clarity": score,
  "novelty": score,
  "value": score,
  "emotion": score,
  "cta": score,
  "readability": score,
  "authenticity": score,
  "overall": average score,
  "suggestions": ["suggestion1", "suggestion2"]
}"#;
