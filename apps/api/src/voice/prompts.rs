// Voice extraction LLM prompt templates.

pub const VOICE_EXTRACTION_SYSTEM: &str = "\
You are a writing-style analyst for social media creators. \
You describe how an author actually writes, using only evidence from their posts. \
You MUST respond with valid JSON only. No markdown fences or explanations.";

pub const VOICE_EXTRACTION_PROMPT: &str = r#"Analyze the EXACT writing style from these actual posts.

{no_invention}

Analyze and return ONLY this JSON:
{
  "commonWords": [list of 10 words that actually appear most],
  "sentenceStarts": [list of how sentences actually begin],
  "toneKeywords": [list of 5-8 words describing actual tone],
  "ctaPatterns": [list of actual calls-to-action used],
  "formalityScore": 1-10,
  "avgPostLength": number
}

ACTUAL POSTS TO ANALYZE:
{posts}

Return ONLY valid JSON. No explanation."#;
