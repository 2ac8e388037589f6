use completion::{ChatMessage, CompletionRequest};
use domain::Comment;

/// Placed between consecutive comment texts
pub const COMMENT_SEPARATOR: &str = "\n---\n";

pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 4000;

const SYSTEM_PROMPT: &str = "You are an expert content strategist who analyzes YouTube comments \
to help creators understand their audience and generate video ideas. Always respond with valid \
JSON only - no markdown formatting, no code blocks, no extra text.";

pub fn join_comments(comments: &[Comment]) -> String {
    comments
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(COMMENT_SEPARATOR)
}

fn user_prompt(comment_block: &str, total_comments: usize) -> String {
    format!(
        r#"
Analyze the following YouTube comments and provide a comprehensive analysis. Focus on actionable insights for content creators. Identify patterns, emotions, and opportunities for follow-up content.

Comments to analyze:
{comments}

Return ONLY a valid JSON object with this exact structure (no markdown, no code blocks, no extra text):
{{
  "summary": {{
    "totalComments": {total},
    "averageSentiment": "positive/negative/neutral/mixed",
    "engagementLevel": "high/medium/low"
  }},
  "themes": [
    {{
      "name": "theme name",
      "frequency": number,
      "sentiment": "positive/negative/neutral",
      "exampleComments": ["comment1", "comment2"]
    }}
  ],
  "questions": [
    {{
      "question": "frequently asked question",
      "frequency": number,
      "examples": ["example comment"]
    }}
  ],
  "painPoints": [
    {{
      "issue": "pain point description",
      "severity": "high/medium/low",
      "frequency": number,
      "examples": ["example comment"]
    }}
  ],
  "contentRequests": [
    {{
      "topic": "requested topic",
      "demand": number,
      "examples": ["example comment"]
    }}
  ],
  "misconceptions": [
    {{
      "misconception": "common misconception",
      "clarification": "what should be clarified",
      "examples": ["example comment"]
    }}
  ],
  "videoIdeas": [
    {{
      "title": "Specific video title",
      "description": "Brief description of video content",
      "type": "FAQ/Tutorial/Deep Dive/Problem Solving/Explanation",
      "estimatedInterest": "high/medium/low",
      "reasoning": "Why this video would be valuable"
    }}
  ]
}}
"#,
        comments = comment_block,
        total = total_comments
    )
}

/// Build the two-message analysis request for a comment sample.
/// Sampling parameters are fixed.
pub fn build_request(comments: &[Comment]) -> CompletionRequest {
    let block = join_comments(comments);
    CompletionRequest {
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(user_prompt(&block, comments.len())),
        ],
        temperature: TEMPERATURE,
        max_tokens: MAX_TOKENS,
    }
}
