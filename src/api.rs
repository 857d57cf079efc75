use serde::{Deserialize, Serialize};
use threadstorm::{Draft, FormattingOptions, Post, Threadstorm, Tone};

#[derive(Debug, Deserialize)]
pub struct ApiFormatRequest {
    pub content: Option<String>,
    pub request_id: Option<String>,
    pub max_chars_per_post: Option<usize>,
    pub tone: Option<String>,
    pub include_numbering: Option<bool>,
    pub enable_hook: Option<bool>,
    pub enable_cta: Option<bool>,
    pub image_rhythm: Option<usize>,
}

impl ApiFormatRequest {
    pub fn into_draft(self) -> Result<Draft, String> {
        let content = self.content.unwrap_or_default();
        if content.trim().is_empty() {
            return Err("content is required".to_string());
        }

        let mut options = FormattingOptions::default();

        if let Some(tone) = self.tone.as_deref() {
            options.tone =
                Tone::from_str(tone).ok_or_else(|| format!("invalid tone: {}", tone))?;
        }
        if let Some(value) = self.max_chars_per_post {
            options.max_chars_per_post = value;
        }
        if let Some(value) = self.include_numbering {
            options.include_numbering = value;
        }
        if let Some(value) = self.enable_hook {
            options.enable_hook = value;
        }
        if let Some(value) = self.enable_cta {
            options.enable_cta = value;
        }
        if let Some(value) = self.image_rhythm {
            options.image_rhythm = value;
        }

        Ok(Draft {
            raw_content: content,
            options,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ApiFormatResponse {
    pub request_id: String,
    pub draft_id: String,
    pub total_posts: usize,
    pub total_characters: usize,
    pub engagement_score: f64,
    pub posts: Vec<Post>,
    pub suggestions: Vec<String>,
}

impl ApiFormatResponse {
    pub fn from_threadstorm(storm: Threadstorm, request_id: String) -> Self {
        Self {
            request_id,
            draft_id: storm.draft_id,
            total_posts: storm.total_posts,
            total_characters: storm.total_characters,
            engagement_score: storm.engagement_score,
            posts: storm.posts,
            suggestions: storm.suggestions,
        }
    }
}
