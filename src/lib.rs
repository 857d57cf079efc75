pub mod config;
pub mod decorate;
pub mod normalize;
pub mod pack;
pub mod scoring;
pub mod segment;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::EngineConfig;
use crate::scoring::{EngagementScorer, ImageAdvisor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Professional,
    Casual,
    Educational,
}

impl Tone {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "professional" | "pro" | "business" => Some(Tone::Professional),
            "casual" | "conversational" => Some(Tone::Casual),
            "educational" | "education" | "edu" => Some(Tone::Educational),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Educational => "educational",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormattingOptions {
    pub max_chars_per_post: usize,
    pub tone: Tone,
    pub include_numbering: bool,
    pub enable_hook: bool,
    pub enable_cta: bool,
    pub image_rhythm: usize,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            max_chars_per_post: 500,
            tone: Tone::Professional,
            include_numbering: true,
            enable_hook: true,
            enable_cta: true,
            image_rhythm: 3,
        }
    }
}

impl FormattingOptions {
    pub fn validate(&self, reserve_digits: usize) -> Result<(), FormatError> {
        if self.max_chars_per_post == 0 {
            return Err(FormatError::Configuration(
                "max_chars_per_post must be at least 1".to_string(),
            ));
        }
        if self.image_rhythm == 0 {
            return Err(FormatError::Configuration(
                "image_rhythm must be at least 1".to_string(),
            ));
        }
        if self.include_numbering {
            let reserved = pack::suffix_width(reserve_digits);
            if self.max_chars_per_post < reserved + 1 {
                return Err(FormatError::Configuration(format!(
                    "max_chars_per_post {} cannot hold a {}-character numbering suffix plus content",
                    self.max_chars_per_post, reserved
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Draft {
    pub raw_content: String,
    pub options: FormattingOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub index: usize,
    pub text: String,
    pub char_count: usize,
    pub has_image_suggestion: bool,
    pub image_rationale: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Threadstorm {
    pub draft_id: String,
    pub posts: Vec<Post>,
    pub total_posts: usize,
    pub total_characters: usize,
    pub engagement_score: f64,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("draft is empty after normalization")]
    EmptyContent,
    #[error("invalid formatting options: {0}")]
    Configuration(String),
    #[error("packing failed to converge after {iterations} passes")]
    PackingOverflow { iterations: usize },
}

pub fn format(draft: &Draft) -> Result<Threadstorm, FormatError> {
    let config = load_engine_config();
    format_with_config(draft, &config)
}

fn load_engine_config() -> EngineConfig {
    EngineConfig::load(None)
        .map(|(config, _)| config)
        .unwrap_or_default()
}

pub fn format_with_config(
    draft: &Draft,
    config: &EngineConfig,
) -> Result<Threadstorm, FormatError> {
    let options = &draft.options;
    options.validate(config.packer.suffix_estimate_digits)?;

    let normalized = normalize::normalize(&draft.raw_content)?;
    let segments = segment::segment(&normalized);
    let packed = pack::pack(&segments, options, &config.packer)?;
    let decorated = decorate::decorate(packed.bodies, options);

    let mut posts: Vec<Post> = decorated
        .texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| Post {
            index: i + 1,
            char_count: display_width(&text),
            text,
            has_image_suggestion: false,
            image_rationale: None,
        })
        .collect();

    let scorer = EngagementScorer::new(config.weights.clone(), config.packer.orphan_floor);
    let report = scorer.score(&posts, options);

    let advisor = ImageAdvisor::new(options.image_rhythm);
    for hint in advisor.advise(&posts) {
        let post = &mut posts[hint.index - 1];
        post.has_image_suggestion = true;
        post.image_rationale = Some(hint.rationale.to_string());
    }

    let mut suggestions = Vec::new();
    merge_suggestions(&mut suggestions, &packed.warnings);
    merge_suggestions(&mut suggestions, &decorated.notes);
    merge_suggestions(&mut suggestions, &report.suggestions);

    let total_characters = posts.iter().map(|post| post.char_count).sum();

    Ok(Threadstorm {
        draft_id: format!("draft_{:x}", stable_hash64(&normalized)),
        total_posts: posts.len(),
        total_characters,
        engagement_score: report.score,
        suggestions,
        posts,
    })
}

pub fn display_width(text: &str) -> usize {
    text.graphemes(true).count()
}

pub(crate) fn stable_hash64(value: &str) -> u64 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

pub(crate) fn merge_suggestions(base: &mut Vec<String>, extras: &[String]) {
    let mut seen: HashSet<String> = base.iter().map(|s| normalize_text(s)).collect();
    for suggestion in extras {
        let normalized = normalize_text(suggestion);
        if normalized.is_empty() || seen.contains(&normalized) {
            continue;
        }
        base.push(suggestion.clone());
        seen.insert(normalized);
    }
    if base.len() > 10 {
        base.truncate(10);
    }
}

pub(crate) fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(1.0)
}

pub(crate) fn bool_to_f64(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn normalize_text(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_number(value: f64) -> String {
    let rounded = value.round().max(0.0) as i64;
    let mut chars: Vec<char> = rounded.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
