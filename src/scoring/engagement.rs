use serde::{Deserialize, Serialize};

use crate::scoring::post_features;
use crate::{bool_to_f64, clamp01, FormattingOptions, Post};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementWeights {
    pub utilization: f64,
    pub hook: f64,
    pub cta: f64,
    pub evenness: f64,
    pub orphans: f64,
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self {
            utilization: 0.35,
            hook: 0.20,
            cta: 0.15,
            evenness: 0.15,
            orphans: 0.15,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngagementReport {
    pub score: f64,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EngagementScorer {
    weights: EngagementWeights,
    orphan_floor: usize,
}

impl EngagementScorer {
    pub fn new(weights: EngagementWeights, orphan_floor: usize) -> Self {
        Self {
            weights,
            orphan_floor,
        }
    }

    pub fn score(&self, posts: &[Post], options: &FormattingOptions) -> EngagementReport {
        if posts.is_empty() {
            return EngagementReport {
                score: 0.0,
                suggestions: Vec::new(),
            };
        }

        let n = posts.len();
        let max = options.max_chars_per_post as f64;
        let widths: Vec<f64> = posts.iter().map(|post| post.char_count as f64).collect();

        let utilization = clamp01(mean(&widths) / max);

        let first = post_features(&posts[0].text);
        let hook_signal = clamp01(
            0.35 * bool_to_f64(first.questions > 0)
                + 0.2 * bool_to_f64(first.exclamations > 0)
                + 0.25 * bool_to_f64(first.starts_with_number)
                + 0.2 * bool_to_f64(first.has_hook_word),
        );

        let last = post_features(&posts[n - 1].text);
        let cta_signal = clamp01(
            0.6 * bool_to_f64(last.has_share_cta)
                + 0.6 * bool_to_f64(last.has_reply_cta)
                + 0.2 * bool_to_f64(last.questions > 0),
        );

        let evenness = if n > 1 {
            let avg = mean(&widths);
            if avg <= 0.0 {
                0.0
            } else {
                1.0 - clamp01(stddev(&widths) / avg)
            }
        } else {
            1.0
        };

        let orphan_count = if n > 1 {
            widths
                .iter()
                .filter(|width| **width < self.orphan_floor as f64)
                .count()
        } else {
            0
        };
        let orphan_signal = 1.0 - clamp01(orphan_count as f64 / n as f64);

        let score = clamp01(
            self.weights.utilization * utilization
                + self.weights.hook * hook_signal
                + self.weights.cta * cta_signal
                + self.weights.evenness * evenness
                + self.weights.orphans * orphan_signal,
        );

        let mut suggestions = Vec::new();

        if n > 1 {
            let avg = mean(&widths);
            for post in posts {
                if (post.char_count as f64) < self.orphan_floor as f64
                    && (post.char_count as f64) < 0.5 * avg
                {
                    let neighbor = if post.index == n { n - 1 } else { post.index + 1 };
                    suggestions.push(format!(
                        "Post {} is short relative to the rest; consider merging it with post {}.",
                        post.index, neighbor
                    ));
                }
            }
        }
        if utilization < 0.55 && n > 1 {
            suggestions.push(format!(
                "Posts sit well under the {}-character limit; tighter packing would shorten the thread.",
                options.max_chars_per_post
            ));
        }
        if hook_signal < 0.35 {
            suggestions.push(
                "Open post 1 with a question, a number, or a bold claim to hook readers."
                    .to_string(),
            );
        }
        if cta_signal < 0.5 {
            suggestions.push(
                "Close the last post with a call-to-action to invite replies or shares."
                    .to_string(),
            );
        }
        if evenness < 0.6 && n > 2 {
            suggestions.push(
                "Post lengths vary widely; more even pacing keeps readers moving.".to_string(),
            );
        }

        EngagementReport { score, suggestions }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn stddev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values
        .iter()
        .map(|value| {
            let diff = value - avg;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}
