use crate::scoring::post_features;
use crate::Post;

#[derive(Debug, Clone)]
pub struct ImageHint {
    pub index: usize,
    pub rationale: &'static str,
}

#[derive(Debug, Clone)]
pub struct ImageAdvisor {
    rhythm: usize,
}

impl ImageAdvisor {
    pub fn new(rhythm: usize) -> Self {
        Self { rhythm: rhythm.max(1) }
    }

    pub fn advise(&self, posts: &[Post]) -> Vec<ImageHint> {
        let n = posts.len();
        let mut hints = Vec::new();

        for post in posts {
            let rationale = if post.index == 1 {
                "hook-anchor"
            } else if post.index == n {
                "cta-anchor"
            } else if is_data_heavy(&post.text) {
                "data-heavy"
            } else if post.index % self.rhythm == 0 {
                "visual-rhythm"
            } else {
                continue;
            };
            hints.push(ImageHint {
                index: post.index,
                rationale,
            });
        }

        hints
    }
}

fn is_data_heavy(text: &str) -> bool {
    let features = post_features(text);
    features.list_items > 0 || features.numerals >= 3 || features.has_colon_enumeration
}
