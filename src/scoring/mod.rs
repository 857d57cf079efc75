pub mod engagement;
pub mod images;

pub use engagement::{EngagementReport, EngagementScorer, EngagementWeights};
pub use images::{ImageAdvisor, ImageHint};

const HOOK_WORDS: &[&str] = &[
    "how", "why", "what", "stop", "new", "secret", "tips", "guide", "learn", "thread", "facts",
    "proof", "mistakes", "warning", "lessons",
];

const SHARE_CTAS: &[&str] = &["share", "repost", "boost", "save this", "send this"];

const REPLY_CTAS: &[&str] = &[
    "thoughts", "what do you think", "agree", "disagree", "reply", "comment", "drop them",
    "let me know",
];

#[derive(Debug, Clone)]
pub struct PostFeatures {
    pub questions: usize,
    pub exclamations: usize,
    pub starts_with_number: bool,
    pub has_hook_word: bool,
    pub has_share_cta: bool,
    pub has_reply_cta: bool,
    pub numerals: usize,
    pub list_items: usize,
    pub has_colon_enumeration: bool,
}

pub fn post_features(text: &str) -> PostFeatures {
    let mut questions = 0usize;
    let mut exclamations = 0usize;
    let mut numerals = 0usize;
    let mut in_digits = false;

    for ch in text.chars() {
        match ch {
            '?' => questions += 1,
            '!' => exclamations += 1,
            _ => {}
        }
        if ch.is_ascii_digit() {
            if !in_digits {
                numerals += 1;
            }
            in_digits = true;
        } else {
            in_digits = false;
        }
    }

    let starts_with_number = text
        .chars()
        .find(|c| !c.is_whitespace())
        .map(|c| c.is_ascii_digit())
        .unwrap_or(false);

    let lowercase = text.to_lowercase();
    let has_hook_word = HOOK_WORDS.iter().any(|word| lowercase.contains(word));
    let has_share_cta = SHARE_CTAS.iter().any(|w| lowercase.contains(w));
    let has_reply_cta = REPLY_CTAS.iter().any(|w| lowercase.contains(w));

    let mut list_items = 0usize;
    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("- ")
            || trimmed.starts_with("* ")
            || trimmed.starts_with("\u{2022} ")
            || starts_with_ordinal(trimmed)
        {
            list_items += 1;
        }
    }
    list_items += inline_ordinals(text);

    let has_colon_enumeration = text
        .find(": ")
        .map(|at| text[at..].matches(", ").count() >= 2)
        .unwrap_or(false);

    PostFeatures {
        questions,
        exclamations,
        starts_with_number,
        has_hook_word,
        has_share_cta,
        has_reply_cta,
        numerals,
        list_items,
        has_colon_enumeration,
    }
}

fn starts_with_ordinal(line: &str) -> bool {
    let mut chars = line.chars();
    let mut saw_digit = false;
    while let Some(ch) = chars.next() {
        if ch.is_ascii_digit() {
            saw_digit = true;
            continue;
        }
        return saw_digit && matches!(ch, '.' | ')') && chars.next() == Some(' ');
    }
    false
}

fn inline_ordinals(text: &str) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut count = 0usize;
    let mut i = 0usize;
    while i < chars.len() {
        if chars[i].is_ascii_digit() && (i == 0 || chars[i - 1] == ' ') {
            let mut j = i;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            if j < chars.len()
                && matches!(chars[j], '.' | ')')
                && chars.get(j + 1) == Some(&' ')
                && i > 0
            {
                count += 1;
            }
            i = j;
        }
        i += 1;
    }
    count
}
