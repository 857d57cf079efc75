use crate::pack::digit_count;
use crate::{display_width, stable_hash64, FormattingOptions, Tone};

const PROFESSIONAL_HOOKS: &[&str] = &[
    "A few lessons worth sharing:",
    "Here is what the numbers actually say.",
    "Most teams get this wrong.",
];

const CASUAL_HOOKS: &[&str] = &[
    "Okay, story time.",
    "I have been thinking about this all week.",
    "Hot take incoming.",
];

const EDUCATIONAL_HOOKS: &[&str] = &[
    "Let's break this down step by step.",
    "A quick explainer:",
    "Everything you need to know, in one thread.",
];

const PROFESSIONAL_CTAS: &[&str] = &[
    "Follow for more breakdowns like this.",
    "If this was useful, share it with your team.",
];

const CASUAL_CTAS: &[&str] = &[
    "What would you have done? Reply below.",
    "Share this with someone who needs to see it.",
];

const EDUCATIONAL_CTAS: &[&str] = &[
    "Save this thread for later.",
    "Questions? Drop them in the replies.",
];

const QUESTION_OPENERS: &[&str] = &[
    "how", "why", "what", "when", "where", "who", "which", "can", "could", "should", "would",
    "do", "does", "did", "is", "are", "have", "has",
];

const IMPERATIVE_OPENERS: &[&str] = &[
    "imagine", "stop", "consider", "try", "think", "remember", "look", "listen", "forget",
    "start", "take", "read", "watch", "meet", "picture",
];

const HOOK_SKIPPED_NOTE: &str = "Hook skipped: post 1 has no room under the character limit.";
const CTA_SKIPPED_NOTE: &str =
    "Call-to-action skipped: the final post has no room under the character limit.";

#[derive(Debug, Clone)]
pub struct DecorateOutcome {
    pub texts: Vec<String>,
    pub notes: Vec<String>,
}

pub fn decorate(bodies: Vec<String>, options: &FormattingOptions) -> DecorateOutcome {
    let n = bodies.len();
    let mut texts = bodies;
    let mut notes = Vec::new();
    let fingerprint = stable_hash64(&texts.join(" "));

    if options.enable_hook && !texts.is_empty() && !opens_with_question_or_command(&texts[0]) {
        let hooks = hooks_for(options.tone);
        let hook = hooks[(fingerprint as usize) % hooks.len()];
        let widened = display_width(hook) + 2 + display_width(&texts[0]);
        if widened + exact_suffix_width(options, 1, n) <= options.max_chars_per_post {
            texts[0] = format!("{}\n\n{}", hook, texts[0]);
        } else {
            notes.push(HOOK_SKIPPED_NOTE.to_string());
        }
    }

    if options.enable_cta && !texts.is_empty() {
        let ctas = ctas_for(options.tone);
        let cta = ctas[((fingerprint >> 8) as usize) % ctas.len()];
        let last = texts.len() - 1;
        let widened = display_width(&texts[last]) + 2 + display_width(cta);
        if widened + exact_suffix_width(options, n, n) <= options.max_chars_per_post {
            texts[last] = format!("{}\n\n{}", texts[last], cta);
        } else {
            notes.push(CTA_SKIPPED_NOTE.to_string());
        }
    }

    if options.include_numbering {
        for (i, text) in texts.iter_mut().enumerate() {
            *text = format!("{} ({}/{})", text, i + 1, n);
        }
    }

    DecorateOutcome { texts, notes }
}

fn exact_suffix_width(options: &FormattingOptions, index: usize, n: usize) -> usize {
    if options.include_numbering {
        4 + digit_count(index) + digit_count(n)
    } else {
        0
    }
}

fn opens_with_question_or_command(text: &str) -> bool {
    let first_sentence: String = text
        .chars()
        .take_while(|ch| !matches!(ch, '.' | '!' | '\n'))
        .collect();
    if first_sentence.contains('?') {
        return true;
    }

    let first_word: String = text
        .split_whitespace()
        .next()
        .unwrap_or("")
        .chars()
        .filter(|ch| ch.is_alphabetic())
        .collect::<String>()
        .to_lowercase();

    QUESTION_OPENERS.contains(&first_word.as_str())
        || IMPERATIVE_OPENERS.contains(&first_word.as_str())
}

fn hooks_for(tone: Tone) -> &'static [&'static str] {
    match tone {
        Tone::Professional => PROFESSIONAL_HOOKS,
        Tone::Casual => CASUAL_HOOKS,
        Tone::Educational => EDUCATIONAL_HOOKS,
    }
}

fn ctas_for(tone: Tone) -> &'static [&'static str] {
    match tone {
        Tone::Professional => PROFESSIONAL_CTAS,
        Tone::Casual => CASUAL_CTAS,
        Tone::Educational => EDUCATIONAL_CTAS,
    }
}
