use threadstorm::scoring::{EngagementScorer, EngagementWeights, ImageAdvisor};
use threadstorm::{FormattingOptions, Post};

fn make_post(index: usize, text: &str) -> Post {
    Post {
        index,
        text: text.to_string(),
        char_count: text.chars().count(),
        has_image_suggestion: false,
        image_rationale: None,
    }
}

fn filler(chars: usize) -> String {
    "lorem ipsum dolor sit amet "
        .chars()
        .cycle()
        .take(chars)
        .collect()
}

#[test]
fn tight_hooked_thread_outscores_ragged_thread() {
    let options = FormattingOptions::default();
    let scorer = EngagementScorer::new(EngagementWeights::default(), 40);

    let strong = vec![
        make_post(1, &format!("Why does this keep happening? {}", filler(440))),
        make_post(2, &filler(470)),
        make_post(3, &format!("{} What do you think? Reply below.", filler(430))),
    ];
    let weak = vec![
        make_post(1, &filler(480)),
        make_post(2, &filler(30)),
        make_post(3, &filler(12)),
    ];

    let strong_report = scorer.score(&strong, &options);
    let weak_report = scorer.score(&weak, &options);

    assert!(strong_report.score > weak_report.score);
    assert!(strong_report.score >= 0.0 && strong_report.score <= 1.0);
    assert!(weak_report.score >= 0.0 && weak_report.score <= 1.0);
}

#[test]
fn short_posts_trigger_merge_suggestions() {
    let options = FormattingOptions::default();
    let scorer = EngagementScorer::new(EngagementWeights::default(), 40);

    let posts = vec![
        make_post(1, &filler(480)),
        make_post(2, &filler(20)),
        make_post(3, &filler(460)),
    ];
    let report = scorer.score(&posts, &options);

    assert!(report
        .suggestions
        .iter()
        .any(|suggestion| suggestion.contains("Post 2 is short relative to the rest")));
}

#[test]
fn missing_hook_and_cta_are_flagged() {
    let options = FormattingOptions::default();
    let scorer = EngagementScorer::new(EngagementWeights::default(), 40);

    let posts = vec![make_post(1, &filler(400)), make_post(2, &filler(400))];
    let report = scorer.score(&posts, &options);

    assert!(report
        .suggestions
        .iter()
        .any(|suggestion| suggestion.contains("hook readers")));
    assert!(report
        .suggestions
        .iter()
        .any(|suggestion| suggestion.contains("call-to-action")));
}

#[test]
fn single_post_has_no_orphan_penalty() {
    let options = FormattingOptions::default();
    let scorer = EngagementScorer::new(EngagementWeights::default(), 40);

    let posts = vec![make_post(1, "Hi")];
    let report = scorer.score(&posts, &options);

    assert!(!report
        .suggestions
        .iter()
        .any(|suggestion| suggestion.contains("merging")));
}

#[test]
fn advisor_anchors_first_and_last_posts() {
    let advisor = ImageAdvisor::new(3);
    let posts = vec![
        make_post(1, &filler(100)),
        make_post(2, &filler(100)),
        make_post(3, &filler(100)),
        make_post(4, &filler(100)),
        make_post(5, &filler(100)),
    ];

    let hints = advisor.advise(&posts);
    let pairs: Vec<(usize, &str)> = hints.iter().map(|hint| (hint.index, hint.rationale)).collect();

    assert_eq!(pairs, vec![(1, "hook-anchor"), (3, "visual-rhythm"), (5, "cta-anchor")]);
}

#[test]
fn data_heavy_posts_win_over_rhythm() {
    let advisor = ImageAdvisor::new(3);
    let posts = vec![
        make_post(1, &filler(100)),
        make_post(2, &filler(100)),
        make_post(3, "The results: revenue grew 12 percent, costs fell 9 percent, margin hit 21 percent."),
        make_post(4, &filler(100)),
        make_post(5, &filler(100)),
    ];

    let hints = advisor.advise(&posts);
    let rationale = hints
        .iter()
        .find(|hint| hint.index == 3)
        .map(|hint| hint.rationale);

    assert_eq!(rationale, Some("data-heavy"));
}

#[test]
fn list_markers_mark_posts_data_heavy() {
    let advisor = ImageAdvisor::new(10);
    let posts = vec![
        make_post(1, &filler(100)),
        make_post(2, "Remember these steps: 1. plan carefully 2. ship early 3. listen hard"),
        make_post(3, &filler(100)),
    ];

    let hints = advisor.advise(&posts);
    let rationale = hints
        .iter()
        .find(|hint| hint.index == 2)
        .map(|hint| hint.rationale);

    assert_eq!(rationale, Some("data-heavy"));
}

#[test]
fn default_weights_sum_to_one() {
    let weights = EngagementWeights::default();
    let total =
        weights.utilization + weights.hook + weights.cta + weights.evenness + weights.orphans;

    assert!((total - 1.0).abs() < 1e-6);
}
