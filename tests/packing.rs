use threadstorm::config::{EngineConfig, PackerConfig};
use threadstorm::normalize::normalize;
use threadstorm::pack::pack;
use threadstorm::segment::{segment, BoundaryRank};
use threadstorm::{format_with_config, Draft, FormatError, FormattingOptions, Tone};

fn plain_options(max_chars: usize) -> FormattingOptions {
    FormattingOptions {
        max_chars_per_post: max_chars,
        tone: Tone::Professional,
        include_numbering: false,
        enable_hook: false,
        enable_cta: false,
        image_rhythm: 3,
    }
}

fn run(raw: &str, options: FormattingOptions) -> Result<threadstorm::Threadstorm, FormatError> {
    let draft = Draft {
        raw_content: raw.to_string(),
        options,
    };
    format_with_config(&draft, &EngineConfig::default())
}

#[test]
fn normalize_collapses_whitespace_and_keeps_paragraphs() {
    let normalized = normalize("  Alpha\t beta \n\n\n gamma  delta ").unwrap();

    assert_eq!(normalized, "Alpha beta\n\ngamma delta");
}

#[test]
fn normalize_strips_control_characters() {
    let normalized = normalize("one\u{0007}two three").unwrap();

    assert_eq!(normalized, "one two three");
}

#[test]
fn normalize_rejects_blank_input() {
    let err = normalize("  \n \u{0007} ").unwrap_err();

    assert!(matches!(err, FormatError::EmptyContent));
}

#[test]
fn segments_carry_layered_boundary_ranks() {
    let segments = segment("One two. Three four, five six.\n\nSeven eight.");

    let texts: Vec<&str> = segments.iter().map(|seg| seg.text.as_str()).collect();
    let ranks: Vec<BoundaryRank> = segments.iter().map(|seg| seg.boundary).collect();

    assert_eq!(
        texts,
        vec!["One two.", "Three four,", "five six.", "Seven eight."]
    );
    assert_eq!(
        ranks,
        vec![
            BoundaryRank::Sentence,
            BoundaryRank::Clause,
            BoundaryRank::Paragraph,
            BoundaryRank::Paragraph,
        ]
    );
}

#[test]
fn abbreviations_do_not_end_sentences() {
    let segments = segment("Dr. Smith arrived. He left.");

    let texts: Vec<&str> = segments.iter().map(|seg| seg.text.as_str()).collect();
    assert_eq!(texts, vec!["Dr. Smith arrived.", "He left."]);
}

#[test]
fn conjunctions_mark_clause_boundaries() {
    let segments = segment("The project started late and the budget kept growing anyway.");

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].text, "The project started late");
    assert_eq!(segments[0].boundary, BoundaryRank::Clause);
    assert_eq!(segments[1].text, "and the budget kept growing anyway.");
}

#[test]
fn boundary_ranks_are_ordered() {
    assert!(BoundaryRank::Paragraph > BoundaryRank::Sentence);
    assert!(BoundaryRank::Sentence > BoundaryRank::Clause);
    assert!(BoundaryRank::Clause > BoundaryRank::Word);
}

#[test]
fn trailing_orphan_is_rebalanced() {
    let body = format!(
        "{}. {}. {}. {}. {}.",
        "x".repeat(44),
        "y".repeat(44),
        "z".repeat(44),
        "w".repeat(44),
        "v".repeat(19)
    );
    let storm = run(&body, plain_options(100)).unwrap();

    assert_eq!(storm.total_posts, 3);
    for post in &storm.posts {
        assert!(post.char_count >= 40, "post {} is an orphan", post.index);
        assert!(post.char_count <= 100);
    }
}

#[test]
fn repack_corrects_the_suffix_estimate() {
    let body = "ab ".repeat(700);
    let options = FormattingOptions {
        include_numbering: true,
        ..plain_options(25)
    };
    let storm = run(&body, options).unwrap();

    assert!(storm.total_posts >= 100);
    for post in &storm.posts {
        assert!(post.char_count <= 25);
        assert!(post
            .text
            .ends_with(&format!("({}/{})", post.index, storm.total_posts)));
    }
}

#[test]
fn repack_runs_a_second_pass_when_the_estimate_is_low() {
    let normalized = normalize(&"ab ".repeat(700)).unwrap();
    let segments = segment(&normalized);
    let options = FormattingOptions {
        include_numbering: true,
        ..plain_options(25)
    };
    let outcome = pack(&segments, &options, &PackerConfig::default()).unwrap();

    assert_eq!(outcome.passes, 2);
    assert!(outcome.bodies.len() >= 100);
}

#[test]
fn pathological_limit_fails_with_packing_overflow() {
    let body = "a ".repeat(100);
    let options = FormattingOptions {
        include_numbering: true,
        ..plain_options(9)
    };
    let err = run(&body, options).unwrap_err();

    assert!(matches!(err, FormatError::PackingOverflow { .. }));
}

#[test]
fn zero_image_rhythm_is_rejected() {
    let options = FormattingOptions {
        image_rhythm: 0,
        ..plain_options(500)
    };
    let err = run("Some content.", options).unwrap_err();

    assert!(matches!(err, FormatError::Configuration(_)));
}

#[test]
fn paragraph_breaks_survive_inside_merged_posts() {
    let storm = run("First paragraph here.\n\nSecond paragraph here.", plain_options(500)).unwrap();

    assert_eq!(storm.total_posts, 1);
    assert_eq!(
        storm.posts[0].text,
        "First paragraph here.\n\nSecond paragraph here."
    );
}

#[test]
fn grapheme_clusters_count_as_single_characters() {
    let storm = run("caf\u{0065}\u{0301} time", plain_options(500)).unwrap();

    assert_eq!(storm.posts[0].char_count, "cafe time".chars().count());
}
