use unicode_segmentation::UnicodeSegmentation;

use crate::config::PackerConfig;
use crate::segment::{BoundaryRank, Segment};
use crate::{display_width, FormatError, FormattingOptions};

pub const HARD_SPLIT_MARKER: char = '\u{2026}';

const HARD_SPLIT_WARNING: &str =
    "An unbroken token longer than the post limit was split with a continuation marker.";

#[derive(Debug, Clone)]
pub struct PackOutcome {
    pub bodies: Vec<String>,
    pub warnings: Vec<String>,
    pub passes: usize,
}

pub fn suffix_width(digits: usize) -> usize {
    // " (i/n)" at its widest, when i has as many digits as n
    4 + 2 * digits
}

pub fn digit_count(n: usize) -> usize {
    let mut digits = 1;
    let mut rest = n / 10;
    while rest > 0 {
        digits += 1;
        rest /= 10;
    }
    digits
}

pub fn pack(
    segments: &[Segment],
    options: &FormattingOptions,
    config: &PackerConfig,
) -> Result<PackOutcome, FormatError> {
    let mut reserve_digits = config.suffix_estimate_digits;

    for pass in 1..=config.max_repack_passes {
        let reserved = if options.include_numbering {
            suffix_width(reserve_digits)
        } else {
            0
        };
        if reserved + 1 > options.max_chars_per_post {
            return Err(FormatError::PackingOverflow { iterations: pass });
        }
        let budget = options.max_chars_per_post - reserved;

        let mut warnings = Vec::new();
        let pieces = pack_once(segments, budget, config, &mut warnings);
        let needed = digit_count(pieces.len());

        if !options.include_numbering || needed <= reserve_digits {
            tracing::debug!(passes = pass, posts = pieces.len(), "packing converged");
            return Ok(PackOutcome {
                bodies: pieces.iter().map(|piece| render(piece)).collect(),
                warnings,
                passes: pass,
            });
        }

        reserve_digits = needed;
    }

    Err(FormatError::PackingOverflow {
        iterations: config.max_repack_passes,
    })
}

fn pack_once(
    segments: &[Segment],
    budget: usize,
    config: &PackerConfig,
    warnings: &mut Vec<String>,
) -> Vec<Vec<Segment>> {
    let mut posts: Vec<Vec<Segment>> = Vec::new();
    let mut current: Vec<Segment> = Vec::new();
    let mut current_width = 0usize;

    for seg in segments {
        if display_width(&seg.text) > budget {
            word_fill(seg, budget, &mut posts, &mut current, &mut current_width, warnings);
        } else {
            push_piece(seg.clone(), budget, &mut posts, &mut current, &mut current_width);
        }
    }
    if !current.is_empty() {
        posts.push(current);
    }

    rebalance_tail(&mut posts, budget, config.orphan_floor);
    posts
}

fn push_piece(
    piece: Segment,
    budget: usize,
    posts: &mut Vec<Vec<Segment>>,
    current: &mut Vec<Segment>,
    current_width: &mut usize,
) {
    let width = display_width(&piece.text);
    if let Some(prev) = current.last() {
        if *current_width + joiner_width(prev.boundary) + width > budget {
            posts.push(std::mem::take(current));
            *current_width = 0;
        }
    }
    let sep = match current.last() {
        Some(prev) => joiner_width(prev.boundary),
        None => 0,
    };
    *current_width += sep + width;
    current.push(piece);
}

fn word_fill(
    segment: &Segment,
    budget: usize,
    posts: &mut Vec<Vec<Segment>>,
    current: &mut Vec<Segment>,
    current_width: &mut usize,
    warnings: &mut Vec<String>,
) {
    let words: Vec<&str> = segment.text.split_whitespace().collect();
    let last = words.len().saturating_sub(1);

    for (i, word) in words.iter().enumerate() {
        let boundary = if i == last {
            segment.boundary
        } else {
            BoundaryRank::Word
        };
        if display_width(word) > budget {
            hard_split(word, boundary, budget, posts, current, current_width, warnings);
        } else {
            push_piece(
                Segment {
                    text: (*word).to_string(),
                    boundary,
                },
                budget,
                posts,
                current,
                current_width,
            );
        }
    }
}

fn hard_split(
    word: &str,
    boundary: BoundaryRank,
    budget: usize,
    posts: &mut Vec<Vec<Segment>>,
    current: &mut Vec<Segment>,
    current_width: &mut usize,
    warnings: &mut Vec<String>,
) {
    warnings.push(HARD_SPLIT_WARNING.to_string());

    let graphemes: Vec<&str> = word.graphemes(true).collect();
    let take = if budget >= 2 { budget - 1 } else { 1 };
    let mut start = 0usize;

    while graphemes.len() - start > budget {
        let end = start + take;
        let mut piece: String = graphemes[start..end].concat();
        if budget >= 2 {
            piece.push(HARD_SPLIT_MARKER);
        }
        push_piece(
            Segment {
                text: piece,
                boundary: BoundaryRank::Word,
            },
            budget,
            posts,
            current,
            current_width,
        );
        start = end;
    }

    let tail: String = graphemes[start..].concat();
    push_piece(
        Segment {
            text: tail,
            boundary,
        },
        budget,
        posts,
        current,
        current_width,
    );
}

fn rebalance_tail(posts: &mut Vec<Vec<Segment>>, budget: usize, orphan_floor: usize) {
    while posts.len() >= 2 {
        let last_idx = posts.len() - 1;
        let prev_idx = last_idx - 1;

        let last_width = piece_width(&posts[last_idx]);
        if last_width >= orphan_floor || posts[prev_idx].len() < 2 {
            return;
        }

        let candidate = match posts[prev_idx].last() {
            Some(seg) => seg.clone(),
            None => return,
        };
        let prev_new_width = piece_width(&posts[prev_idx][..posts[prev_idx].len() - 1]);
        let moved_width = display_width(&candidate.text) + joiner_width(candidate.boundary);

        if last_width + moved_width > budget || prev_new_width < orphan_floor {
            return;
        }

        posts[prev_idx].pop();
        posts[last_idx].insert(0, candidate);
    }
}

fn piece_width(piece: &[Segment]) -> usize {
    let mut width = 0usize;
    for (i, seg) in piece.iter().enumerate() {
        if i > 0 {
            width += joiner_width(piece[i - 1].boundary);
        }
        width += display_width(&seg.text);
    }
    width
}

fn joiner_width(boundary: BoundaryRank) -> usize {
    match boundary {
        BoundaryRank::Paragraph => 2,
        _ => 1,
    }
}

fn render(piece: &[Segment]) -> String {
    let mut text = String::new();
    for (i, seg) in piece.iter().enumerate() {
        if i > 0 {
            match piece[i - 1].boundary {
                BoundaryRank::Paragraph => text.push_str("\n\n"),
                _ => text.push(' '),
            }
        }
        text.push_str(&seg.text);
    }
    text
}
