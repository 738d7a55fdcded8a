//! Tiny keyword lexicon for scoring market headlines.
//!
//! Counts positive and negative hits, flipping polarity when a negation
//! word appears shortly before, and normalizes into [-1.0, 1.0].

const POSITIVE: &[&str] = &[
    "bullish", "rally", "surge", "gain", "gains", "profit", "growth", "beat", "beats",
    "strong", "strength", "rebound", "recovery", "upgrade", "optimism", "record",
];

const NEGATIVE: &[&str] = &[
    "bearish", "decline", "loss", "losses", "fall", "falls", "plunge", "crash", "miss",
    "weak", "weakness", "fear", "panic", "selloff", "downgrade", "recession", "crisis",
];

const NEGATIONS: &[&str] = &["not", "no", "never", "without", "despite"];

/// Words between a negation and the word it flips.
const NEGATION_WINDOW: usize = 3;

pub fn score_text(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | '.' | '!' | '?' | ':' | '"'))
        .filter(|w| !w.is_empty())
        .collect();

    let negation_positions: Vec<usize> = words
        .iter()
        .enumerate()
        .filter(|(_, w)| NEGATIONS.contains(w))
        .map(|(i, _)| i)
        .collect();

    let mut score: i32 = 0;
    let mut hits: i32 = 0;

    for (i, word) in words.iter().enumerate() {
        let is_positive = POSITIVE.contains(word);
        let is_negative = NEGATIVE.contains(word);
        if !is_positive && !is_negative {
            continue;
        }
        hits += 1;

        let negated = negation_positions
            .iter()
            .any(|&n| n < i && i - n <= NEGATION_WINDOW);

        let polarity = if is_positive { 1 } else { -1 };
        score += if negated { -polarity } else { polarity };
    }

    if hits == 0 {
        return 0.0;
    }
    score as f64 / hits as f64
}
