//! Headline lexicon scoring.
//!
//! Entries are stems: `upgrade` also matches "upgrades", "upgraded" and
//! "upgrading". A negator flips every sentiment term in the next
//! [`NEGATION_REACH`] tokens.

/// Stem and weight; strong moves count double
pub type Lexicon = &'static [(&'static str, i32)];

pub const NEWS_LEXICON: Lexicon = &[
    // Price action
    ("soar", 2),
    ("surge", 1),
    ("rally", 1),
    ("jump", 1),
    ("climb", 1),
    ("rebound", 1),
    ("gain", 1),
    ("rise", 1),
    ("plunge", -2),
    ("tumble", -1),
    ("slump", -1),
    ("slide", -1),
    ("sink", -1),
    ("drop", -1),
    ("fall", -1),
    ("fell", -1),
    ("decline", -1),
    // Results and guidance
    ("beat", 1),
    ("exceed", 1),
    ("record", 1),
    ("profit", 1),
    ("growth", 1),
    ("strong", 1),
    ("raise", 1),
    ("boost", 1),
    ("miss", -1),
    ("loss", -1),
    ("weak", -1),
    ("cut", -1),
    ("warn", -1),
    // Analyst calls
    ("upgrade", 1),
    ("outperform", 1),
    ("bullish", 1),
    ("downgrade", -1),
    ("underperform", -1),
    ("bearish", -1),
    // Corporate events
    ("buyback", 1),
    ("dividend", 1),
    ("expand", 1),
    ("layoff", -1),
    ("lawsuit", -1),
    ("subpoena", -1),
    ("recall", -1),
    ("default", -1),
    ("bankrupt", -2),
    ("bankruptcy", -2),
    ("concern", -1),
    ("risk", -1),
];

const NEGATORS: &[&str] = &["not", "no", "never", "without", "hardly", "barely", "nor"];

pub const NEGATION_REACH: usize = 3;

const SUFFIXES: &[&str] = &["", "s", "es", "d", "ed", "ing", "er", "est"];

/// Lowercased word tokens; apostrophes stay inside words, everything else splits
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace('\u{2019}', "'")
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_negator(token: &str) -> bool {
    NEGATORS.contains(&token) || token.ends_with("n't")
}

/// Whether `token` is `stem` or a regular inflection of it
pub fn inflects(token: &str, stem: &str) -> bool {
    let Some(rest) = token.strip_prefix(stem) else {
        // surge -> surging
        return stem
            .strip_suffix('e')
            .and_then(|root| token.strip_prefix(root))
            .map_or(false, |rest| rest == "ing" || rest == "ed");
    };
    if SUFFIXES.contains(&rest) {
        return true;
    }
    // drop -> dropped, cut -> cutting
    match (stem.chars().last(), rest.chars().next()) {
        (Some(last), Some(first)) if last == first => {
            matches!(&rest[first.len_utf8()..], "ed" | "ing")
        }
        _ => false,
    }
}

/// Weight of the first lexicon entry the token inflects
pub fn term_weight(lexicon: Lexicon, token: &str) -> Option<i32> {
    lexicon
        .iter()
        .find(|(stem, _)| inflects(token, stem))
        .map(|(_, weight)| *weight)
}

pub fn score_tokens(lexicon: Lexicon, tokens: &[String]) -> i32 {
    let mut score = 0;
    let mut negated_for = 0usize;
    for token in tokens {
        if is_negator(token) {
            negated_for = NEGATION_REACH;
            continue;
        }
        if let Some(weight) = term_weight(lexicon, token) {
            score += if negated_for > 0 { -weight } else { weight };
        }
        negated_for = negated_for.saturating_sub(1);
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Apple’s sell-off didn't last: shares UP 3%"),
            vec!["apple's", "sell", "off", "didn't", "last", "shares", "up", "3"]
        );
        assert!(tokenize("  ... ").is_empty());
    }

    #[test]
    fn test_inflections() {
        assert!(inflects("downgraded", "downgrade"));
        assert!(inflects("surging", "surge"));
        assert!(inflects("beats", "beat"));
        assert!(inflects("losses", "loss"));
        assert!(inflects("dropped", "drop"));
        assert!(inflects("cutting", "cut"));
        assert!(inflects("weaker", "weak"));
        assert!(!inflects("mission", "miss"));
        assert!(!inflects("riser", "risk"));
        assert!(!inflects("profitable", "profit"));
    }

    #[test]
    fn test_contraction_negates() {
        let tokens = tokenize("Earnings didn't beat estimates");
        assert_eq!(score_tokens(NEWS_LEXICON, &tokens), -1);
    }

    #[test]
    fn test_negation_reach() {
        // "jumped" sits three tokens after "never", "fell" five
        let tokens = tokenize("never a big jumped day fell");
        assert_eq!(score_tokens(NEWS_LEXICON, &tokens), -2);
    }

    #[test]
    fn test_weighted_terms() {
        assert_eq!(term_weight(NEWS_LEXICON, "plunges"), Some(-2));
        assert_eq!(term_weight(NEWS_LEXICON, "soared"), Some(2));
        assert_eq!(term_weight(NEWS_LEXICON, "quarterly"), None);
    }
}
