//! Textual signals over a result's title and description.
//!
//! Two independent pure functions:
//!
//! - [`contains_money_mention`]: lexical scan for monetary amounts in dollars
//!   or rands. This is a heuristic, not currency validation: `$1,200.50`
//!   counts, but so does any `R` immediately followed by digits, which can
//!   collide with unrelated tokens (an abbreviation like `R2D2` matches).
//!   That false-positive surface is accepted, not something to tighten here.
//! - [`count_phrase_occurrences`]: literal substring counting, so a phrase
//!   inside a longer word still counts ("cat" matches inside "category").

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Amounts like `$1,200.50`, `50 dollars`, `50 USD`, `R300`, `300 rands`.
static MONEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\$[\d,.]+|\d+\s*(?:dollars|USD)\b|R[\d,.]+|\d+\s*rands\b").unwrap()
});

/// True if either field mentions a monetary amount. Case-insensitive.
pub fn contains_money_mention(title: &str, description: &str) -> bool {
    let mentioned = MONEY.is_match(title) || MONEY.is_match(description);
    debug!(mentioned, "Evaluated money mention");
    mentioned
}

/// Count non-overlapping, case-insensitive occurrences of `search_phrase`
/// within the title plus within the description.
pub fn count_phrase_occurrences(search_phrase: &str, title: &str, description: &str) -> usize {
    let phrase = search_phrase.to_lowercase();
    let in_title = title.to_lowercase().matches(phrase.as_str()).count();
    let in_description = description.to_lowercase().matches(phrase.as_str()).count();

    let total = in_title + in_description;
    debug!(in_title, in_description, total, "Counted search phrase occurrences");
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dollar_amount() {
        assert!(contains_money_mention("It cost $1,200", ""));
        assert!(contains_money_mention("", "roughly $1,200.50 total"));
    }

    #[test]
    fn test_dollars_and_usd_words() {
        assert!(contains_money_mention("paid 50 dollars", ""));
        assert!(contains_money_mention("paid 50 USD", ""));
        assert!(contains_money_mention("paid 50USD this time", ""));
    }

    #[test]
    fn test_rand_amounts() {
        assert!(contains_money_mention("R300 refund approved", ""));
        assert!(contains_money_mention("", "fined 300 rands last week"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(contains_money_mention("50 DOLLARS", ""));
        assert!(contains_money_mention("r300 refund", ""));
    }

    #[test]
    fn test_no_money() {
        assert!(!contains_money_mention("nothing here", "still nothing"));
        assert!(!contains_money_mention("dollars owed", "rands owed"));
    }

    #[test]
    fn test_rand_prefix_false_positive_is_accepted() {
        // Known heuristic collision, kept deliberately.
        assert!(contains_money_mention("R2 unit deployed", ""));
    }

    #[test]
    fn test_phrase_counted_per_field_and_summed() {
        let count = count_phrase_occurrences("cat", "The cat sat on a category", "a cat");
        assert_eq!(count, 3);
    }

    #[test]
    fn test_phrase_counts_inside_longer_words() {
        assert_eq!(
            count_phrase_occurrences("cat", "The cat sat on a category", ""),
            2
        );
    }

    #[test]
    fn test_phrase_is_case_insensitive() {
        assert_eq!(
            count_phrase_occurrences("Load Shedding", "LOAD SHEDDING returns", "load shedding"),
            2
        );
    }

    #[test]
    fn test_phrase_absent() {
        assert_eq!(count_phrase_occurrences("eskom", "No mention", "at all"), 0);
    }

    #[test]
    fn test_occurrences_do_not_overlap() {
        assert_eq!(count_phrase_occurrences("aa", "aaaa", ""), 2);
    }
}
