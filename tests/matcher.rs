use repurpose::search::matcher::{ratio, CloseMatches, MatchError};

#[test]
fn ratio_counts_matching_blocks() {
    assert_eq!(ratio("abcd", "bcde"), 0.75);
    assert!((ratio("aspirin", "asprin") - 12.0 / 13.0).abs() < 1e-12);
}

#[test]
fn ratio_of_two_empty_strings_is_one() {
    assert_eq!(ratio("", ""), 1.0);
    assert_eq!(ratio("abc", ""), 0.0);
}

#[test]
fn popular_characters_are_ignored_in_long_sequences() {
    let a = "the quick brown fox jumps over the lazy dog ".repeat(6);
    let b = "a quick brown cat leaps over a lazy dog ".repeat(6);
    assert_eq!(b.chars().count(), 240);
    assert_eq!(ratio(&a, &b), 0.0);
}

#[test]
fn close_matches_are_best_first() {
    let found = CloseMatches::DEFAULT.find("appel", ["ape", "apple", "peach", "puppy"]);
    assert_eq!(found, vec!["apple", "ape"]);
}

#[test]
fn equal_scores_order_by_descending_text() {
    let found = CloseMatches::DEFAULT.find("abc", ["abd", "abe"]);
    assert_eq!(found, vec!["abe", "abd"]);
}

#[test]
fn close_matches_respect_limit_and_cutoff() {
    let one = CloseMatches::new(1, 0.6).unwrap();
    assert_eq!(one.find("metformine", ["metformin", "metoprolol", "memantine"]), vec!["metformin"]);

    let strict = CloseMatches::new(5, 0.95).unwrap();
    assert!(strict.find("asprin", ["aspirin"]).is_empty());
}

#[test]
fn invalid_parameters_are_rejected() {
    assert_eq!(CloseMatches::new(0, 0.6), Err(MatchError::InvalidCount(0)));
    assert_eq!(CloseMatches::new(3, 1.5), Err(MatchError::InvalidCutoff(1.5)));
}
