//! Candidate filtering for fully formed paths.
//!
//! The enumerator calls strings "words", but until they pass this filter
//! they may be pure nonsense.

use crate::dictionary::Dictionary;

use super::types::SearchOptions;

const VOWELS: [char; 6] = ['A', 'E', 'I', 'O', 'U', 'Y'];

/// True when the word contains at least one vowel (Y counts).
pub fn contains_vowel(word: &str) -> bool {
    word.chars()
        .any(|c| VOWELS.contains(&c.to_ascii_uppercase()))
}

/// Applies the configured acceptance checks, ANDed together. With neither
/// check active every candidate passes.
pub struct CandidateFilter<'a> {
    vowel_check: bool,
    dictionary: Option<&'a dyn Dictionary>,
}

impl<'a> CandidateFilter<'a> {
    /// Build a filter from the session options. `dictionary` is consulted
    /// only when the dictionary check is on; the caller has already verified
    /// it is present in that case.
    pub fn new(options: SearchOptions, dictionary: Option<&'a dyn Dictionary>) -> Self {
        Self {
            vowel_check: options.vowel_check,
            dictionary: if options.dictionary_check {
                dictionary
            } else {
                None
            },
        }
    }

    pub fn accept(&self, word: &str) -> bool {
        if self.vowel_check && !contains_vowel(word) {
            return false;
        }
        if let Some(dictionary) = self.dictionary {
            if !dictionary.is_valid_word(word) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordList;

    #[test]
    fn test_contains_vowel() {
        assert!(contains_vowel("CAR"));
        assert!(contains_vowel("MYTH"));
        assert!(!contains_vowel("BRB"));
        assert!(!contains_vowel(""));
    }

    #[test]
    fn test_no_checks_accepts_everything() {
        let filter = CandidateFilter::new(
            SearchOptions {
                vowel_check: false,
                dictionary_check: false,
            },
            None,
        );
        assert!(filter.accept("ZZZZ"));
    }

    #[test]
    fn test_vowel_check_only() {
        let filter = CandidateFilter::new(
            SearchOptions {
                vowel_check: true,
                dictionary_check: false,
            },
            None,
        );
        assert!(filter.accept("QZA"));
        assert!(!filter.accept("QZT"));
    }

    #[test]
    fn test_both_checks_are_anded() {
        let dict = WordList::new(["car", "brb"]);
        let filter = CandidateFilter::new(SearchOptions::default(), Some(&dict));
        assert!(filter.accept("CAR"));
        // Known to the dictionary but vowelless, so still rejected.
        assert!(!filter.accept("BRB"));
        assert!(!filter.accept("RAC"));
    }
}
