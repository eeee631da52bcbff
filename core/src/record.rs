// core/src/record.rs
//
// Parser for one tab-separated n-gram record.
//
// Record layout (Google Books 2-gram shards):
//   word1_TAG word2_TAG \t year,match_count,volume_count \t year,match_count,volume_count ...
//
// Malformed records are expected noise in web-scale corpora and are skipped,
// never reported.

use crate::vocabulary::Vocabulary;

/// Separator between the two words of a canonical bigram key.
pub const KEY_SEPARATOR: char = '|';

/// Canonical key for an ordered word pair: `"word1|word2"`.
pub fn bigram_key(word1: &str, word2: &str) -> String {
    let mut key = String::with_capacity(word1.len() + word2.len() + 1);
    key.push_str(word1);
    key.push(KEY_SEPARATOR);
    key.push_str(word2);
    key
}

/// Split a canonical key back into its two words.
pub fn split_key(key: &str) -> Option<(&str, &str)> {
    key.split_once(KEY_SEPARATOR)
}

/// A record that passed every admissibility rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBigram {
    pub key: String,
    pub frequency: u64,
}

/// Applies normalization and admissibility rules to raw records.
#[derive(Debug, Clone, Copy)]
pub struct RecordParser<'v> {
    vocabulary: &'v Vocabulary,
    noise_threshold: u64,
}

impl<'v> RecordParser<'v> {
    pub fn new(vocabulary: &'v Vocabulary, noise_threshold: u64) -> Self {
        Self {
            vocabulary,
            noise_threshold,
        }
    }

    /// Parse one line (trailing newline allowed). `None` means skip.
    pub fn parse_line(&self, line: &str) -> Option<ParsedBigram> {
        let line = line.trim_end_matches(['\n', '\r']);
        let mut fields = line.split('\t');
        let ngram = fields.next()?;

        let mut tokens = ngram.split_whitespace();
        let (first, second) = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(a), Some(b), None) => (a, b),
            _ => return None,
        };

        let word2 = normalize_token(second);
        if !self.vocabulary.contains(&word2) {
            return None;
        }
        let word1 = normalize_token(first);

        let frequency = fields.fold(0u64, |sum, meta| match match_count(meta) {
            Some(count) => sum.saturating_add(count),
            None => sum,
        });
        if frequency <= self.noise_threshold {
            return None;
        }

        Some(ParsedBigram {
            key: bigram_key(&word1, &word2),
            frequency,
        })
    }
}

/// Drop everything from the first underscore on and lower-case the rest.
fn normalize_token(token: &str) -> String {
    let word = token.split('_').next().unwrap_or(token);
    word.to_lowercase()
}

/// Second comma-separated field of a `year,count,volumes` column.
fn match_count(meta: &str) -> Option<u64> {
    let mut parts = meta.split(',');
    let _year = parts.next()?;
    parts.next()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary {
        Vocabulary::from_words(["dog", "fish", "fast"])
    }

    fn parse(line: &str) -> Option<ParsedBigram> {
        let v = vocab();
        RecordParser::new(&v, 2).parse_line(line)
    }

    #[test]
    fn qualifying_record_yields_key_and_count() {
        let got = parse("cat_NOUN dog_NOUN\t2005,3,10").expect("qualifies");
        assert_eq!(got.key, "cat|dog");
        assert_eq!(got.frequency, 3);
    }

    #[test]
    fn frequency_at_threshold_is_noise() {
        assert_eq!(parse("cat_NOUN dog_NOUN\t2005,2,10"), None);
    }

    #[test]
    fn counts_sum_across_year_columns() {
        let got = parse("cat_NOUN dog_NOUN\t2000,1,1\t2001,1,1\t2002,4,2\n").expect("qualifies");
        assert_eq!(got.frequency, 6);
    }

    #[test]
    fn pos_suffix_stripped_and_case_folded() {
        let got = parse("Running_VERB fast_ADV\t1999,10,3").expect("qualifies");
        assert_eq!(got.key, "running|fast");
    }

    #[test]
    fn tokens_without_underscore_are_whole_words() {
        let got = parse("Big Fish\t1999,10,3").expect("qualifies");
        assert_eq!(got.key, "big|fish");
    }

    #[test]
    fn only_first_underscore_segment_kept() {
        let got = parse("New_York_NOUN dog_NOUN\t1999,10,3").expect("qualifies");
        assert_eq!(got.key, "new|dog");
    }

    #[test]
    fn exactly_two_tokens_required() {
        assert_eq!(parse("a_NOUN b_NOUN c_NOUN\t2000,5,1"), None);
        assert_eq!(parse("dog_NOUN\t2000,5,1"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn second_word_outside_vocabulary_is_dropped() {
        assert_eq!(parse("cat_NOUN bird_NOUN\t2000,500000,1"), None);
    }

    #[test]
    fn first_word_is_not_vocabulary_gated() {
        let got = parse("zzyzx_NOUN dog_NOUN\t2000,5,1").expect("qualifies");
        assert_eq!(got.key, "zzyzx|dog");
    }

    #[test]
    fn malformed_meta_columns_are_skipped_individually() {
        let got = parse("cat dog\t2000,abc,1\t2001\t2002,7,1\t,4,").expect("qualifies");
        assert_eq!(got.frequency, 11);
    }

    #[test]
    fn record_without_counts_is_noise() {
        assert_eq!(parse("cat dog"), None);
    }

    #[test]
    fn split_key_inverts_bigram_key() {
        let key = bigram_key("cat", "dog");
        assert_eq!(split_key(&key), Some(("cat", "dog")));
        assert_eq!(split_key("nopipe"), None);
    }
}
