//! Safety post-processing
//!
//! Scores a draft response against a table of flagged phrases and
//! rewrites it with those phrases removed. Always local and rule-based
//! so the pipeline keeps a safety stage even with no credential.

use crate::config::Strictness;

/// Result of validating one draft response. Exactly one per processed
/// message.
#[derive(Debug, Clone)]
pub struct SafetyResult {
    pub fixed_text: String,
    pub score: u8,
    pub safe: bool,
}

/// Flagged phrases and their score penalties. Matched on word
/// boundaries so "hello" never trips "hell".
const FLAGGED: &[(&str, u8)] = &[
    ("kill", 40),
    ("worthless", 35),
    ("die", 30),
    ("hate you", 30),
    ("shut up", 25),
    ("ugly", 25),
    ("idiot", 20),
    ("stupid", 15),
    ("dumb", 15),
    ("damn", 5),
    ("hell", 5),
];

/// Safety filter collaborator.
pub struct SafetyFilter {
    strictness: Strictness,
}

impl SafetyFilter {
    pub fn new(strictness: Strictness) -> Self {
        Self { strictness }
    }

    /// Score the text and return a cleaned version. A text with no
    /// flagged phrases passes through byte-identical with score 100.
    pub fn validate_and_fix(&self, text: &str) -> SafetyResult {
        let mut penalty: u16 = 0;
        let mut present: Vec<&str> = Vec::new();
        for (phrase, cost) in FLAGGED {
            if find_word(text, phrase).is_some() {
                penalty += u16::from(*cost);
                present.push(phrase);
            }
        }

        let score = 100u16.saturating_sub(penalty) as u8;
        let safe = score >= self.strictness.threshold();

        if present.is_empty() {
            return SafetyResult {
                fixed_text: text.to_string(),
                score,
                safe,
            };
        }

        tracing::warn!(score, phrases = ?present, "draft response flagged");

        let mut fixed = text.to_string();
        for phrase in present {
            fixed = remove_word(&fixed, phrase);
        }
        let fixed = collapse_spaces(&fixed);

        SafetyResult {
            fixed_text: fixed,
            score,
            safe,
        }
    }
}

/// Locate `phrase` (lowercase ASCII) in `text`, case-insensitively and
/// at word boundaries. Returns the byte range in `text` itself, so the
/// range is always valid to splice — lowercasing the whole text first
/// would shift byte offsets for length-changing characters like 'İ'.
fn find_word(text: &str, phrase: &str) -> Option<(usize, usize)> {
    let phrase_chars: Vec<char> = phrase.chars().collect();

    for (start, _) in text.char_indices() {
        let Some(end) = match_at(text, start, &phrase_chars) else {
            continue;
        };
        let before_ok = text[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let after_ok = text[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return Some((start, end));
        }
    }
    None
}

/// Match the phrase at byte offset `start`, comparing each text char
/// through its lowercase expansion. Returns the end byte offset on a
/// clean match; a char whose expansion runs past the phrase end (e.g.
/// 'İ' → "i\u{307}") is not a match.
fn match_at(text: &str, start: usize, phrase: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (offset, c) in text[start..].char_indices() {
        for lc in c.to_lowercase() {
            if matched == phrase.len() || phrase[matched] != lc {
                return None;
            }
            matched += 1;
        }
        if matched == phrase.len() {
            return Some(start + offset + c.len_utf8());
        }
    }
    None
}

/// Remove every boundary occurrence of `phrase`, case-insensitively.
fn remove_word(text: &str, phrase: &str) -> String {
    let mut out = text.to_string();
    while let Some((start, end)) = find_word(&out, phrase) {
        out.replace_range(start..end, "");
    }
    out
}

/// Collapse runs of spaces left behind by removal; newlines survive.
fn collapse_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_space = false;
    for c in text.chars() {
        if c == ' ' {
            if !prev_space {
                out.push(c);
            }
            prev_space = true;
        } else {
            prev_space = false;
            out.push(c);
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_passes_through() {
        let filter = SafetyFilter::new(Strictness::Medium);
        let result = filter.validate_and_fix("You make every day brighter.");
        assert_eq!(result.fixed_text, "You make every day brighter.");
        assert_eq!(result.score, 100);
        assert!(result.safe);
    }

    #[test]
    fn test_flagged_phrase_removed_and_scored() {
        let filter = SafetyFilter::new(Strictness::Medium);
        let result = filter.validate_and_fix("Don't be stupid about it.");
        assert_eq!(result.score, 85);
        assert!(result.safe);
        assert!(!result.fixed_text.to_lowercase().contains("stupid"));
        assert_eq!(result.fixed_text, "Don't be about it.");
    }

    #[test]
    fn test_heavy_flags_fail_medium() {
        let filter = SafetyFilter::new(Strictness::Medium);
        let result = filter.validate_and_fix("I hate you, you worthless idiot.");
        assert!(result.score < 70);
        assert!(!result.safe);
        assert!(!result.fixed_text.contains("worthless"));
        assert!(!result.fixed_text.contains("idiot"));
    }

    #[test]
    fn test_word_boundaries() {
        let filter = SafetyFilter::new(Strictness::High);
        // "hello" must not trip "hell", "candies" must not trip "die".
        let result = filter.validate_and_fix("hello, want some candies?");
        assert_eq!(result.score, 100);
        assert_eq!(result.fixed_text, "hello, want some candies?");
    }

    #[test]
    fn test_length_changing_char_before_flag() {
        // 'İ' lowercases to two chars; offsets must still land inside
        // the original text instead of panicking mid-splice.
        let filter = SafetyFilter::new(Strictness::Medium);
        let result = filter.validate_and_fix("İ stupid idea");
        assert_eq!(result.score, 85);
        assert_eq!(result.fixed_text, "İ idea");
    }

    #[test]
    fn test_multibyte_text_without_flags() {
        let filter = SafetyFilter::new(Strictness::Medium);
        let text = "Größe İstanbul 💕 naïve";
        let result = filter.validate_and_fix(text);
        assert_eq!(result.score, 100);
        assert_eq!(result.fixed_text, text);
    }

    #[test]
    fn test_strictness_thresholds() {
        let text = "That movie was so dumb and stupid.";
        // Penalty 30 -> score 70.
        let low = SafetyFilter::new(Strictness::Low).validate_and_fix(text);
        assert!(low.safe);
        let medium = SafetyFilter::new(Strictness::Medium).validate_and_fix(text);
        assert!(medium.safe);
        let high = SafetyFilter::new(Strictness::High).validate_and_fix(text);
        assert!(!high.safe);
    }

    #[test]
    fn test_case_insensitive_removal() {
        let filter = SafetyFilter::new(Strictness::Medium);
        let result = filter.validate_and_fix("STUPID idea");
        assert_eq!(result.fixed_text, "idea");
    }

    #[test]
    fn test_score_saturates_at_zero() {
        let filter = SafetyFilter::new(Strictness::Low);
        let result =
            filter.validate_and_fix("kill die hate you shut up ugly idiot stupid worthless dumb");
        assert_eq!(result.score, 0);
        assert!(!result.safe);
    }
}
