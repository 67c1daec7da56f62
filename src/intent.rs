//! Task-request classifier
//!
//! Maps a raw message to an optional task tag via substring matching
//! against fixed phrase lists, checked in a fixed priority order:
//! poem, joke, story, letter, date plan, good morning, good night,
//! apology. The first rule with any phrase present wins.

/// Structured-content request detected in a message.
///
/// A detected tag overrides the default emotional-response path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskTag {
    Poem,
    Joke,
    Story,
    Letter,
    DatePlan,
    GoodMorning,
    GoodNight,
    Apology,
}

impl TaskTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Poem => "poem",
            Self::Joke => "joke",
            Self::Story => "story",
            Self::Letter => "letter",
            Self::DatePlan => "date_plan",
            Self::GoodMorning => "good_morning",
            Self::GoodNight => "good_night",
            Self::Apology => "apology",
        }
    }
}

impl std::fmt::Display for TaskTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered rule table. Order is load-bearing: a message matching several
/// rules resolves to the earliest one.
const RULES: &[(TaskTag, &[&str])] = &[
    (TaskTag::Poem, &["write a poem", "poem for", "make a poem"]),
    (
        TaskTag::Joke,
        &[
            "write a joke",
            "tell me a joke",
            "joke about milo",
            "make fun of yourself",
        ],
    ),
    (TaskTag::Story, &["write a story", "tell me a story"]),
    (TaskTag::Letter, &["write a letter", "love letter"]),
    (
        TaskTag::DatePlan,
        &["plan a date", "date idea", "what should we do"],
    ),
    (TaskTag::GoodMorning, &["good morning", "morning"]),
    (TaskTag::GoodNight, &["good night", "night"]),
    (TaskTag::Apology, &["sorry", "apologize", "my bad"]),
];

/// Classify a message as a task request.
///
/// Plain substring containment against lowercased input; no tokenization.
/// Pure function of the input text.
pub fn classify(message: &str) -> Option<TaskTag> {
    let message_lower = message.to_lowercase();

    for (tag, phrases) in RULES {
        if contains_any(&message_lower, phrases) {
            return Some(*tag);
        }
    }

    None
}

fn contains_any(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| text.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_poem() {
        assert_eq!(classify("Write a poem for me about love"), Some(TaskTag::Poem));
        assert_eq!(classify("can you make a poem?"), Some(TaskTag::Poem));
    }

    #[test]
    fn test_classify_joke() {
        assert_eq!(classify("tell me a joke"), Some(TaskTag::Joke));
        assert_eq!(classify("go on, make fun of yourself"), Some(TaskTag::Joke));
    }

    #[test]
    fn test_classify_story_and_letter() {
        assert_eq!(classify("tell me a story"), Some(TaskTag::Story));
        assert_eq!(classify("write me a love letter"), Some(TaskTag::Letter));
    }

    #[test]
    fn test_classify_date_plan() {
        assert_eq!(classify("plan a date for us"), Some(TaskTag::DatePlan));
        assert_eq!(classify("What should we do tonight?"), Some(TaskTag::DatePlan));
    }

    #[test]
    fn test_classify_greetings() {
        assert_eq!(classify("Good morning!"), Some(TaskTag::GoodMorning));
        assert_eq!(classify("good night, sleep well"), Some(TaskTag::GoodNight));
    }

    #[test]
    fn test_classify_apology() {
        assert_eq!(classify("I'm sorry, my bad"), Some(TaskTag::Apology));
        assert_eq!(classify("I apologize for earlier"), Some(TaskTag::Apology));
    }

    #[test]
    fn test_classify_none() {
        assert_eq!(classify("I love you so much! ❤️"), None);
        assert_eq!(classify("how was your day"), None);
    }

    #[test]
    fn test_rule_order_precedence() {
        // Contains both a good_morning phrase and an apology phrase; the
        // earlier rule wins.
        assert_eq!(
            classify("good morning, sorry about last night's call"),
            Some(TaskTag::GoodMorning)
        );
        // "poem for" beats "sorry".
        assert_eq!(
            classify("sorry, but write a poem for me"),
            Some(TaskTag::Poem)
        );
    }

    #[test]
    fn test_classify_case_insensitive() {
        assert_eq!(classify("GOOD MORNING"), Some(TaskTag::GoodMorning));
    }

    #[test]
    fn test_classify_idempotent() {
        let msg = "plan a date idea for the weekend";
        assert_eq!(classify(msg), classify(msg));
    }
}
