//! Mood classification
//!
//! Maps a message to one of six discrete moods, each with a display
//! glyph. Runs either LLM-backed (single label-extraction completion)
//! or rule-based (ordered keyword cascade); the variant is chosen once
//! at startup. An LLM label that isn't one of the six falls back to the
//! keyword rules; transport and API errors propagate.

use std::sync::Arc;

use anyhow::Result;

use crate::provider::GroqClient;

/// Discrete emotional classification of a message. Drives response tone
/// and memory retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Sad,
    Stressed,
    Angry,
    Romantic,
    Neutral,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Stressed => "stressed",
            Self::Angry => "angry",
            Self::Romantic => "romantic",
            Self::Neutral => "neutral",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Happy => "😊",
            Self::Sad => "😢",
            Self::Stressed => "😰",
            Self::Angry => "😠",
            Self::Romantic => "😍",
            Self::Neutral => "🙂",
        }
    }

    /// Moods that trigger memory retrieval on the non-task path.
    pub fn is_reactive(&self) -> bool {
        matches!(self, Self::Sad | Self::Stressed | Self::Angry | Self::Romantic)
    }

    fn from_label(label: &str) -> Option<Self> {
        match label {
            "happy" => Some(Self::Happy),
            "sad" => Some(Self::Sad),
            "stressed" => Some(Self::Stressed),
            "angry" => Some(Self::Angry),
            "romantic" => Some(Self::Romantic),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const MOOD_PROMPT: &str = "You classify the mood of a short chat message from \
a romantic partner. Reply with exactly one lowercase word, nothing else: \
happy, sad, stressed, angry, romantic, or neutral.";

/// Ordered keyword rules. Earlier moods win when lists overlap, so
/// romantic phrasing beats the bare sadness words it often contains.
const MOOD_RULES: &[(Mood, &[&str])] = &[
    (
        Mood::Romantic,
        &["love you", "miss you", "kiss", "cuddle", "romantic", "marry", "❤"],
    ),
    (
        Mood::Sad,
        &["sad", "cry", "lonely", "miss", "depressed", "heartbroken", "😢"],
    ),
    (
        Mood::Stressed,
        &[
            "stress", "overwhelm", "anxious", "anxiety", "deadline", "exam",
            "exhausted", "so much work",
        ],
    ),
    (
        Mood::Angry,
        &["angry", "mad at", "furious", "annoyed", "hate", "frustrated"],
    ),
    (
        Mood::Happy,
        &["happy", "great", "awesome", "excited", "yay", "wonderful", "amazing"],
    ),
];

enum Backend {
    Llm(Arc<GroqClient>),
    Rules,
}

/// Mood classifier collaborator.
pub struct MoodDetector {
    backend: Backend,
}

impl MoodDetector {
    pub fn llm(client: Arc<GroqClient>) -> Self {
        Self {
            backend: Backend::Llm(client),
        }
    }

    pub fn rules() -> Self {
        Self {
            backend: Backend::Rules,
        }
    }

    /// Classify the mood of a message. Exactly one mood per message.
    pub async fn detect(&self, message: &str) -> Result<Mood> {
        match &self.backend {
            Backend::Rules => Ok(detect_by_rules(message)),
            Backend::Llm(client) => {
                let raw = client.complete(MOOD_PROMPT, message).await?;
                let label = raw.trim().trim_end_matches('.').to_lowercase();
                match Mood::from_label(&label) {
                    Some(mood) => Ok(mood),
                    None => {
                        tracing::warn!(label = %raw, "unrecognized mood label, using keyword rules");
                        Ok(detect_by_rules(message))
                    }
                }
            }
        }
    }
}

/// Keyword fallback: first rule with any substring present wins.
fn detect_by_rules(message: &str) -> Mood {
    let message_lower = message.to_lowercase();

    for (mood, keywords) in MOOD_RULES {
        if keywords.iter().any(|k| message_lower.contains(k)) {
            return *mood;
        }
    }

    Mood::Neutral
}
