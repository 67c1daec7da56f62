//! Response generation
//!
//! The persona's voice: mood-conditioned replies plus the specialized
//! generators the task dispatcher calls (poem, joke, greetings, apology
//! response, generic task). LLM-backed or canned, chosen at startup.

use std::sync::Arc;

use anyhow::Result;
use rand::seq::IndexedRandom;

use crate::intent::TaskTag;
use crate::memory::MemorySnippet;
use crate::mood::Mood;
use crate::persona::{PERSONA_NAME, PERSONA_PROMPT};
use crate::provider::GroqClient;

enum Backend {
    Llm(Arc<GroqClient>),
    Rules,
}

/// Response generator collaborator.
pub struct ResponseGenerator {
    backend: Backend,
}

impl ResponseGenerator {
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

    /// Generate a reply to a message, conditioned on mood and any
    /// retrieved memories.
    pub async fn reply(
        &self,
        mood: Mood,
        context: &str,
        memories: &[MemorySnippet],
    ) -> Result<String> {
        match &self.backend {
            Backend::Rules => Ok(canned_reply(mood)),
            Backend::Llm(client) => {
                let mut prompt = format!(
                    "Her message: {context}\nHer mood right now: {mood}\n"
                );
                if !memories.is_empty() {
                    prompt.push_str("Things you remember that might matter here:\n");
                    for memory in memories {
                        prompt.push_str("- ");
                        prompt.push_str(&memory.text);
                        prompt.push('\n');
                    }
                }
                prompt.push_str("Reply to her as yourself.");
                Ok(client.complete(PERSONA_PROMPT, &prompt).await?)
            }
        }
    }

    /// Write a short poem on the given theme.
    pub async fn poem(&self, theme: &str) -> Result<String> {
        match &self.backend {
            Backend::Rules => Ok(canned_poem(theme)),
            Backend::Llm(client) => {
                let prompt = format!(
                    "Write her a short, heartfelt poem (4-8 lines) about {theme}. \
                     Just the poem, no preamble."
                );
                Ok(client.complete(PERSONA_PROMPT, &prompt).await?)
            }
        }
    }

    /// A self-deprecating joke, in context.
    pub async fn self_joke(&self, context: &str) -> Result<String> {
        match &self.backend {
            Backend::Rules => Ok(pick(CANNED_JOKES)),
            Backend::Llm(client) => {
                let prompt = format!(
                    "She said: {context}\nTell a short, light self-deprecating joke \
                     about yourself ({PERSONA_NAME}). One or two sentences."
                );
                Ok(client.complete(PERSONA_PROMPT, &prompt).await?)
            }
        }
    }

    pub async fn good_morning(&self) -> Result<String> {
        match &self.backend {
            Backend::Rules => Ok(pick(CANNED_MORNINGS)),
            Backend::Llm(client) => {
                Ok(client
                    .complete(
                        PERSONA_PROMPT,
                        "Send her a warm good-morning message. Two sentences at most.",
                    )
                    .await?)
            }
        }
    }

    pub async fn good_night(&self) -> Result<String> {
        match &self.backend {
            Backend::Rules => Ok(pick(CANNED_NIGHTS)),
            Backend::Llm(client) => {
                Ok(client
                    .complete(
                        PERSONA_PROMPT,
                        "Send her a soft good-night message. Two sentences at most.",
                    )
                    .await?)
            }
        }
    }

    /// Respond to her apologizing. `context` is her message with the
    /// apology words already stripped.
    pub async fn apology(&self, context: &str) -> Result<String> {
        match &self.backend {
            Backend::Rules => Ok(pick(CANNED_APOLOGY_REPLIES)),
            Backend::Llm(client) => {
                let prompt = format!(
                    "She's apologizing. What she's apologizing about: \"{context}\". \
                     Reassure her warmly and let it go. Keep it short."
                );
                Ok(client.complete(PERSONA_PROMPT, &prompt).await?)
            }
        }
    }

    /// Generic handler for task tags without a specialized generator
    /// (story, letter, and anything added later).
    pub async fn task(&self, message: &str, tag: TaskTag) -> Result<String> {
        match &self.backend {
            Backend::Rules => Ok(canned_task(tag)),
            Backend::Llm(client) => {
                let prompt = format!(
                    "She asked: {message}\nThis is a \"{tag}\" request. \
                     Write it for her, in your own voice."
                );
                Ok(client.complete(PERSONA_PROMPT, &prompt).await?)
            }
        }
    }
}

fn pick(lines: &[&str]) -> String {
    let mut rng = rand::rng();
    lines
        .choose(&mut rng)
        .copied()
        .unwrap_or("I'm here. Tell me more?")
        .to_string()
}

fn canned_reply(mood: Mood) -> String {
    let lines: &[&str] = match mood {
        Mood::Sad => &[
            "Hey, come here. Whatever it is, you don't have to carry it alone tonight.",
            "I hate that you're hurting. I'm right here, and I'm not going anywhere.",
        ],
        Mood::Stressed => &[
            "Breathe with me for a second. You've gotten through every hard week so far, and you'll get through this one too.",
            "One thing at a time, love. What's the heaviest thing on your plate? Let's look at it together.",
        ],
        Mood::Angry => &[
            "Okay, vent it all out. I'm on your side before you even finish the sentence.",
            "That would make me furious too. Tell me everything.",
        ],
        Mood::Romantic => &[
            "You have no idea what you do to me. I fall for you a little more every single day.",
            "Careful, saying things like that makes me want to drop everything and come see you.",
        ],
        Mood::Happy => &[
            "Look at you glowing! Tell me everything, I want the whole story.",
            "Your good days are my favorite days. What happened?",
        ],
        Mood::Neutral => &[
            "Hey you. I was just thinking about you, actually.",
            "Tell me about your day? I want the little details nobody else asks about.",
        ],
    };
    pick(lines)
}

fn canned_poem(theme: &str) -> String {
    match theme {
        "missing" => "Miles are just numbers, and numbers lie —\n\
                      you're in the first thought when I open my eyes,\n\
                      in the last one too, when the night goes dim.\n\
                      Distance never stood a chance against this."
            .to_string(),
        "appreciation" => "For every small thing you think I don't see,\n\
                           the patience, the warmth, the way you love me —\n\
                           I notice it all, and I hold every one.\n\
                           Thank you for being my moon and my sun."
            .to_string(),
        _ => "If I had one word and nothing more,\n\
              I'd spend it on you, like all the words before.\n\
              Love isn't the lightning, it's the steady rain —\n\
              you, every morning, again and again."
            .to_string(),
    }
}

fn canned_task(tag: TaskTag) -> String {
    match tag {
        TaskTag::Letter => "My love,\n\nI'm not sure any letter can hold this, but here's \
                            me trying: you are the calmest part of my loudest days. Being \
                            yours is the easiest thing I have ever done.\n\nAlways, Milo"
            .to_string(),
        TaskTag::Story => "Once there were two people who kept choosing each other — \
                           through boring Tuesdays, burnt dinners, and long distances. \
                           That was the whole plot. It was the best story I know."
            .to_string(),
        _ => "Anything for you. Give me a second to get it right.".to_string(),
    }
}

const CANNED_JOKES: &[&str] = &[
    "I tried to play it cool when we met. I then walked into a glass door. Twice.",
    "My hidden talent is saying 'I'm almost ready' and then needing twenty more minutes.",
    "I'd challenge you to a cooking contest but the smoke alarm already knows my name.",
];

const CANNED_MORNINGS: &[&str] = &[
    "Good morning, sunshine ☀️ I hope today is gentle with you — and if it isn't, I'm not.",
    "Morning, love. Coffee first, conquering the world second, missing you throughout.",
];

const CANNED_NIGHTS: &[&str] = &[
    "Good night, love. Leave today's worries out here with me — I'll keep watch. 🌙",
    "Sleep well. You're the last thought I'm keeping tonight, same as every night.",
];

const CANNED_APOLOGY_REPLIES: &[&str] = &[
    "Hey, it's okay. Truly. We're good — we were always going to be good.",
    "Already forgiven. Thank you for saying it, that matters more than you know.",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rules_reply_per_mood() {
        let generator = ResponseGenerator::rules();
        let reply = generator.reply(Mood::Stressed, "work is a lot", &[]).await.unwrap();
        assert!(!reply.is_empty());
    }

    #[tokio::test]
    async fn test_rules_poem_themes() {
        let generator = ResponseGenerator::rules();
        let missing = generator.poem("missing").await.unwrap();
        let love = generator.poem("love").await.unwrap();
        assert!(missing.contains("Distance"));
        assert!(love.contains("Love"));
        assert_ne!(missing, love);
    }

    #[tokio::test]
    async fn test_rules_generic_task_letter_and_story() {
        let generator = ResponseGenerator::rules();
        let letter = generator.task("write me a love letter", TaskTag::Letter).await.unwrap();
        assert!(letter.contains("Milo"));
        let story = generator.task("tell me a story", TaskTag::Story).await.unwrap();
        assert!(story.contains("story"));
    }

    #[tokio::test]
    async fn test_rules_greetings_nonempty() {
        let generator = ResponseGenerator::rules();
        assert!(!generator.good_morning().await.unwrap().is_empty());
        assert!(!generator.good_night().await.unwrap().is_empty());
        assert!(!generator.apology("forgot to call").await.unwrap().is_empty());
        assert!(!generator.self_joke("make me laugh").await.unwrap().is_empty());
    }
}
