//! Message-processing pipeline
//!
//! Fixed stage order per message: mood detection, intent
//! classification, then either task dispatch or memory retrieval plus
//! generation, then safety filtering. Exactly one mood result and one
//! safety result per message. No retries; any collaborator error
//! propagates to the caller, which owns session recovery.

use anyhow::Result;

use crate::generate::ResponseGenerator;
use crate::intent::{self, TaskTag};
use crate::memory::MemoryStore;
use crate::mood::{Mood, MoodDetector};
use crate::safety::SafetyFilter;
use crate::surprise::{self, DatePlanner};

/// How many memory snippets the reactive path retrieves.
const MEMORY_K: usize = 2;

/// Terminal output record for one processed message. Not persisted.
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    pub response: String,
    pub mood: Mood,
    pub safe: bool,
    pub safety_score: u8,
    pub task: Option<TaskTag>,
}

impl ProcessingResult {
    pub fn glyph(&self) -> &'static str {
        self.mood.glyph()
    }
}

/// Pipeline orchestrator. Owns the collaborators; assembled once at
/// startup in the variant (LLM-backed or rule-based) chosen there.
pub struct Pipeline {
    mood: MoodDetector,
    memory: MemoryStore,
    generator: ResponseGenerator,
    planner: DatePlanner,
    safety: SafetyFilter,
}

impl Pipeline {
    pub fn new(
        mood: MoodDetector,
        memory: MemoryStore,
        generator: ResponseGenerator,
        planner: DatePlanner,
        safety: SafetyFilter,
    ) -> Self {
        Self {
            mood,
            memory,
            generator,
            planner,
            safety,
        }
    }

    /// The session's memory store.
    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// Process one message through every stage and assemble the result.
    pub async fn process(&self, message: &str) -> Result<ProcessingResult> {
        // 1. Mood, unconditionally first.
        let mood = self.mood.detect(message).await?;
        tracing::debug!(mood = %mood, "mood detected");

        // 2. Task detection.
        let task = intent::classify(message);

        let draft = match task {
            // 3. Task branch: memory is skipped entirely.
            Some(tag) => {
                tracing::debug!(task = %tag, "task detected");
                self.dispatch(message, tag, mood).await?
            }
            // 4. Emotional-response branch.
            None => {
                let memories = if mood.is_reactive() {
                    let found = self.memory.retrieve(message, MEMORY_K);
                    tracing::debug!(count = found.len(), "retrieved memories");
                    found
                } else {
                    Vec::new()
                };
                self.generator.reply(mood, message, &memories).await?
            }
        };

        // 5. Safety filtering; the rewritten text is the final response.
        let safety = self.safety.validate_and_fix(&draft);
        tracing::debug!(score = safety.score, safe = safety.safe, "safety checked");

        self.memory.remember(message);

        Ok(ProcessingResult {
            response: safety.fixed_text,
            mood,
            safe: safety.safe,
            safety_score: safety.score,
            task,
        })
    }

    /// Route a detected task to its generator. No tag errors here;
    /// unmapped tags go to the generic handler.
    async fn dispatch(&self, message: &str, tag: TaskTag, _mood: Mood) -> Result<String> {
        match tag {
            TaskTag::Poem => self.generator.poem(poem_theme(message)).await,
            TaskTag::Joke => self.generator.self_joke(message).await,
            TaskTag::DatePlan => {
                let plan = self.planner.plan(message).await?;
                Ok(surprise::render(&plan))
            }
            TaskTag::GoodMorning => self.generator.good_morning().await,
            TaskTag::GoodNight => self.generator.good_night().await,
            TaskTag::Apology => self.generator.apology(&apology_context(message)).await,
            other => self.generator.task(message, other).await,
        }
    }
}

/// Theme for a requested poem, by substring inspection in fixed order.
fn poem_theme(message: &str) -> &'static str {
    let message_lower = message.to_lowercase();
    if message_lower.contains("miss") {
        "missing"
    } else if message_lower.contains("thank") || message_lower.contains("appreciate") {
        "appreciation"
    } else {
        "love"
    }
}

/// Context passed to the apology generator: the message with the
/// literal apology words removed. Removal is case-sensitive even though
/// detection lowercases; "Sorry" survives. Long-standing behavior, kept.
fn apology_context(message: &str) -> String {
    message
        .replace("sorry", "")
        .replace("apologize", "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poem_theme_order() {
        assert_eq!(poem_theme("a poem about how I miss you"), "missing");
        assert_eq!(poem_theme("a poem to say thank you"), "appreciation");
        assert_eq!(poem_theme("I appreciate you, write a poem"), "appreciation");
        assert_eq!(poem_theme("Write a poem for me about love"), "love");
        // "miss" wins over "thank" when both appear.
        assert_eq!(poem_theme("thank you, I miss you"), "missing");
    }

    #[test]
    fn test_apology_context_strips_and_trims() {
        assert_eq!(apology_context("sorry, my bad"), ", my bad");
        assert_eq!(apology_context("I apologize for being late"), "I  for being late");
    }

    #[test]
    fn test_apology_context_case_sensitive_removal() {
        // Detected case-insensitively, stripped case-sensitively.
        assert_eq!(apology_context("I'm Sorry about it"), "I'm Sorry about it");
    }
}
