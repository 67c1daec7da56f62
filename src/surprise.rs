//! Date planning
//!
//! Produces a structured date plan (title, description, steps, optional
//! suggestions) and renders it into the single reply string the
//! dispatcher returns. The LLM variant asks for a JSON object; a plan
//! that doesn't deserialize falls back to the local plan rather than
//! failing the pipeline.

use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::persona::PERSONA_PROMPT;
use crate::provider::GroqClient;

/// A structured date plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatePlan {
    pub title: String,
    pub description: String,
    pub steps: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

const PLAN_PROMPT: &str = "Plan a date based on her message. Respond with a \
JSON object only, with keys: \"title\" (string), \"description\" (string, \
one or two sentences), \"steps\" (array of 3-5 short strings), \
\"suggestions\" (array of 0-2 short tip strings).";

enum Backend {
    Llm(Arc<GroqClient>),
    Rules,
}

/// Date planner collaborator.
pub struct DatePlanner {
    backend: Backend,
}

impl DatePlanner {
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

    pub async fn plan(&self, message: &str) -> Result<DatePlan> {
        match &self.backend {
            Backend::Rules => Ok(local_plan()),
            Backend::Llm(client) => {
                let system = format!("{PERSONA_PROMPT}\n{PLAN_PROMPT}");
                let body = client.complete_json(&system, message).await?;
                match serde_json::from_str::<DatePlan>(&body) {
                    Ok(plan) => Ok(plan),
                    Err(e) => {
                        tracing::warn!(error = %e, "date plan did not deserialize, using local plan");
                        Ok(local_plan())
                    }
                }
            }
        }
    }
}

/// Render a plan as: title, blank line, description, blank line, the
/// how-to header, numbered steps one per line, and (when present) a tip
/// line built from the first suggestion.
pub fn render(plan: &DatePlan) -> String {
    let mut out = format!(
        "{}\n\n{}\n\nHere's how we can do it:\n",
        plan.title, plan.description
    );
    for (i, step) in plan.steps.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, step));
    }
    if let Some(tip) = plan.suggestions.first() {
        out.push_str(&format!("\n💡 Tip: {tip}"));
    }
    out
}

fn local_plan() -> DatePlan {
    DatePlan {
        title: "Movie Night, Synced 🎬".to_string(),
        description: "A cozy long-distance movie date: same film, same snacks, \
                      same couch energy, two screens."
            .to_string(),
        steps: vec![
            "Pick a movie neither of us has seen".to_string(),
            "Get our matching snacks ready".to_string(),
            "Start a call and press play at the exact same second".to_string(),
            "Stay on the call after for the post-movie debrief".to_string(),
        ],
        suggestions: vec!["Pajamas are mandatory. House rules.".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_exact_format() {
        let plan = DatePlan {
            title: "T".into(),
            description: "D".into(),
            steps: vec!["A".into(), "B".into()],
            suggestions: vec!["S".into()],
        };
        assert_eq!(
            render(&plan),
            "T\n\nD\n\nHere's how we can do it:\n1. A\n2. B\n\n💡 Tip: S"
        );
    }

    #[test]
    fn test_render_without_suggestions() {
        let plan = DatePlan {
            title: "T".into(),
            description: "D".into(),
            steps: vec!["A".into()],
            suggestions: vec![],
        };
        assert_eq!(render(&plan), "T\n\nD\n\nHere's how we can do it:\n1. A\n");
    }

    #[test]
    fn test_plan_deserializes_without_suggestions_key() {
        let body = r#"{"title":"T","description":"D","steps":["A"]}"#;
        let plan: DatePlan = serde_json::from_str(body).unwrap();
        assert!(plan.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_rules_plan_renders() {
        let planner = DatePlanner::rules();
        let plan = planner.plan("plan a virtual date").await.unwrap();
        let rendered = render(&plan);
        assert!(rendered.contains("Here's how we can do it:"));
        assert!(rendered.contains("1. "));
        assert!(rendered.contains("💡 Tip:"));
    }
}
