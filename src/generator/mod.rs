//! Markdown document generation through a chat-completion endpoint.
//!
//! A new project can receive four planning documents. Each [`DocumentKind`]
//! pairs a fixed system prompt with a fixed file name, and a
//! [`DocumentGenerator`] turns an idea into the document text.
//! [`generate_with_policy`] applies the configured [`ErrorPolicy`] so callers
//! either get a placeholder or the error itself.

pub mod openrouter;

pub use openrouter::OpenRouterClient;

use async_trait::async_trait;
use std::convert::Infallible;

use crate::errors::GenerateError;
use crate::flo_config::ErrorPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Concept,
    Requirements,
    Design,
    Testing,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Concept,
        DocumentKind::Requirements,
        DocumentKind::Design,
        DocumentKind::Testing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Concept => "concept",
            DocumentKind::Requirements => "requirements",
            DocumentKind::Design => "design",
            DocumentKind::Testing => "testing",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::Concept => "Concept",
            DocumentKind::Requirements => "Requirements",
            DocumentKind::Design => "Design",
            DocumentKind::Testing => "Testing",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            DocumentKind::Concept => "concept.md",
            DocumentKind::Requirements => "requirements.md",
            DocumentKind::Design => "design.md",
            DocumentKind::Testing => "testing.md",
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            DocumentKind::Concept => {
                "You are a technical project-planning assistant. Turn the following app \
                 description into a detailed concept covering requirements, user roles, \
                 feature scope, recommended languages and libraries, data models and a \
                 rough project plan. Answer in Markdown with headings and lists."
            }
            DocumentKind::Requirements => {
                "You are a requirements engineer. Turn the following app idea into a \
                 detailed list of requirements: clear user stories, edge cases, acceptance \
                 criteria and technical constraints. Answer in Markdown and use tables \
                 where they help."
            }
            DocumentKind::Design => {
                "You are a software architect. Produce an architectural design for the \
                 following idea: the main components, their interfaces, data flows and \
                 storage structures. Answer in Markdown and add ASCII or PlantUML \
                 diagrams where useful."
            }
            DocumentKind::Testing => {
                "You are a QA engineer. Write a test plan for the following app listing \
                 unit, integration, performance, security and usability tests, with \
                 sample test data and expected results. Answer in Markdown."
            }
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown names fall back to [`DocumentKind::Concept`].
impl std::str::FromStr for DocumentKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "requirements" => DocumentKind::Requirements,
            "design" => DocumentKind::Design,
            "testing" => DocumentKind::Testing,
            _ => DocumentKind::Concept,
        })
    }
}

#[async_trait]
pub trait DocumentGenerator: Send + Sync {
    /// Produce the Markdown text of one document for `idea`.
    async fn generate(&self, idea: &str, kind: DocumentKind) -> Result<String, GenerateError>;
}

/// Stand-in text written when generation fails under [`ErrorPolicy::Placeholder`].
pub fn placeholder(kind: DocumentKind, idea: &str) -> String {
    format!(
        "# {}\n\n_Could not generate the {} document for: {}_\n",
        kind.title(),
        kind,
        idea.trim()
    )
}

/// Send `prompt` to the generator; a placeholder under
/// [`ErrorPolicy::Placeholder`] names the user's own `idea`.
pub async fn generate_with_policy(
    generator: &dyn DocumentGenerator,
    policy: ErrorPolicy,
    prompt: &str,
    idea: &str,
    kind: DocumentKind,
) -> Result<String, GenerateError> {
    match generator.generate(prompt, kind).await {
        Ok(text) => Ok(text),
        Err(e) => match policy {
            ErrorPolicy::Placeholder => {
                tracing::warn!("Generating {} failed, using placeholder: {}", kind, e);
                Ok(placeholder(kind, idea))
            }
            ErrorPolicy::Propagate => Err(e),
        },
    }
}

const FILLER_WORDS: [&str; 6] = ["please", "simply", "just", "create", "build", "make"];

/// Shorten an idea before sending it, to save tokens.
///
/// Drops filler words and asks the model for a five-point summary.
pub fn condense_idea(idea: &str) -> String {
    let short = idea
        .split_whitespace()
        .filter(|word| {
            let bare = word
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            !FILLER_WORDS.contains(&bare.as_str())
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("Summarize this idea in 5 bullet points: {}", short)
}
