//! Question catalog — the ordered, read-only list of questions.

use std::collections::HashSet;
use std::path::Path;

use crate::error::CatalogError;

use super::model::{AnswerOption, OTHER_VALUE, Question};

/// An ordered, validated list of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    /// Build a catalog, checking ids are unique and select questions carry
    /// the options they need.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for q in &questions {
            if !seen.insert(q.id.as_str()) {
                return Err(CatalogError::DuplicateId(q.id.clone()));
            }
            if q.kind.is_select() && q.options.is_empty() {
                return Err(CatalogError::MissingOptions { id: q.id.clone() });
            }
            if q.has_other && q.option(OTHER_VALUE).is_none() {
                return Err(CatalogError::MissingOtherOption { id: q.id.clone() });
            }
        }

        Ok(Self { questions })
    }

    /// Parse a JSON array of questions.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Self::new(questions)
    }

    /// Load a JSON catalog from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            questions = catalog.len(),
            "Loaded question catalog"
        );
        Ok(catalog)
    }

    /// Number of questions, including the intro.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question at a step index.
    pub fn get(&self, step: usize) -> Option<&Question> {
        self.questions.get(step)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The built-in Hero Network onboarding questionnaire.
    pub fn hero_network() -> Self {
        let questions = vec![
            Question::single_select(
                "welcome",
                "Let's share your video stories",
                vec![AnswerOption::new("start", "Get started")],
            ),
            Question::text("name", "What's your name?")
                .with_placeholder("Jane Smith")
                .required(),
            Question::text("email", "What's your email address?")
                .with_placeholder("jane@company.com")
                .with_description("We'll send your content strategy here.")
                .required(),
            Question::text("company", "What's the name of your business?")
                .with_placeholder("Acme Coffee Roasters")
                .required(),
            Question::text("website", "What's your website?")
                .with_placeholder("https://example.com")
                .with_description("Optional, but it helps us learn about your brand."),
            Question::single_select(
                "role",
                "What best describes your role?",
                vec![
                    AnswerOption::new("owner", "Business owner / founder"),
                    AnswerOption::new("marketing", "Marketing lead"),
                    AnswerOption::new("agency", "Agency or consultant"),
                ],
            )
            .with_other("Something else")
            .required(),
            Question::single_select(
                "industry",
                "Which industry are you in?",
                vec![
                    AnswerOption::new("retail", "Retail & e-commerce"),
                    AnswerOption::new("hospitality", "Food & hospitality"),
                    AnswerOption::new("services", "Professional services"),
                    AnswerOption::new("health", "Health & wellness"),
                    AnswerOption::new("tech", "Technology"),
                ],
            )
            .with_other("Other")
            .required(),
            Question::multi_select(
                "goals",
                "What do you want video to do for you?",
                vec![
                    AnswerOption::new("awareness", "Grow brand awareness"),
                    AnswerOption::new("leads", "Generate leads"),
                    AnswerOption::new("social", "Build a social presence"),
                    AnswerOption::new("trust", "Showcase customer stories"),
                    AnswerOption::new("recruiting", "Attract new hires"),
                ],
            )
            .with_description("Pick as many as apply.")
            .required(),
            Question::single_select(
                "experience",
                "How much video have you produced before?",
                vec![
                    AnswerOption::new("none", "None yet"),
                    AnswerOption::new("some", "A few videos"),
                    AnswerOption::new("regular", "We publish regularly"),
                ],
            )
            .required(),
            Question::single_select(
                "cadence",
                "How often would you like to publish?",
                vec![
                    AnswerOption::new("weekly", "Weekly"),
                    AnswerOption::new("biweekly", "Every two weeks"),
                    AnswerOption::new("monthly", "Monthly"),
                    AnswerOption::new("unsure", "Not sure yet"),
                ],
            )
            .required(),
        ];
        Self { questions }
    }
}
