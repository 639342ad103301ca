//! Question and answer data models.

use serde::{Deserialize, Serialize};

/// Option value that reveals a free-text field on single-select questions.
pub const OTHER_VALUE: &str = "other";

/// Question id whose text answer is checked as an email address.
pub const EMAIL_QUESTION_ID: &str = "email";

/// Which input widget a question uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    Text,
    SingleSelect,
    MultiSelect,
}

impl QuestionKind {
    /// Whether the question is answered by picking options.
    pub fn is_select(&self) -> bool {
        matches!(self, Self::SingleSelect | Self::MultiSelect)
    }
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Text => "text",
            Self::SingleSelect => "single-select",
            Self::MultiSelect => "multi-select",
        };
        write!(f, "{s}")
    }
}

/// A selectable option: `value` is stored, `label` is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub value: String,
    pub label: String,
}

impl AnswerOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A single question definition. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<AnswerOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub has_other: bool,
    /// Carried in the data model; not enforced beyond the disabled Next button.
    #[serde(default)]
    pub required: bool,
}

impl Question {
    fn new(id: impl Into<String>, text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind,
            options: Vec::new(),
            placeholder: None,
            description: None,
            has_other: false,
            required: false,
        }
    }

    /// A free-text question.
    pub fn text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, text, QuestionKind::Text)
    }

    /// A pick-one question.
    pub fn single_select(
        id: impl Into<String>,
        text: impl Into<String>,
        options: Vec<AnswerOption>,
    ) -> Self {
        Self {
            options,
            ..Self::new(id, text, QuestionKind::SingleSelect)
        }
    }

    /// A pick-many question.
    pub fn multi_select(
        id: impl Into<String>,
        text: impl Into<String>,
        options: Vec<AnswerOption>,
    ) -> Self {
        Self {
            options,
            ..Self::new(id, text, QuestionKind::MultiSelect)
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append an `"other"` option and enable its free-text field.
    pub fn with_other(mut self, label: impl Into<String>) -> Self {
        self.options.push(AnswerOption::new(OTHER_VALUE, label));
        self.has_other = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Look up an option by its stored value.
    pub fn option(&self, value: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Whether the text answer is checked as an email address.
    pub fn validates_email(&self) -> bool {
        self.id == EMAIL_QUESTION_ID
    }

    /// Whether picking `value` reveals the free-text field instead of
    /// auto-advancing.
    pub fn is_other(&self, value: &str) -> bool {
        self.has_other && value == OTHER_VALUE
    }
}

/// A stored answer.
///
/// Text and single-select answers are a single string; multi-select answers
/// are the picked values in the order they were picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Multiple(Vec<String>),
}

impl Answer {
    /// The answer recorded when the intro is dismissed.
    pub fn empty() -> Self {
        Self::Single(String::new())
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(s) => Some(s),
            Self::Multiple(_) => None,
        }
    }

    pub fn as_multiple(&self) -> Option<&[String]> {
        match self {
            Self::Single(_) => None,
            Self::Multiple(v) => Some(v),
        }
    }
}

impl From<&str> for Answer {
    fn from(s: &str) -> Self {
        Self::Single(s.to_string())
    }
}

impl From<String> for Answer {
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}

impl From<Vec<String>> for Answer {
    fn from(v: Vec<String>) -> Self {
        Self::Multiple(v)
    }
}
