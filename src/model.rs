//! Input records describing a flashcard deck.
//!
//! The types mirror the records handed over by the upstream data layer.  Every
//! textual field is optional: the layout engine treats an absent value as an
//! empty string (or a fixed default title) instead of reporting an error.  The
//! bookkeeping fields (`id`, timestamps, tags, ...) are carried along so a deck
//! can be deserialized verbatim, but they never influence the layout.

use serde::{Deserialize, Deserializer, Serialize};

/// A single study card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Flashcard {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    topic_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    answer: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    review_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_reviewed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deleted_at: Option<String>,
}

impl Flashcard {
    /// Creates a card with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier assigned by the upstream store.
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Identifier of the topic the card belongs to.
    pub fn topic_id(&self) -> Option<u64> {
        self.topic_id
    }

    /// Returns the card title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the question text, if any.
    pub fn question(&self) -> Option<&str> {
        self.question.as_deref()
    }

    /// Returns the answer text, if any.
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn difficulty(&self) -> Option<&str> {
        self.difficulty.as_deref()
    }

    pub fn review_count(&self) -> Option<u32> {
        self.review_count
    }

    /// Timestamp of the last review as supplied upstream.
    pub fn last_reviewed(&self) -> Option<&str> {
        self.last_reviewed.as_deref()
    }

    pub fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }

    pub fn updated_at(&self) -> Option<&str> {
        self.updated_at.as_deref()
    }

    pub fn deleted_at(&self) -> Option<&str> {
        self.deleted_at.as_deref()
    }

    /// Sets the identifier and returns the updated card.
    pub fn with_id(mut self, id: impl Into<Option<u64>>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the topic identifier and returns the updated card.
    pub fn with_topic_id(mut self, topic_id: impl Into<Option<u64>>) -> Self {
        self.topic_id = topic_id.into();
        self
    }

    /// Sets the title and returns the updated card.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the question and returns the updated card.
    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    /// Sets the answer and returns the updated card.
    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = Some(answer.into());
        self
    }

    /// Appends a tag and returns the updated card.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Sets the difficulty label and returns the updated card.
    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = Some(difficulty.into());
        self
    }
}

/// The topic a deck is generated for.
///
/// `description` accepts any scalar JSON value when deserialized; numbers and
/// booleans are stored in their textual form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Topic {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "stringified"
    )]
    description: Option<String>,
}

impl Topic {
    /// Creates a topic with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Returns the topic name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the topic description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Sets the identifier and returns the updated topic.
    pub fn with_id(mut self, id: impl Into<Option<u64>>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the name and returns the updated topic.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the description from anything with a textual form.
    pub fn with_description(mut self, description: impl ToString) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

fn stringified<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        Value::Number(number) => Ok(Some(number.to_string())),
        other => Err(D::Error::custom(format!(
            "expected a scalar topic description, found {other}"
        ))),
    }
}

/// A topic together with its cards, as read from a deck file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deck {
    pub topic: Topic,
    pub flashcards: Vec<Flashcard>,
}

impl Deck {
    /// Parses a deck from its JSON representation.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}
