use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Insertion-ordered mapping from deck title to deck, exactly as persisted.
///
/// The collection serializes to one JSON object keyed by title; `IndexMap`
/// keeps the titles in the order they were first saved across round-trips.
pub type DeckCollection = IndexMap<String, DeckEntity>;

/// Aggregate deck entity persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckEntity {
    /// Deck title, duplicated from the collection key.
    pub title: String,
    /// Cards in insertion order.
    pub questions: Vec<CardEntity>,
    /// Best quiz results kept for this deck, highest points first.
    pub quizzes: Vec<QuizEntity>,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl DeckEntity {
    /// Build a fresh deck with no cards and no quiz history.
    pub fn new(title: impl Into<String>, timestamp: i64) -> Self {
        Self {
            title: title.into(),
            questions: Vec::new(),
            quizzes: Vec::new(),
            timestamp,
        }
    }
}

/// Single flashcard inside a deck.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardEntity {
    /// Stable identifier, used as the removal key.
    pub id: Uuid,
    /// Question shown on the front of the card.
    pub question: String,
    /// Expected answer on the back of the card.
    pub answer: String,
}

impl CardEntity {
    /// Build a card with a freshly generated identifier.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Result of one quiz run over a deck.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizEntity {
    /// Number of correctly answered cards; the ranking key.
    pub points: u32,
    /// Number of cards the quiz covered.
    pub total: u32,
    /// Completion time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}
