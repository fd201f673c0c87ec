use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    config::DeckStoreConfig,
    dao::{
        kv_store::KeyValueStore,
        models::{CardEntity, DeckCollection, DeckEntity, QuizEntity},
    },
    error::ServiceError,
};

/// Number of quiz results kept per deck, the best ones by points.
const QUIZ_HISTORY_LIMIT: usize = 3;

/// Deck persistence API over an opaque key-value backend.
///
/// The whole deck collection is one serialized record under one storage key,
/// so every mutation is a full read-modify-write cycle. The internal write
/// gate serializes those cycles; two concurrent mutations can never lose each
/// other's update. Every write is awaited before the call returns, so a
/// successful result means the data is durable as far as the backend is
/// concerned.
pub struct DeckService {
    store: Arc<dyn KeyValueStore>,
    storage_key: String,
    write_gate: Mutex<()>,
}

impl DeckService {
    /// Build a service persisting under the key named by `config`.
    pub fn new(store: Arc<dyn KeyValueStore>, config: &DeckStoreConfig) -> Self {
        Self {
            store,
            storage_key: config.storage_key().to_owned(),
            write_gate: Mutex::new(()),
        }
    }

    /// Return every saved deck, in the order the titles were first saved.
    ///
    /// A store that was never written to reads back as an empty collection.
    pub async fn list_decks(&self) -> Result<DeckCollection, ServiceError> {
        self.load_collection().await
    }

    /// Return the deck saved under `title`, or `None` when there is none.
    ///
    /// Asking for an unknown title is not an error.
    pub async fn get_deck(&self, title: &str) -> Result<Option<DeckEntity>, ServiceError> {
        let decks = self.load_collection().await?;
        Ok(decks.get(title).cloned())
    }

    /// Create the deck named `title`, or destructively reset it if it exists.
    ///
    /// Re-saving an existing title drops its cards and quiz history; this is
    /// create/reset semantics, not a merge. Returns the freshly saved deck.
    pub async fn save_deck(
        &self,
        title: &str,
        timestamp: i64,
    ) -> Result<DeckEntity, ServiceError> {
        if title.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "deck title must not be empty".into(),
            ));
        }

        debug!(title, "saving deck");
        let title = title.to_owned();
        self.mutate(move |decks| {
            let deck = DeckEntity::new(title.clone(), timestamp);
            decks.insert(title, deck.clone());
            Ok(deck)
        })
        .await
    }

    /// Delete the deck named `title` from the collection.
    ///
    /// Removing a title that was never saved is a no-op success.
    pub async fn remove_deck(&self, title: &str) -> Result<(), ServiceError> {
        debug!(title, "removing deck");
        let title = title.to_owned();
        self.mutate(move |decks| {
            // shift_remove keeps the remaining titles in their original order.
            decks.shift_remove(&title);
            Ok(())
        })
        .await
    }

    /// Append `card` to the questions of the deck named `title`.
    ///
    /// Returns the updated deck, or [`ServiceError::DeckNotFound`] when no
    /// such deck exists; cards are never saved into an auto-created deck.
    pub async fn save_card(
        &self,
        title: &str,
        card: CardEntity,
    ) -> Result<DeckEntity, ServiceError> {
        debug!(title, card_id = %card.id, "appending card");
        let title = title.to_owned();
        self.mutate(move |decks| {
            let deck = existing_deck(decks, &title)?;
            deck.questions.push(card);
            Ok(deck.clone())
        })
        .await
    }

    /// Remove the card with identifier `id` from the deck named `title`.
    ///
    /// Filter semantics: an `id` not present in the deck leaves it unchanged.
    /// Returns the updated deck, or [`ServiceError::DeckNotFound`] when the
    /// deck itself is absent.
    pub async fn remove_card(&self, title: &str, id: Uuid) -> Result<DeckEntity, ServiceError> {
        debug!(title, card_id = %id, "removing card");
        let title = title.to_owned();
        self.mutate(move |decks| {
            let deck = existing_deck(decks, &title)?;
            deck.questions.retain(|card| card.id != id);
            Ok(deck.clone())
        })
        .await
    }

    /// Record a quiz result for the deck named `title`.
    ///
    /// Only the three highest-points results are retained, ordered by points
    /// descending; on equal points the earlier result stays ahead. Returns
    /// the updated deck, or [`ServiceError::DeckNotFound`] when the deck is
    /// absent.
    pub async fn save_quiz(
        &self,
        title: &str,
        quiz: QuizEntity,
    ) -> Result<DeckEntity, ServiceError> {
        debug!(title, points = quiz.points, "recording quiz result");
        let title = title.to_owned();
        self.mutate(move |decks| {
            let deck = existing_deck(decks, &title)?;
            deck.quizzes.push(quiz);
            // Stable sort, so ties keep their original relative order. At a
            // history of three a full resort is all the ranking needed.
            deck.quizzes.sort_by(|a, b| b.points.cmp(&a.points));
            deck.quizzes.truncate(QUIZ_HISTORY_LIMIT);
            Ok(deck.clone())
        })
        .await
    }

    /// Run one serialized read-modify-write cycle over the stored collection.
    ///
    /// The gate is held across the read and the write. When `apply` fails
    /// nothing is persisted.
    async fn mutate<T>(
        &self,
        apply: impl FnOnce(&mut DeckCollection) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        let _guard = self.write_gate.lock().await;
        let mut decks = self.load_collection().await?;
        let output = apply(&mut decks)?;
        self.persist_collection(&decks).await?;
        Ok(output)
    }

    async fn load_collection(&self) -> Result<DeckCollection, ServiceError> {
        match self.store.get(self.storage_key.clone()).await? {
            None => Ok(DeckCollection::default()),
            Some(payload) => serde_json::from_str(&payload).map_err(|source| {
                warn!(
                    key = %self.storage_key,
                    error = %source,
                    "persisted deck payload is not a valid collection"
                );
                ServiceError::Malformed(source)
            }),
        }
    }

    async fn persist_collection(&self, decks: &DeckCollection) -> Result<(), ServiceError> {
        let payload = serde_json::to_string(decks).map_err(ServiceError::Encode)?;
        self.store
            .set(self.storage_key.clone(), payload)
            .await
            .map_err(Into::into)
    }
}

/// Look up a deck that an operation requires to pre-exist.
fn existing_deck<'a>(
    decks: &'a mut DeckCollection,
    title: &str,
) -> Result<&'a mut DeckEntity, ServiceError> {
    decks.get_mut(title).ok_or_else(|| ServiceError::DeckNotFound {
        title: title.to_owned(),
    })
}
