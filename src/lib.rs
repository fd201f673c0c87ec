//! Local persistence layer for flashcard decks, their cards, and quiz results.
//!
//! The whole deck collection lives as one serialized JSON record under a
//! single configurable key in an asynchronous key-value store. Operations are
//! exposed by [`services::deck_service::DeckService`], which runs every
//! mutation as a serialized read-modify-write cycle over that record.

/// Deck store configuration loading.
pub mod config;
/// Storage backends and persisted entity definitions.
pub mod dao;
/// Errors surfaced by deck store operations.
pub mod error;
/// Deck persistence operations.
pub mod services;
