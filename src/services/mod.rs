/// Deck persistence operations over the key-value backend.
pub mod deck_service;
