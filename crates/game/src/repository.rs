//! Storage of game sessions.

use std::{collections::HashMap, sync::{PoisonError, RwLock}};

use crate::state::GameState;

/// Storage of game sessions.
pub trait GameRepository: Send + Sync {
    /// Save or replace a game.
    fn save(&self, state: GameState);

    /// Get a copy of a game by its ID.
    fn get(&self, id: &str) -> Option<GameState>;

    /// Remove a game.
    fn delete(&self, id: &str);

    /// Get copies of all games.
    fn list_all(&self) -> Vec<GameState>;

    /// Number of stored games.
    fn count(&self) -> usize;

    fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}

/// Repository keeping games in memory. Games are lost when the server stops.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    games: RwLock<HashMap<String, GameState>>,
}

impl InMemoryRepository {
    pub fn new() -> InMemoryRepository {
        InMemoryRepository::default()
    }
}

impl GameRepository for InMemoryRepository {
    fn save(&self, state: GameState) {
        self.games.write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(state.id.clone(), state);
    }

    fn get(&self, id: &str) -> Option<GameState> {
        self.games.read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    fn delete(&self, id: &str) {
        self.games.write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
    }

    fn list_all(&self) -> Vec<GameState> {
        self.games.read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    fn count(&self) -> usize {
        self.games.read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn contains(&self, id: &str) -> bool {
        self.games.read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }
}
