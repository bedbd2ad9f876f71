use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::Deserialize;

use crate::*;

/// Key the whole game snapshot is saved under.
pub const SNAPSHOT_KEY: &str = "jeopardyGameState";

/// Prefix of per-clue records written by older versions of the game.
pub const LEGACY_CLUE_PREFIX: &str = "clue-";

/// Durable string key/value storage, such as the browser's `localStorage`.
pub trait SnapshotStorage {
    fn load(&self, key: &str) -> Option<String>;

    fn save(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str);

    fn keys(&self) -> Vec<String>;
}

/// In-memory storage, used natively and in tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SnapshotStorage for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// Owns the current game and keeps its snapshot in `storage` up to date.
#[derive(Debug)]
pub struct GameStore<S> {
    storage: S,
    model: Option<GameModel>,
}

impl<S: SnapshotStorage> GameStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            model: None,
        }
    }

    pub fn model(&self) -> Option<&GameModel> {
        self.model.as_ref()
    }

    pub fn has_game(&self) -> bool {
        self.model.is_some()
    }

    pub fn score(&self) -> u32 {
        self.model.as_ref().map_or(0, GameModel::score)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Installs a freshly built board, discarding any previous score and progress.
    pub fn replace(&mut self, model: GameModel) -> Result<()> {
        self.model = Some(model);
        self.persist()
    }

    pub fn reveal_next(&mut self, pos: CluePos) -> Result<RevealOutcome> {
        let model = self.model.as_mut().ok_or(GameError::InvalidPosition)?;
        let outcome = model.reveal_next(pos)?;

        if outcome.has_update() {
            if matches!(outcome, RevealOutcome::AnswerShown { .. })
                && model.category_fully_revealed(pos.0)
            {
                log::info!("Category {} marked as viewed.", pos.0);
            }
            if let Err(err) = self.persist() {
                log::error!("Could not save game: {}", err);
            }
        }

        Ok(outcome)
    }

    pub fn category_fully_revealed(&self, cat_index: usize) -> bool {
        self.model
            .as_ref()
            .is_some_and(|model| model.category_fully_revealed(cat_index))
    }

    pub fn persist(&mut self) -> Result<()> {
        let Some(model) = self.model.as_ref() else {
            self.storage.remove(SNAPSHOT_KEY);
            return Ok(());
        };

        let json =
            serde_json::to_string(model).map_err(|err| GameError::Serialize(err.to_string()))?;
        self.storage.save(SNAPSHOT_KEY, &json)
    }

    /// Loads the saved game, if there is a usable one.
    ///
    /// Missing or unreadable snapshots are treated the same: there is no game to continue. Clues
    /// saved without a reveal state take it from their legacy `clue-*` record, after which the
    /// snapshot is rewritten and those records are dropped.
    pub fn restore(&mut self) -> Option<&GameModel> {
        let (model, upgraded) = match self.load_snapshot() {
            Some((model, upgraded)) => (Some(model), upgraded),
            None => (None, false),
        };
        self.model = model;

        if upgraded {
            log::info!("Upgraded saved game from per-clue records");
            match self.persist() {
                Ok(()) => self.remove_legacy_records(),
                Err(err) => log::error!("Could not save upgraded game: {}", err),
            }
        }
        self.model.as_ref()
    }

    fn load_snapshot(&self) -> Option<(GameModel, bool)> {
        let json = self.storage.load(SNAPSHOT_KEY)?;
        match serde_json::from_str::<StoredGame>(&json) {
            Ok(stored) if stored.categories.is_empty() => {
                log::warn!("Saved game has no categories, ignoring it");
                None
            }
            Ok(stored) => {
                let upgraded = stored.needs_upgrade();
                let model = self.upgrade(stored);
                log::debug!("restored game with score {}", model.score());
                Some((model, upgraded))
            }
            Err(err) => {
                log::warn!("Saved game is corrupt, ignoring it: {}", err);
                None
            }
        }
    }

    fn upgrade(&self, stored: StoredGame) -> GameModel {
        let categories = stored
            .categories
            .into_iter()
            .enumerate()
            .map(|(cat_index, category)| {
                let clues = category
                    .clues
                    .into_iter()
                    .enumerate()
                    .map(|(clue_index, clue)| {
                        let state = clue.state.unwrap_or_else(|| {
                            self.legacy_clue_state((cat_index, clue_index), &clue.question)
                        });
                        Clue::with_state(clue.question, clue.answer, state)
                    })
                    .collect();
                Category::new(category.title, clues)
            })
            .collect();
        GameModel::with_score(categories, stored.score)
    }

    fn legacy_clue_state(&self, (cat_index, clue_index): CluePos, question: &str) -> RevealState {
        let key = format!("{}{}-{}", LEGACY_CLUE_PREFIX, cat_index, clue_index);
        let Some(json) = self.storage.load(&key) else {
            return RevealState::Hidden;
        };

        match serde_json::from_str::<ClueRecord>(&json) {
            Ok(record) if record.disabled => RevealState::AnswerShown,
            Ok(record) if record.text == question => RevealState::QuestionShown,
            Ok(_) => RevealState::Hidden,
            Err(err) => {
                log::warn!("Ignoring unreadable {}: {}", key, err);
                RevealState::Hidden
            }
        }
    }

    fn remove_legacy_records(&mut self) {
        for key in self.storage.keys() {
            if key.starts_with(LEGACY_CLUE_PREFIX) {
                self.storage.remove(&key);
            }
        }
    }

    /// Forgets the current game and everything saved for it. Does not build a new board.
    pub fn reset(&mut self) {
        self.model = None;
        self.storage.remove(SNAPSHOT_KEY);
        self.remove_legacy_records();
    }
}

/// Snapshot layout as read back, where clues from older saves may lack a state.
#[derive(Deserialize)]
struct StoredGame {
    categories: Vec<StoredCategory>,
    score: u32,
}

impl StoredGame {
    fn needs_upgrade(&self) -> bool {
        self.categories
            .iter()
            .flat_map(|category| &category.clues)
            .any(|clue| clue.state.is_none())
    }
}

#[derive(Deserialize)]
struct StoredCategory {
    title: String,
    clues: Vec<StoredClue>,
}

#[derive(Deserialize)]
struct StoredClue {
    question: String,
    answer: String,
    #[serde(default)]
    state: Option<RevealState>,
}
