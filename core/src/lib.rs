#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use clue::*;
pub use error::*;
pub use store::*;
pub use view::*;

mod board;
mod clue;
mod error;
mod store;
mod view;

/// Category index followed by clue index within that category.
pub type CluePos = (usize, usize);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    title: String,
    clues: Vec<Clue>,
}

impl Category {
    pub fn new(title: impl Into<String>, clues: Vec<Clue>) -> Self {
        Self {
            title: title.into(),
            clues,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.clues.iter().all(|clue| clue.state().is_answered())
    }
}

/// Everything needed to continue a game: the board and the running score.
///
/// Clue state and score only change through [`GameModel::reveal_next`].
///
/// ```compile_fail
/// let mut model = trivia_core::GameModel::default();
/// model.score = 500;
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameModel {
    categories: Vec<Category>,
    score: u32,
}

impl GameModel {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            score: 0,
        }
    }

    pub(crate) fn with_score(categories: Vec<Category>, score: u32) -> Self {
        Self { categories, score }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub const fn score(&self) -> u32 {
        self.score
    }

    pub fn clue(&self, (cat_index, clue_index): CluePos) -> Option<&Clue> {
        self.categories.get(cat_index)?.clues.get(clue_index)
    }

    pub fn category_fully_revealed(&self, cat_index: usize) -> bool {
        self.categories
            .get(cat_index)
            .is_some_and(Category::is_fully_revealed)
    }

    /// Advances the clue at `pos` by one step and credits any points earned.
    pub fn reveal_next(&mut self, (cat_index, clue_index): CluePos) -> Result<RevealOutcome> {
        let clue = self
            .categories
            .get_mut(cat_index)
            .and_then(|category| category.clues.get_mut(clue_index))
            .ok_or(GameError::InvalidPosition)?;

        let outcome = clue.advance();
        self.score = self.score.saturating_add(outcome.points());
        Ok(outcome)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
