use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a clue cell shows before it is clicked.
pub const HIDDEN_FACE: &str = "?";

/// Visible side of one clue cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClueFace<'a> {
    pub text: &'a str,
    pub interactive: bool,
}

impl<'a> ClueFace<'a> {
    pub fn of(clue: &'a Clue) -> Self {
        use RevealState::*;
        let text = match clue.state() {
            Hidden => HIDDEN_FACE,
            QuestionShown => clue.question(),
            AnswerShown => clue.answer(),
        };
        Self {
            text,
            interactive: !clue.state().is_answered(),
        }
    }

    pub fn record(self) -> ClueRecord {
        ClueRecord {
            text: self.text.into(),
            disabled: !self.interactive,
        }
    }
}

/// Per-clue `{text, disabled}` record, derived from the model instead of stored beside it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueRecord {
    pub text: String,
    pub disabled: bool,
}

impl GameModel {
    pub fn clue_record(&self, pos: CluePos) -> Option<ClueRecord> {
        self.clue(pos).map(|clue| ClueFace::of(clue).record())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnView<'a> {
    pub title: &'a str,
    pub completed: bool,
    pub clues: Vec<ClueFace<'a>>,
}

/// Projects the model onto board columns, one per category in board order.
pub fn board_view(model: &GameModel) -> Vec<ColumnView<'_>> {
    model
        .categories()
        .iter()
        .map(|category| ColumnView {
            title: category.title(),
            completed: category.is_fully_revealed(),
            clues: category.clues().iter().map(ClueFace::of).collect(),
        })
        .collect()
}

pub fn score_label(score: u32) -> String {
    format!("Score: {}", score)
}
