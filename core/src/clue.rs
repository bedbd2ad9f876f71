use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Points awarded when a clue's answer is revealed.
pub const POINTS_PER_CLUE: u32 = 100;

/// How far a clue has been revealed, always in declaration order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RevealState {
    Hidden,
    QuestionShown,
    AnswerShown,
}

impl RevealState {
    pub const fn is_answered(self) -> bool {
        matches!(self, Self::AnswerShown)
    }

    /// The state after one click, `None` once the answer is showing.
    pub const fn next(self) -> Option<Self> {
        use RevealState::*;
        match self {
            Hidden => Some(QuestionShown),
            QuestionShown => Some(AnswerShown),
            AnswerShown => None,
        }
    }
}

impl Default for RevealState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// A question and its answer, revealed one step per click.
///
/// ```compile_fail
/// let mut clue = trivia_core::Clue::new("Q", "A");
/// clue.state = trivia_core::RevealState::Hidden;
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    question: String,
    answer: String,
    state: RevealState,
}

impl Clue {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            state: RevealState::Hidden,
        }
    }

    pub(crate) fn with_state(
        question: impl Into<String>,
        answer: impl Into<String>,
        state: RevealState,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            state,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub const fn state(&self) -> RevealState {
        self.state
    }

    pub(crate) fn advance(&mut self) -> RevealOutcome {
        use RevealState::*;
        match self.state.next() {
            None => RevealOutcome::NoChange,
            Some(next) => {
                self.state = next;
                match next {
                    QuestionShown => RevealOutcome::QuestionShown,
                    AnswerShown => RevealOutcome::AnswerShown {
                        points: POINTS_PER_CLUE,
                    },
                    Hidden => unreachable!("reveal never goes back to hidden"),
                }
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    QuestionShown,
    AnswerShown { points: u32 },
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn points(self) -> u32 {
        match self {
            Self::AnswerShown { points } => points,
            _ => 0,
        }
    }
}
