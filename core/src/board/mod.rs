use alloc::string::String;
use alloc::vec::Vec;
use futures_util::future::try_join_all;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

/// Identifier the remote source uses for a category.
pub type CategoryId = u64;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub categories: usize,
    pub clues_per_category: usize,
    /// How many candidate categories to ask the source for before choosing.
    pub candidate_pool: usize,
}

impl BoardConfig {
    pub const DEFAULT: Self = Self::new_unchecked(6, 5, 100);

    pub const fn new_unchecked(
        categories: usize,
        clues_per_category: usize,
        candidate_pool: usize,
    ) -> Self {
        Self {
            categories,
            clues_per_category,
            candidate_pool,
        }
    }

    pub fn new(categories: usize, clues_per_category: usize, candidate_pool: usize) -> Self {
        let categories = categories.max(1);
        let clues_per_category = clues_per_category.max(1);
        let candidate_pool = candidate_pool.max(categories);
        Self::new_unchecked(categories, clues_per_category, candidate_pool)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Entry of the category listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    #[serde(default)]
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteClue {
    pub question: String,
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCategory {
    pub title: String,
    #[serde(default)]
    pub clues: Vec<RemoteClue>,
}

/// Where categories and their clues come from.
#[allow(async_fn_in_trait)]
pub trait CategorySource {
    async fn list_categories(&self, count: usize) -> Result<Vec<CategorySummary>>;

    async fn fetch_category(&self, id: CategoryId) -> Result<RemoteCategory>;
}

/// Fetches one category and keeps a random selection of its clues, all hidden.
pub async fn build_category<S, R>(
    source: &S,
    id: CategoryId,
    clues_per_category: usize,
    rng: &mut R,
) -> Result<Category>
where
    S: CategorySource + ?Sized,
    R: Rng + ?Sized,
{
    let remote = source.fetch_category(id).await?;
    Ok(category_from_remote(remote, clues_per_category, rng))
}

/// Builds a whole new board.
///
/// Category contents are fetched concurrently and the first failure aborts the build, so a board
/// is either complete or not produced at all.
pub async fn build_board<S, R>(source: &S, config: &BoardConfig, rng: &mut R) -> Result<GameModel>
where
    S: CategorySource + ?Sized,
    R: Rng + ?Sized,
{
    let candidates = source.list_categories(config.candidate_pool).await?;
    let ids = select_category_ids(&candidates, config.categories, rng);
    if ids.is_empty() {
        return Err(GameError::NoCategories);
    }
    log::debug!("selected categories: {:?}", ids);

    let remotes = try_join_all(ids.iter().map(|&id| source.fetch_category(id))).await?;

    let categories = remotes
        .into_iter()
        .map(|remote| category_from_remote(remote, config.clues_per_category, rng))
        .collect();
    Ok(GameModel::new(categories))
}

fn category_from_remote<R: Rng + ?Sized>(
    remote: RemoteCategory,
    clues_per_category: usize,
    rng: &mut R,
) -> Category {
    let RemoteCategory { title, clues } = remote;
    let clues = select_clues(clues, clues_per_category, rng)
        .into_iter()
        .map(|RemoteClue { question, answer }| Clue::new(question, answer))
        .collect();
    Category::new(title, clues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use alloc::format;
    use alloc::string::ToString;
    use alloc::vec;
    use core::cell::Cell;
    use futures_executor::block_on;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[derive(Default)]
    struct FakeSource {
        categories: BTreeMap<CategoryId, RemoteCategory>,
        failing: Option<CategoryId>,
        fetches: Cell<usize>,
    }

    impl FakeSource {
        fn with_categories(count: CategoryId, clues: usize) -> Self {
            let categories = (0..count)
                .map(|id| {
                    let clues = (0..clues)
                        .map(|n| RemoteClue {
                            question: format!("Q{id}-{n}"),
                            answer: format!("A{id}-{n}"),
                        })
                        .collect();
                    let category = RemoteCategory {
                        title: format!("Category {id}"),
                        clues,
                    };
                    (id, category)
                })
                .collect();
            Self {
                categories,
                ..Default::default()
            }
        }
    }

    impl CategorySource for FakeSource {
        async fn list_categories(&self, count: usize) -> Result<Vec<CategorySummary>> {
            Ok(self
                .categories
                .iter()
                .take(count)
                .map(|(&id, category)| CategorySummary {
                    id,
                    title: category.title.clone(),
                })
                .collect())
        }

        async fn fetch_category(&self, id: CategoryId) -> Result<RemoteCategory> {
            self.fetches.set(self.fetches.get() + 1);
            if self.failing == Some(id) {
                return Err(GameError::Source(format!("category {id} unavailable")));
            }
            self.categories
                .get(&id)
                .cloned()
                .ok_or_else(|| GameError::Source(format!("unknown category {id}")))
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn board_has_requested_shape_with_hidden_clues() {
        let source = FakeSource::with_categories(10, 8);

        let model = block_on(build_board(&source, &BoardConfig::DEFAULT, &mut rng())).unwrap();

        assert_eq!(model.score(), 0);
        assert_eq!(model.categories().len(), 6);
        for category in model.categories() {
            assert_eq!(category.clues().len(), 5);
            assert!(category.clues().iter().all(|c| c.state() == RevealState::Hidden));
        }
        assert_eq!(source.fetches.get(), 6);
    }

    #[test]
    fn board_categories_are_distinct() {
        let source = FakeSource::with_categories(10, 5);

        let model = block_on(build_board(&source, &BoardConfig::DEFAULT, &mut rng())).unwrap();

        let mut titles: Vec<_> = model.categories().iter().map(|c| c.title().to_string()).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), 6);
    }

    #[test]
    fn short_candidate_list_uses_everything_available() {
        let source = FakeSource::with_categories(3, 5);

        let model = block_on(build_board(&source, &BoardConfig::DEFAULT, &mut rng())).unwrap();

        assert_eq!(model.categories().len(), 3);
    }

    #[test]
    fn short_clue_list_uses_every_clue() {
        let source = FakeSource::with_categories(1, 2);

        let category = block_on(build_category(&source, 0, 5, &mut rng())).unwrap();

        assert_eq!(category.title(), "Category 0");
        assert_eq!(category.clues().len(), 2);
    }

    #[test]
    fn single_fetch_failure_aborts_the_board() {
        let mut source = FakeSource::with_categories(6, 5);
        source.failing = Some(4);

        let result = block_on(build_board(&source, &BoardConfig::DEFAULT, &mut rng()));

        assert!(matches!(result, Err(GameError::Source(_))));
    }

    #[test]
    fn empty_listing_is_reported() {
        let source = FakeSource::default();

        let result = block_on(build_board(&source, &BoardConfig::DEFAULT, &mut rng()));

        assert_eq!(result, Err(GameError::NoCategories));
        assert_eq!(source.fetches.get(), 0);
    }

    #[test]
    fn config_is_clamped_to_something_playable() {
        let config = BoardConfig::new(0, 0, 0);

        assert_eq!(config, BoardConfig::new_unchecked(1, 1, 1));
        assert_eq!(BoardConfig::default(), BoardConfig::new_unchecked(6, 5, 100));
    }

    #[test]
    fn summaries_ignore_unknown_fields() {
        let json = r#"[{"id": 2, "title": "baseball", "clues_count": 5}]"#;

        let summaries: Vec<CategorySummary> = serde_json::from_str(json).unwrap();

        assert_eq!(
            summaries,
            vec![CategorySummary {
                id: 2,
                title: "baseball".into()
            }]
        );
    }

    #[test]
    fn remote_category_keeps_only_question_and_answer() {
        let json = r#"{
            "id": 2, "title": "baseball", "clues_count": 1,
            "clues": [{"id": 11, "answer": "Babe Ruth", "question": "The Sultan of Swat", "value": 200, "category_id": 2}]
        }"#;

        let remote: RemoteCategory = serde_json::from_str(json).unwrap();

        assert_eq!(remote.title, "baseball");
        assert_eq!(
            remote.clues,
            vec![RemoteClue {
                question: "The Sultan of Swat".into(),
                answer: "Babe Ruth".into()
            }]
        );
    }
}
