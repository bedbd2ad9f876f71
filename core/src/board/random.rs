use rand::seq::SliceRandom;

use super::*;

/// Uniformly shuffles the candidates and keeps the first `count` ids.
///
/// Asking for more categories than exist is not an error, every candidate is used instead.
pub fn select_category_ids<R: Rng + ?Sized>(
    candidates: &[CategorySummary],
    count: usize,
    rng: &mut R,
) -> Vec<CategoryId> {
    if candidates.len() < count {
        log::warn!(
            "Not enough categories, requested {} but only {} available",
            count,
            candidates.len()
        );
    }

    let mut ids: Vec<CategoryId> = candidates.iter().map(|summary| summary.id).collect();
    ids.shuffle(rng);
    ids.truncate(count);
    ids
}

/// Picks `count` clues without replacement, or all of them when there are fewer.
pub fn select_clues<T, R: Rng + ?Sized>(mut clues: Vec<T>, count: usize, rng: &mut R) -> Vec<T> {
    if clues.len() < count {
        log::warn!(
            "Not enough clues, requested {} but only {} available",
            count,
            clues.len()
        );
    }

    clues.shuffle(rng);
    clues.truncate(count);
    clues
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn summaries(ids: &[CategoryId]) -> Vec<CategorySummary> {
        ids.iter()
            .map(|&id| CategorySummary {
                id,
                title: String::new(),
            })
            .collect()
    }

    #[test]
    fn selected_ids_come_from_candidates_without_repeats() {
        let candidates = summaries(&[10, 20, 30, 40, 50, 60, 70, 80]);
        let mut rng = StdRng::seed_from_u64(1);

        let mut ids = select_category_ids(&candidates, 6, &mut rng);

        assert_eq!(ids.len(), 6);
        assert!(ids.iter().all(|id| candidates.iter().any(|c| c.id == *id)));
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn too_few_candidates_returns_all_of_them() {
        let candidates = summaries(&[1, 2, 3]);
        let mut rng = StdRng::seed_from_u64(1);

        let mut ids = select_category_ids(&candidates, 6, &mut rng);
        ids.sort();

        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn clue_selection_is_without_replacement() {
        let mut rng = StdRng::seed_from_u64(3);

        let mut picked = select_clues((0..20).collect(), 5, &mut rng);
        picked.sort();
        picked.dedup();

        assert_eq!(picked.len(), 5);
        assert!(picked.iter().all(|&n| n < 20));
    }

    #[test]
    fn same_seed_gives_same_selection() {
        let clues: Vec<u32> = (0..50).collect();

        let a = select_clues(clues.clone(), 5, &mut StdRng::seed_from_u64(42));
        let b = select_clues(clues, 5, &mut StdRng::seed_from_u64(42));

        assert_eq!(a, b);
    }
}
