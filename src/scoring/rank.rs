//! Dense ranking and deterministic tie-breaking

use std::cmp::Ordering;

/// Dense ranks for precomputed scores, aligned with the input.
///
/// Distinct scores are ranked ascending from 1, so the best item carries the largest
/// rank. With `degrees`, each group of equal scores is ordered by descending degree
/// and the rank advances every time the degree changes within the group.
/// Negative and positive zero are the same score.
pub fn dense_ranks(scores: &[f64], degrees: Option<&[usize]>) -> Vec<usize> {
    let scores: Vec<f64> = scores.iter().copied().map(unsigned_zero).collect();
    let degree_of = |i: usize| degrees.map_or(0, |d| d[i]);

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[a]
            .total_cmp(&scores[b])
            .then_with(|| degree_of(b).cmp(&degree_of(a)))
    });

    let mut ranks = vec![0; scores.len()];
    let mut rank = 0;
    let mut previous: Option<(f64, usize)> = None;

    for i in order {
        let key = (scores[i], degree_of(i));
        match previous {
            Some((score, degree)) if score.total_cmp(&key.0).is_eq() && degree == key.1 => {}
            _ => rank += 1,
        }
        ranks[i] = rank;
        previous = Some(key);
    }

    ranks
}

/// Dense ranks of `items` under `score`; ties share a rank
pub fn rank<T, S>(items: &[T], score: S) -> Vec<usize>
where
    S: Fn(&T) -> f64,
{
    let scores: Vec<f64> = items.iter().map(score).collect();
    dense_ranks(&scores, None)
}

/// Dense ranks of `items` under `score`, splitting ties by descending `degree`
pub fn rank_with_tiebreak<T, S, D>(items: &[T], score: S, degree: D) -> Vec<usize>
where
    S: Fn(&T) -> f64,
    D: Fn(&T) -> usize,
{
    let scores: Vec<f64> = items.iter().map(score).collect();
    let degrees: Vec<usize> = items.iter().map(degree).collect();
    dense_ranks(&scores, Some(&degrees))
}

/// Index of the best item by score, then by degree. Complete ties go to the
/// earliest index, which callers keep in graph order.
pub fn tiebreak(scores: &[f64], degrees: &[usize]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for i in 0..scores.len().min(degrees.len()) {
        best = match best {
            None => Some(i),
            Some(b) => {
                let ordering = unsigned_zero(scores[i])
                    .total_cmp(&unsigned_zero(scores[b]))
                    .then(degrees[i].cmp(&degrees[b]));
                if ordering == Ordering::Greater {
                    Some(i)
                } else {
                    Some(b)
                }
            }
        };
    }
    best
}

// `total_cmp` orders -0.0 below 0.0; an empty f64 sum is -0.0
fn unsigned_zero(score: f64) -> f64 {
    score + 0.0
}
