//! Greedy nearest-neighbour tour.
//!
//! O(n²) per call, which is why the orderer feeds it bounded batches rather
//! than whole segments.

/// Visit order of `points` by greedy nearest neighbour, starting at index 0.
///
/// Each step moves to the closest unvisited point. Equal distances resolve
/// to the lowest index, so the result is fully deterministic. `distance` may
/// be any monotone metric; squared Euclidean works and skips the `sqrt`.
///
/// ```
/// use perceptual_color::nearest_neighbour_order;
///
/// let points = [0.0, 10.0, 1.0, 9.0];
/// let order = nearest_neighbour_order(&points, |a: &f64, b: &f64| (a - b).abs());
/// assert_eq!(order, vec![0, 2, 3, 1]);
/// ```
pub fn nearest_neighbour_order<P, F>(points: &[P], mut distance: F) -> Vec<usize>
where
    F: FnMut(&P, &P) -> f64,
{
    let n = points.len();
    let mut order = Vec::with_capacity(n);
    if n == 0 {
        return order;
    }

    let mut visited = vec![false; n];
    let mut current = 0;
    visited[0] = true;
    order.push(0);

    for _ in 1..n {
        let mut best: Option<(usize, f64)> = None;
        for (candidate, point) in points.iter().enumerate() {
            if visited[candidate] {
                continue;
            }
            let d = distance(&points[current], point);
            match best {
                // Strict comparison keeps the lowest index on ties
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((candidate, d)),
            }
        }

        let Some((next, _)) = best else { break };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    order
}

/// `points` reordered along the greedy nearest-neighbour tour.
pub fn nearest_neighbour_path<P, F>(points: &[P], distance: F) -> Vec<P>
where
    P: Copy,
    F: FnMut(&P, &P) -> f64,
{
    nearest_neighbour_order(points, distance)
        .into_iter()
        .map(|i| points[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abs_diff(a: &f64, b: &f64) -> f64 {
        (a - b).abs()
    }

    #[test]
    fn test_empty_and_single() {
        assert!(nearest_neighbour_order::<f64, _>(&[], abs_diff).is_empty());
        assert_eq!(nearest_neighbour_order(&[3.0], abs_diff), vec![0]);
    }

    #[test]
    fn test_ties_pick_lowest_index() {
        // From 0.0 both 1.0 and -1.0 are at distance 1
        let points = [0.0, 1.0, -1.0];
        assert_eq!(nearest_neighbour_order(&points, abs_diff), vec![0, 1, 2]);

        let points = [0.0, -1.0, 1.0];
        assert_eq!(nearest_neighbour_order(&points, abs_diff), vec![0, 1, 2]);
    }

    #[test]
    fn test_duplicates_are_all_visited() {
        let points = [5.0, 5.0, 5.0, 5.0];
        assert_eq!(nearest_neighbour_order(&points, abs_diff), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_path_is_permutation() {
        let points = [4.0, 0.0, 3.0, 1.0, 2.0];
        let path = nearest_neighbour_path(&points, abs_diff);
        assert_eq!(path, vec![4.0, 3.0, 2.0, 1.0, 0.0]);
    }
}
