use super::QuadTree;
use fxhash::FxHashSet;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QuadTreeStats {
    pub nodes: usize,
    pub leaves: usize,
    pub max_depth: usize,
    // Sum of every leaf's container length. Larger than the item count when items straddle
    // quadrant boundaries.
    pub stored_indices: usize,
    // Pairwise tests a leaf-local all-pairs pass will run.
    pub candidate_pairs: usize,
    // Distinct unordered index pairs among those tests.
    pub unique_candidate_pairs: usize,
}

impl QuadTreeStats {
    pub fn redundant_pairs(&self) -> usize {
        self.candidate_pairs - self.unique_candidate_pairs
    }
}

impl QuadTree {
    pub fn stats(&self) -> QuadTreeStats {
        let mut stats = QuadTreeStats::default();
        let mut unique = FxHashSet::default();

        for node in self.nodes() {
            stats.nodes += 1;
            stats.max_depth = stats.max_depth.max(node.depth);
            if !node.is_leaf() {
                continue;
            }

            let items = node.items();
            stats.leaves += 1;
            stats.stored_indices += items.len();
            for (i, &a) in items.iter().enumerate() {
                for &b in &items[i + 1..] {
                    stats.candidate_pairs += 1;
                    unique.insert((a.min(b), a.max(b)));
                }
            }
        }

        stats.unique_candidate_pairs = unique.len();
        stats
    }
}
