//! # hue-index
//!
//! Nearest-neighbor search over the reference palette.
//!
//! A balanced k-d tree is built once over the LAB coordinates of the
//! reference database and queried many times; it is never mutated in
//! place (the reference set is static, so "rebuild on change" never
//! happens in practice). The tree is `Sync` and shared across batch
//! workers without locking.
//!
//! # Exactness under perceptual metrics
//!
//! CIEDE2000 and CIE94 are not Euclidean, so k-d pruning bounds computed
//! from plane distances do not directly bound them. The tree therefore
//! treats plane distances only as a *candidate filter*: each metric
//! publishes a factor kappa with `delta_e >= euclidean / kappa`
//! ([`hue_metric::DeltaE::lower_bound_factor`]), plane distances are
//! divided by kappa before pruning, and the true metric is evaluated for
//! every entry that survives. Results are exact for all metrics, at the
//! cost of visiting more nodes than a purely Euclidean index would.
//!
//! # Usage
//!
//! ```rust
//! use hue_core::{Lab, ReferenceEntry, Rgb};
//! use hue_index::KdTree;
//! use hue_metric::DeltaE;
//!
//! let entries = vec![
//!     ReferenceEntry::new(0, "a", Rgb::new(0, 0, 0), Lab::new(10.0, 0.0, 0.0)),
//!     ReferenceEntry::new(1, "b", Rgb::new(0, 0, 0), Lab::new(60.0, 0.0, 0.0)),
//! ];
//! let tree = KdTree::build(entries).unwrap();
//! let hit = tree.nearest(&Lab::new(12.0, 0.0, 0.0), DeltaE::Ciede2000);
//! assert_eq!(hit.entry.id, 0);
//! ```

#![warn(missing_docs)]

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hue_core::{Error, Lab, ReferenceEntry, Result};
use hue_metric::{distance, DeltaE};

/// One nearest-neighbor result.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'a> {
    /// The matched reference entry.
    pub entry: &'a ReferenceEntry,
    /// True distance under the requested metric.
    pub distance: f64,
}

/// Internal tree node: splitting dimension, split value, and the entry
/// stored at the split point.
#[derive(Debug)]
struct Node {
    dim: usize,
    split: f64,
    entry: usize,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

/// Heap candidate ordered worst-first: larger distance is greater, and
/// among equal distances the larger id is greater (so it is evicted
/// first, keeping results deterministic).
struct Candidate {
    dist: f64,
    id: u32,
    entry: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.dist.total_cmp(&other.dist) == Ordering::Equal && self.id == other.id
    }
}
impl Eq for Candidate {}
impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist
            .total_cmp(&other.dist)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Balanced k-d tree over the reference palette's LAB coordinates.
#[derive(Debug)]
pub struct KdTree {
    entries: Vec<ReferenceEntry>,
    root: Box<Node>,
}

impl KdTree {
    /// Builds the tree from a non-empty reference set.
    ///
    /// Splits at the median of the current dimension, cycling L -> a -> b,
    /// which yields a balanced tree for any input order.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyIndex`] if `entries` is empty. Querying before the
    /// reference database is loaded is a programming error, so this
    /// fails fast instead of producing an index that panics later.
    pub fn build(entries: Vec<ReferenceEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::EmptyIndex);
        }
        let mut order: Vec<usize> = (0..entries.len()).collect();
        let root = Self::build_node(&entries, &mut order, 0)
            .expect("non-empty slice always yields a node");
        Ok(Self { entries, root })
    }

    fn build_node(
        entries: &[ReferenceEntry],
        order: &mut [usize],
        depth: usize,
    ) -> Option<Box<Node>> {
        if order.is_empty() {
            return None;
        }
        let dim = depth % 3;
        order.sort_by(|&a, &b| {
            entries[a]
                .lab
                .component(dim)
                .total_cmp(&entries[b].lab.component(dim))
                .then_with(|| entries[a].id.cmp(&entries[b].id))
        });
        let mid = order.len() / 2;
        let entry = order[mid];
        let (left, rest) = order.split_at_mut(mid);
        let right = &mut rest[1..];
        Some(Box::new(Node {
            dim,
            split: entries[entry].lab.component(dim),
            entry,
            left: Self::build_node(entries, left, depth + 1),
            right: Self::build_node(entries, right, depth + 1),
        }))
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: an empty tree cannot be built.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The indexed entries, in load order.
    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    /// Exact nearest neighbor under the given metric.
    pub fn nearest(&self, query: &Lab, metric: DeltaE) -> Neighbor<'_> {
        self.k_nearest(query, 1, metric)
            .into_iter()
            .next()
            .expect("tree is non-empty by construction")
    }

    /// Exact k nearest neighbors, ordered by ascending distance.
    ///
    /// Ties in distance are broken by ascending entry id. Requests for
    /// more neighbors than the palette holds return the whole palette,
    /// ordered.
    pub fn k_nearest(&self, query: &Lab, k: usize, metric: DeltaE) -> Vec<Neighbor<'_>> {
        let k = k.min(self.entries.len());
        if k == 0 {
            return Vec::new();
        }
        let kappa = metric.lower_bound_factor();
        let mut heap: BinaryHeap<Candidate> = BinaryHeap::with_capacity(k + 1);
        self.visit(&self.root, query, k, metric, kappa, &mut heap);

        let mut results: Vec<Candidate> = heap.into_vec();
        results.sort_unstable();
        results
            .into_iter()
            .map(|c| Neighbor {
                entry: &self.entries[c.entry],
                distance: c.dist,
            })
            .collect()
    }

    fn visit(
        &self,
        node: &Node,
        query: &Lab,
        k: usize,
        metric: DeltaE,
        kappa: f64,
        heap: &mut BinaryHeap<Candidate>,
    ) {
        let entry = &self.entries[node.entry];
        let dist = distance(*query, entry.lab, metric);
        let candidate = Candidate {
            dist,
            id: entry.id,
            entry: node.entry,
        };
        if heap.len() < k {
            heap.push(candidate);
        } else if let Some(worst) = heap.peek() {
            if candidate.cmp(worst) == Ordering::Less {
                heap.pop();
                heap.push(candidate);
            }
        }

        let delta = query.component(node.dim) - node.split;
        let (near, far) = if delta <= 0.0 {
            (&node.left, &node.right)
        } else {
            (&node.right, &node.left)
        };

        if let Some(child) = near {
            self.visit(child, query, k, metric, kappa, heap);
        }

        // Candidate filter, not a true bound for perceptual metrics:
        // the far side can only be skipped when even the kappa-scaled
        // plane distance cannot beat the current worst result.
        let plane_bound = delta.abs() / kappa;
        let must_visit = heap.len() < k
            || heap
                .peek()
                .is_some_and(|worst| plane_bound <= worst.dist);
        if must_visit {
            if let Some(child) = far {
                self.visit(child, query, k, metric, kappa, heap);
            }
        }
    }

    /// Exhaustive linear scan, the correctness oracle for the tree.
    pub fn linear_scan(&self, query: &Lab, k: usize, metric: DeltaE) -> Vec<Neighbor<'_>> {
        let mut all: Vec<Candidate> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| Candidate {
                dist: distance(*query, e.lab, metric),
                id: e.id,
                entry: i,
            })
            .collect();
        all.sort_unstable();
        all.truncate(k);
        all.into_iter()
            .map(|c| Neighbor {
                entry: &self.entries[c.entry],
                distance: c.dist,
            })
            .collect()
    }
}
