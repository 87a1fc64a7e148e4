//! Permutation sources for question generation.
//!
//! Production code shuffles uniformly; tests substitute a fixed or scripted order.

use rand::rngs::{StdRng, ThreadRng};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rng};
use std::collections::VecDeque;

/// Produces permutations of index ranges.
pub trait Permutation {
    /// Returns a permutation of `0..len`.
    fn indices(&mut self, len: usize) -> Vec<usize>;
}

/// Reorders `items` by the next permutation drawn from `source`.
///
/// An index sequence that is not a permutation of `0..len` falls back to the
/// original order.
pub fn permute<T>(source: &mut dyn Permutation, items: Vec<T>) -> Vec<T> {
    let order = source.indices(items.len());
    if !is_permutation(&order, items.len()) {
        tracing::warn!(len = items.len(), "permutation source returned an invalid order");
        return items;
    }

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    order
        .iter()
        .all(|&i| i < len && !std::mem::replace(&mut seen[i], true))
}

/// Uniform Fisher–Yates shuffle over any `rand` generator.
#[derive(Debug, Clone)]
pub struct FisherYates<R> {
    rng: R,
}

impl<R: Rng> FisherYates<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl FisherYates<ThreadRng> {
    /// Shuffle backed by the thread-local generator.
    #[must_use]
    pub fn thread() -> Self {
        Self::new(rng())
    }
}

impl FisherYates<StdRng> {
    /// Reproducible shuffle for a given seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Shuffle seeded from the operating system. Unlike `thread()` it is `Send`.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> Permutation for FisherYates<R> {
    fn indices(&mut self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        order.as_mut_slice().shuffle(&mut self.rng);
        order
    }
}

/// Keeps every sequence in its original order.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPermutation;

impl Permutation for IdentityPermutation {
    fn indices(&mut self, len: usize) -> Vec<usize> {
        (0..len).collect()
    }
}

/// Replays queued orders, one per call; identity once the queue runs dry or when
/// a queued order has the wrong length.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPermutation {
    orders: VecDeque<Vec<usize>>,
}

impl ScriptedPermutation {
    #[must_use]
    pub fn new(orders: impl IntoIterator<Item = Vec<usize>>) -> Self {
        Self {
            orders: orders.into_iter().collect(),
        }
    }

    pub fn push(&mut self, order: Vec<usize>) {
        self.orders.push_back(order);
    }
}

impl Permutation for ScriptedPermutation {
    fn indices(&mut self, len: usize) -> Vec<usize> {
        match self.orders.pop_front() {
            Some(order) if order.len() == len => order,
            _ => (0..len).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn identity_keeps_order() {
        let out = permute(&mut IdentityPermutation, vec!['a', 'b', 'c']);
        assert_eq!(out, vec!['a', 'b', 'c']);
    }

    #[test]
    fn scripted_replays_then_falls_back() {
        let mut source = ScriptedPermutation::new([vec![2, 0, 1]]);
        assert_eq!(permute(&mut source, vec!['a', 'b', 'c']), vec!['c', 'a', 'b']);
        assert_eq!(permute(&mut source, vec!['a', 'b', 'c']), vec!['a', 'b', 'c']);
    }

    #[test]
    fn invalid_order_leaves_items_untouched() {
        struct Broken;
        impl Permutation for Broken {
            fn indices(&mut self, len: usize) -> Vec<usize> {
                vec![0; len]
            }
        }
        assert_eq!(permute(&mut Broken, vec![1, 2, 3]), vec![1, 2, 3]);
    }

    #[test]
    fn fisher_yates_yields_permutations() {
        let mut source = FisherYates::seeded(7);
        for len in 0..20 {
            let mut order = source.indices(len);
            order.sort_unstable();
            assert_eq!(order, (0..len).collect::<Vec<_>>());
        }
    }

    #[test]
    fn seeded_shuffles_are_reproducible() {
        let a = FisherYates::seeded(42).indices(10);
        let b = FisherYates::seeded(42).indices(10);
        assert_eq!(a, b);
    }

    #[test]
    fn fisher_yates_is_roughly_uniform() {
        // 6 permutations of three items, 6000 draws: expect ~1000 each.
        let mut source = FisherYates::seeded(2024);
        let mut counts: HashMap<Vec<usize>, u32> = HashMap::new();
        for _ in 0..6000 {
            *counts.entry(source.indices(3)).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        for (order, count) in counts {
            assert!((800..=1200).contains(&count), "{order:?} drawn {count} times");
        }
    }
}
