//! Min-priority queue for the A* frontier

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Debug, Clone)]
struct FrontierEntry<T> {
    priority: f64,
    sequence: u64,
    item: T,
}

impl<T> PartialEq for FrontierEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for FrontierEntry<T> {}

impl<T> PartialOrd for FrontierEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for FrontierEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

/// Min-priority queue keyed by a float priority.
///
/// Re-inserting an item that is already queued adds a second entry; nothing is
/// ever removed except by [`PriorityFrontier::extract_min`]. Callers are
/// responsible for recognising superseded entries when they come out.
/// Equal priorities pop in insertion order.
#[derive(Debug, Clone)]
pub struct PriorityFrontier<T> {
    heap: BinaryHeap<Reverse<FrontierEntry<T>>>,
    next_sequence: u64,
}

impl<T> Default for PriorityFrontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PriorityFrontier<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn insert(&mut self, item: T, priority: f64) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Reverse(FrontierEntry {
            priority,
            sequence,
            item,
        }));
    }

    pub fn extract_min(&mut self) -> Option<T> {
        self.heap.pop().map(|Reverse(entry)| entry.item)
    }
}
