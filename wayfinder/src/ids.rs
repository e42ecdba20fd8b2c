use std::collections::BTreeSet;

/// Issues compact positive ids, reusing the smallest released id first.
///
/// Ids are never handed out twice while live: an id only re-enters the pool
/// through [`IdAllocator::release`], which the store calls after the owning
/// entity is gone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdAllocator {
    next: u32,
    free: BTreeSet<u32>,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator {
            next: 1,
            free: BTreeSet::new(),
        }
    }

    pub fn allocate(&mut self) -> u32 {
        if let Some(id) = self.free.pop_first() {
            return id;
        }
        let id = self.next;
        self.next += 1;
        id
    }

    /// Returns the id to the pool. Ids that were never issued (0, or at or
    /// beyond the counter) and ids already free are ignored.
    pub fn release(&mut self, id: u32) -> bool {
        if id == 0 || id >= self.next {
            return false;
        }
        self.free.insert(id)
    }

    /// Assumes a densely numbered `1..=count` population.
    pub fn reset(&mut self, count: usize) {
        self.next = count as u32 + 1;
        self.free.clear();
    }

    /// Rebuilds the pool from the ids currently live. For a dense `1..=n`
    /// population this is exactly `reset(n)`; gaps below the largest id
    /// become free ids.
    pub fn reseed<I: IntoIterator<Item = u32>>(&mut self, live: I) {
        let live: BTreeSet<u32> = live.into_iter().filter(|id| *id != 0).collect();
        let max = live.last().copied().unwrap_or(0);
        if max as usize == live.len() {
            self.reset(live.len());
            return;
        }
        self.next = max + 1;
        self.free = (1..max).filter(|id| !live.contains(id)).collect();
    }

    /// The id the next `allocate` call will return.
    pub fn peek(&self) -> u32 {
        self.free.first().copied().unwrap_or(self.next)
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }
}
