//! Per-tick queue of deferred world mutations.
//!
//! Entries fire once the gameplay clock reaches their due time. The queue
//! is part of [`crate::entities::GameState`], so a restart replaces it and
//! nothing scheduled in an old session can fire in a new one.

#[derive(Clone, Debug, PartialEq)]
pub enum DeferredEffect {
    /// Drop an energy shard centred on `(x, y)`.
    SpawnShard { x: f32, y: f32 },
}

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    due_ms: f64,
    /// Insertion order, breaks ties between equal due times.
    seq: u64,
    effect: DeferredEffect,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DelayQueue {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl DelayQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: f64, effect: DeferredEffect) {
        self.entries.push(Entry { due_ms, seq: self.next_seq, effect });
        self.next_seq += 1;
    }

    /// Remove and return every effect due at or before `now_ms`, earliest first.
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<DeferredEffect> {
        let (mut due, pending): (Vec<Entry>, Vec<Entry>) =
            std::mem::take(&mut self.entries).into_iter().partition(|e| e.due_ms <= now_ms);
        self.entries = pending;
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|e| e.effect).collect()
    }

    /// Drop everything pending.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
