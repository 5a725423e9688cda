//! Bounded transposition table with least-recently-used replacement.
//!
//! A `TranspositionTable` maps 64-bit position hashes to cached values. It
//! never grows past its capacity: inserting into a full table evicts the
//! entry that was used longest ago. Recency is tracked by an intrusive
//! doubly-linked list threaded through an arena of nodes, addressed by
//! stable indices rather than pointers. Sentinel head and tail nodes
//! guarantee every real node has live neighbors, so detach and attach never
//! branch on list ends. A detached node has both links set to `NIL`.
//!
//! The table is single-owner: no interior mutability, no locking.

use std::collections::HashMap;

/// Stable arena index of a list node.
type NodeIndex = u32;

/// The null link. Only detached nodes and the sentinels' outward links hold it.
const NIL: NodeIndex = NodeIndex::MAX;

const HEAD: NodeIndex = 0;
const TAIL: NodeIndex = 1;

#[derive(Debug, Clone)]
struct Node<V> {
    key: u64,
    value: V,
    prev: NodeIndex,
    next: NodeIndex,
}

/// Bounded LRU map from position hash to a cached value.
///
/// `V: Default` supplies the placeholder value held by the two sentinels.
#[derive(Debug, Clone)]
pub struct TranspositionTable<V> {
    map: HashMap<u64, NodeIndex>,
    nodes: Vec<Node<V>>,
    free: Vec<NodeIndex>,
    capacity: usize,
}

impl<V: Default> TranspositionTable<V> {
    /// Returns an empty table that holds at most `capacity` entries.
    /// A zero capacity is bumped to one so the table stays usable.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut nodes = Vec::with_capacity(capacity + 2);
        nodes.push(Node {
            key: 0,
            value: V::default(),
            prev: NIL,
            next: TAIL,
        });
        nodes.push(Node {
            key: 0,
            value: V::default(),
            prev: HEAD,
            next: NIL,
        });
        Self {
            map: HashMap::with_capacity(capacity),
            nodes,
            free: Vec::new(),
            capacity,
        }
    }
}

impl<V> TranspositionTable<V> {
    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Maximum number of entries the table will hold.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if the key is stored, without touching recency.
    pub fn contains(&self, key: u64) -> bool {
        self.map.contains_key(&key)
    }

    /// Looks up a key. A hit moves the entry to most-recently-used.
    pub fn get(&mut self, key: u64) -> Option<&V> {
        let idx = *self.map.get(&key)?;
        self.detach(idx);
        self.attach_front(idx);
        Some(&self.nodes[idx as usize].value)
    }

    /// Inserts or replaces the value for a key.
    ///
    /// On a key collision the newer entry wins: the later write generally
    /// encodes a deeper search result. When the table is at capacity the
    /// least-recently-used entry is evicted first.
    pub fn add(&mut self, key: u64, value: V) {
        if let Some(&idx) = self.map.get(&key) {
            self.nodes[idx as usize].value = value;
            self.detach(idx);
            self.attach_front(idx);
            return;
        }

        if self.map.len() >= self.capacity {
            self.evict_lru();
        }

        let idx = match self.free.pop() {
            Some(recycled) => {
                let node = &mut self.nodes[recycled as usize];
                node.key = key;
                node.value = value;
                recycled
            }
            None => {
                let fresh = self.nodes.len() as NodeIndex;
                self.nodes.push(Node {
                    key,
                    value,
                    prev: NIL,
                    next: NIL,
                });
                fresh
            }
        };
        let _ = self.map.insert(key, idx);
        self.attach_front(idx);
    }

    /// Drops every entry, keeping the capacity and the arena allocation.
    pub fn clear(&mut self) {
        self.map.clear();
        self.free.clear();
        self.nodes.truncate(2);
        self.nodes[HEAD as usize].next = TAIL;
        self.nodes[TAIL as usize].prev = HEAD;
    }

    /// Unlinks a node from the recency list, leaving both links `NIL`.
    fn detach(&mut self, idx: NodeIndex) {
        let node = &self.nodes[idx as usize];
        let (prev, next) = (node.prev, node.next);
        self.nodes[prev as usize].next = next;
        self.nodes[next as usize].prev = prev;
        let node = &mut self.nodes[idx as usize];
        node.prev = NIL;
        node.next = NIL;
    }

    /// Links a detached node in directly behind the head sentinel (MRU).
    fn attach_front(&mut self, idx: NodeIndex) {
        let first = self.nodes[HEAD as usize].next;
        {
            let node = &mut self.nodes[idx as usize];
            node.prev = HEAD;
            node.next = first;
        }
        self.nodes[HEAD as usize].next = idx;
        self.nodes[first as usize].prev = idx;
    }

    /// Evicts the entry sitting just before the tail sentinel.
    fn evict_lru(&mut self) {
        let lru = self.nodes[TAIL as usize].prev;
        if lru == HEAD {
            return;
        }
        self.detach(lru);
        let _ = self.map.remove(&self.nodes[lru as usize].key);
        self.free.push(lru);
    }

    /// Walks the recency list front to back, yielding stored keys in
    /// most-recently-used order. Test support.
    #[cfg(test)]
    fn keys_by_recency(&self) -> Vec<u64> {
        let mut keys = Vec::with_capacity(self.map.len());
        let mut idx = self.nodes[HEAD as usize].next;
        while idx != TAIL {
            keys.push(self.nodes[idx as usize].key);
            idx = self.nodes[idx as usize].next;
        }
        keys
    }

    /// Every map entry is in the list and every non-sentinel list node is in
    /// the map, with coherent neighbor links. Test support.
    #[cfg(test)]
    fn is_consistent(&self) -> bool {
        let mut seen = 0;
        let mut idx = self.nodes[HEAD as usize].next;
        let mut prev = HEAD;
        while idx != TAIL {
            let node = &self.nodes[idx as usize];
            if node.prev != prev {
                return false;
            }
            if self.map.get(&node.key) != Some(&idx) {
                return false;
            }
            seen += 1;
            prev = idx;
            idx = node.next;
        }
        if self.nodes[TAIL as usize].prev != prev {
            return false;
        }
        seen == self.map.len()
    }
}
