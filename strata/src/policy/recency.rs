//! Recency-ordered key set with O(1) operations.
//!
//! A doubly linked list over keys laid out in a slot arena (`Vec<Node>` with
//! index links) plus a key-to-slot map. Gives O(1) move-to-front, O(1)
//! removal anywhere in the list, and O(1) pops at both ends, without unsafe
//! code. Freed slots are recycled through a free list threaded over `next`.

use std::collections::HashMap;
use std::hash::Hash;

/// Null link marker in the arena.
const NIL: usize = usize::MAX;

struct Node<K> {
    /// Taken out on release so pops can return the key by value.
    key: Option<K>,
    prev: usize,
    next: usize,
}

/// Ordered key set: front = most recently touched, back = oldest.
pub struct RecencyList<K> {
    slots: HashMap<K, usize>,
    arena: Vec<Node<K>>,
    head: usize,
    tail: usize,
    free: usize,
}

impl<K: Eq + Hash + Clone> RecencyList<K> {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            arena: Vec::new(),
            head: NIL,
            tail: NIL,
            free: NIL,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Moves `key` to the front, inserting it if absent.
    /// Returns whether the key was already present.
    pub fn touch(&mut self, key: &K) -> bool {
        if let Some(&idx) = self.slots.get(key) {
            self.unlink(idx);
            self.push_front(idx);
            true
        } else {
            let idx = self.alloc(key.clone());
            self.slots.insert(key.clone(), idx);
            self.push_front(idx);
            false
        }
    }

    /// Drops `key` from the set. Returns whether it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.slots.remove(key) {
            Some(idx) => {
                self.unlink(idx);
                self.release(idx);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the most recently touched key.
    pub fn pop_front(&mut self) -> Option<K> {
        self.pop_at(self.head)
    }

    /// Removes and returns the oldest key.
    pub fn pop_back(&mut self) -> Option<K> {
        self.pop_at(self.tail)
    }

    fn pop_at(&mut self, idx: usize) -> Option<K> {
        if idx == NIL {
            return None;
        }
        self.unlink(idx);
        let key = self.release(idx)?;
        self.slots.remove(&key);
        Some(key)
    }

    fn alloc(&mut self, key: K) -> usize {
        if self.free == NIL {
            self.arena.push(Node {
                key: Some(key),
                prev: NIL,
                next: NIL,
            });
            self.arena.len() - 1
        } else {
            let idx = self.free;
            self.free = self.arena[idx].next;
            let node = &mut self.arena[idx];
            node.key = Some(key);
            node.prev = NIL;
            node.next = NIL;
            idx
        }
    }

    fn release(&mut self, idx: usize) -> Option<K> {
        let key = self.arena[idx].key.take();
        self.arena[idx].next = self.free;
        self.free = idx;
        key
    }

    /// Detaches a linked slot from the list; the slot itself stays live.
    fn unlink(&mut self, idx: usize) {
        let prev = self.arena[idx].prev;
        let next = self.arena[idx].next;
        if prev == NIL {
            self.head = next;
        } else {
            self.arena[prev].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.arena[next].prev = prev;
        }
    }

    fn push_front(&mut self, idx: usize) {
        self.arena[idx].prev = NIL;
        self.arena[idx].next = self.head;
        if self.head == NIL {
            self.tail = idx;
        } else {
            self.arena[self.head].prev = idx;
        }
        self.head = idx;
    }
}
