//! Register, Label and Stack-Slot Allocation
//! 
//! All allocation state is per generator instance. Nothing here is shared
//! between scopes or between compilations.
//! 
//! Temporaries are handed out round-robin from a fixed pool of four with no
//! liveness tracking and no spilling: a register returned by
//! [`TempRegisterPool::next`] stays valid only until four more requests have
//! been made, so callers consume results before allocating further.

use crate::asm::Reg;
use log::trace;
use std::collections::HashMap;

/// The temporary pool, in hand-out order
pub const TEMP_REGISTERS: [Reg; 4] = [Reg::T0, Reg::T1, Reg::T2, Reg::T3];

/// Size in bytes of one variable slot
pub const SLOT_SIZE: i32 = 4;

/// Cyclic allocator over [`TEMP_REGISTERS`]
#[derive(Debug, Clone, Default)]
pub struct TempRegisterPool {
    cursor: usize,
}

impl TempRegisterPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `pool[cursor]` and advance the cursor modulo the pool size
    pub fn next(&mut self) -> Reg {
        let reg = TEMP_REGISTERS[self.cursor];
        self.cursor = (self.cursor + 1) % TEMP_REGISTERS.len();
        trace!("temp {reg} handed out, cursor now {}", self.cursor);
        reg
    }

    /// Index of the register the next request will return
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

/// Monotonic `L<n>` label source
#[derive(Debug, Clone, Default)]
pub struct LabelGenerator {
    next_id: u32,
}

impl LabelGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> String {
        let label = format!("L{}", self.next_id);
        self.next_id += 1;
        trace!("minted label {label}");
        label
    }
}

/// Variable name to stack byte offset, in first-use order
/// 
/// Offsets grow by [`SLOT_SIZE`] from 0 and are never reclaimed.
#[derive(Debug, Clone, Default)]
pub struct StackSlots {
    offsets: HashMap<String, i32>,
    order: Vec<String>,
    next_offset: i32,
}

impl StackSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a slot for `name` unless it already has one
    /// 
    /// Returns `true` when a new slot was reserved.
    pub fn allocate(&mut self, name: &str) -> bool {
        if self.offsets.contains_key(name) {
            return false;
        }

        let offset = self.next_offset;
        self.offsets.insert(name.to_string(), offset);
        self.order.push(name.to_string());
        self.next_offset += SLOT_SIZE;
        trace!("slot {offset} reserved for '{name}'");
        true
    }

    /// Reserve a new slot for `name` even if it is already bound
    /// 
    /// Parameters are bound this way: a repeated parameter name is
    /// repointed at the newer slot, and the older slot stays reserved.
    pub fn bind_fresh(&mut self, name: &str) -> i32 {
        let offset = self.next_offset;
        if self.offsets.insert(name.to_string(), offset).is_none() {
            self.order.push(name.to_string());
        }
        self.next_offset += SLOT_SIZE;
        trace!("slot {offset} bound to '{name}'");
        offset
    }

    pub fn offset_of(&self, name: &str) -> Option<i32> {
        self.offsets.get(name).copied()
    }

    /// Offset of `name`, or 0 for a variable that was never bound
    pub fn resolve(&self, name: &str) -> i32 {
        self.offset_of(name).unwrap_or(0)
    }

    /// Bound variables with their offsets, in first-use order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> + '_ {
        self.order
            .iter()
            .map(|name| (name.as_str(), self.offsets[name]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Offset the next new variable would receive
    pub fn next_offset(&self) -> i32 {
        self.next_offset
    }

    pub fn clear(&mut self) {
        self.offsets.clear();
        self.order.clear();
        self.next_offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_temp_pool_cycles() {
        let mut pool = TempRegisterPool::new();
        let handed_out: Vec<Reg> = (0..9).map(|_| pool.next()).collect();

        assert_eq!(
            handed_out,
            vec![
                Reg::T0, Reg::T1, Reg::T2, Reg::T3,
                Reg::T0, Reg::T1, Reg::T2, Reg::T3,
                Reg::T0,
            ]
        );
        assert_eq!(pool.cursor(), 1);
    }

    #[test]
    fn test_labels_are_monotonic() {
        let mut labels = LabelGenerator::new();
        assert_eq!(labels.next(), "L0");
        assert_eq!(labels.next(), "L1");
        assert_eq!(labels.next(), "L2");
    }

    #[test]
    fn test_slots_in_first_use_order() {
        let mut slots = StackSlots::new();
        assert!(slots.allocate("x"));
        assert!(slots.allocate("y"));
        assert!(!slots.allocate("x"));
        assert!(slots.allocate("z"));

        assert_eq!(slots.offset_of("x"), Some(0));
        assert_eq!(slots.offset_of("y"), Some(4));
        assert_eq!(slots.offset_of("z"), Some(8));
        assert_eq!(slots.next_offset(), 12);
        assert_eq!(
            slots.iter().collect::<Vec<_>>(),
            vec![("x", 0), ("y", 4), ("z", 8)]
        );
    }

    #[test]
    fn test_bind_fresh_repoints_name() {
        let mut slots = StackSlots::new();
        assert_eq!(slots.bind_fresh("a"), 0);
        assert_eq!(slots.bind_fresh("a"), 4);
        assert!(slots.allocate("b"));

        assert_eq!(slots.offset_of("a"), Some(4));
        assert_eq!(slots.offset_of("b"), Some(8));
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn test_unknown_variable_resolves_to_zero() {
        let mut slots = StackSlots::new();
        slots.allocate("a");
        slots.allocate("b");

        assert_eq!(slots.offset_of("missing"), None);
        assert_eq!(slots.resolve("missing"), 0);
        assert_eq!(slots.resolve("b"), 4);
    }

    #[test]
    fn test_clear_resets_offsets() {
        let mut slots = StackSlots::new();
        slots.allocate("a");
        slots.clear();

        assert!(slots.is_empty());
        assert!(slots.allocate("b"));
        assert_eq!(slots.offset_of("b"), Some(0));
    }
}
