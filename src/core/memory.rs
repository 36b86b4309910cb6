//! Word-addressed data memory.
//!
//! Dense vector of `N` words (default 1024), addressed by non-negative word
//! index, with the same two-phase commit discipline as
//! [`RegisterFile`](crate::core::arch::gpr::RegisterFile). Out-of-range
//! reads and writes are no-ops; an out-of-range read returns 0.

/// Default word count, matching the teacher's default RAM-size-style
/// constant but scaled down to this simulator's word-addressed model.
pub const DEFAULT_WORDS: usize = 1024;

/// Word-addressed data memory with a single pending write slot.
pub struct DataMemory {
    data: Vec<i32>,
    pending: Option<(usize, i32)>,
}

impl DataMemory {
    /// Creates a zeroed memory of `words` words.
    pub fn new(words: usize) -> Self {
        Self {
            data: vec![0; words],
            pending: None,
        }
    }

    /// Reads a word. Out-of-range addresses (negative, or `>= size()`)
    /// return 0.
    pub fn read(&self, addr: i32) -> i32 {
        self.word_index(addr)
            .and_then(|idx| self.data.get(idx))
            .copied()
            .unwrap_or(0)
    }

    /// Stages a write to be applied on the next [`commit`](Self::commit).
    /// Out-of-range addresses are silently discarded.
    pub fn write_next(&mut self, addr: i32, value: i32) {
        if self.word_index(addr).is_some() {
            self.pending = Some((addr as usize, value));
        }
    }

    /// Immediately writes a word, bypassing the pending-write staging. Used
    /// for test fixturing (the `set_mem_word` inspection operation) where a
    /// deterministic, synchronous effect is wanted rather than a
    /// cycle-delayed one.
    pub fn write_immediate(&mut self, addr: i32, value: i32) {
        self.write_next(addr, value);
        self.commit();
    }

    /// Applies the staged write, if any, then clears it.
    pub fn commit(&mut self) {
        if let Some((idx, value)) = self.pending.take() {
            if let Some(slot) = self.data.get_mut(idx) {
                *slot = value;
            }
        }
    }

    /// Zeroes every word and discards any pending write.
    pub fn reset(&mut self) {
        self.data.iter_mut().for_each(|w| *w = 0);
        self.pending = None;
    }

    /// Number of addressable words.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    fn word_index(&self, addr: i32) -> Option<usize> {
        if addr < 0 {
            return None;
        }
        let idx = addr as usize;
        if idx < self.data.len() {
            Some(idx)
        } else {
            None
        }
    }
}

impl Default for DataMemory {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS)
    }
}
