use crate::diagnostics::Diagnostics;
use std::collections::HashSet;

/// The glyph indices accepted so far, in the order they were first defined.
#[derive(Clone, Debug, Default)]
pub struct UsedIndices {
    order: Vec<u8>,
    seen: HashSet<u8>,
}
impl UsedIndices {
    pub fn new() -> Self {
        UsedIndices::default()
    }

    pub fn contains(&self, index: u8) -> bool {
        self.seen.contains(&index)
    }

    /// Marks an index as used. Returns `false` if it was already used.
    pub fn insert(&mut self, index: u8) -> bool {
        if self.seen.insert(index) {
            self.order.push(index);
            true
        } else {
            false
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.order
    }
    pub fn len(&self) -> usize {
        self.order.len()
    }
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// The state owned by a single compilation run.
#[derive(Clone, Debug, Default)]
pub struct CompileContext {
    pub diagnostics: Diagnostics,
    pub used_indices: UsedIndices,
}
impl CompileContext {
    pub fn new() -> Self {
        CompileContext::default()
    }
}
