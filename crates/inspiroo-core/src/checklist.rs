// Action checklist shown beneath an analysis result.

use std::collections::BTreeSet;

use crate::catalog::NEXT_STEPS;

/// Which of the fixed next steps the user has ticked. Indices refer to
/// [`NEXT_STEPS`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checklist {
    checked: BTreeSet<usize>,
}

impl Checklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the step at `idx`. Returns the new checked state, or `None`
    /// for an out-of-range index.
    pub fn toggle(&mut self, idx: usize) -> Option<bool> {
        if idx >= NEXT_STEPS.len() {
            return None;
        }
        if self.checked.remove(&idx) {
            Some(false)
        } else {
            self.checked.insert(idx);
            Some(true)
        }
    }

    pub fn is_checked(&self, idx: usize) -> bool {
        self.checked.contains(&idx)
    }

    pub fn checked_count(&self) -> usize {
        self.checked.len()
    }

    pub fn clear(&mut self) {
        self.checked.clear();
    }

    /// `(label, checked)` pairs in display order.
    pub fn items(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        NEXT_STEPS
            .iter()
            .enumerate()
            .map(|(i, label)| (*label, self.is_checked(i)))
    }
}
