//! Boolean row masks.

/// One flag per respondent row: `true` when the row is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMask {
    bits: Vec<bool>,
}

impl RowMask {
    /// Every row selected.
    pub fn all(len: usize) -> Self {
        Self {
            bits: vec![true; len],
        }
    }

    /// No row selected.
    pub fn none(len: usize) -> Self {
        Self {
            bits: vec![false; len],
        }
    }

    pub fn from_fn(len: usize, f: impl FnMut(usize) -> bool) -> Self {
        Self {
            bits: (0..len).map(f).collect(),
        }
    }

    /// Number of rows the mask covers (selected or not).
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn get(&self, row: usize) -> bool {
        self.bits.get(row).copied().unwrap_or(false)
    }

    /// Number of selected rows.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    pub fn is_all(&self) -> bool {
        self.bits.iter().all(|b| *b)
    }

    /// Indices of selected rows.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.then_some(i))
    }

    /// Keep only rows that also satisfy `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(usize) -> bool) {
        for (row, bit) in self.bits.iter_mut().enumerate() {
            if *bit && !keep(row) {
                *bit = false;
            }
        }
    }

    /// A copy restricted to rows that satisfy `keep`.
    pub fn restrict(&self, keep: impl FnMut(usize) -> bool) -> Self {
        let mut mask = self.clone();
        mask.retain(keep);
        mask
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }
}

impl From<Vec<bool>> for RowMask {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}
