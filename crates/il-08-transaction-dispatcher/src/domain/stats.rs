//! Per-block counters, logged at commit.

/// Outcomes of `apply` within the current block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockStats {
    pub accepted: u32,
    pub rejected: u32,
}

impl BlockStats {
    pub fn record(&mut self, accepted: bool) {
        if accepted {
            self.accepted += 1;
        } else {
            self.rejected += 1;
        }
    }

    pub fn total(&self) -> u32 {
        self.accepted + self.rejected
    }
}
