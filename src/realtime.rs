//! Simulated real-time updates.
//!
//! A tick nudges the last value of every row by a random fraction of itself.
//! The generator is seeded so a session can be replayed exactly.

use crate::config::RealtimeConfig;
use crate::data::Table;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// One changed cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellChange {
    /// Row of the cell.
    pub row: usize,
    /// Column of the cell.
    pub col: usize,
    /// Value before the tick.
    pub before: f64,
    /// Value after the tick.
    pub after: f64,
}

/// Seeded jitter source for the last column of a table.
#[derive(Debug, Clone)]
pub struct RealtimeFeed {
    rng: ChaCha8Rng,
    jitter: f64,
    interval_ms: u64,
    enabled: bool,
    ticks: u64,
}

impl RealtimeFeed {
    /// Create a feed from its configuration.
    pub fn new(config: &RealtimeConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            jitter: config.jitter.abs(),
            interval_ms: config.interval_ms.max(1),
            enabled: config.enabled,
            ticks: 0,
        }
    }

    /// Whether ticks are being produced.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn ticking on or off. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        tracing::info!(enabled = self.enabled, "Real-time updates toggled");
        self.enabled
    }

    /// Milliseconds between ticks.
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Number of ticks applied so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Jitter the last element of every row, clamping at zero.
    pub fn tick(&mut self, table: &mut Table) -> Vec<CellChange> {
        let Some(col) = table.cols().checked_sub(1) else {
            return Vec::new();
        };

        let mut changes = Vec::with_capacity(table.rows());
        for row in 0..table.rows() {
            let Some(before) = table.value(row, col) else {
                continue;
            };
            let factor = if self.jitter > 0.0 {
                self.rng.gen_range(-self.jitter..=self.jitter)
            } else {
                0.0
            };
            let after = (before * (1.0 + factor)).max(0.0);
            table.set(row, col, after);
            changes.push(CellChange {
                row,
                col,
                before,
                after,
            });
        }

        self.ticks += 1;
        tracing::debug!(tick = self.ticks, table = %table.name, cells = changes.len(), "Real-time tick");
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::from_rows(
            "t",
            &[vec![10.0, 100.0], vec![5.0, 50.0], vec![1.0, 0.0]],
            vec![],
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn test_only_last_column_changes_within_bounds() {
        let mut feed = RealtimeFeed::new(&RealtimeConfig::default());
        let mut t = table();
        let changes = feed.tick(&mut t);

        assert_eq!(changes.len(), 3);
        assert_eq!(t.value(0, 0), Some(10.0));
        assert_eq!(t.value(1, 0), Some(5.0));
        for change in &changes {
            assert_eq!(change.col, 1);
            assert!(change.after >= 0.0);
            assert!((change.after - change.before).abs() <= change.before * 0.1 + 1e-9);
        }
        // zero stays zero
        assert_eq!(t.value(2, 1), Some(0.0));
        assert_eq!(feed.ticks(), 1);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let config = RealtimeConfig {
            seed: 7,
            ..Default::default()
        };
        let mut a = RealtimeFeed::new(&config);
        let mut b = RealtimeFeed::new(&config);
        let (mut ta, mut tb) = (table(), table());
        for _ in 0..5 {
            a.tick(&mut ta);
            b.tick(&mut tb);
        }
        assert_eq!(ta, tb);
    }

    #[test]
    fn test_toggle() {
        let mut feed = RealtimeFeed::new(&RealtimeConfig::default());
        assert!(!feed.is_enabled());
        assert!(feed.toggle());
        assert!(!feed.toggle());
    }
}
