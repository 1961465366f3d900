//! Bulk produce and drain scenario.

use clap::Args;
use tracing::info;

use circbuf::{BoundedBuffer, CircularBuffer};

use super::{check_state, print_success};

/// A buffered record.
#[derive(Debug, Clone)]
struct Record {
    value: String,
}

/// A record with its position in the source collection. Converts into
/// [`Record`], so a collection of entries can be fed to a record buffer.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    index: usize,
}

impl From<Entry> for Record {
    fn from(entry: Entry) -> Self {
        Record { value: entry.value }
    }
}

/// Bulk produce twice, drain, then drain while re-producing from the callback.
#[derive(Args)]
pub struct CollectionCommand {
    /// Buffer capacity
    #[arg(long, default_value_t = 1000)]
    capacity: usize,

    /// Number of items in the source collection
    #[arg(long, default_value_t = 800)]
    items: usize,

    /// Number of drained items to produce again from inside the drain
    #[arg(long, default_value_t = 2000)]
    reproduce: usize,
}

impl Default for CollectionCommand {
    fn default() -> Self {
        Self {
            capacity: 1000,
            items: 800,
            reproduce: 2000,
        }
    }
}

impl CollectionCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.items > 0, "--items must be greater than 0");
        anyhow::ensure!(
            self.items <= self.capacity,
            "--items {} must not exceed --capacity {}",
            self.items,
            self.capacity
        );
        info!(
            capacity = self.capacity,
            items = self.items,
            reproduce = self.reproduce,
            "running collection scenario"
        );

        let source: Vec<Entry> = (0..self.items)
            .map(|i| Entry {
                value: i.to_string(),
                index: i,
            })
            .collect();

        self.drain_records(&source)?;
        self.drain_reproducing(&source)?;

        print_success(
            "collection",
            &format!(
                "bulk produce/drain of {} items, {} re-produced during drain",
                self.items, self.reproduce
            ),
        );
        Ok(())
    }

    fn drain_records(&self, source: &[Entry]) -> anyhow::Result<()> {
        let buf = BoundedBuffer::<Record>::new(self.capacity);
        check_state(&buf, 0)?;

        let produced = buf.produce_all(source.iter().cloned());
        anyhow::ensure!(produced == self.items, "produced {} != {}", produced, self.items);
        check_state(&buf, self.items)?;

        let expected = self.items.min(self.capacity - self.items);
        let produced = buf.produce_all(source.iter().cloned());
        anyhow::ensure!(produced == expected, "produced {} != {}", produced, expected);
        let total = self.items + expected;
        check_state(&buf, total)?;

        let mut consumed = 0;
        let mut mismatch = None;
        buf.consume_all(|record| {
            let want = (consumed % self.items).to_string();
            if mismatch.is_none() && record.value != want {
                mismatch = Some((record.value, want));
            }
            consumed += 1;
        })?;
        if let Some((got, want)) = mismatch {
            anyhow::bail!("value {} != {}", got, want);
        }
        anyhow::ensure!(consumed == total, "consumed {} != {}", consumed, total);
        check_state(&buf, 0)
    }

    fn drain_reproducing(&self, source: &[Entry]) -> anyhow::Result<()> {
        let buf = BoundedBuffer::<Entry>::new(self.capacity);

        let produced = buf.produce_all(source.iter().cloned());
        anyhow::ensure!(produced == self.items, "produced {} != {}", produced, self.items);
        check_state(&buf, self.items)?;

        let mut consumed = 0;
        let mut failure = None;
        buf.consume_all(|entry| {
            if failure.is_none() && entry.index != consumed % self.items {
                failure = Some(format!("index {} != {}", entry.index, consumed % self.items));
            }
            consumed += 1;
            if consumed <= self.reproduce
                && let Err(err) = buf.produce(entry)
            {
                failure.get_or_insert_with(|| err.to_string());
            }
        })?;
        if let Some(failure) = failure {
            anyhow::bail!(failure);
        }

        let total = self.items + self.reproduce;
        anyhow::ensure!(consumed == total, "consumed {} != {}", consumed, total);
        check_state(&buf, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_scenario_defaults() {
        CollectionCommand::default().run().unwrap();
    }

    #[test]
    fn test_collection_scenario_small() {
        let cmd = CollectionCommand {
            capacity: 5,
            items: 2,
            reproduce: 7,
        };
        cmd.run().unwrap();
    }

    #[test]
    fn test_collection_rejects_items_over_capacity() {
        let cmd = CollectionCommand {
            capacity: 2,
            items: 3,
            reproduce: 0,
        };
        assert!(cmd.run().is_err());
    }
}
