//! Multi-threaded produce/consume scenario.

use std::thread;

use anyhow::Context;
use clap::Args;
use tracing::{debug, info};

use circbuf::{BoundedBuffer, CircularBuffer};

use super::{check_state, print_success};

/// Worker threads each produce pairs (j, j+1) and immediately consume two
/// values, summing what they consume.
#[derive(Args)]
pub struct ConcurrencyCommand {
    /// Number of worker threads
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Largest value produced (rounded up to odd)
    #[arg(long, default_value_t = 1_999_999)]
    bound: i64,

    /// Buffer capacity; must hold two values per worker
    #[arg(long, default_value_t = 10)]
    capacity: usize,
}

impl Default for ConcurrencyCommand {
    fn default() -> Self {
        Self {
            threads: 4,
            bound: 1_999_999,
            capacity: 10,
        }
    }
}

impl ConcurrencyCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.threads > 0, "--threads must be greater than 0");
        anyhow::ensure!(self.bound >= 0, "--bound must not be negative");
        anyhow::ensure!(
            self.capacity >= self.threads * 2,
            "--capacity {} cannot hold two values for each of {} workers",
            self.capacity,
            self.threads
        );
        info!(
            threads = self.threads,
            bound = self.bound,
            capacity = self.capacity,
            "running concurrency scenario"
        );

        let last = self.bound | 1;
        let expected = expected_total(self.threads, last).with_context(|| {
            format!(
                "--bound {} with {} workers overflows the i64 sum",
                self.bound, self.threads
            )
        })?;

        let buf = BoundedBuffer::<i64>::new(self.capacity);

        let workers: Vec<_> = (0..self.threads)
            .map(|id| {
                let buf = buf.clone();
                thread::spawn(move || -> anyhow::Result<i64> {
                    let mut sum = 0;
                    for j in (0..last).step_by(2) {
                        buf.produce(j).context("produce")?;
                        buf.produce(j + 1).context("produce")?;
                        sum += buf.consume().context("consume")?;
                        sum += buf.consume().context("consume")?;
                    }
                    debug!(worker = id, sum, "worker finished");
                    Ok(sum)
                })
            })
            .collect();

        let mut total: i64 = 0;
        for (id, worker) in workers.into_iter().enumerate() {
            let sum = worker
                .join()
                .map_err(|_| anyhow::anyhow!("worker {} panicked", id))?
                .with_context(|| format!("worker {}", id))?;
            total += sum;
        }
        check_state(&buf, 0)?;

        anyhow::ensure!(total == expected, "sum {} != {}", total, expected);

        print_success(
            "concurrency",
            &format!("{} workers, sum {}", self.threads, total),
        );
        Ok(())
    }
}

/// Sum of every value consumed by `threads` workers each producing
/// `0..=last`, or `None` if it does not fit in an i64.
///
/// Every partial sum a worker accumulates is bounded by this total.
fn expected_total(threads: usize, last: i64) -> Option<i64> {
    let per_worker = last.checked_add(1)?.checked_mul(last)? / 2;
    i64::try_from(threads).ok()?.checked_mul(per_worker)
}
