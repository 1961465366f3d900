//! Utility functions for CLI commands.

use circbuf::{BoundedBuffer, CircularBuffer};

/// Checks `count`, `is_empty` and `is_full` against the expected count.
pub fn check_state<T>(buf: &BoundedBuffer<T>, count: usize) -> anyhow::Result<()> {
    anyhow::ensure!(
        buf.count() == count,
        "buffer.count {} != {}",
        buf.count(),
        count
    );
    anyhow::ensure!(
        buf.is_empty() == (count == 0),
        "buffer.is_empty {} != {}",
        buf.is_empty(),
        count == 0
    );
    anyhow::ensure!(
        buf.is_full() == (count >= buf.capacity()),
        "buffer.is_full {} != {}",
        buf.is_full(),
        count >= buf.capacity()
    );
    Ok(())
}

/// Prints a scenario success line.
pub fn print_success(scenario: &str, detail: &str) {
    println!("[ok] {}: {}", scenario, detail);
}
