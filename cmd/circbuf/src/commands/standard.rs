//! Produce/consume/clear scenario on a capacity-2 buffer.

use clap::Args;
use tracing::{debug, info};

use circbuf::{BoundedBuffer, CircularBuffer};

use super::{check_state, print_success};

/// Standard produce/consume sequence with overflow, underflow and clear.
#[derive(Args, Default)]
pub struct StandardCommand {}

impl StandardCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        info!("running standard scenario");
        let buf = BoundedBuffer::<String>::new(2);
        check_state(&buf, 0)?;

        buf.produce("one".into())?;
        check_state(&buf, 1)?;
        buf.produce("two".into())?;
        check_state(&buf, 2)?;

        expect_item(&buf, "one")?;
        check_state(&buf, 1)?;

        buf.produce("three".into())?;
        check_state(&buf, 2)?;

        match buf.produce("four".into()) {
            Ok(()) => anyhow::bail!("overflow expected when producing into a full buffer"),
            Err(err) => debug!(item = %err.item(), "rejected: {}", err),
        }
        check_state(&buf, 2)?;

        expect_item(&buf, "two")?;
        check_state(&buf, 1)?;
        expect_item(&buf, "three")?;
        check_state(&buf, 0)?;

        match buf.consume() {
            Ok(item) => anyhow::bail!("underflow expected, got item {}", item),
            Err(err) => debug!("rejected: {}", err),
        }
        check_state(&buf, 0)?;

        buf.produce("five".into())?;
        buf.produce("six".into())?;
        check_state(&buf, 2)?;
        buf.clear();
        check_state(&buf, 0)?;

        print_success("standard", "fifo order, overflow, underflow and clear");
        Ok(())
    }
}

fn expect_item(buf: &BoundedBuffer<String>, expected: &str) -> anyhow::Result<()> {
    let item = buf.consume()?;
    anyhow::ensure!(item == expected, "item {} != {}", item, expected);
    Ok(())
}
