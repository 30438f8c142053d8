/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! Register programs and the writer that loads them.
//! Runs of consecutive addresses are coalesced into bulk writes,
//! which cuts the common settings down to a fraction of the transactions.

use embedded_hal::blocking::delay::DelayMs;

use crate::bus::RegisterBus;

#[cfg(feature = "rttdebug")]
use panic_rtt_core::rprintln;

/// Longest run of registers sent in one bulk write
pub const MAX_RUN_LEN: usize = 16;

/// One step of a register program
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entry {
    /// Write a value to a register address
    Write(u16, u8),
    /// Pause for at least this many milliseconds
    Wait(u32),
    /// Stop processing the program
    End,
}

/// Consecutive register values waiting to be sent
struct Run {
    start: u16,
    len: usize,
    vals: [u8; MAX_RUN_LEN],
}

impl Run {
    fn new() -> Self {
        Self {
            start: 0,
            len: 0,
            vals: [0; MAX_RUN_LEN],
        }
    }

    /// Whether `addr` can be appended without breaking the run
    fn continues_at(&self, addr: u16) -> bool {
        self.len < MAX_RUN_LEN
            && self.start.checked_add(self.len as u16) == Some(addr)
    }

    fn push(&mut self, addr: u16, val: u8) {
        if self.len == 0 {
            self.start = addr;
        }
        self.vals[self.len] = val;
        self.len += 1;
    }

    fn flush<B: RegisterBus>(&mut self, bus: &mut B) -> Result<(), B::Error> {
        let res = match self.len {
            0 => Ok(()),
            1 => bus.write(self.start, self.vals[0]),
            n => bus.bulk_write(self.start, &self.vals[..n]),
        };
        self.len = 0;
        res
    }
}

/// Apply a register program to the bus.
/// Stops at the first bus error; programs contain no read-modify-write
/// steps, so a failed program can simply be applied again from the start.
pub fn write_table<B, D>(
    bus: &mut B,
    delay: &mut D,
    table: &[Entry],
) -> Result<(), B::Error>
where
    B: RegisterBus,
    D: DelayMs<u32>,
{
    let mut run = Run::new();

    for entry in table {
        match *entry {
            Entry::Write(addr, val) => {
                if run.len > 0 && !run.continues_at(addr) {
                    run.flush(bus)?;
                }
                run.push(addr, val);
            }
            Entry::Wait(ms) => {
                run.flush(bus)?;
                delay.delay_ms(ms);
            }
            Entry::End => break,
        }
    }

    run.flush(bus)?;

    #[cfg(feature = "rttdebug")]
    rprintln!("imx547 table of {} entries loaded", table.len());

    Ok(())
}
