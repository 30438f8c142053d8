/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! Register access over the sensor's two-wire control interface

use embedded_hal::blocking::i2c;

/// Sony sensors in this family answer on 0x1A unless strapped otherwise
pub const DEFAULT_I2C_ADDRESS: u8 = 0x1A;

/// Largest payload sent in a single bus transaction
pub const MAX_BULK_LEN: usize = 16;

/// Widest register group handled by the multi-byte accessors
pub const MAX_MULTI_BYTES: usize = 3;

/// Byte-addressed register space with 16-bit addresses and 8-bit values
pub trait RegisterBus {
    type Error;

    /// Write one register
    fn write(&mut self, addr: u16, val: u8) -> Result<(), Self::Error>;

    /// Write consecutive registers starting at `addr`
    fn bulk_write(
        &mut self,
        addr: u16,
        vals: &[u8],
    ) -> Result<(), Self::Error>;

    /// Read consecutive registers starting at `addr`
    fn bulk_read(
        &mut self,
        addr: u16,
        buf: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Read a little-endian value spread over `nbytes` (1..=3) registers.
    /// Bytes above `nbytes` read as zero.
    fn read_multi(
        &mut self,
        addr: u16,
        nbytes: usize,
    ) -> Result<u32, Self::Error> {
        let nbytes = nbytes.max(1).min(MAX_MULTI_BYTES);
        let mut buf = [0u8; 4];
        self.bulk_read(addr, &mut buf[..nbytes])?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Write the low `nbytes` (1..=3) bytes of `val`, least significant first
    fn write_multi(
        &mut self,
        addr: u16,
        val: u32,
        nbytes: usize,
    ) -> Result<(), Self::Error> {
        let nbytes = nbytes.max(1).min(MAX_MULTI_BYTES);
        let bytes = val.to_le_bytes();
        self.bulk_write(addr, &bytes[..nbytes])
    }
}

/// `RegisterBus` over an embedded-hal blocking i2c port.
/// The register address goes on the wire most significant byte first.
pub struct I2cBus<I2C> {
    address: u8,
    i2c: I2C,
}

impl<I2C, CommE> I2cBus<I2C>
where
    I2C: i2c::Write<Error = CommE> + i2c::WriteRead<Error = CommE>,
{
    /// Create a new instance with an i2c address:
    /// May use DEFAULT_I2C_ADDRESS if in doubt.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { address, i2c }
    }

    pub fn default(i2c: I2C) -> Self {
        Self::new(i2c, DEFAULT_I2C_ADDRESS)
    }

    /// Give back the i2c port
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, CommE> RegisterBus for I2cBus<I2C>
where
    I2C: i2c::Write<Error = CommE> + i2c::WriteRead<Error = CommE>,
{
    type Error = CommE;

    fn write(&mut self, addr: u16, val: u8) -> Result<(), CommE> {
        let [hi, lo] = addr.to_be_bytes();
        self.i2c.write(self.address, &[hi, lo, val])
    }

    fn bulk_write(&mut self, addr: u16, vals: &[u8]) -> Result<(), CommE> {
        let mut write_buf = [0u8; MAX_BULK_LEN + 2];
        let mut addr = addr;
        for chunk in vals.chunks(MAX_BULK_LEN) {
            let len = chunk.len() + 2;
            write_buf[..2].copy_from_slice(&addr.to_be_bytes());
            write_buf[2..len].copy_from_slice(chunk);
            self.i2c.write(self.address, &write_buf[..len])?;
            addr = addr.wrapping_add(chunk.len() as u16);
        }
        Ok(())
    }

    fn bulk_read(&mut self, addr: u16, buf: &mut [u8]) -> Result<(), CommE> {
        self.i2c.write_read(self.address, &addr.to_be_bytes(), buf)
    }
}
