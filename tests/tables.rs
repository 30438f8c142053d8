mod common;

use common::{sensor, FakeBus, FakeDelay};
use imx547_i2c::mode_tables::{
    COMMON_SETTINGS, MODE_10BIT, MODE_12BIT, TABLE_SETTLE_MS,
};
use imx547_i2c::table::write_table;
use imx547_i2c::{Entry, Register, RegisterBus};

/// A bare bus and delay sharing one rig
fn parts() -> (FakeBus, FakeDelay, common::SharedRig) {
    let (sensor, rig) = sensor();
    let (bus, _trx, _pipe, delay) = sensor.release();
    rig.lock().unwrap().journal.clear();
    (bus, delay, rig)
}

#[test]
fn programs_are_idempotent() {
    for table in &[COMMON_SETTINGS, MODE_10BIT, MODE_12BIT] {
        let (mut bus, mut delay, rig) = parts();
        write_table(&mut bus, &mut delay, table).unwrap();
        let once = rig.lock().unwrap().regs();
        write_table(&mut bus, &mut delay, table).unwrap();
        let twice = rig.lock().unwrap().regs();
        assert_eq!(once, twice);
    }
}

#[test]
fn programs_end_with_settle_then_end() {
    for table in &[COMMON_SETTINGS, MODE_10BIT, MODE_12BIT] {
        let n = table.len();
        assert_eq!(table[n - 2], Entry::Wait(TABLE_SETTLE_MS));
        assert_eq!(table[n - 1], Entry::End);
    }
}

#[test]
fn mode_programs_set_line_length() {
    let (mut bus, mut delay, _rig) = parts();
    write_table(&mut bus, &mut delay, MODE_10BIT).unwrap();
    assert_eq!(bus.read_multi(Register::HmaxLow.addr(), 2).unwrap(), 274);
    assert_eq!(bus.read_multi(Register::VmaxLow.addr(), 3).unwrap(), 2216);

    write_table(&mut bus, &mut delay, MODE_12BIT).unwrap();
    assert_eq!(bus.read_multi(Register::HmaxLow.addr(), 2).unwrap(), 408);
    assert_eq!(bus.read_multi(Register::VmaxLow.addr(), 3).unwrap(), 2208);
}

#[test]
fn mode_programs_cover_the_same_registers() {
    let addrs = |table: &[Entry]| -> Vec<u16> {
        table
            .iter()
            .filter_map(|e| match *e {
                Entry::Write(addr, _) => Some(addr),
                _ => None,
            })
            .collect()
    };
    assert_eq!(addrs(MODE_10BIT), addrs(MODE_12BIT));
}

#[test]
fn common_program_configures_clock_and_lanes() {
    let (mut bus, mut delay, rig) = parts();
    write_table(&mut bus, &mut delay, COMMON_SETTINGS).unwrap();
    let rig = rig.lock().unwrap();
    assert_eq!(rig.reg(Register::InckselSt0.addr()), 0x0A);
    assert_eq!(rig.reg(Register::LaneSel.addr()), 0x03);
    assert_eq!(rig.reg(Register::CrcEccMode.addr()), 0xD1);
    assert_eq!(rig.reg(0x4A34), 0x0A);
    assert_eq!(
        rig.journal.last(),
        Some(&common::Event::DelayMs(TABLE_SETTLE_MS))
    );
}
