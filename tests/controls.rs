mod common;

use common::{
    clear, expected_shs, journal, sensor, BusFault, Event, RAW10, RAW12,
};
use imx547_i2c::controls::{DEF_BLACK_LEVEL_10BIT, MAX_BLACK_LEVEL_10BIT};
use imx547_i2c::{ControlId, ControlRange, Error};

#[test]
fn setup_pushes_defaults() {
    let (mut sensor, rig) = sensor();
    sensor.setup().unwrap();

    assert_eq!(
        journal(&rig),
        vec![
            Event::TrxReset(true),
            Event::PipeReset(false),
            Event::Write(0x3550, 0x06),
            Event::BulkWrite(0x3514, vec![0x00, 0x00]),
            // 1000 us at 5500 ns/line in a 2208 line frame -> SHS 2027
            Event::BulkWrite(0x3240, vec![0xEB, 0x07, 0x00]),
            Event::BulkWrite(0x35B4, vec![60, 0x00]),
        ]
    );
}

#[test]
fn exposure_is_clamped_and_converted() {
    let (mut sensor, rig) = sensor();
    let range = sensor.control_range(ControlId::Exposure);
    assert_eq!(range, ControlRange::new(14, 16666, 1000));

    let requests = [
        i32::MIN,
        -5,
        0,
        13,
        14,
        15,
        500,
        1000,
        5500,
        11924,
        16666,
        16667,
        20000,
        i32::MAX,
    ];
    for &v in &requests {
        let applied = sensor.set_control(ControlId::Exposure, v).unwrap();
        let clamped = v.max(range.min).min(range.max);
        assert_eq!(applied, clamped, "input {}", v);
        assert_eq!(sensor.control(ControlId::Exposure), clamped);

        let shs = rig.lock().unwrap().reg_multi(0x3240, 3);
        assert_eq!(
            shs,
            expected_shs(i64::from(clamped), 2208, 5500, 40),
            "input {}",
            v
        );
    }
}

#[test]
fn exposure_follows_ten_bit_limits() {
    let (mut sensor, rig) = sensor();
    sensor.set_format(RAW10).unwrap();
    sensor.set_stream(true).unwrap();
    let frame_length = i64::from(sensor.frame_length());
    let line_time = i64::from(sensor.line_time_ns());

    for &v in &[14, 3000, 16464, 16465, 100_000] {
        let applied = sensor.set_control(ControlId::Exposure, v).unwrap();
        let shs = rig.lock().unwrap().reg_multi(0x3240, 3);
        let expected =
            expected_shs(i64::from(applied), frame_length, line_time, 54);
        assert_eq!(shs, expected);
        assert!(shs >= 54 && i64::from(shs) < frame_length);
    }
    assert_eq!(sensor.control(ControlId::Exposure), 16464);
}

#[test]
fn gain_is_clamped() {
    let (mut sensor, rig) = sensor();
    clear(&rig);

    assert_eq!(sensor.set_control(ControlId::Gain, 1000).unwrap(), 480);
    assert_eq!(sensor.set_control(ControlId::Gain, -3).unwrap(), 0);
    assert_eq!(sensor.set_control(ControlId::Gain, 300).unwrap(), 300);
    assert_eq!(
        journal(&rig),
        vec![
            Event::BulkWrite(0x3514, vec![0xE0, 0x01]),
            Event::BulkWrite(0x3514, vec![0x00, 0x00]),
            Event::BulkWrite(0x3514, vec![0x2C, 0x01]),
        ]
    );
    assert_eq!(sensor.control(ControlId::Gain), 300);
}

#[test]
fn black_level_keeps_ten_bit_bounds_in_twelve_bit_mode() {
    let (mut sensor, rig) = sensor();
    sensor.set_format(RAW12).unwrap();

    let range = sensor.control_range(ControlId::BlackLevel);
    assert_eq!(range.max, MAX_BLACK_LEVEL_10BIT);
    assert_eq!(range.default, DEF_BLACK_LEVEL_10BIT);

    assert_eq!(sensor.set_control(ControlId::BlackLevel, 4000).unwrap(), 1023);
    assert_eq!(rig.lock().unwrap().reg_multi(0x35B4, 2), 1023);
}

#[test]
fn test_pattern_selection() {
    let (mut sensor, rig) = sensor();
    clear(&rig);

    assert_eq!(sensor.set_control(ControlId::TestPattern, 2).unwrap(), 2);
    assert_eq!(sensor.set_control(ControlId::TestPattern, 0).unwrap(), 0);
    assert_eq!(sensor.set_control(ControlId::TestPattern, 9).unwrap(), 3);
    assert_eq!(
        journal(&rig),
        vec![
            Event::Write(0x3550, 0x07),
            Event::Write(0x3551, 0x02),
            Event::Write(0x3550, 0x06),
            Event::Write(0x3550, 0x07),
            Event::Write(0x3551, 0x03),
        ]
    );
}

#[test]
fn failed_write_keeps_cached_value() {
    let (mut sensor, rig) = sensor();
    sensor.set_control(ControlId::Gain, 100).unwrap();

    rig.lock().unwrap().fail_after(0);
    let res = sensor.set_control(ControlId::Gain, 200);
    assert!(matches!(res, Err(Error::Comm(BusFault))));
    assert_eq!(sensor.control(ControlId::Gain), 100);

    rig.lock().unwrap().fail_after(0);
    let res = sensor.set_control(ControlId::Exposure, 5000);
    assert!(matches!(res, Err(Error::Comm(BusFault))));
    assert_eq!(sensor.control(ControlId::Exposure), 1000);

    rig.lock().unwrap().fail_after(0);
    let res = sensor.set_control(ControlId::BlackLevel, 100);
    assert!(matches!(res, Err(Error::Comm(BusFault))));
    assert_eq!(sensor.control(ControlId::BlackLevel), DEF_BLACK_LEVEL_10BIT);
}

#[test]
fn half_written_test_pattern_is_not_cached() {
    let (mut sensor, rig) = sensor();
    rig.lock().unwrap().fail_after(1);

    assert!(sensor.set_control(ControlId::TestPattern, 1).is_err());
    assert_eq!(sensor.control(ControlId::TestPattern), 0);
}
