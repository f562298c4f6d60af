//! End-to-end acceptance and rejection corpus for every decoder, driven
//! through the generic [`microparse::parse`] front door.

use microparse::{
    Base64Blob, CalendarDate, CivilDateTime, DecimalValue, EpochTimestamp, HexValue, Ipv4Address,
    Ipv6Address, TimeZoneOffset, Uuid, parse,
};

fn accepts<T: microparse::Parse + PartialEq + std::fmt::Debug>(text: &str, expected: T) {
    assert_eq!(parse::<T>(text.as_bytes()), Ok(expected), "input: {text}");
}

fn rejects<T: microparse::Parse + PartialEq + std::fmt::Debug>(text: &str) {
    assert!(parse::<T>(text.as_bytes()).is_err(), "input: {text}");
}

#[test]
fn decimal_integers() {
    accepts("0", DecimalValue { value: 0 });
    accepts("1", DecimalValue { value: 1 });
    accepts("1984", DecimalValue { value: 1984 });
    accepts("65535", DecimalValue { value: 65_535 });
    accepts("4294967295", DecimalValue { value: 4_294_967_295 });
    accepts("18446744073709551615", DecimalValue { value: u64::MAX });
    accepts("00000000000000000042", DecimalValue { value: 42 });

    rejects::<DecimalValue>("");
    rejects::<DecimalValue>("-1");
    rejects::<DecimalValue>("+1");
    rejects::<DecimalValue>("1984 ");
    rejects::<DecimalValue>(" 1984");
    rejects::<DecimalValue>("19.84");
    rejects::<DecimalValue>("18446744073709551616");
    rejects::<DecimalValue>("99999999999999999999");
    rejects::<DecimalValue>("000000000000000000042");
}

#[test]
fn hexadecimal_integers() {
    accepts("0", HexValue { value: 0 });
    accepts("f", HexValue { value: 15 });
    accepts("F", HexValue { value: 15 });
    accepts("7c0", HexValue { value: 0x7C0 });
    accepts("0x7C0", HexValue { value: 0x7C0 });
    accepts("0XDeadBeef", HexValue { value: 0xDEAD_BEEF });
    accepts("ffffffffffffffff", HexValue { value: u64::MAX });
    accepts("0xffffffffffffffff", HexValue { value: u64::MAX });

    rejects::<HexValue>("");
    rejects::<HexValue>("0x");
    rejects::<HexValue>("0xg");
    rejects::<HexValue>("deadbeer");
    rejects::<HexValue>("1ffffffffffffffff");
    rejects::<HexValue>("0x1ffffffffffffffff");
    rejects::<HexValue>(" ff");
}

#[test]
fn calendar_dates() {
    accepts("1984-10-24", CalendarDate::new(1984, 10, 24));
    accepts("0001-01-01", CalendarDate::new(1, 1, 1));
    accepts("9999-12-31", CalendarDate::new(9999, 12, 31));

    rejects::<CalendarDate>("1984-10-2");
    rejects::<CalendarDate>("1984-10-245");
    rejects::<CalendarDate>("1984/10/24");
    rejects::<CalendarDate>("YYYY-10-24");
    rejects::<CalendarDate>("1984-MM-24");
    rejects::<CalendarDate>("1984-10-DD");
}

#[test]
fn civil_date_times() {
    let base = CivilDateTime::new(CalendarDate::new(1984, 10, 24), 23, 59, 59);
    accepts("1984-10-24 23:59:59", base);
    accepts("1984-10-24T23:59:59", base);
    accepts("1984-10-24 23:59:59Z", base.with_offset(TimeZoneOffset::UTC));
    accepts("1984-10-24T23:59:59Z", base.with_offset(TimeZoneOffset::UTC));
    accepts("1984-10-24 23:59:59 UTC", base.with_offset(TimeZoneOffset::UTC));
    accepts(
        "1984-10-24 23:59:59+01:00",
        base.with_offset(TimeZoneOffset::east(1, 0)),
    );
    accepts(
        "1984-10-24T23:59:59-11:30",
        base.with_offset(TimeZoneOffset::west(11, 30)),
    );
    accepts(
        "1984-10-24 23:59:59.123456789Z",
        base.with_nanosecond(123_456_789)
            .with_offset(TimeZoneOffset::UTC),
    );
    accepts("1984-10-24 23:59:59.1", base.with_nanosecond(100_000_000));

    rejects::<CivilDateTime>("1984-10-24");
    rejects::<CivilDateTime>("1984-10-24 23:59");
    rejects::<CivilDateTime>("1984-10-24 23:59:59.");
    rejects::<CivilDateTime>("1984-10-24 23:59:59.1234567890");
    rejects::<CivilDateTime>("1984-10-24 24:00:00");
    rejects::<CivilDateTime>("1984-10-24 23:60:00");
    rejects::<CivilDateTime>("1984-10-24 23:59:60");
    rejects::<CivilDateTime>("1984-10-24x23:59:59");
    rejects::<CivilDateTime>("1984-10-24 23:59:59+0100");
    rejects::<CivilDateTime>("1984-10-24 23:59:59 GMT");
}

#[test]
fn epoch_timestamps() {
    accepts("1970-01-01 00:00:00Z", EpochTimestamp::EPOCH);
    accepts(
        "2000-01-01T00:00:00Z",
        EpochTimestamp::from_micros(946_684_800_000_000),
    );
    accepts(
        "1969-12-31 23:59:59.5Z",
        EpochTimestamp::from_micros(-500_000),
    );

    // the offset folds into the UTC instant
    let reference = parse::<EpochTimestamp>(b"1984-01-02 00:32:04.567Z").unwrap();
    accepts("1984-01-01 13:02:04.567-11:30", reference);
    accepts("1984-01-02 02:32:04.567+02:00", reference);

    rejects::<EpochTimestamp>("1984-10-24");
    rejects::<EpochTimestamp>("now");
}

#[test]
fn timestamp_calendar_projection() {
    let stamp = parse::<EpochTimestamp>(b"1984-10-24 23:59:59.999999Z").unwrap();
    assert_eq!(stamp.as_date(), CalendarDate::new(1984, 10, 24));

    let civil = stamp.as_civil();
    assert_eq!(civil.hour, 23);
    assert_eq!(civil.nanosecond, 999_999_000);
    assert_eq!(civil.offset, Some(TimeZoneOffset::UTC));
}

#[test]
fn uuids() {
    let expected = Uuid::from_bytes([
        0xF8, 0x1D, 0x4F, 0xAE, 0x7D, 0xEC, 0x11, 0xD0, //
        0xA7, 0x65, 0x00, 0xA0, 0xC9, 0x1E, 0x6B, 0xF6,
    ]);
    accepts("f81d4fae7dec11d0a76500a0c91e6bf6", expected);
    accepts("F81D4FAE7DEC11D0A76500A0C91E6BF6", expected);
    accepts("f81d4fae-7dec-11d0-a765-00a0c91e6bf6", expected);
    accepts("F81D4FAE-7DEC-11D0-A765-00A0C91E6BF6", expected);
    accepts("{f81d4fae-7dec-11d0-a765-00a0c91e6bf6}", expected);

    rejects::<Uuid>("");
    rejects::<Uuid>("f81d4fae7dec11d0a76500a0c91e6bf");
    rejects::<Uuid>("f81d4fae-7dec-11d0-a765-00a0c91e6bf67");
    rejects::<Uuid>("urn:uuid:f81d4fae-7dec-11d0-a765-00a0c91e6bf6");
}

#[test]
fn uuid_single_byte_corruption() {
    // bytes adjacent to the hex ranges in ASCII must not slip through
    let canonical = b"f81d4fae7dec11d0a76500a0c91e6bf6";
    for &byte in &[b'/', b':', b'@', b'[', b'`', b'{', b'g', b'G'] {
        for position in 0..canonical.len() {
            let mut corrupted = *canonical;
            corrupted[position] = byte;
            assert!(
                parse::<Uuid>(&corrupted).is_err(),
                "byte {:?} at {position} accepted",
                byte as char
            );
        }
    }
}

#[test]
fn base64url_blobs() {
    accepts("", Base64Blob(Vec::new()));
    accepts("Zg", Base64Blob(b"f".to_vec()));
    accepts("Zm9vYmFy", Base64Blob(b"foobar".to_vec()));
    accepts(
        "SGVsbG8sIFdvcmxkIQ",
        Base64Blob(b"Hello, World!".to_vec()),
    );

    rejects::<Base64Blob>("Zm9vYmFy=");
    rejects::<Base64Blob>("Zm9v+g");
    rejects::<Base64Blob>("Z");
}

#[test]
fn ip_addresses() {
    accepts("127.0.0.1", Ipv4Address([127, 0, 0, 1]));
    accepts("255.255.255.255", Ipv4Address([255; 4]));
    rejects::<Ipv4Address>("256.1.1.1");
    rejects::<Ipv4Address>("1.2.3");

    accepts(
        "::1",
        Ipv6Address([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]),
    );
    let spelled = parse::<Ipv6Address>(b"2001:0db8:85a3:0000:0000:8a2e:0370:7334").unwrap();
    accepts("2001:db8:85a3::8a2e:370:7334", spelled);
    rejects::<Ipv6Address>("2001::db8::1");
    rejects::<Ipv6Address>("localhost");
}

#[test]
fn failures_carry_diagnostics() {
    let failure = parse::<CivilDateTime>(b"1984-13-99 25:61:61").unwrap_err();
    let message = failure.to_string();
    assert!(message.contains("date-time"), "message: {message}");
    assert!(message.contains("1984-13-99"), "message: {message}");

    // long inputs are quoted truncated, with the true length reported
    let long = "9".repeat(100);
    let failure = parse::<DecimalValue>(long.as_bytes()).unwrap_err();
    let message = failure.to_string();
    assert!(message.contains("len = 100"), "message: {message}");
    assert!(message.len() < 150, "message: {message}");
}

#[test]
fn from_str_integration() {
    let uuid: Uuid = "f81d4fae-7dec-11d0-a765-00a0c91e6bf6".parse().unwrap();
    assert_eq!(uuid.to_string(), "f81d4fae-7dec-11d0-a765-00a0c91e6bf6");

    let when: CivilDateTime = "1984-10-24T23:59:59.25Z".parse().unwrap();
    assert_eq!(when.nanosecond, 250_000_000);

    assert!("".parse::<DecimalValue>().is_err());
}
