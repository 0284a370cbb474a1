mod common;

use std::sync::Arc;
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

use idna_encoding::shift::shift_up;
use idna_encoding::{
    decode, encode, Codec, CompactError, DecodeError, EncodeError, Offset,
    ShiftError,
};

//----------- Tests ----------------------------------------------------------

#[rstest]
#[case::single_zero(b"\x00", "xn--wda")]
#[case::ascii(b"abc123", "xn--bfacd5pfg")]
#[case::ten_zeros(&[0u8; 10], "xn--wdaaaaaaaaaa")]
#[case::arbitrary(
    b"These are abitrary bytes: \x13\xA3\x99\xF8",
    "xn--geazaaa9m2g1dbakc5aacg3b0a0ofbkprf1kc61gji54g"
)]
fn known_labels(#[case] octets: &[u8], #[case] label: &str) {
    common::init_logging();

    assert_eq!(encode(octets).unwrap(), label);
    assert_eq!(decode(label).unwrap(), octets);
}

#[rstest]
#[case::empty(&[0u8; 0])]
#[case::all_zero(&[0x00; 40])]
#[case::all_ff(&[0xFF; 40])]
#[case::every_octet(&(0..=255).collect::<Vec<u8>>())]
fn round_trip(#[case] octets: &[u8]) {
    common::init_logging();

    let label = encode(octets).unwrap();
    assert!(label
        .bytes()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == b'-'));
    assert_eq!(decode(&label).unwrap(), octets);
}

#[rstest]
fn random_round_trip(
    #[values(0x80, 0xFF, 0x100, 0x1000, 0xE000, 0x10FF00)] offset: u32,
) {
    common::init_logging();

    let codec = Codec::from_value(offset).unwrap();
    let mut rng = StdRng::seed_from_u64(u64::from(offset));
    for _ in 0..200 {
        let len = rng.gen_range(0..48);
        let mut octets = vec![0u8; len];
        rng.fill(&mut octets[..]);

        let label = codec.encode(&octets).unwrap();
        assert_eq!(codec.decode(&label).unwrap(), octets);
    }
}

#[test]
fn deterministic() {
    let octets = b"the same octets every time";
    let first = encode(octets).unwrap();
    for _ in 0..10 {
        assert_eq!(encode(octets).unwrap(), first);
    }
}

#[test]
fn length_preserved() {
    let octets = b"\x00\x01\x7f\x80\xfe\xff";
    for offset in [Offset::MIN, Offset::DEFAULT, Offset::MAX] {
        assert_eq!(shift_up(offset, octets).count(), octets.len());
    }
}

#[test]
fn below_bounds() {
    common::init_logging();

    // A plain ASCII label decodes into characters below the offset.
    assert_eq!(
        decode("example"),
        Err(DecodeError::Shift(ShiftError::BelowBounds {
            codepoint: 'e',
            index: 0
        }))
    );

    // "xn--vda" is a single U+00FE, just below the default offset.
    let err = decode("xn--vda").unwrap_err();
    assert!(err.is_below_bounds());
    assert_eq!(
        err,
        DecodeError::Shift(ShiftError::BelowBounds {
            codepoint: '\u{FE}',
            index: 0,
        })
    );
}

#[test]
fn above_bounds() {
    common::init_logging();

    // U+01FF is one above the range of the default offset.
    let label = Codec::from_value(0x100).unwrap().encode(b"\xff").unwrap();
    assert_eq!(
        decode(&label),
        Err(DecodeError::Shift(ShiftError::AboveBounds {
            codepoint: '\u{1FF}',
            index: 0
        }))
    );
}

#[test]
fn malformed_labels() {
    common::init_logging();

    assert_eq!(
        decode("xn--"),
        Err(DecodeError::Compaction(CompactError::BadLabel))
    );
    assert_eq!(
        decode("xn--wda!"),
        Err(DecodeError::Compaction(CompactError::BadLabel))
    );
    assert_eq!(
        decode("xn--w\u{E9}a"),
        Err(DecodeError::Compaction(CompactError::NonAscii))
    );
}

#[test]
fn ascii_offset() {
    common::init_logging();

    // With a zero offset, octets that are letters, digits, and hyphens
    // come out as they are. Anything else can't be part of a label.
    let codec = Codec::new(Offset::MIN);
    assert_eq!(codec.encode(b"ab-12").unwrap(), "ab-12");
    assert_eq!(codec.decode("ab-12").unwrap(), b"ab-12");
    assert_eq!(codec.encode(b"").unwrap(), "");
    let invalid: [&[u8]; 6] =
        [b"a.b", b" ", b"_x", b"A\x7f", b"\0", b"a.\xff"];
    for octets in invalid {
        assert_eq!(
            codec.encode(octets),
            Err(EncodeError::Compaction(CompactError::Unencodable))
        );
    }

    // Mixed octets keep their basic code points, which must be valid too.
    let label = codec.encode(b"ab\xff").unwrap();
    assert!(label.starts_with("xn--ab-"));
    assert_eq!(codec.decode(&label).unwrap(), b"ab\xff");
}

#[test]
fn offsets_are_independent() {
    common::init_logging();

    let octets = b"independent";
    let low = Codec::DEFAULT;
    let high = Codec::from_value(0x4E00).unwrap();

    let low_label = low.encode(octets).unwrap();
    let high_label = high.encode(octets).unwrap();
    assert_ne!(low_label, high_label);

    assert_eq!(low.decode(&low_label).unwrap(), octets);
    assert_eq!(high.decode(&high_label).unwrap(), octets);
    assert!(low.decode(&high_label).unwrap_err().is_above_bounds());
    assert!(high.decode(&low_label).unwrap_err().is_below_bounds());
}

#[test]
fn case_insensitive_labels() {
    assert_eq!(decode("XN--WDA").unwrap(), b"\x00");
    assert_eq!(decode("Xn--BfAcD5pFg").unwrap(), b"abc123");
}

#[test]
fn shared_between_threads() {
    let codec = Arc::new(Codec::from_value(0x3000).unwrap());
    let handles: Vec<_> = (0..4u8)
        .map(|i| {
            let codec = codec.clone();
            thread::spawn(move || {
                let octets = vec![i; 16];
                let label = codec.encode(&octets).unwrap();
                assert_eq!(codec.decode(&label).unwrap(), octets);
                label
            })
        })
        .collect();
    let labels: Vec<String> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();
    for (i, label) in labels.iter().enumerate() {
        assert_eq!(codec.encode(&[i as u8; 16]).unwrap(), *label);
    }
}

#[cfg(feature = "heapless")]
#[test]
fn decode_into_heapless() {
    let octets: heapless::Vec<u8, 1> =
        idna_encoding::decode_octets("xn--wda").unwrap();
    assert_eq!(octets.as_slice(), b"\x00");

    let octets: heapless::Vec<u8, 6> =
        idna_encoding::decode_octets("xn--bfacd5pfg").unwrap();
    assert_eq!(octets.as_slice(), b"abc123");

    let err = idna_encoding::decode_octets::<heapless::Vec<u8, 5>>(
        "xn--bfacd5pfg",
    )
    .unwrap_err();
    assert_eq!(err, DecodeError::Shift(ShiftError::ShortBuf));
}

#[cfg(feature = "bytes")]
#[test]
fn decode_into_bytes() {
    let octets: bytes::Bytes =
        idna_encoding::decode_octets("xn--bfacd5pfg").unwrap();
    assert_eq!(octets.as_ref(), b"abc123");
}
