//! Malformed and unsupported inputs
//!
//! Every case must come back as the matching error kind without a
//! buffer and without panicking.

use pcmwav::{decode, inspect, DecodeError, ErrorKind, FormatError, UnsupportedFormatError};
use proptest::prelude::*;
use util::{WavFixture, FORMAT_PCM};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_unsupported_bit_depths() {
    init_logger();
    for bits in [8u16, 24] {
        let bytes = WavFixture::raw(bits, 1, 44100, vec![0; 48]).to_bytes();
        match decode(&bytes) {
            Err(DecodeError::Unsupported(UnsupportedFormatError::BitDepth(b))) => {
                assert_eq!(b, bits)
            }
            other => panic!("{}-bit should be unsupported, got {:?}", bits, other),
        }
    }
}

#[test]
fn test_three_channels_rejected() {
    init_logger();
    let bytes = WavFixture::pcm16(3, 44100, &[0; 9]).to_bytes();
    let err = decode(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    assert!(matches!(
        err,
        DecodeError::Unsupported(UnsupportedFormatError::ChannelCount(3))
    ));
}

#[test]
fn test_zero_channels_rejected() {
    let bytes = WavFixture::pcm16(0, 44100, &[]).to_bytes();
    assert!(matches!(
        decode(&bytes),
        Err(DecodeError::Unsupported(UnsupportedFormatError::ChannelCount(0)))
    ));
}

#[test]
fn test_compressed_format_codes_rejected() {
    init_logger();
    for code in [0x0002u16, 0x0006, 0x0007, 0x0055] {
        let bytes = WavFixture::pcm16(1, 8000, &[0; 4]).format_code(code).to_bytes();
        assert!(
            matches!(
                decode(&bytes),
                Err(DecodeError::Unsupported(UnsupportedFormatError::FormatCode(c))) if c == code
            ),
            "format code {:#06x} should be rejected",
            code
        );
    }
}

#[test]
fn test_unregistered_format_code_decodes_by_bit_depth() {
    init_logger();
    for code in [0x0000u16, 0x0004, 0x7777] {
        let bytes = WavFixture::pcm16(1, 8000, &[100, 200]).format_code(code).to_bytes();
        let buffer = decode(&bytes).unwrap();
        assert_eq!(buffer.frame_count(), 2, "format code {:#06x}", code);
        assert!((buffer.left()[0] - 100.0 / 32767.0).abs() < 1e-7);
    }
}

#[test]
fn test_mismatched_format_code_is_tolerated() {
    init_logger();
    // 32-bit samples tagged as integer PCM are still read as floats
    let bytes = WavFixture::float32(1, 8000, &[0.5, -0.5])
        .format_code(FORMAT_PCM)
        .to_bytes();
    assert_eq!(decode(&bytes).unwrap().left(), &[0.5, -0.5]);
}

#[test]
fn test_data_chunk_longer_than_file() {
    init_logger();
    let bytes = WavFixture::pcm16(2, 44100, &[1, 2, 3, 4])
        .data_len(1000)
        .to_bytes();
    let err = decode(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Truncated);
    assert!(matches!(
        err,
        DecodeError::Truncated { chunk: "data", declared: 1000, available: 8 }
    ));
    assert!(inspect(&bytes).is_err(), "Header probing must agree with decode");
}

#[test]
fn test_fmt_extension_longer_than_file() {
    let mut bytes = WavFixture::pcm16(1, 8000, &[])
        .fmt_extra(Vec::new())
        .to_bytes();
    // Claim 200 extension bytes that are not there
    bytes[36..38].copy_from_slice(&200u16.to_le_bytes());
    assert!(matches!(
        decode(&bytes),
        Err(DecodeError::Truncated { chunk: "fmt ", .. })
    ));
}

fn variant_name(err: &FormatError) -> &'static str {
    match err {
        FormatError::InvalidRiffMagic { .. } => "riff magic",
        FormatError::InvalidFormType { .. } => "form type",
        FormatError::UnexpectedChunk { expected, .. } if expected == b"fmt " => "fmt id",
        FormatError::UnexpectedChunk { .. } => "data id",
        FormatError::InvalidFmtSize(_) => "fmt size",
        FormatError::ZeroSampleRate => "sample rate",
    }
}

#[test]
fn test_identifier_mismatches() {
    init_logger();
    let cases = vec![
        (WavFixture::pcm16(1, 8000, &[0]).riff_magic(b"RIFX"), "riff magic"),
        (WavFixture::pcm16(1, 8000, &[0]).form_type(b"AIFF"), "form type"),
        (WavFixture::pcm16(1, 8000, &[0]).fmt_id(b"junk"), "fmt id"),
        (WavFixture::pcm16(1, 8000, &[0]).data_id(b"LIST"), "data id"),
        (WavFixture::pcm16(1, 8000, &[0]).fmt_size(20), "fmt size"),
        (WavFixture::pcm16(1, 0, &[0]), "sample rate"),
    ];

    for (fixture, expected) in cases {
        match decode(&fixture.to_bytes()) {
            Err(DecodeError::Format(err)) => assert_eq!(variant_name(&err), expected),
            other => panic!("Expected a {} error, got {:?}", expected, other),
        }
    }
}

#[test]
fn test_informational_fields_are_not_trusted() {
    init_logger();
    // Legacy writers stored block_align = 4 for mono streams
    let bytes = WavFixture::pcm16(1, 8000, &[100, 200, 300])
        .block_align(4)
        .byte_rate(1)
        .riff_len(0)
        .trailing(vec![0xFF; 7])
        .to_bytes();
    let buffer = decode(&bytes).unwrap();
    assert_eq!(buffer.frame_count(), 3);
    assert!((buffer.left()[2] - 300.0 / 32767.0).abs() < 1e-7);
}

#[test]
fn test_empty_input() {
    let err = decode(&[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Truncated);
}

proptest! {
    #[test]
    fn test_arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode(&bytes);
    }

    #[test]
    fn test_any_truncation_of_a_valid_file_fails(cut in 0usize..60) {
        let bytes = WavFixture::pcm16(2, 8000, &[7; 8]).to_bytes();
        prop_assume!(cut < bytes.len());
        let err = decode(&bytes[..cut]).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Truncated);
    }

    #[test]
    fn test_unsupported_depths_rejected(bits in any::<u16>().prop_filter("supported", |b| !matches!(*b, 16 | 32 | 64))) {
        let bytes = WavFixture::raw(bits, 1, 8000, vec![0; 16]).format_code(FORMAT_PCM).to_bytes();
        prop_assert!(matches!(
            decode(&bytes),
            Err(DecodeError::Unsupported(UnsupportedFormatError::BitDepth(b))) if b == bits
        ));
    }
}
