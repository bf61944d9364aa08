//! Cross-validation against the `hound` WAV implementation
//!
//! Files written by this crate must be readable by hound with identical
//! samples, and 16-bit files written by hound must decode here.

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use pcmwav::{decode, encode, quantize_sample, SoundBuffer};
use std::io::Cursor;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sine(frames: usize, freq: f32, rate: u32, amplitude: f32) -> Vec<f32> {
    (0..frames)
        .map(|i| {
            let t = i as f32 / rate as f32;
            amplitude * (2.0 * std::f32::consts::PI * freq * t).sin()
        })
        .collect()
}

#[test]
fn test_hound_reads_our_stereo_output() {
    init_logger();
    let left = sine(4410, 440.0, 44100, 0.8);
    let right = sine(4410, 660.0, 44100, 1.2); // clips
    let buffer = SoundBuffer::stereo(44100, left.clone(), right.clone()).unwrap();
    let bytes = encode(&buffer).unwrap();

    let mut reader = WavReader::new(Cursor::new(bytes)).expect("hound should accept the header");
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, SampleFormat::Int);

    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples.len(), 4410 * 2);
    for i in 0..4410 {
        assert_eq!(samples[2 * i], quantize_sample(left[i]));
        assert_eq!(samples[2 * i + 1], quantize_sample(right[i]));
    }
}

#[test]
fn test_hound_reads_our_mono_output() {
    init_logger();
    let buffer = SoundBuffer::mono(22050, sine(1000, 100.0, 22050, 0.5)).unwrap();
    let bytes = encode(&buffer).unwrap();

    let reader = WavReader::new(Cursor::new(bytes)).unwrap();
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.len(), 1000);
}

#[test]
fn test_we_read_hound_16_bit_output() {
    init_logger();
    let spec = WavSpec {
        channels: 2,
        sample_rate: 48000,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
        for i in 0..2000i32 {
            writer.write_sample((i * 16 - 16000) as i16).unwrap();
            writer.write_sample((16000 - i * 16) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    let buffer = decode(cursor.get_ref()).expect("hound 16-bit output should decode");
    assert_eq!(buffer.sample_rate(), 48000);
    assert_eq!(buffer.frame_count(), 2000);

    let right = buffer.right().unwrap();
    for i in 0..2000usize {
        let l = (i as i32 * 16 - 16000) as f32 / 32767.0;
        assert!((buffer.left()[i] - l).abs() < 1e-6);
        assert!((right[i] + l).abs() < 1e-6);
    }
}
