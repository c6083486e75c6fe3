//! Playable rendering tests.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::*;
use crate::envelope::{Adsr, EPSILON};
use crate::modulation::{LinearTransition, Value};
use crate::rng::create_rng;
use crate::timbre::Harmonic;

fn organ() -> Arc<Timbre> {
    Arc::new(Timbre::new(
        vec![
            Harmonic::new(1.0, 1.0, Waveform::Sine),
            Harmonic::new(2.0, 0.5, Waveform::Sine),
            Harmonic::new(3.0, 0.25, Waveform::Triangle),
        ],
        Adsr::new(0.05, 0.1, 0.6, 0.2),
    ))
}

fn write_wav(path: &std::path::Path, channels: u16, rate: u32, frames: &[Vec<i16>]) {
    let spec = hound::WavSpec {
        channels,
        sample_rate: rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for frame in frames {
        for &s in frame {
            writer.write_sample(s).unwrap();
        }
    }
    writer.finalize().unwrap();
}

#[test]
fn test_note_length_includes_release() {
    let a4 = Tone::parse("a4").unwrap();
    let note = Playable::note(a4, organ(), 1.0, 0.5);
    assert!((note.length - (0.5 + 0.2 + EPSILON)).abs() < 1e-12);
    assert!((note.end() - (1.7 + EPSILON)).abs() < 1e-12);
}

#[test]
fn test_note_starts_silent_and_peaks_at_volume() {
    let config = RenderConfig::default();
    let note = Playable::note(Tone::parse("c4").unwrap(), organ(), 0.0, 0.5).with_volume(0.5);
    let out = note.generate(&config, &mut create_rng(0)).unwrap();

    assert_eq!(out.len(), config.samples_for(note.length));
    assert_eq!(out[0], 0);
    let peak = out.iter().map(|s| s.abs()).max().unwrap();
    assert_eq!(peak, 2048);
}

#[test]
fn test_note_with_pitch_envelope() {
    let config = RenderConfig::default();
    let timbre = Timbre::sine(Adsr::new(0.0, 0.0, 1.0, 0.0))
        .with_pitch_envelope(Adsr::new(0.1, 0.0, 1.0, 0.0).with_level(12.0));
    let note = Playable::note(Tone::parse("a3").unwrap(), Arc::new(timbre), 0.0, 0.2);
    let raw = note.render(&config, &mut create_rng(0)).unwrap();
    assert!(raw.iter().all(|s| s.is_finite()));
    assert!(raw.iter().any(|&s| s != 0.0));
}

#[test]
fn test_silence_generates_zeros() {
    let config = RenderConfig::default();
    let out = Playable::silence(0.0, 0.5)
        .generate(&config, &mut create_rng(0))
        .unwrap();
    assert_eq!(out, vec![0; 22050]);
}

#[test]
fn test_oscillator_normalized_to_max_amplitude() {
    let config = RenderConfig::default();
    let out = Playable::oscillator(Waveform::Square, 100.0, 0.0, 0.1)
        .generate(&config, &mut create_rng(0))
        .unwrap();
    assert_eq!(out.len(), 4410);
    assert!(out.iter().all(|&s| s == 4096 || s == -4096));
}

#[test]
fn test_noise_depends_only_on_rng() {
    let config = RenderConfig::default();
    let noise = Playable::noise(0.0, 0.05);
    let a = noise.generate(&config, &mut create_rng(3)).unwrap();
    let b = noise.generate(&config, &mut create_rng(3)).unwrap();
    let c = noise.generate(&config, &mut create_rng(4)).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a.iter().all(|&s| (0..=4096).contains(&s)));
}

#[test]
fn test_sample_padded_to_length() {
    let config = RenderConfig::default();
    let sample = Sample::from_samples(vec![0.5, -1.0, 0.25], 44100);
    let playable = Playable::sample(sample, 0.0).with_length(5.0 / 44100.0);
    let out = playable.generate(&config, &mut create_rng(0)).unwrap();
    assert_eq!(out, vec![2048, -4096, 1024, 0, 0]);
}

#[test]
fn test_invalid_placement_rejected() {
    let config = RenderConfig::default();
    let err = Playable::silence(-1.0, 1.0)
        .generate(&config, &mut create_rng(0))
        .unwrap_err();
    assert!(matches!(err, SynthError::InvalidParameter { .. }));
}

#[test]
fn test_unusable_config_rejected() {
    let config = RenderConfig {
        max_amplitude: i16::MIN,
        ..RenderConfig::default()
    };
    let err = Playable::oscillator(Waveform::Sine, 440.0, 0.0, 0.1)
        .generate(&config, &mut create_rng(0))
        .unwrap_err();
    assert!(matches!(err, SynthError::InvalidParameter { .. }));
}

#[test]
fn test_effect_error_propagates() {
    let config = RenderConfig::default();
    let playable = Playable::silence(0.0, 0.0).with_effect(Effect::Transpose {
        interval: Value::Constant(2.0),
    });
    let err = playable.generate(&config, &mut create_rng(0)).unwrap_err();
    assert_eq!(err.code(), SynthError::effect("transpose", "").code());
}

#[test]
fn test_sample_transpose() {
    let data: Vec<f64> = (0..4096).map(|i| (i as f64 * 0.05).sin()).collect();
    let sample = Sample::from_samples(data.clone(), 44100);

    let same = sample.transposed(0.0).unwrap();
    assert_eq!(same.data(), data.as_slice());

    let mut up = sample.clone();
    up.transpose(7.0).unwrap();
    assert_eq!(up.data().len(), data.len());
    assert_ne!(up.data(), data.as_slice());
    // The original is untouched.
    assert_eq!(sample.data(), data.as_slice());
}

#[test]
fn test_sample_load_mixes_to_mono() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stereo.wav");
    write_wav(
        &path,
        2,
        44100,
        &[vec![16384, 0], vec![-16384, -16384], vec![0, 16384]],
    );

    let sample = Sample::load(&path, &SampleOptions::default(), &RenderConfig::default()).unwrap();
    assert_eq!(sample.data(), &[0.25, -0.5, 0.25]);
    assert_eq!(sample.sample_rate(), 44100);
}

#[test]
fn test_sample_load_offset_and_duration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clip.wav");
    let frames: Vec<Vec<i16>> = (0..10).map(|i| vec![i * 1000]).collect();
    write_wav(&path, 1, 10, &frames);

    let config = RenderConfig {
        sample_rate: 10,
        ..RenderConfig::default()
    };
    let options = SampleOptions {
        offset: 0.2,
        duration: Some(0.3),
    };
    let sample = Sample::load(&path, &options, &config).unwrap();
    let expected: Vec<f64> = [2000.0, 3000.0, 4000.0]
        .iter()
        .map(|v| v / 32768.0)
        .collect();
    assert_eq!(sample.data(), expected.as_slice());
    assert!((sample.duration() - 0.3).abs() < 1e-12);
}

#[test]
fn test_sample_rate_mismatch_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slow.wav");
    write_wav(&path, 1, 22050, &[vec![0], vec![1]]);

    let err = Sample::load(&path, &SampleOptions::default(), &RenderConfig::default()).unwrap_err();
    assert!(matches!(err, SynthError::UnsupportedSample { .. }));
}

#[test]
fn test_missing_sample_file() {
    let err = Sample::load(
        "/definitely/not/here.wav",
        &SampleOptions::default(),
        &RenderConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SynthError::Wav(_) | SynthError::Io(_)));
}

#[test]
fn test_low_pass_removes_upper_tone() {
    let config = RenderConfig::default();
    let rate = config.rate();
    let sine = |freq: f64, i: usize| (2.0 * std::f64::consts::PI * freq * i as f64 / rate).sin();
    // 0.1 s, so 200 Hz and 3 kHz land on bins 20 and 300.
    let data: Vec<f64> = (0..4410).map(|i| sine(200.0, i) + sine(3000.0, i)).collect();

    // Cutoff ramps 500 Hz to 1500 Hz and resolves to its mean, about 1 kHz.
    let filtered = Playable::sample(Sample::from_samples(data, 44100), 0.0).with_effect(
        Effect::LowPassFilter {
            cutoff: Value::from(LinearTransition::new(0.0, 500.0, 0.1, 1500.0)),
            resonance: Value::Constant(0.0),
            cutout_width: Value::Constant(1.0),
            resonance_width: Value::Constant(1.0),
        },
    );
    let out = filtered.generate(&config, &mut create_rng(0)).unwrap();

    assert_eq!(out.len(), 4410);
    for (i, &s) in out.iter().enumerate() {
        let expected = 4096.0 * sine(200.0, i);
        assert!(
            (s as f64 - expected).abs() < 4.0,
            "sample {i}: {s} vs {expected}"
        );
    }
}
