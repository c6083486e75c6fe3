//! Tests for song construction and mixing.

use pretty_assertions::assert_eq;

use super::*;
use crate::config::{ClipMode, RenderConfig};
use crate::effects::Effect;
use crate::error::SynthError;
use crate::oscillator::Waveform;
use crate::playable::{Playable, Sample};
use crate::rng::create_voice_rng;

fn sequential() -> RenderConfig {
    RenderConfig {
        parallel: false,
        ..RenderConfig::default()
    }
}

fn constant(value: f64, len: usize, start: f64) -> Playable {
    Playable::sample(Sample::from_samples(vec![value; len], 44100), start)
}

#[test]
fn test_empty_song_fails() {
    let err = Song::new(Vec::new()).unwrap_err();
    assert!(matches!(err, SynthError::EmptyComposition));
}

#[test]
fn test_unusable_config_rejected_before_mixing() {
    let song = Song::new(vec![Playable::silence(0.0, 0.01)]).unwrap();
    let negative: RenderConfig = serde_json::from_str(r#"{"max_amplitude": -1}"#).unwrap();
    let no_rate = RenderConfig {
        sample_rate: 0,
        ..sequential()
    };

    for config in [negative, no_rate] {
        let err = song.render(&config).unwrap_err();
        assert!(matches!(err, SynthError::InvalidParameter { .. }));
    }
}

#[test]
fn test_silence_renders_zeros() {
    let song = Song::new(vec![Playable::silence(0.0, 1.0)]).unwrap();
    let out = song.render(&sequential()).unwrap();
    assert_eq!(out.samples.len(), 44100);
    assert!(out.samples.iter().all(|&s| s == 0));
    assert_eq!(out.clipped_samples, 0);
}

#[test]
fn test_playables_sorted_stably_and_length_tracked() {
    let mut song = Song::new(vec![
        Playable::silence(2.0, 1.0),
        Playable::silence(0.5, 0.5).with_volume(0.1),
    ])
    .unwrap();
    assert_eq!(song.length(), 3.0);
    assert_eq!(song.playables()[0].start, 0.5);

    song.add(Playable::silence(0.5, 0.25).with_volume(0.2))
        .unwrap();
    song.extend(vec![Playable::silence(4.0, 1.5)]).unwrap();

    let volumes: Vec<f64> = song.playables().iter().map(|p| p.volume).collect();
    assert_eq!(volumes, vec![0.1, 0.2, 1.0, 1.0]);
    assert_eq!(song.length(), 5.5);
}

#[test]
fn test_invalid_playable_rejected() {
    assert!(Song::new(vec![Playable::silence(0.0, -1.0)]).is_err());

    let mut song = Song::new(vec![Playable::silence(0.0, 1.0)]).unwrap();
    assert!(song.add(Playable::silence(f64::NAN, 1.0)).is_err());
    assert_eq!(song.playables().len(), 1);
}

#[test]
fn test_non_overlapping_voices_concatenate() {
    let config = sequential();
    let first = Playable::oscillator(Waveform::Sine, 440.0, 0.0, 0.5);
    let second = Playable::oscillator(Waveform::Square, 220.0, 0.5, 0.5).with_volume(0.5);

    let a = first.generate(&config, &mut create_voice_rng(0, 0)).unwrap();
    let b = second.generate(&config, &mut create_voice_rng(0, 1)).unwrap();

    let song = Song::new(vec![first, second]).unwrap();
    let out = song.render(&config).unwrap();

    let mut expected = a;
    expected.extend(b);
    assert_eq!(out.samples, expected);
}

#[test]
fn test_overlapping_normalized_voices_clip_to_peak() {
    let voice = Playable::oscillator(Waveform::Sine, 440.0, 0.0, 0.25).with_effect(Effect::Normalize);
    let song = Song::new(vec![voice.clone(), voice]).unwrap();
    let out = song.render(&sequential()).unwrap();
    assert_eq!(out.peak(), 4096);
    assert!(out.clipped_samples > 0);
}

#[test]
fn test_clip_modes_differ_on_order() {
    let voices = vec![
        constant(1.0, 100, 0.0),
        constant(1.0, 100, 0.0),
        constant(-1.0, 100, 0.0),
    ];
    let song = Song::new(voices).unwrap();

    let once = song.render(&sequential()).unwrap();
    assert!(once.samples.iter().all(|&s| s == 4096));

    let each_step = RenderConfig {
        clipping: ClipMode::ClipEachStep,
        ..sequential()
    };
    let stepped = song.render(&each_step).unwrap();
    assert!(stepped.samples.iter().all(|&s| s == 0));
}

#[test]
fn test_song_volume_applied_last() {
    let song = Song::new(vec![constant(1.0, 10, 0.0)])
        .unwrap()
        .with_volume(0.5);
    let out = song.render(&sequential()).unwrap();
    assert_eq!(out.samples, vec![2048; 10]);
}

#[test]
fn test_song_effects_run_on_mix() {
    let song = Song::new(vec![constant(1.0, 10, 0.0).with_volume(0.25)])
        .unwrap()
        .with_effects(vec![Effect::Normalize]);
    let out = song.render(&sequential()).unwrap();
    assert_eq!(out.samples, vec![4096; 10]);
}

#[test]
fn test_parallel_matches_sequential() {
    let song = Song::new(vec![
        Playable::noise(0.0, 0.2),
        Playable::noise(0.1, 0.2).with_volume(0.3),
        Playable::oscillator(Waveform::Triangle, 330.0, 0.05, 0.3),
    ])
    .unwrap()
    .with_seed(1234);

    let parallel = song.render(&RenderConfig::default()).unwrap();
    let serial = song.render(&sequential()).unwrap();
    assert_eq!(parallel, serial);
}

#[test]
fn test_seed_changes_noise() {
    let song = Song::new(vec![Playable::noise(0.0, 0.1)]).unwrap();
    let a = song.clone().with_seed(1).render(&sequential()).unwrap();
    let b = song.with_seed(2).render(&sequential()).unwrap();
    assert_ne!(a.samples, b.samples);
}
