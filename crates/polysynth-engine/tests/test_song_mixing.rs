//! Integration tests for song construction and mixing.

use polysynth_engine::rng::create_voice_rng;
use polysynth_engine::{Effect, Playable, RenderConfig, Song, SynthError, Waveform};

fn sequential() -> RenderConfig {
    RenderConfig {
        parallel: false,
        ..RenderConfig::default()
    }
}

#[test]
fn test_empty_song_is_rejected() {
    let err = Song::new(vec![]).unwrap_err();
    assert!(matches!(err, SynthError::EmptyComposition));
    assert_eq!(err.code(), "SYNTH_003");
}

#[test]
fn test_one_second_of_silence() {
    let song = Song::new(vec![Playable::silence(0.0, 1.0)]).unwrap();
    let render = song.render(&RenderConfig::default()).unwrap();
    assert_eq!(render.samples.len(), 44100);
    assert!(render.samples.iter().all(|&s| s == 0));
    assert_eq!(render.duration(), 1.0);
}

#[test]
fn test_non_overlapping_voices_are_placed_back_to_back() {
    let config = sequential();
    let a = Playable::oscillator(Waveform::Triangle, 300.0, 0.0, 0.25);
    let b = Playable::oscillator(Waveform::Sawtooth, 150.0, 0.25, 0.25).with_volume(0.7);

    let mut expected = a.generate(&config, &mut create_voice_rng(0, 0)).unwrap();
    expected.extend(b.generate(&config, &mut create_voice_rng(0, 1)).unwrap());

    let render = Song::new(vec![b, a]).unwrap().render(&config).unwrap();
    assert_eq!(render.samples, expected);
}

#[test]
fn test_gap_between_voices_is_silent() {
    let config = sequential();
    let song = Song::new(vec![
        Playable::oscillator(Waveform::Sine, 440.0, 0.0, 0.1),
        Playable::oscillator(Waveform::Sine, 440.0, 0.3, 0.1),
    ])
    .unwrap();
    let render = song.render(&config).unwrap();
    assert_eq!(render.samples.len(), config.samples_for(0.4));
    let gap = &render.samples[config.samples_for(0.1)..config.samples_for(0.3)];
    assert!(gap.iter().all(|&s| s == 0));
}

#[test]
fn test_identical_normalized_voices_peak_at_max_amplitude() {
    let voice = Playable::oscillator(Waveform::Sine, 523.25, 0.0, 0.2).with_effect(Effect::Normalize);
    let song = Song::new(vec![voice.clone(), voice]).unwrap();
    let render = song.render(&sequential()).unwrap();
    assert_eq!(render.peak(), 4096);
}

#[test]
fn test_single_voice_peak_follows_volume() {
    let voice = Playable::oscillator(Waveform::Sine, 523.25, 0.0, 0.2)
        .with_volume(0.25)
        .with_effect(Effect::Normalize);
    let render = Song::new(vec![voice]).unwrap().render(&sequential()).unwrap();
    assert_eq!(render.peak(), 1024);
}
