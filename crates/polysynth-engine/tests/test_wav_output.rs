//! Integration tests for WAV output.

use std::sync::Arc;

use polysynth_engine::playback::{MemorySink, PlaybackSink};
use polysynth_engine::wav::compute_pcm_hash;
use polysynth_engine::{Adsr, RenderConfig, ScoreLine, Song, Timbre, WavFileSink, WavResult};

fn render() -> polysynth_engine::SongRender {
    let timbre = Arc::new(Timbre::sine(Adsr::new(0.01, 0.05, 0.6, 0.1)));
    Song::from_lines(240.0, &[ScoreLine::new(timbre, "a4 - c5")])
        .unwrap()
        .render(&RenderConfig::default())
        .unwrap()
}

#[test]
fn test_wav_file_round_trip() {
    let render = render();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("song.wav");

    let mut sink = WavFileSink::new(&path);
    sink.play(&render.samples, render.sample_rate, true).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let expected = WavResult::from_render(&render);
    assert_eq!(compute_pcm_hash(&bytes), Some(expected.pcm_hash));

    let mut reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.spec().bits_per_sample, 16);
    assert_eq!(reader.spec().sample_rate, 44100);
    let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(decoded, render.samples);
}

#[test]
fn test_memory_sink_receives_render() {
    let render = render();
    let mut sink = MemorySink::default();
    sink.play(&render.samples, render.sample_rate, false).unwrap();
    assert_eq!(sink.played.len(), 1);
    assert_eq!(sink.played[0].0, render.samples);
}
