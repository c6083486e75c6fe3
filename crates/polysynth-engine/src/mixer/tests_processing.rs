//! Tests for normalization, placement and clipping helpers.

use super::*;
use crate::config::Quantization;

#[test]
fn test_peak() {
    assert_eq!(peak(&[]), 0.0);
    assert_eq!(peak(&[0.5, -2.0, 1.5]), 2.0);
}

#[test]
fn test_normalize_hits_target_exactly() {
    let mut samples = vec![0.3, -0.7, 0.1];
    assert!(normalize_to(&mut samples, 4096.0));
    assert_eq!(peak(&samples), 4096.0);
    assert_eq!(samples[1], -4096.0);
}

#[test]
fn test_normalize_silence_is_identity() {
    let mut samples = vec![0.0; 16];
    assert!(!normalize_to(&mut samples, 4096.0));
    assert_eq!(samples, vec![0.0; 16]);
}

#[test]
fn test_quantize_modes() {
    let samples = [1.7, -1.7, 2.5];
    assert_eq!(
        quantize_buffer(&samples, Quantization::Truncate),
        vec![1, -1, 2]
    );
    assert_eq!(quantize_buffer(&samples, Quantization::Round), vec![2, -2, 3]);
}

#[test]
fn test_add_at_offset_and_bounds() {
    let mut buffer = vec![0; 5];
    add_at(&mut buffer, 3, &[1, 2, 3]);
    assert_eq!(buffer, vec![0, 0, 0, 1, 2]);

    add_at(&mut buffer, 0, &[5]);
    assert_eq!(buffer, vec![5, 0, 0, 1, 2]);

    add_at(&mut buffer, 10, &[7, 7]);
    assert_eq!(buffer, vec![5, 0, 0, 1, 2]);
}

#[test]
fn test_clip_counts_changes() {
    let mut buffer = vec![-5000, -4096, 0, 4096, 9000];
    assert_eq!(clip(&mut buffer, 4096), 2);
    assert_eq!(buffer, vec![-4096, -4096, 0, 4096, 4096]);
    assert_eq!(clip(&mut buffer, 4096), 0);
}
