//! End-to-end tests: registry and mixer driven headless, the way the
//! audio backend drives them in production.

use rustfft::{FftPlanner, num_complex::Complex};
use susurro_engine::{
    BinauralParams, BinauralUpdate, EngineState, LayerRegistry, NoiseParams, NoiseUpdate,
};
use susurro_synth::Waveform;

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK: usize = 1024;

fn render_seconds(mixer: &mut susurro_engine::Mixer, seconds: f32) -> (Vec<f32>, Vec<f32>) {
    let frames = (SAMPLE_RATE * seconds) as usize;
    let mut left = vec![0.0f32; frames];
    let mut right = vec![0.0f32; frames];
    for chunk in 0..frames.div_ceil(BLOCK) {
        let start = chunk * BLOCK;
        let end = (start + BLOCK).min(frames);
        mixer.render(&mut left[start..end], &mut right[start..end]);
    }
    (left, right)
}

fn rms(buffer: &[f32]) -> f32 {
    (buffer.iter().map(|&s| s * s).sum::<f32>() / buffer.len() as f32).sqrt()
}

fn spectral_centroid(signal: &[f32]) -> f32 {
    const FFT_SIZE: usize = 4096;
    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(FFT_SIZE);

    let windows = signal.len() / FFT_SIZE;
    let mut spectrum = vec![0.0f32; FFT_SIZE / 2];
    let mut buffer = vec![Complex::new(0.0f32, 0.0f32); FFT_SIZE];
    for w in 0..windows {
        for i in 0..FFT_SIZE {
            buffer[i] = Complex::new(signal[w * FFT_SIZE + i], 0.0);
        }
        fft.process(&mut buffer);
        for i in 0..FFT_SIZE / 2 {
            spectrum[i] += buffer[i].norm_sqr();
        }
    }

    let bin_hz = SAMPLE_RATE / FFT_SIZE as f32;
    let mut num = 0.0;
    let mut den = 0.0;
    for (i, &power) in spectrum.iter().enumerate().skip(1) {
        num += i as f32 * bin_hz * power;
        den += power;
    }
    num / den
}

fn count_rising_zero_crossings(signal: &[f32]) -> usize {
    let mut crossings = 0;
    for pair in signal.windows(2) {
        if pair[0] <= 0.0 && pair[1] > 0.0 {
            crossings += 1;
        }
    }
    crossings
}

#[test]
fn noise_layer_end_to_end() {
    let (mut registry, mut mixer) = LayerRegistry::new(SAMPLE_RATE);
    let id = registry.add_noise_layer(NoiseParams::default());

    // Nothing sounds before play
    let (left, _) = render_seconds(&mut mixer, 0.25);
    assert_eq!(rms(&left), 0.0, "idle layer must be silent");

    registry.play_all().unwrap();
    let (left, right) = render_seconds(&mut mixer, 1.0);
    assert!(rms(&left) > 0.01, "playing layer must produce signal");
    assert!(rms(&right) > 0.01);

    // Every mixed sample stays finite and sane
    for &s in left.iter().chain(right.iter()) {
        assert!(s.is_finite());
        assert!(s.abs() <= 1.0, "single default layer must not clip, got {}", s);
    }

    registry.stop_all();
    let (left, _) = render_seconds(&mut mixer, 0.25);
    assert_eq!(rms(&left), 0.0, "stopped layer must be silent");

    // Stopping again is a no-op, not an error
    registry.stop_all();
    assert_eq!(registry.layer_state(id), Some(EngineState::Idle));
}

#[test]
fn spectral_tilt_follows_slope() {
    let (mut registry, mut mixer) = LayerRegistry::new(SAMPLE_RATE);
    let id = registry.add_noise_layer(NoiseParams::default());
    registry.play_all().unwrap();

    // White
    let (white, _) = render_seconds(&mut mixer, 2.0);
    let white_centroid = spectral_centroid(&white);

    // Brown: low-frequency dominant
    registry
        .update_noise(id, NoiseUpdate { slope: Some(-6.0), ..NoiseUpdate::default() })
        .unwrap();
    let (brown, _) = render_seconds(&mut mixer, 2.0);
    let brown_centroid = spectral_centroid(&brown);

    // Violet: high-frequency dominant
    registry
        .update_noise(id, NoiseUpdate { slope: Some(6.0), ..NoiseUpdate::default() })
        .unwrap();
    let (violet, _) = render_seconds(&mut mixer, 2.0);
    let violet_centroid = spectral_centroid(&violet);

    assert!(
        brown_centroid < white_centroid && white_centroid < violet_centroid,
        "centroids must order brown < white < violet: {:.0} / {:.0} / {:.0}",
        brown_centroid,
        white_centroid,
        violet_centroid
    );
    assert!(
        brown_centroid < 500.0,
        "brown energy should concentrate low, centroid {:.0}",
        brown_centroid
    );
}

#[test]
fn play_while_playing_keeps_exactly_one_source() {
    let (mut registry, mut mixer) = LayerRegistry::new(SAMPLE_RATE);
    registry.add_noise_layer(NoiseParams::default());

    registry.play_all().unwrap();
    let (left, _) = render_seconds(&mut mixer, 0.5);
    let single = rms(&left);

    // Re-triggering play swaps the source instead of stacking a second one
    registry.play_all().unwrap();
    registry.play_all().unwrap();
    let (left, _) = render_seconds(&mut mixer, 0.5);
    let after_replays = rms(&left);

    assert_eq!(mixer.active_count(), 1, "exactly one active source");
    let ratio = after_replays / single;
    assert!(
        (0.5..2.0).contains(&ratio),
        "replay must not stack sources (rms {} vs {})",
        single,
        after_replays
    );
}

#[test]
fn mute_and_resume() {
    let (mut registry, mut mixer) = LayerRegistry::new(SAMPLE_RATE);
    let id = registry.add_noise_layer(NoiseParams::default());
    registry.play_all().unwrap();

    registry
        .update_noise(id, NoiseUpdate { muted: Some(true), ..NoiseUpdate::default() })
        .unwrap();
    let (left, _) = render_seconds(&mut mixer, 0.25);
    assert_eq!(rms(&left), 0.0, "muted layer must fall silent");
    assert_eq!(registry.layer_muted(id), Some(true));

    registry
        .update_noise(id, NoiseUpdate { muted: Some(false), ..NoiseUpdate::default() })
        .unwrap();
    let (left, _) = render_seconds(&mut mixer, 0.25);
    assert!(rms(&left) > 0.01, "unmuted layer must resume while global playing");
}

#[test]
fn binaural_layer_end_to_end() {
    let (mut registry, mut mixer) = LayerRegistry::new(SAMPLE_RATE);
    let id = registry.add_binaural_layer(BinauralParams::default());
    registry.play_all().unwrap();

    let (left, right) = render_seconds(&mut mixer, 1.0);

    // Default: carrier 200 Hz left, 210 Hz right; the 1 kHz default cutoff
    // passes both cleanly, so zero crossings count the tone frequency.
    let left_freq = count_rising_zero_crossings(&left);
    let right_freq = count_rising_zero_crossings(&right);
    assert!((left_freq as i32 - 200).abs() <= 3, "left ~200 Hz, got {}", left_freq);
    assert!((right_freq as i32 - 210).abs() <= 3, "right ~210 Hz, got {}", right_freq);

    // Change the beat while playing: right ear moves, left stays put
    registry
        .update_binaural(id, BinauralUpdate { beat_hz: Some(30.0), ..BinauralUpdate::default() })
        .unwrap();
    let (left, right) = render_seconds(&mut mixer, 1.0);
    let left_freq = count_rising_zero_crossings(&left);
    let right_freq = count_rising_zero_crossings(&right);
    assert!((left_freq as i32 - 200).abs() <= 3, "left unchanged, got {}", left_freq);
    assert!((right_freq as i32 - 230).abs() <= 3, "right follows beat, got {}", right_freq);
}

#[test]
fn binaural_waveform_switch_keeps_playing() {
    let (mut registry, mut mixer) = LayerRegistry::new(SAMPLE_RATE);
    let id = registry.add_binaural_layer(BinauralParams::default());
    registry.play_all().unwrap();

    for waveform in [Waveform::Triangle, Waveform::Square, Waveform::Saw, Waveform::Sine] {
        registry
            .update_binaural(
                id,
                BinauralUpdate { waveform: Some(waveform), ..BinauralUpdate::default() },
            )
            .unwrap();
        let (left, _) = render_seconds(&mut mixer, 0.25);
        assert!(
            rms(&left) > 0.001,
            "{:?}: tone must keep sounding through waveform switch",
            waveform
        );
        for &s in &left {
            assert!(s.is_finite());
        }
    }
}

#[test]
fn removing_one_layer_leaves_others_running() {
    let (mut registry, mut mixer) = LayerRegistry::new(SAMPLE_RATE);
    let noise = registry.add_noise_layer(NoiseParams::default());
    let binaural = registry.add_binaural_layer(BinauralParams::default());
    registry.play_all().unwrap();

    let (left, _) = render_seconds(&mut mixer, 0.5);
    assert!(rms(&left) > 0.01);

    registry.remove_layer(noise).unwrap();
    let (left, _) = render_seconds(&mut mixer, 0.5);
    assert!(
        rms(&left) > 0.001,
        "binaural layer must keep rendering after noise layer removal"
    );
    assert_eq!(mixer.layer_count(), 1);
    assert_eq!(registry.layer_state(binaural), Some(EngineState::Playing));
}

#[test]
fn filter_position_shapes_noise_spectrum() {
    let (mut registry, mut mixer) = LayerRegistry::new(SAMPLE_RATE);
    let id = registry.add_noise_layer(NoiseParams::default());
    registry.play_all().unwrap();

    // Fully open
    let (open, _) = render_seconds(&mut mixer, 1.0);
    let open_centroid = spectral_centroid(&open);

    // Fully closed: 200 Hz cutoff
    registry
        .update_noise(
            id,
            NoiseUpdate { filter_position: Some(0.0), ..NoiseUpdate::default() },
        )
        .unwrap();
    // Give the cutoff smoothing time to settle, then measure
    let _ = render_seconds(&mut mixer, 0.5);
    let (closed, _) = render_seconds(&mut mixer, 1.0);
    let closed_centroid = spectral_centroid(&closed);

    assert!(
        closed_centroid < open_centroid / 4.0,
        "closing the filter must pull the centroid down: {:.0} -> {:.0}",
        open_centroid,
        closed_centroid
    );
}

#[test]
fn volume_update_applies_without_restart() {
    let (mut registry, mut mixer) = LayerRegistry::new(SAMPLE_RATE);
    let id = registry.add_noise_layer(NoiseParams::default());
    registry.play_all().unwrap();

    let (left, _) = render_seconds(&mut mixer, 0.5);
    let before = rms(&left);

    registry
        .update_noise(id, NoiseUpdate { volume: Some(0.025), ..NoiseUpdate::default() })
        .unwrap();
    let _ = render_seconds(&mut mixer, 0.1); // smoothing settles
    let (left, _) = render_seconds(&mut mixer, 0.5);
    let after = rms(&left);

    assert!(
        (before / after - 10.0).abs() < 1.5,
        "10x volume drop should show in output: {} vs {}",
        before,
        after
    );
}
