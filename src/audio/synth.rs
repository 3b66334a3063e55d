//! Synthesized stand-ins for missing samples.
//!
//! A struck tone: a decaying fundamental with an inharmonic overtone, like a
//! small metallophone bar, plus a short noise strike drawn from a seeded
//! `ChaCha8Rng` so the same seed always renders the same buffer.

use std::f64::consts::TAU;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const TONE_SECONDS: f64 = 0.6;

const STRIKE_SECONDS: f64 = 0.012;
const OVERTONE_RATIO: f64 = 2.76;
const PEAK: f32 = 0.6;

/// Render a struck tone at `frequency` Hz.
pub fn struck_tone(frequency: f64, sample_rate: u32, seed: u64) -> Vec<f32> {
    let rate = sample_rate as f64;
    let num_samples = (rate * TONE_SECONDS) as usize;
    let strike_samples = (rate * STRIKE_SECONDS) as usize;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut output: Vec<f32> = (0..num_samples)
        .map(|i| {
            let t = i as f64 / rate;
            let norm = t / TONE_SECONDS;

            let body = (TAU * frequency * t).sin() * (-norm * 6.0).exp();
            let overtone =
                (TAU * frequency * OVERTONE_RATIO * t).sin() * (-norm * 14.0).exp() * 0.35;

            let strike = if i < strike_samples {
                let env = 1.0 - i as f64 / strike_samples as f64;
                rng.gen_range(-1.0..1.0) * env * 0.5
            } else {
                0.0
            };

            (body + overtone + strike) as f32
        })
        .collect();

    normalize(&mut output, PEAK);
    output
}

fn normalize(buffer: &mut [f32], peak: f32) {
    let max = buffer.iter().fold(0.0_f32, |m, s| m.max(s.abs()));
    if max > 0.0 {
        let scale = peak / max;
        buffer.iter_mut().for_each(|s| *s *= scale);
    }
}
