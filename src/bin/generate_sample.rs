use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};

const SAMPLE_RATE: u32 = 16_000;
const DURATION_SECS: f64 = 3.0;

/// Example folder, input SNR in dB. Mirrors `CatalogConfig::default()` in
/// `src/catalog/tables.rs`; keep both in step.
const EXAMPLES: [(&str, f64); 3] = [
    ("Example_01", -20.0),
    ("Example_02", -25.0),
    ("Example_03", -30.0),
];

/// Residual noise gain left in the "enhanced" file.
const RESIDUAL_NOISE: f64 = 0.03;

/// Voiced, speech-like signal: a gliding fundamental with a few harmonics,
/// gated into syllables by a slow envelope.
fn synth_speech(n: usize, f0: f64) -> Vec<f64> {
    let sr = SAMPLE_RATE as f64;
    let mut phase = 0.0;
    (0..n)
        .map(|i| {
            let t = i as f64 / sr;
            let pitch = f0 * (1.0 + 0.08 * (2.0 * std::f64::consts::PI * 0.7 * t).sin());
            phase += 2.0 * std::f64::consts::PI * pitch / sr;

            let voiced: f64 = [(1.0, 1.0), (2.0, 0.5), (3.0, 0.3), (4.0, 0.15)]
                .iter()
                .map(|&(h, amp)| amp * (h * phase).sin())
                .sum();

            let syllable = (2.0 * std::f64::consts::PI * 3.5 * t).sin().max(0.0);
            voiced * syllable
        })
        .collect()
}

fn power(signal: &[f64]) -> f64 {
    signal.iter().map(|v| v * v).sum::<f64>() / signal.len().max(1) as f64
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Peak-normalise to 0.9 and write 16-bit mono PCM.
fn write_wav(path: &Path, signal: &[f64]) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let peak = signal.iter().fold(0.0f64, |m, v| m.max(v.abs())).max(1e-9);
    let scale = 0.9 * i16::MAX as f64 / peak;

    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("creating {}", path.display()))?;
    for &v in signal {
        writer.write_sample((v * scale).round() as i16)?;
    }
    writer.finalize()?;
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut rng = SimpleRng::new(42);
    let n = (SAMPLE_RATE as f64 * DURATION_SECS) as usize;

    for (i, &(name, snr_db)) in EXAMPLES.iter().enumerate() {
        let dir = out_dir.join(name);
        std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

        let clean = synth_speech(n, 120.0 + 30.0 * i as f64);
        let noise_std = (power(&clean) / 10f64.powf(snr_db / 10.0)).sqrt();
        let noise: Vec<f64> = (0..n).map(|_| rng.gauss(0.0, noise_std)).collect();

        let noisy: Vec<f64> = clean.iter().zip(&noise).map(|(s, w)| s + w).collect();
        let enhanced: Vec<f64> = clean
            .iter()
            .zip(&noise)
            .map(|(s, w)| s + RESIDUAL_NOISE * w)
            .collect();

        write_wav(&dir.join("speech_only.wav"), &clean)?;
        write_wav(&dir.join("noisy_input.wav"), &noisy)?;
        write_wav(&dir.join("enhanced_output.wav"), &enhanced)?;

        println!("Wrote {name} (input SNR {snr_db} dB) to {}", dir.display());
    }

    Ok(())
}
