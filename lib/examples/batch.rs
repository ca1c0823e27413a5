/// Batch example: render a handful of challenges in parallel and save them
///
/// Usage: cargo run --example batch -- [count] [seed]
use distort_captcha::{CaptchaConfig, generate_batch};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() {
    println!("Distort Captcha - Batch Example");
    println!("===============================\n");

    let mut args = std::env::args().skip(1);
    let count: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(4);
    let seed: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(2024);

    let config = CaptchaConfig {
        length: 6,
        ..Default::default()
    };

    println!("Rendering {} challenges with seed {}", count, seed);
    println!("  - Length: {}", config.length);
    println!("  - Border: {}", config.border);
    println!("  - Noise: {} ({})", config.noise_mode, config.speckle);
    println!();

    let mut rng = StdRng::seed_from_u64(seed);
    let batch = generate_batch(&config, count, &mut rng).expect("Failed to render batch");

    for (i, captcha) in batch.iter().enumerate() {
        let path = format!("batch_{i}.png");
        captcha.image.save(&path).expect("Failed to save image");
        println!("✓ {} -> {}", captcha.text, path);
    }

    println!("\nBatch complete!");
}
