use crate::config::CaptchaConfig;
use crate::error::{CaptchaError, CaptchaResult};
use crate::glyph::{MAX_GLYPHS, load_font, render_glyphs};
use crate::noise::{shape_layer, speckle};
use crate::filters::or_merge;
use crate::text::random_text;
use image::{Rgb, RgbImage, imageops};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Canvas width in pixels
pub const WIDTH: u32 = 256;

/// Canvas height in pixels
pub const HEIGHT: u32 = 64;

/// A generated challenge: the plaintext answer and its distorted image
#[derive(Debug, Clone)]
pub struct Captcha {
    pub text: String,
    pub image: RgbImage,
}

/// Generates a challenge text and renders it
///
/// This runs the full pipeline:
/// 1. Draw the random text
/// 2. For each of the first 6 characters: render a shaded glyph, warp the
///    canvas with a fresh sine wave, paste the glyph into its slot
/// 3. Build the shape noise layer and OR it into the canvas
/// 4. Add speckle noise
/// 5. Draw the border (if enabled) and invert the image
///
/// # Arguments
/// * `config` - Generation parameters
/// * `rng` - Source of every random decision; seed it for reproducible output
///
/// # Errors
/// Returns [`CaptchaError::InvalidConfig`] if `config` does not validate.
pub fn generate<R: Rng>(config: &CaptchaConfig, rng: &mut R) -> CaptchaResult<Captcha> {
    config.validate().map_err(CaptchaError::InvalidConfig)?;

    // Step 1: Challenge text
    let text = random_text(rng, config.length);
    if text.len() > MAX_GLYPHS {
        warn!(
            "challenge has {} characters, only the first {MAX_GLYPHS} are drawn",
            text.len()
        );
    }

    // Step 2: Glyphs and wave distortion
    let font = load_font()?;
    let mut canvas = RgbImage::new(WIDTH, HEIGHT);
    render_glyphs(rng, &font, &mut canvas, &text);

    // Step 3: Shape noise
    let layer = shape_layer(rng, WIDTH, HEIGHT);
    or_merge(&mut canvas, &layer);

    // Step 4: Speckle
    speckle(rng, &mut canvas, config.noise_mode, config.speckle);

    // Step 5: Border and inversion
    if config.border {
        draw_hollow_rect_mut(
            &mut canvas,
            Rect::at(0, 0).of_size(WIDTH, HEIGHT),
            Rgb([255, 255, 255]),
        );
    }
    imageops::invert(&mut canvas);

    debug!("rendered {}-character challenge", text.len());
    Ok(Captcha {
        text,
        image: canvas,
    })
}

/// Generates `count` independent challenges in parallel
///
/// One seed per challenge is drawn from `rng` up front, then every challenge
/// is rendered with its own [`StdRng`]. The output order follows the seeds, so
/// a seeded `rng` gives the same batch every time.
pub fn generate_batch<R: Rng>(
    config: &CaptchaConfig,
    count: usize,
    rng: &mut R,
) -> CaptchaResult<Vec<Captcha>> {
    config.validate().map_err(CaptchaError::InvalidConfig)?;

    let seeds: Vec<u64> = (0..count).map(|_| rng.random()).collect();
    seeds
        .into_par_iter()
        .map(|seed| generate(config, &mut StdRng::seed_from_u64(seed)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NoiseMode;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn assert_black_border(img: &RgbImage) {
        let black = Rgb([0, 0, 0]);
        for x in 0..WIDTH {
            assert_eq!(*img.get_pixel(x, 0), black);
            assert_eq!(*img.get_pixel(x, HEIGHT - 1), black);
        }
        for y in 0..HEIGHT {
            assert_eq!(*img.get_pixel(0, y), black);
            assert_eq!(*img.get_pixel(WIDTH - 1, y), black);
        }
    }

    #[test]
    fn test_default_generation() {
        let captcha = generate(&CaptchaConfig::default(), &mut seeded(1)).unwrap();
        assert_eq!(captcha.text.len(), 5);
        assert!(captcha.text.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(captcha.image.dimensions(), (WIDTH, HEIGHT));
    }

    #[test]
    fn test_border_is_black_after_inversion() {
        for seed in 0..4 {
            let captcha = generate(&CaptchaConfig::default(), &mut seeded(seed)).unwrap();
            assert_black_border(&captcha.image);
        }
    }

    #[test]
    fn test_dimensions_fixed_for_any_options() {
        for (length, border) in [(1, false), (6, true), (8, false), (30, true)] {
            let config = CaptchaConfig {
                length,
                border,
                ..Default::default()
            };
            let captcha = generate(&config, &mut seeded(length as u64)).unwrap();
            assert_eq!(captcha.text.len(), length);
            assert_eq!(captcha.image.dimensions(), (256, 64));
        }
    }

    #[test]
    fn test_long_text_keeps_every_character() {
        let config = CaptchaConfig {
            length: 8,
            ..Default::default()
        };
        let captcha = generate(&config, &mut seeded(3)).unwrap();
        assert_eq!(captcha.text.len(), 8);
        assert_eq!(captcha.image.dimensions(), (WIDTH, HEIGHT));
        assert!(captcha.text.len() > MAX_GLYPHS);
    }

    #[test]
    fn test_same_seed_same_output() {
        let config = CaptchaConfig::default();
        let a = generate(&config, &mut seeded(42)).unwrap();
        let b = generate(&config, &mut seeded(42)).unwrap();
        assert_eq!(a.text, b.text);
        assert_eq!(a.image, b.image);
    }

    #[test]
    fn test_different_seeds_differ() {
        let config = CaptchaConfig {
            length: 6,
            ..Default::default()
        };
        let a = generate(&config, &mut seeded(100)).unwrap();
        let b = generate(&config, &mut seeded(101)).unwrap();
        assert_ne!(a.text, b.text);
        assert_ne!(a.image, b.image);
    }

    #[test]
    fn test_salt_and_pepper_mode() {
        let config = CaptchaConfig {
            noise_mode: NoiseMode::SaltAndPepper,
            ..Default::default()
        };
        let captcha = generate(&config, &mut seeded(7)).unwrap();
        assert_eq!(captcha.image.dimensions(), (WIDTH, HEIGHT));
        assert_black_border(&captcha.image);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = CaptchaConfig {
            length: 0,
            ..Default::default()
        };
        let result = generate(&config, &mut seeded(0));
        assert!(matches!(result, Err(CaptchaError::InvalidConfig(_))));
    }

    #[test]
    fn test_batch_is_deterministic() {
        let config = CaptchaConfig::default();
        let a = generate_batch(&config, 8, &mut seeded(9)).unwrap();
        let b = generate_batch(&config, 8, &mut seeded(9)).unwrap();
        assert_eq!(a.len(), 8);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.text, y.text);
            assert_eq!(x.image, y.image);
        }
    }

    #[test]
    fn test_batch_members_are_independent() {
        let batch = generate_batch(&CaptchaConfig::default(), 4, &mut seeded(10)).unwrap();
        for i in 0..batch.len() {
            for j in (i + 1)..batch.len() {
                assert_ne!(batch[i].image, batch[j].image);
            }
        }
    }

    #[test]
    fn test_empty_batch() {
        let batch = generate_batch(&CaptchaConfig::default(), 0, &mut seeded(11)).unwrap();
        assert!(batch.is_empty());
    }
}
