//! Shape noise layer and speckle noise

use crate::config::NoiseMode;
use crate::filters::{blend_coverage, blur, normalize};
use crate::glyph::bright_color;
use image::{GrayImage, Luma, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use imageproc::noise::salt_and_pepper_noise_mut;
use rand::Rng;

const ROUNDS: usize = 3;
const SHAPES_PER_ROUND: usize = 10;
const MAX_RADIUS: f32 = 30.0;
const SHAPE_OPACITY: f32 = 0.6;
const LAYER_BLUR: f32 = 0.5;
const LAYER_CEILING: u8 = 148;

/// Build the shape noise layer for a canvas of the given size
///
/// Three rounds of ten bright circles or lines at 60% opacity. Every round
/// after the first starts by blurring the layer and squeezing it into
/// [0, 148], so older shapes fade behind newer ones.
pub fn shape_layer<R: Rng>(rng: &mut R, width: u32, height: u32) -> RgbImage {
    let mut layer = RgbImage::new(width, height);
    let (w, h) = (width as f32, height as f32);

    for round in 0..ROUNDS {
        if round > 0 {
            layer = blur(&layer, LAYER_BLUR);
            normalize(&mut layer, 0, LAYER_CEILING);
        }

        for _ in 0..SHAPES_PER_ROUND {
            let color = bright_color(rng);
            let mut coverage = GrayImage::new(width, height);
            if rng.random::<f32>() < 0.5 {
                let center = (
                    (rng.random::<f32>() * w) as i32,
                    (rng.random::<f32>() * h) as i32,
                );
                let radius = (rng.random::<f32>() * MAX_RADIUS) as i32;
                draw_filled_circle_mut(&mut coverage, center, radius, Luma([255]));
            } else {
                let start = (
                    (rng.random::<f32>() * w).floor(),
                    (rng.random::<f32>() * h).floor(),
                );
                let end = (
                    (rng.random::<f32>() * w).floor(),
                    (rng.random::<f32>() * h).floor(),
                );
                draw_line_segment_mut(&mut coverage, start, end, Luma([255]));
            }
            blend_coverage(&mut layer, &coverage, color, SHAPE_OPACITY);
        }
    }

    layer
}

/// Add per-channel speckle noise to the whole image
///
/// `amount` is the per-channel noise amplitude for [`NoiseMode::Uniform`] and
/// the percentage of pixels turned black or white for [`NoiseMode::SaltAndPepper`].
pub fn speckle<R: Rng>(rng: &mut R, img: &mut RgbImage, mode: NoiseMode, amount: f32) {
    match mode {
        NoiseMode::Uniform => {
            for v in img.iter_mut() {
                let noisy = *v as f32 + amount * rng.random_range(-1.0f32..=1.0);
                *v = noisy.round().clamp(0.0, 255.0) as u8;
            }
        }
        NoiseMode::SaltAndPepper => {
            let rate = (amount as f64 / 100.0).clamp(0.0, 1.0);
            salt_and_pepper_noise_mut(img, rate, rng.random());
        }
    }
}
