use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::{Mask, grayscale_dilate};

/// Diagonal sweep of the glyph shading gradient
///
/// Each variant names the corner where the gradient is darkest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagonal {
    TopLeft,
    BottomLeft,
    TopRight,
    BottomRight,
}

impl Diagonal {
    pub const ALL: [Diagonal; 4] = [
        Diagonal::TopLeft,
        Diagonal::BottomLeft,
        Diagonal::TopRight,
        Diagonal::BottomRight,
    ];

    /// Distance-like weight of pixel (`x`, `y`) from the dark corner
    ///
    /// Ranges over [0, width + height].
    fn weight(self, x: u32, y: u32, width: u32, height: u32) -> u32 {
        match self {
            Diagonal::TopLeft => x + y,
            Diagonal::BottomLeft => x + height - y,
            Diagonal::TopRight => y + width - x,
            Diagonal::BottomRight => width - x + height - y,
        }
    }
}

/// Multiply every channel value by `1.5 * weight / (width + height)`
///
/// Produces a fade across the image whose direction is given by `dir`.
/// Results are clamped to [0, 255].
pub fn gradient_mask(img: &mut RgbImage, dir: Diagonal) {
    let (width, height) = img.dimensions();
    let wph = (width + height).max(1) as f32;

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let weight = dir.weight(x, y, width, height) as f32;
        for v in pixel.0.iter_mut() {
            *v = (1.5 * *v as f32 * weight / wph).clamp(0.0, 255.0) as u8;
        }
    }
}

/// Extract one channel of an RGB image
fn channel(img: &RgbImage, c: usize) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        Luma([img.get_pixel(x, y)[c]])
    })
}

/// Morphological edge emphasis: 3×3 dilation minus the original, per channel
pub fn edge_emphasis(img: &RgbImage) -> RgbImage {
    let mask = Mask::square(1);
    let dilated: Vec<GrayImage> = (0..3)
        .map(|c| grayscale_dilate(&channel(img, c), &mask))
        .collect();

    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        let src = img.get_pixel(x, y);
        Rgb([
            dilated[0].get_pixel(x, y)[0].saturating_sub(src[0]),
            dilated[1].get_pixel(x, y)[0].saturating_sub(src[1]),
            dilated[2].get_pixel(x, y)[0].saturating_sub(src[2]),
        ])
    })
}

/// Gaussian blur with a strength of `sigma`
///
/// A non-positive `sigma` returns the image unchanged.
pub fn blur(img: &RgbImage, sigma: f32) -> RgbImage {
    if sigma <= 0.0 {
        return img.clone();
    }
    gaussian_blur_f32(img, sigma)
}

/// Linearly rescale all channel values so the image spans [`lo`, `hi`]
///
/// Minimum and maximum are taken over every channel together. A constant
/// image is filled with `lo`.
pub fn normalize(img: &mut RgbImage, lo: u8, hi: u8) {
    let Some(&min) = img.as_raw().iter().min() else {
        return;
    };
    let max = img.as_raw().iter().copied().max().unwrap_or(min);

    if min == max {
        img.iter_mut().for_each(|v| *v = lo);
        return;
    }

    let scale = (hi as f32 - lo as f32) / (max - min) as f32;
    for v in img.iter_mut() {
        let scaled = lo as f32 + (*v - min) as f32 * scale;
        *v = scaled.round().clamp(0.0, 255.0) as u8;
    }
}

/// Shift each row horizontally by `offset(y)` pixels, filling with black
///
/// Positive offsets move content to the right.
pub fn shift_rows<F>(img: &mut RgbImage, offset: F)
where
    F: Fn(u32) -> i32,
{
    let (width, height) = img.dimensions();
    let w = width as i32;

    for y in 0..height {
        let shift = offset(y);
        if shift == 0 {
            continue;
        }
        let row: Vec<Rgb<u8>> = (0..width).map(|x| *img.get_pixel(x, y)).collect();
        for x in 0..w {
            let src = x - shift;
            let pixel = if (0..w).contains(&src) {
                row[src as usize]
            } else {
                Rgb([0, 0, 0])
            };
            img.put_pixel(x as u32, y, pixel);
        }
    }
}

/// Bitwise OR of `src` into `dst`, channel by channel
///
/// Both images must have the same dimensions.
pub fn or_merge(dst: &mut RgbImage, src: &RgbImage) {
    assert_eq!(dst.dimensions(), src.dimensions());
    dst.iter_mut().zip(src.iter()).for_each(|(d, s)| *d |= *s);
}

/// Blend `color` into every pixel where `coverage` is set
///
/// `new = (1 - opacity) * old + opacity * color`
pub fn blend_coverage(img: &mut RgbImage, coverage: &GrayImage, color: Rgb<u8>, opacity: f32) {
    assert_eq!(img.dimensions(), coverage.dimensions());
    let opacity = opacity.clamp(0.0, 1.0);

    for (pixel, cov) in img.pixels_mut().zip(coverage.pixels()) {
        if cov[0] == 0 {
            continue;
        }
        for (v, &c) in pixel.0.iter_mut().zip(color.0.iter()) {
            let blended = (1.0 - opacity) * *v as f32 + opacity * c as f32;
            *v = blended.round().clamp(0.0, 255.0) as u8;
        }
    }
}
