//! Per-character glyph rendering and canvas warping

use crate::error::CaptchaResult;
use crate::filters::{Diagonal, blur, edge_emphasis, gradient_mask, normalize, shift_rows};
use ab_glyph::{Font, FontRef, PxScale};
use image::{Rgb, RgbImage, imageops};
use imageproc::drawing::{draw_text_mut, text_size};
use log::debug;
use rand::Rng;

const FONT_BYTES: &[u8] = include_bytes!("../assets/DejaVuSansMono-Bold.ttf");

/// The two font sizes a glyph is drawn at, in pixels
pub const FONT_SIZES: [f32; 2] = [38.0, 57.0];

/// Horizontal distance between glyph slots
pub const SLOT_STRIDE: i64 = 40;

/// Left margin of the first glyph slot
pub const SLOT_MARGIN: i64 = 6;

/// Number of leading characters that are drawn; the rest of a longer
/// challenge appears in the text only
pub const MAX_GLYPHS: usize = 6;

/// Maximum wave displacement in pixels
const WAVE_AMPLITUDE: f32 = 4.0;

/// Parse the embedded glyph font
pub fn load_font() -> CaptchaResult<FontRef<'static>> {
    Ok(FontRef::try_from_slice(FONT_BYTES)?)
}

/// Random color with every channel in [128, 255]
pub fn bright_color<R: Rng>(rng: &mut R) -> Rgb<u8> {
    Rgb([
        rng.random_range(128..=255),
        rng.random_range(128..=255),
        rng.random_range(128..=255),
    ])
}

/// Draw a character onto a fresh black bitmap
///
/// The bitmap is sized to hold the offset plus the laid-out character, the
/// way a text draw onto an empty image grows it.
///
/// # Arguments
/// * `font` - Glyph font
/// * `ch` - Character to draw
/// * `x0`, `y0` - Offset of the character inside the bitmap
/// * `size` - Font size in pixels
/// * `color` - Glyph color
///
/// # Returns
/// The bitmap, or `None` if the font has no glyph for `ch`
pub fn rasterize(
    font: &FontRef<'_>,
    ch: char,
    x0: u32,
    y0: u32,
    size: f32,
    color: Rgb<u8>,
) -> Option<RgbImage> {
    if font.glyph_id(ch).0 == 0 {
        return None;
    }
    let mut buf = [0u8; 4];
    let text = ch.encode_utf8(&mut buf);
    let scale = PxScale::from(size);

    let (width, height) = text_size(scale, font, text);
    let mut img = RgbImage::new(x0 + width, y0 + height);
    draw_text_mut(&mut img, color, x0 as i32, y0 as i32, scale, font, text);
    Some(img)
}

/// Render one shaded, possibly hollowed and blurred glyph
///
/// # Returns
/// The glyph bitmap, or `None` if the font cannot draw `ch`
pub fn render_glyph<R: Rng>(rng: &mut R, font: &FontRef<'_>, ch: char) -> Option<RgbImage> {
    let color = bright_color(rng);
    let x0 = rng.random_range(2..=10);
    let y0 = rng.random_range(0..=12);
    let size = FONT_SIZES[rng.random_range(0..FONT_SIZES.len())];

    let mut glyph = rasterize(font, ch, x0, y0, size, color)?;

    let dir = Diagonal::ALL[rng.random_range(0..Diagonal::ALL.len())];
    gradient_mask(&mut glyph, dir);

    let hollow = rng.random_bool(0.5);
    if hollow {
        glyph = edge_emphasis(&glyph);
    }

    let sigma = 0.8 * rng.random::<f32>();
    let mut glyph = blur(&glyph, sigma);
    normalize(&mut glyph, 0, 255);

    debug!(
        "glyph '{ch}': offset ({x0}, {y0}), size {size}, {dir:?}, hollow {hollow}, sigma {sigma:.2}"
    );
    Some(glyph)
}

/// Shift every canvas row by `round(4 * cos(row * freq + phase))`
///
/// `freq` is drawn from [-1/7, 1/7] and `phase` from [-3, 3].
pub fn wave<R: Rng>(rng: &mut R, canvas: &mut RgbImage) {
    let phase = 3.0 * rng.random_range(-1.0f32..=1.0);
    let freq = rng.random_range(-1.0f32..=1.0) / 7.0;
    shift_rows(canvas, |y| {
        (WAVE_AMPLITUDE * (y as f32 * freq + phase).cos()).round() as i32
    });
}

/// Left edge of glyph slot `k`
pub fn slot_x(k: usize) -> i64 {
    SLOT_MARGIN + SLOT_STRIDE * k as i64
}

/// Draw the first [`MAX_GLYPHS`] characters of `text` into their slots
///
/// Each glyph is rendered, then the canvas gets a fresh wave, then the glyph
/// is pasted over its slot. Characters past the cap are ignored.
pub fn render_glyphs<R: Rng>(
    rng: &mut R,
    font: &FontRef<'_>,
    canvas: &mut RgbImage,
    text: &str,
) {
    for (k, ch) in text.chars().take(MAX_GLYPHS).enumerate() {
        let Some(glyph) = render_glyph(rng, font, ch) else {
            continue;
        };
        wave(rng, canvas);
        imageops::replace(canvas, &glyph, slot_x(k), 0);
    }
}
