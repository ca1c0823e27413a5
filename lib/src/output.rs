//! Emitting a challenge: text line first, image second

use crate::error::CaptchaResult;
use crate::processor::Captcha;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use log::debug;
use std::io::Write;
use std::path::Path;

/// Write the challenge text to `out`, followed by `\n`
pub fn write_text<W: Write>(captcha: &Captcha, out: &mut W) -> CaptchaResult<()> {
    writeln!(out, "{}", captcha.text)?;
    out.flush()?;
    Ok(())
}

/// Encode the image as PNG into `out`
pub fn write_png<W: Write>(captcha: &Captcha, out: &mut W) -> CaptchaResult<()> {
    let (width, height) = captcha.image.dimensions();
    PngEncoder::new(&mut *out).write_image(
        captcha.image.as_raw(),
        width,
        height,
        ExtendedColorType::Rgb8,
    )?;
    out.flush()?;
    Ok(())
}

/// Emit a challenge
///
/// The text line, terminated by `\n`, always goes to `out` first. With a
/// `path` the image is saved there in the format its extension names; without
/// one the PNG bytes follow on `out` directly after that newline.
///
/// # Errors
/// Stream failures and image encoding or saving failures. The text line may
/// already have been written when the image fails.
pub fn emit<W: Write>(captcha: &Captcha, path: Option<&Path>, out: &mut W) -> CaptchaResult<()> {
    write_text(captcha, out)?;
    match path {
        Some(path) => {
            debug!("saving image to {}", path.display());
            captcha.image.save(path)?;
        }
        None => {
            debug!("streaming png to output");
            write_png(captcha, out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CaptchaConfig;
    use crate::error::CaptchaError;
    use crate::processor::{HEIGHT, WIDTH, generate};
    use image::{ColorType, GenericImageView, ImageFormat, Rgb};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::path::PathBuf;

    fn sample(length: usize) -> Captcha {
        let config = CaptchaConfig {
            length,
            ..Default::default()
        };
        generate(&config, &mut StdRng::seed_from_u64(1234)).unwrap()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("distort-captcha-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_stream_layout() {
        let captcha = sample(5);
        let mut out = Vec::new();
        emit(&captcha, None, &mut out).unwrap();

        let newline = out.iter().position(|&b| b == b'\n').unwrap();
        let text = std::str::from_utf8(&out[..newline]).unwrap();
        assert_eq!(text, captcha.text);
        assert_eq!(text.len(), 5);
        assert!(text.chars().all(|c| c.is_ascii_alphanumeric()));

        // png signature right after the newline
        let payload = &out[newline + 1..];
        assert_eq!(&payload[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory_with_format(payload, ImageFormat::Png).unwrap();
        assert_eq!(decoded.dimensions(), (WIDTH, HEIGHT));
        assert_eq!(decoded.color(), ColorType::Rgb8);

        let decoded = decoded.to_rgb8();
        assert_eq!(decoded, captcha.image);
        for x in 0..WIDTH {
            assert_eq!(*decoded.get_pixel(x, 0), Rgb([0, 0, 0]));
            assert_eq!(*decoded.get_pixel(x, HEIGHT - 1), Rgb([0, 0, 0]));
        }
        for y in 0..HEIGHT {
            assert_eq!(*decoded.get_pixel(0, y), Rgb([0, 0, 0]));
            assert_eq!(*decoded.get_pixel(WIDTH - 1, y), Rgb([0, 0, 0]));
        }
    }

    #[test]
    fn test_save_to_file() {
        let captcha = sample(8);
        let path = temp_path("long.png");
        let mut out = Vec::new();
        emit(&captcha, Some(&path), &mut out).unwrap();

        assert_eq!(out, format!("{}\n", captcha.text).into_bytes());
        assert_eq!(captcha.text.len(), 8);

        let saved = image::open(&path).unwrap();
        assert_eq!(saved.dimensions(), (256, 64));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_format_follows_extension() {
        let captcha = sample(5);
        let path = temp_path("shot.bmp");
        emit(&captcha, Some(&path), &mut Vec::new()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"BM");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_unknown_extension_fails_after_text() {
        let captcha = sample(5);
        let path = temp_path("image.notaformat");
        let mut out = Vec::new();
        let result = emit(&captcha, Some(&path), &mut out);

        assert!(matches!(result, Err(CaptchaError::Image(_))));
        assert_eq!(out, format!("{}\n", captcha.text).into_bytes());
    }

    #[test]
    fn test_unwritable_path_fails() {
        let captcha = sample(5);
        let path = temp_path("missing-dir").join("nested").join("out.png");
        let result = emit(&captcha, Some(&path), &mut Vec::new());
        assert!(result.is_err());
    }
}
