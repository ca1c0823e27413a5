//! Distort Captcha - distorted text challenge generator
//!
//! This library draws a short random alphanumeric challenge into a 256×64
//! image built to resist text recognition: shaded anti-aliased glyphs, a sine wave
//! row warp, a layer of faded circles and lines, speckle noise and a final
//! color inversion.
//!
//! # Example
//! ```no_run
//! use distort_captcha::{generate, CaptchaConfig};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let captcha = generate(&CaptchaConfig::default(), &mut rng).unwrap();
//! println!("{}", captcha.text);
//! captcha.image.save("captcha.png").unwrap();
//! ```

pub mod config;
pub mod error;
pub mod filters;
pub mod glyph;
pub mod noise;
pub mod output;
pub mod processor;
pub mod text;

// Re-export main types for convenience
pub use config::{CaptchaConfig, NoiseMode};
pub use error::{CaptchaError, CaptchaResult};
pub use output::emit;
pub use glyph::MAX_GLYPHS;
pub use processor::{Captcha, HEIGHT, WIDTH, generate, generate_batch};
