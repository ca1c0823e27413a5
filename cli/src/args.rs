use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use distort_captcha::{CaptchaConfig, NoiseMode};
use std::path::PathBuf;

/// Simple captcha generator.
///
/// Prints the challenge text on the first line, then writes the image to
/// `-o` or, without it, PNG bytes straight after the text line.
#[derive(Parser, Debug)]
#[command(name = "captcha", version, about, long_about = None)]
pub struct Args {
    /// Output image file (format from the extension)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Add border to captcha image (true/false, 1/0, yes/no)
    #[arg(
        short = 'b',
        long = "border",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub border: bool,

    /// Set the length of the captcha (only the first 6 characters are drawn)
    #[arg(
        short = 'l',
        long = "length",
        default_value_t = 5,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub length: u32,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Speckle noise mode: uniform or salt-and-pepper
    #[arg(long = "noise", default_value_t = NoiseMode::Uniform)]
    pub noise_mode: NoiseMode,

    /// Speckle amplitude (uniform) or percentage (salt-and-pepper)
    #[arg(long, default_value_t = 10.0)]
    pub speckle: f32,
}

impl Args {
    pub fn config(&self) -> CaptchaConfig {
        CaptchaConfig {
            length: self.length as usize,
            border: self.border,
            noise_mode: self.noise_mode,
            speckle: self.speckle,
        }
    }
}
