use thiserror::Error;

pub type CaptchaResult<T> = Result<T, CaptchaError>;

#[derive(Error, Debug)]
pub enum CaptchaError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("font error: {0}")]
    Font(#[from] ab_glyph::InvalidFont),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
