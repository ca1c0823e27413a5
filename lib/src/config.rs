use std::fmt;
use std::str::FromStr;

/// Speckle noise applied to the whole canvas after the shape layer is merged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseMode {
    /// Additive noise, `v + amplitude * u` with `u` uniform in [-1, 1]
    #[default]
    Uniform,
    /// Each pixel becomes black or white with probability `amplitude` percent
    SaltAndPepper,
}

impl FromStr for NoiseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uniform" => Ok(Self::Uniform),
            "salt-and-pepper" | "salt_and_pepper" | "snp" => Ok(Self::SaltAndPepper),
            other => Err(format!(
                "unknown noise mode '{other}', expected 'uniform' or 'salt-and-pepper'"
            )),
        }
    }
}

impl fmt::Display for NoiseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform => f.write_str("uniform"),
            Self::SaltAndPepper => f.write_str("salt-and-pepper"),
        }
    }
}

/// Configuration for challenge generation
#[derive(Debug, Clone)]
pub struct CaptchaConfig {
    /// Challenge text
    pub length: usize,           // >= 1, default 5 (only the first 6 are drawn)

    /// Finalization
    pub border: bool,            // default true

    /// Speckle noise
    pub noise_mode: NoiseMode,   // default Uniform
    pub speckle: f32,            // amplitude, or percentage of pixels, default 10.0
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            length: 5,
            border: true,
            noise_mode: NoiseMode::Uniform,
            speckle: 10.0,
        }
    }
}

impl CaptchaConfig {
    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if self.length == 0 {
            return Err("length must be at least 1".to_string());
        }
        if !self.speckle.is_finite() || self.speckle < 0.0 {
            return Err(format!(
                "speckle must be a finite non-negative number, got {}",
                self.speckle
            ));
        }
        if self.noise_mode == NoiseMode::SaltAndPepper && self.speckle > 100.0 {
            return Err(format!(
                "salt-and-pepper speckle is a percentage and must be <= 100, got {}",
                self.speckle
            ));
        }
        Ok(())
    }
}
