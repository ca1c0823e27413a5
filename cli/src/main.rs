mod args;

use args::Args;
use clap::Parser;
use distort_captcha::{CaptchaResult, emit, generate};
use log::{debug, error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the text and image
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> CaptchaResult<()> {
    let config = args.config();
    let mut rng = match args.seed {
        Some(seed) => {
            debug!("using seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let captcha = generate(&config, &mut rng)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    emit(&captcha, args.output.as_deref(), &mut out)
}
