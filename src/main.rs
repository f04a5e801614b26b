mod app;
mod audio;
mod fingerboard;
mod game;
mod scores;
mod ui;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use app::App;

/// Violin ear trainer: hear a note, find it on the fingerboard.
#[derive(Parser, Debug)]
struct Args {
    /// Directory with violin-<note>.wav recordings; notes without one get a
    /// synthesized tone
    #[arg(short, long, default_value = "samples")]
    samples_dir: PathBuf,
    /// Length of the synthesized fallback tone in seconds
    #[arg(short, long, default_value_t = 0.5)]
    tone_secs: f32,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();
    App::new(args.samples_dir, args.tone_secs).run()
}
