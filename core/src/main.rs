mod args;
mod halcyon;
mod worker;

use std::error::Error;
use std::fs::File;

use args::Args;
use clap::Parser;
use halcyon::Halcyon;
use log::LevelFilter;
use simplelog::{Config, WriteLogger};

fn main() -> Result<(), Box<dyn Error>> {
    init()?;
    Halcyon::new().run()
}

fn init() -> Result<Args, Box<dyn Error>> {
    let args = Args::parse();

    if let Some(log_file) = &args.log_file {
        WriteLogger::init(
            LevelFilter::Debug,
            Config::default(),
            File::create(log_file)?,
        )?;
    }

    Ok(args)
}
