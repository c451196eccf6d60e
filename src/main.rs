use clap::{ColorChoice, Parser};
use kdam::{term, term::Colorizer};
use log::LevelFilter;
use omori_dump::{
    commands::{Args, Commands},
    logger::Logger,
};
use std::{
    io::{IsTerminal, stderr},
    process,
};

fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    term::init(match args.color {
        ColorChoice::Always => true,
        ColorChoice::Auto => stderr().is_terminal(),
        ColorChoice::Never => false,
    });

    log::set_logger(&Logger).map(|()| {
        log::set_max_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
    })?;

    match args.command {
        Commands::Decrypt(args) => args.execute()?,
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".colorize("bold red"), e);
        process::exit(1);
    }
}
