#[macro_use]
extern crate log;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{crate_version, App, Arg, ArgMatches};

use i8080::{Machine, Stop};

const DEFAULT_BASE: u16 = 0x0100;

struct Config {
  image: PathBuf,
  base: u16,
  max_steps: Option<u64>,
  interrupt: Option<u8>,
  verbosity: u64,
}

impl Config {
  fn from_matches(matches: &ArgMatches) -> Result<Config> {
    let base = match matches.value_of("base") {
      Some(s) => parse_addr(s)?,
      None => DEFAULT_BASE,
    };
    let max_steps = match matches.value_of("max-steps") {
      Some(s) => Some(
        s.parse::<u64>()
          .with_context(|| format!("invalid step count {:?}", s))?,
      ),
      None => None,
    };
    let interrupt = match matches.value_of("interrupt") {
      Some(s) => Some(
        s.parse::<u8>()
          .with_context(|| format!("invalid interrupt vector {:?}", s))?,
      ),
      None => None,
    };

    Ok(Config {
      // Required by clap.
      image: PathBuf::from(matches.value_of("IMAGE").unwrap_or_default()),
      base,
      max_steps,
      interrupt,
      verbosity: matches.occurrences_of("verbose"),
    })
  }
}

/// Accepts `0x100`, `100h` or plain decimal.
fn parse_addr(s: &str) -> Result<u16> {
  let lower = s.trim().to_ascii_lowercase();
  let n = if let Some(hex) = lower.strip_prefix("0x") {
    u16::from_str_radix(hex, 16)
  } else if let Some(hex) = lower.strip_suffix('h') {
    u16::from_str_radix(hex, 16)
  } else {
    lower.parse::<u16>()
  };
  n.with_context(|| format!("invalid address {:?}", s))
}

fn app() -> App<'static, 'static> {
  App::new("i8080")
    .version(crate_version!())
    .about("Runs a raw Intel 8080 program image")
    .arg(
      Arg::with_name("IMAGE")
        .help("Program image to load")
        .required(true)
        .index(1),
    )
    .arg(
      Arg::with_name("base")
        .short("b")
        .long("base")
        .value_name("ADDR")
        .help("Load and start address (default 0x0100)")
        .takes_value(true),
    )
    .arg(
      Arg::with_name("max-steps")
        .short("n")
        .long("max-steps")
        .value_name("N")
        .help("Stop after N instructions")
        .takes_value(true),
    )
    .arg(
      Arg::with_name("interrupt")
        .short("i")
        .long("interrupt")
        .value_name("VECTOR")
        .help("Request interrupt VECTOR (0-7) before starting")
        .takes_value(true),
    )
    .arg(
      Arg::with_name("verbose")
        .short("v")
        .multiple(true)
        .help("More logging; repeat for debug and trace"),
    )
}

fn init_logging(verbosity: u64) {
  let level = match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
    .init();
}

fn main() -> Result<()> {
  let config = Config::from_matches(&app().get_matches())?;
  init_logging(config.verbosity);

  let image = fs::read(&config.image)
    .with_context(|| format!("reading {}", config.image.display()))?;
  info!(
    "loaded {} bytes from {} at 0x{:04x}",
    image.len(),
    config.image.display(),
    config.base
  );

  let mut machine = Machine::new(&image, config.base);
  if let Some(vector) = config.interrupt {
    machine.interrupt_line().request(vector)?;
  }

  let result = machine.run(config.max_steps);
  println!("{}", machine.cpu.regs);
  let stop: Stop = result.context("execution stopped")?;
  println!("{} after {} steps", stop, machine.steps());
  Ok(())
}
