use crate::KeyPair;
use clap::{Arg, ArgMatches, Command};
use std::error::Error;

struct KeygenCliOptions {
    seed: Option<String>,
}

impl KeygenCliOptions {
    pub fn parse(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            seed: matches.value_of("seed").map(str::to_string),
        })
    }
}

pub fn keygen_command() -> Command<'static> {
    Command::new("keygen")
        .version("0.1")
        .about("Generates an Ed25519 key pair that can own transaction outputs.")
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SECRET_HEX")
                .help("Hex-encoded 32-byte secret to derive the key pair from.")
                .takes_value(true)
                .required(false),
        )
}

pub fn run_keygen_command(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let options = KeygenCliOptions::parse(matches)?;
    let key_pair = match options.seed {
        Some(seed) => KeyPair::from_secret_hex(&seed)?,
        None => KeyPair::generate(),
    };
    println!("secret: {}", key_pair.secret_hex());
    println!("public: {}", key_pair.public_key());
    Ok(())
}
