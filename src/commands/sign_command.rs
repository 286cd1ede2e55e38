use crate::commands::{read_json, write_json};
use crate::{KeyPair, UnsignedTransaction};
use clap::{Arg, ArgMatches, Command};
use log::info;
use std::error::Error;

struct SignCliOptions {
    transaction: String,
    keys: Vec<String>,
    output: Option<String>,
}

impl SignCliOptions {
    pub fn parse(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let keys = matches
            .values_of("keys")
            .map(|v| v.map(str::to_string).collect())
            .unwrap_or_default();

        Ok(Self {
            transaction: matches
                .value_of("transaction")
                .ok_or("Missing --transaction")?
                .to_string(),
            keys,
            output: matches.value_of("output").map(str::to_string),
        })
    }
}

pub fn sign_command() -> Command<'static> {
    Command::new("sign")
        .version("0.1")
        .about("Signs every input of an unsigned transaction.")
        .arg(
            Arg::new("transaction")
                .long("transaction")
                .value_name("FILE")
                .help("JSON file with the unsigned transaction inputs and outputs.")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("keys")
                .long("keys")
                .value_name("[SECRET_HEX...]")
                .help("Secret keys, one per input in input order.")
                .multiple_occurrences(true)
                .use_value_delimiter(true)
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Where to write the signed transaction. Defaults to stdout.")
                .takes_value(true)
                .required(false),
        )
}

pub fn run_sign_command(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let options = SignCliOptions::parse(matches)?;
    let unsigned: UnsignedTransaction = read_json(&options.transaction)?;
    let key_pairs = options
        .keys
        .iter()
        .map(|key| KeyPair::from_secret_hex(key.as_str()))
        .collect::<Result<Vec<KeyPair>, String>>()?;
    let signers = key_pairs.iter().collect::<Vec<&KeyPair>>();
    let transaction = unsigned.sign(&signers)?;
    info!("Signed transaction: {}", transaction.id());
    write_json(options.output.as_deref(), &transaction)
}
