use crate::commands::{read_json, write_json};
use crate::{Transaction, TxHandler, UtxoPool};
use clap::{Arg, ArgMatches, Command};
use log::info;
use std::error::Error;

struct ProcessCliOptions {
    pool: String,
    batch: String,
    output: Option<String>,
    report: bool,
}

impl ProcessCliOptions {
    pub fn parse(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            pool: matches.value_of("pool").ok_or("Missing --pool")?.to_string(),
            batch: matches.value_of("batch").ok_or("Missing --batch")?.to_string(),
            output: matches.value_of("output").map(str::to_string),
            report: matches.is_present("report"),
        })
    }
}

pub fn process_command() -> Command<'static> {
    Command::new("process")
        .version("0.1")
        .about("Validates a batch of transactions against a UTXO pool and applies the valid ones.")
        .arg(
            Arg::new("pool")
                .long("pool")
                .value_name("FILE")
                .help("JSON snapshot of the UTXO pool: [{\"utxo\": ..., \"output\": ...}, ...].")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("batch")
                .long("batch")
                .value_name("FILE")
                .help("JSON list of candidate transactions, processed in the given order.")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Where to write the updated UTXO pool snapshot.")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .help("If set, the reason for every rejected transaction is printed.")
                .takes_value(false)
                .required(false),
        )
}

pub fn run_process_command(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let options = ProcessCliOptions::parse(matches)?;
    let utxo_pool: UtxoPool = read_json(&options.pool)?;
    let candidates: Vec<Transaction> = read_json(&options.batch)?;
    info!(
        "Loaded {} unspent outputs and {} candidate transactions",
        utxo_pool.len(),
        candidates.len()
    );

    let mut handler = TxHandler::new(&utxo_pool);
    let outcome = handler.handle_transactions_with_report(&candidates);
    for transaction in &outcome.accepted {
        println!("accepted {}", transaction.id());
    }
    if options.report {
        for rejection in &outcome.rejected {
            println!("rejected {}: {}", rejection.transaction_id, rejection.reason);
        }
    }

    if let Some(output) = options.output.as_deref() {
        write_json(Some(output), &handler.into_utxo_pool())?;
    }
    Ok(())
}
