use clap::Command;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = Command::new("txledger")
        .about("Validates and applies batches of UTXO transactions.")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(txledger_lib::commands::keygen_command())
        .subcommand(txledger_lib::commands::sign_command())
        .subcommand(txledger_lib::commands::process_command())
        .get_matches();

    match matches.subcommand() {
        Some(("keygen", matches)) => txledger_lib::commands::run_keygen_command(matches),
        Some(("sign", matches)) => txledger_lib::commands::run_sign_command(matches),
        Some(("process", matches)) => txledger_lib::commands::run_process_command(matches),
        _ => unreachable!("Subcommand is required."),
    }
}
