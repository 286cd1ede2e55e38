pub mod keygen_command;
pub mod process_command;
pub mod sign_command;

pub use self::{keygen_command::*, process_command::*, sign_command::*};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fs;

fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn Error>> {
    let contents =
        fs::read_to_string(path).map_err(|e| format!("Failed to read: {}: {}", path, e))?;
    serde_json::from_str(&contents).map_err(|e| format!("Failed to parse: {}: {}", path, e).into())
}

/// Writes pretty JSON to `path`, or to stdout if there is no path.
fn write_json<T: Serialize>(path: Option<&str>, value: &T) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            fs::write(path, json).map_err(|e| format!("Failed to write: {}: {}", path, e))?
        }
        None => println!("{}", json),
    }
    Ok(())
}
