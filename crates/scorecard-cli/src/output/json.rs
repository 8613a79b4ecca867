use scorecard_core::error::ScorecardError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), ScorecardError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
