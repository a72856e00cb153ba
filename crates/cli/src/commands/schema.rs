use anyhow::{Context, Result};
use gatekeep_core::configs::targets::definition_schema;

pub fn execute() -> Result<()> {
    let schema = definition_schema().context("Failed to render definition schema")?;
    println!("{}", schema);
    Ok(())
}
