use anyhow::Result;
use phonesift_config::RunConfig;
use serde::Serialize;
use std::io::{self, Write};

pub mod completions;
pub mod extract;

pub struct Context<'a> {
    pub json: bool,
    pub config: &'a RunConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
