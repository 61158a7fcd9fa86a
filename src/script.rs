use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use serde_json::from_str;
use thiserror::Error;
use crate::domain::commands::Command;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse command on line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },

    #[error("Failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

pub fn read_commands<P: AsRef<Path>>(path: P) -> Result<Vec<Command>, ScriptError> {
    let file = File::open(path)?;
    parse_commands(BufReader::new(file))
}

pub fn parse_commands<R: BufRead>(reader: R) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        // A line holds either one command or an array of them.
        let parsed = if line.trim_start().starts_with('[') {
            from_str::<Vec<Command>>(&line)
        } else {
            from_str::<Command>(&line).map(|command| vec![command])
        };
        commands.extend(parsed.map_err(|source| ScriptError::Parse { line: index + 1, source })?);
    }

    Ok(commands)
}
