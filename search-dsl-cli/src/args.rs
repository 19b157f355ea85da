//! Command line arguments.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde_json::Value;

use crate::CliError;
use search_dsl::Operation;

#[derive(Parser, Debug)]
#[command(name = "search-dsl")]
#[command(about = "Run one search client operation configured by a JSON block", long_about = None)]
pub struct Args {
    /// Operation to run (index, get, search, multi-get, find-similar, ...)
    pub operation: String,

    /// Source index for find-similar / more-like-this; other operations
    /// take their index from the block
    #[arg(long)]
    pub index: Option<String>,

    /// Configuration block as inline JSON
    #[arg(long, conflicts_with = "block_file")]
    pub block: Option<String>,

    /// Read the configuration block from a file
    #[arg(long)]
    pub block_file: Option<PathBuf>,

    /// Pretty-print the response body
    #[arg(long)]
    pub pretty: bool,

    /// Check cluster health before running the operation
    #[arg(long)]
    pub check_health: bool,
}

impl Args {
    /// The operation named on the command line.
    ///
    /// `--index` is only accepted for find-similar.
    pub fn operation(&self) -> Result<Operation, CliError> {
        let operation = Operation::parse(&self.operation, self.index.as_deref())?;

        if self.index.is_some() && !matches!(operation, Operation::MoreLikeThis { .. }) {
            return Err(CliError::config(format!(
                "--index only applies to find-similar; set `index` in the block for {}",
                operation
            )));
        }
        Ok(operation)
    }

    /// The configuration block, or `None` when neither `--block` nor
    /// `--block-file` was given.
    pub fn block(&self) -> Result<Option<Value>, CliError> {
        let text = match (&self.block, &self.block_file) {
            (Some(inline), _) => inline.clone(),
            (None, Some(path)) => fs::read_to_string(path)?,
            (None, None) => return Ok(None),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }
}
