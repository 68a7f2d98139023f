//! `markdrown meta` command implementation.

use std::path::PathBuf;

use clap::Args;
use markdrown_engine::Markdrown;

use super::{read_input, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the meta command.
#[derive(Args)]
pub(crate) struct MetaArgs {
    /// Input document, or `-` for stdin.
    input: PathBuf,
}

impl MetaArgs {
    /// Execute the meta command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or serialized.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let text = read_input(&self.input)?;

        // Front matter is always registered; nothing else contributes metadata.
        let mut engine = Markdrown::new();
        engine.parse_with(&text, false);

        if engine.meta().is_empty() {
            Output::new().info("No front matter found");
        }
        let json = serde_json::to_string_pretty(engine.meta())?;
        write_output(None, &json)
    }
}
