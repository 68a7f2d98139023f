//! `markdrown render` command implementation.

use std::path::PathBuf;

use clap::Args;
use markdrown_config::{CliSettings, Config};
use markdrown_engine::{Markdrown, PostRenderContext, RenderRoot};

use super::{builtin_options, read_input, write_output};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Input document, or `-` for stdin.
    input: PathBuf,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not wrap `<h3>` runs into section containers.
    #[arg(long)]
    no_sections: bool,

    /// Run post-render callbacks (anchor links, initial selection).
    #[arg(long)]
    post_render: bool,

    /// Page URL used for absolute anchor links.
    #[arg(long, env = "MARKDROWN_PAGE_URL")]
    page_url: Option<String>,

    /// Disable anchor link controls on headings.
    #[arg(long)]
    no_anchor_links: bool,

    /// Path to configuration file (default: auto-discover markdrown.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output (plugin dispatch logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the input cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            wrap_sections: self.no_sections.then_some(false),
            anchor_links: self.no_anchor_links.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::debug!(path = %path.display(), "Using configuration");
        }

        let text = read_input(&self.input)?;

        let mut engine = Markdrown::new();
        engine.register_builtins(&builtin_options(&config));
        let mut html = engine.parse_with(&text, config.render.wrap_sections);

        if self.post_render {
            let context = match self.page_url {
                Some(url) => PostRenderContext::with_page_url(url),
                None => PostRenderContext::default(),
            };
            let mut root = RenderRoot::new(html);
            engine.run_post_render_callbacks(&mut root, &context);
            for warning in engine.warnings() {
                output.warning(&format!("Warning: {warning}"));
            }
            html = root.into_html();
        }

        write_output(self.output.as_deref(), &html)?;
        if let Some(path) = &self.output {
            output.success(&format!("Wrote {}", path.display()));
        }
        Ok(())
    }
}
