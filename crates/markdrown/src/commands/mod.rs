//! CLI command implementations.

pub(crate) mod meta;
pub(crate) mod render;

pub(crate) use meta::MetaArgs;
pub(crate) use render::RenderArgs;

use std::io::{Read, Write};
use std::path::Path;

use markdrown_config::Config;
use markdrown_engine::builtins::AnchorLinkOptions;
use markdrown_engine::{BuiltinOptions, Component, ConstellationLayout};

use crate::error::CliError;

/// Read a document from `path`, or from stdin when `path` is `-`.
pub(crate) fn read_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Write `content` to `path`, or to stdout when no path is given.
pub(crate) fn write_output(path: Option<&Path>, content: &str) -> Result<(), CliError> {
    match path {
        Some(path) => std::fs::write(path, content)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.write_all(b"\n")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Map configuration onto the engine's builtin selection.
pub(crate) fn builtin_options(config: &Config) -> BuiltinOptions {
    let plugins = &config.plugins;
    let components = Component::ALL
        .into_iter()
        .filter(|component| match component {
            Component::Features => plugins.features,
            Component::Workflow => plugins.workflow,
            Component::Facts => plugins.facts,
            Component::Constellation => plugins.constellation,
        })
        .collect();

    BuiltinOptions {
        html_passthrough: plugins.html_passthrough,
        components,
        anchor_links: config.anchor_links.enabled.then(|| AnchorLinkOptions {
            levels: config.anchor_links.levels.clone(),
        }),
        constellation_layout: ConstellationLayout {
            center_x: config.constellation.center_x,
            center_y: config.constellation.center_y,
            radius: config.constellation.radius,
        },
    }
}
