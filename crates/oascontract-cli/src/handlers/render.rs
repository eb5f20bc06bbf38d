//! Render command handler

use super::{load_document, schema_component};
use crate::cli::RenderArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use oascontract_schema::to_document;
use serde_json::json;
use tracing::instrument;

/// Handle the render command
#[instrument(skip(_config, output), fields(document = %args.document.display()))]
pub fn handle_render(args: RenderArgs, _config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("render_command");
    let components = load_document(&args.document)?;

    let document = match &args.component {
        Some(name) => to_document(schema_component(&components, name, &args.document)?),
        None => json!({ "components": components.to_document() }),
    };

    output.data(&document)
}
