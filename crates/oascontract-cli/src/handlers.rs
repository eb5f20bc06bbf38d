//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand,
//! plus the document loading they share.

mod cast;
mod render;
mod validate;

pub use cast::handle_cast;
pub use render::handle_render;
pub use validate::handle_validate;

use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use oascontract_schema::loader::load_components;
use oascontract_schema::{Components, SchemaNode};
use std::path::Path;
use tracing::debug;

/// Load a components document, reporting a missing file up front
fn load_document(path: &Path) -> Result<Components> {
    let _timer = Timer::with_details("load_document", &path.display().to_string());

    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let components = load_components(path)?;
    debug!(
        schemas = components.schemas().len(),
        parameters = components.parameters().count(),
        "Loaded components document"
    );
    Ok(components)
}

/// Look up a schema by its component name
fn schema_component<'a>(components: &'a Components, name: &str, document: &Path) -> Result<&'a SchemaNode> {
    components.schema(name).ok_or_else(|| Error::UnknownComponent {
        section: "schema",
        name: name.to_string(),
        document: document.to_path_buf(),
    })
}
