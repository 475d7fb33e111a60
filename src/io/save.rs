//! Model saving and loading

use super::model::{Model, ModelState};
use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Save a model as pretty-printed JSON
pub fn save_model(model: &Model, path: impl AsRef<Path>) -> Result<()> {
    let state = model.to_state();
    let data = serde_json::to_string_pretty(&state)
        .map_err(|e| Error::Serialization(format!("JSON serialization failed: {e}")))?;
    fs::write(path.as_ref(), data)?;
    Ok(())
}

/// Load a model from a JSON file
pub fn load_model(path: impl AsRef<Path>) -> Result<Model> {
    let content = fs::read_to_string(path.as_ref())?;
    let state: ModelState = serde_json::from_str(&content)
        .map_err(|e| Error::Serialization(format!("JSON deserialization failed: {e}")))?;
    Model::from_state(state)
}
