//! Model I/O: checkpoint serialization and discovery

mod checkpoint;
mod model;
mod save;

pub use checkpoint::{checkpoint_file_name, latest_checkpoint, parse_checkpoint_stem};
pub use model::{Model, ModelMetadata, ModelState, ParameterInfo};
pub use save::{load_model, save_model};
