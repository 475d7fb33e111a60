//! Loss functions

mod bce_with_logits;
mod traits;

pub use bce_with_logits::BCEWithLogitsLoss;
pub use traits::LossFn;
