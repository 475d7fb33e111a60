//! Model structure for serialization

use crate::error::{Error, Result};
use crate::Tensor;
use serde::{Deserialize, Serialize};

/// Model metadata recorded alongside the parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Action unit identifier, e.g. "AU12"
    pub au: String,

    /// Cross-validation fold index
    pub fold: u32,

    /// Completed epochs at save time (1-based)
    pub epoch: usize,

    /// Training steps taken within the saved epoch
    pub step: usize,

    /// Validation F1 that triggered the save
    pub val_f1: f32,

    /// Decision threshold achieving `val_f1` on the validation sweep
    pub threshold: f32,

    /// Whether the model was trained with the optical flow stream
    pub flow: bool,
}

/// Information about a model parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterInfo {
    /// Parameter name (e.g., "head.weight", "head.bias")
    pub name: String,

    /// Number of elements
    pub len: usize,

    /// Whether this parameter requires gradients
    pub requires_grad: bool,
}

/// Serializable model state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelState {
    /// Model metadata
    pub metadata: ModelMetadata,

    /// Parameter information
    pub parameters: Vec<ParameterInfo>,

    /// Flattened parameter data
    pub data: Vec<f32>,
}

/// High-level model abstraction for I/O
pub struct Model {
    /// Model metadata
    pub metadata: ModelMetadata,

    /// Model parameters
    pub parameters: Vec<(String, Tensor)>,
}

impl Model {
    /// Create a new model
    pub fn new(metadata: ModelMetadata, parameters: Vec<(String, Tensor)>) -> Self {
        Self {
            metadata,
            parameters,
        }
    }

    /// Snapshot a flat parameter list under generated names
    pub fn from_params(metadata: ModelMetadata, params: &[Tensor]) -> Self {
        let parameters = params
            .iter()
            .enumerate()
            .map(|(i, t)| (format!("param.{i}"), t.detach()))
            .collect();
        Self {
            metadata,
            parameters,
        }
    }

    /// Get parameter by name
    pub fn get_parameter(&self, name: &str) -> Option<&Tensor> {
        self.parameters
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t)
    }

    /// Copy stored parameter data back into a live parameter list
    ///
    /// Parameter order and lengths must match the snapshot the model was
    /// built from.
    pub fn restore_into(&self, params: &mut [Tensor]) -> Result<()> {
        if params.len() != self.parameters.len() {
            return Err(Error::Checkpoint(format!(
                "parameter count mismatch: checkpoint has {}, model has {}",
                self.parameters.len(),
                params.len()
            )));
        }
        for (target, (name, stored)) in params.iter_mut().zip(self.parameters.iter()) {
            if target.len() != stored.len() {
                return Err(Error::Checkpoint(format!(
                    "length mismatch for {}: checkpoint has {}, model has {}",
                    name,
                    stored.len(),
                    target.len()
                )));
            }
            target.data_mut().assign(stored.data());
        }
        Ok(())
    }

    /// Convert model to serializable state
    pub fn to_state(&self) -> ModelState {
        let mut data = Vec::new();
        let parameters: Vec<ParameterInfo> = self
            .parameters
            .iter()
            .map(|(name, tensor)| {
                data.extend(tensor.data().iter());
                ParameterInfo {
                    name: name.clone(),
                    len: tensor.len(),
                    requires_grad: tensor.requires_grad(),
                }
            })
            .collect();

        ModelState {
            metadata: self.metadata.clone(),
            parameters,
            data,
        }
    }

    /// Create model from serializable state
    pub fn from_state(state: ModelState) -> Result<Self> {
        let total: usize = state.parameters.iter().map(|p| p.len).sum();
        if total != state.data.len() {
            return Err(Error::Checkpoint(format!(
                "data length {} does not match declared parameter sizes {}",
                state.data.len(),
                total
            )));
        }

        let mut offset = 0;
        let parameters: Vec<(String, Tensor)> = state
            .parameters
            .into_iter()
            .map(|info| {
                let slice = state.data[offset..offset + info.len].to_vec();
                offset += info.len;
                (info.name, Tensor::from_vec(slice, info.requires_grad))
            })
            .collect();

        Ok(Self {
            metadata: state.metadata,
            parameters,
        })
    }
}
