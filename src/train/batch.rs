//! Batch data structure

use crate::error::{Error, Result};
use crate::Tensor;

/// A training batch with an optional optical-flow stream
///
/// Inputs are flattened feature tensors produced by the external data
/// pipeline; targets are multi-hot AU label vectors. When a flow stream is
/// attached it must carry exactly the labels of the RGB stream.
#[derive(Debug, Clone)]
pub struct Batch {
    /// RGB input features
    pub inputs: Tensor,
    /// Multi-hot target labels
    pub targets: Tensor,
    /// Optical-flow input features, when the flow stream is enabled
    pub flow: Option<Tensor>,
}

impl Batch {
    /// Create a new RGB-only batch
    pub fn new(inputs: Tensor, targets: Tensor) -> Self {
        Self {
            inputs,
            targets,
            flow: None,
        }
    }

    /// Attach an optical-flow stream to this batch
    ///
    /// The flow loader yields its own labels; they must match the RGB
    /// labels exactly or the two streams are out of sync.
    pub fn with_flow(mut self, flow_inputs: Tensor, flow_targets: &Tensor) -> Result<Self> {
        if flow_targets.len() != self.targets.len()
            || flow_targets
                .data()
                .iter()
                .zip(self.targets.data().iter())
                .any(|(a, b)| a != b)
        {
            return Err(Error::FlowLabelMismatch);
        }
        self.flow = Some(flow_inputs);
        Ok(self)
    }

    /// Batch size (length of inputs)
    pub fn size(&self) -> usize {
        self.inputs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_creation() {
        let batch = Batch::new(
            Tensor::from_vec(vec![1.0, 2.0, 3.0], false),
            Tensor::from_vec(vec![1.0, 0.0, 1.0], false),
        );
        assert_eq!(batch.size(), 3);
        assert!(batch.flow.is_none());
    }

    #[test]
    fn test_with_flow_matching_labels() {
        let batch = Batch::new(
            Tensor::from_vec(vec![1.0, 2.0], false),
            Tensor::from_vec(vec![1.0, 0.0], false),
        );
        let flow_labels = Tensor::from_vec(vec![1.0, 0.0], false);
        let batch = batch
            .with_flow(Tensor::from_vec(vec![0.5, 0.5], false), &flow_labels)
            .unwrap();
        assert!(batch.flow.is_some());
    }

    #[test]
    fn test_with_flow_mismatched_labels() {
        let batch = Batch::new(
            Tensor::from_vec(vec![1.0, 2.0], false),
            Tensor::from_vec(vec![1.0, 0.0], false),
        );
        let flow_labels = Tensor::from_vec(vec![0.0, 0.0], false);
        let err = batch
            .with_flow(Tensor::from_vec(vec![0.5, 0.5], false), &flow_labels)
            .unwrap_err();
        assert!(matches!(err, Error::FlowLabelMismatch));
    }

    #[test]
    fn test_with_flow_length_mismatch() {
        let batch = Batch::new(
            Tensor::from_vec(vec![1.0, 2.0], false),
            Tensor::from_vec(vec![1.0, 0.0], false),
        );
        let flow_labels = Tensor::from_vec(vec![1.0], false);
        assert!(batch
            .with_flow(Tensor::from_vec(vec![0.5], false), &flow_labels)
            .is_err());
    }
}
