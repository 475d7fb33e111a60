//! Tape-based autograd engine
//!
//! Provides the flat `f32` tensor the trainer operates on, plus the minimal
//! set of differentiable operations needed to express a classification head
//! on top of externally computed features.

mod backward;
mod ops;
mod tensor;

pub use backward::BackwardOp;
pub use ops::{add, mul, scale, sum};
pub use tensor::Tensor;

/// Perform backward pass on a tensor
///
/// Seeds the gradient with ones (scalar-loss convention) unless an explicit
/// output gradient is given, then walks the recorded tape.
pub fn backward(tensor: &mut Tensor, grad_output: Option<ndarray::Array1<f32>>) {
    if let Some(grad) = grad_output {
        tensor.set_grad(grad);
    } else {
        let ones = ndarray::Array1::ones(tensor.len());
        tensor.set_grad(ones);
    }

    if let Some(op) = tensor.backward_op() {
        op.backward();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backward_seeds_ones() {
        let mut t = Tensor::from_vec(vec![1.0, 2.0, 3.0], true);
        backward(&mut t, None);
        let grad = t.grad().unwrap();
        assert_eq!(grad.to_vec(), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_backward_explicit_grad() {
        let mut t = Tensor::from_vec(vec![1.0, 2.0], true);
        backward(&mut t, Some(ndarray::arr1(&[0.5, -0.5])));
        let grad = t.grad().unwrap();
        assert_eq!(grad.to_vec(), vec![0.5, -0.5]);
    }
}
