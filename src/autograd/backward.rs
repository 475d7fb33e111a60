//! Backward operation trait for the gradient tape

/// A node on the gradient tape
///
/// Each differentiable operation records one of these on its output tensor.
/// Calling `backward` propagates the output gradient into the operation's
/// inputs (accumulating into their shared gradient cells) and recurses into
/// the inputs' own backward ops.
pub trait BackwardOp {
    /// Propagate gradients to the operation's inputs
    fn backward(&self);
}
