//! Adam optimizer

use ndarray::Array1;

use super::Optimizer;
use crate::Tensor;

/// Adam optimizer with bias-corrected first and second moments
///
/// Update rule:
/// ```text
/// m_t = β1 * m_{t-1} + (1 - β1) * g_t
/// v_t = β2 * v_{t-1} + (1 - β2) * g_t²
/// θ_t = θ_{t-1} - lr_t * m_t / (√v_t + ε)
/// ```
/// where `lr_t` folds in the bias correction
/// `√(1 - β2^t) / (1 - β1^t)`.
pub struct Adam {
    lr: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    t: u64,
    m: Vec<Option<Array1<f32>>>,
    v: Vec<Option<Array1<f32>>>,
}

impl Adam {
    /// Create a new Adam optimizer
    pub fn new(lr: f32, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self {
            lr,
            beta1,
            beta2,
            epsilon,
            t: 0,
            m: Vec::new(),
            v: Vec::new(),
        }
    }

    /// Adam with the usual β1=0.9, β2=0.999, ε=1e-8
    pub fn default_params(lr: f32) -> Self {
        Self::new(lr, 0.9, 0.999, 1e-8)
    }

    /// Optimizer step counter
    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.t
    }

    /// β1 hyperparameter
    #[must_use]
    pub fn beta1(&self) -> f32 {
        self.beta1
    }

    /// β2 hyperparameter
    #[must_use]
    pub fn beta2(&self) -> f32 {
        self.beta2
    }

    fn ensure_moments(&mut self, params: &[Tensor]) {
        if self.m.is_empty() {
            self.m = params.iter().map(|_| None).collect();
            self.v = params.iter().map(|_| None).collect();
        }
    }
}

impl Optimizer for Adam {
    fn step(&mut self, params: &mut [Tensor]) {
        self.ensure_moments(params);
        self.t += 1;

        // Bias correction folded into the step size
        let lr_t = self.lr
            * ((1.0 - self.beta2.powi(self.t as i32)).sqrt()
                / (1.0 - self.beta1.powi(self.t as i32)));

        for (i, param) in params.iter_mut().enumerate() {
            let Some(grad) = param.grad() else { continue };

            let m = self.m[i].get_or_insert_with(|| Array1::zeros(grad.len()));
            let v = self.v[i].get_or_insert_with(|| Array1::zeros(grad.len()));

            *m = &*m * self.beta1 + &grad * (1.0 - self.beta1);
            *v = &*v * self.beta2 + &(&grad * &grad) * (1.0 - self.beta2);

            let data = param.data_mut();
            for ((d, m_i), v_i) in data.iter_mut().zip(m.iter()).zip(v.iter()) {
                *d -= lr_t * m_i / (v_i.sqrt() + self.epsilon);
            }
        }
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn set_lr(&mut self, lr: f32) {
        self.lr = lr;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn test_adam_creation() {
        let opt = Adam::new(0.001, 0.9, 0.999, 1e-8);
        assert_eq!(opt.lr(), 0.001);
        assert_eq!(opt.beta1(), 0.9);
        assert_eq!(opt.beta2(), 0.999);
        assert_eq!(opt.step_count(), 0);
    }

    #[test]
    fn test_adam_step_moves_against_gradient() {
        let mut opt = Adam::default_params(0.1);
        let mut params = vec![Tensor::from_vec(vec![1.0, -1.0], true)];
        params[0].set_grad(arr1(&[1.0, -1.0]));

        opt.step(&mut params);

        // Positive gradient pushes the value down, negative up
        assert!(params[0].data()[0] < 1.0);
        assert!(params[0].data()[1] > -1.0);
        assert_eq!(opt.step_count(), 1);
    }

    #[test]
    fn test_adam_first_step_size() {
        // With bias correction the first step is ≈ lr in each coordinate
        let mut opt = Adam::default_params(0.1);
        let mut params = vec![Tensor::from_vec(vec![0.0], true)];
        params[0].set_grad(arr1(&[3.0]));

        opt.step(&mut params);
        assert!((params[0].data()[0] + 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_adam_skips_params_without_grad() {
        let mut opt = Adam::default_params(0.1);
        let mut params = vec![
            Tensor::from_vec(vec![1.0], true),
            Tensor::from_vec(vec![2.0], true),
        ];
        params[0].set_grad(arr1(&[1.0]));

        opt.step(&mut params);
        assert_eq!(params[1].data()[0], 2.0);
    }

    #[test]
    fn test_adam_converges_on_quadratic() {
        // Minimize f(x) = x² with analytic gradient 2x
        let mut opt = Adam::default_params(0.1);
        let mut params = vec![Tensor::from_vec(vec![5.0], true)];

        for _ in 0..200 {
            let x = params[0].data()[0];
            params[0].zero_grad();
            params[0].set_grad(arr1(&[2.0 * x]));
            opt.step(&mut params);
        }

        assert!(params[0].data()[0].abs() < 0.1);
    }

    #[test]
    fn test_adam_set_lr() {
        let mut opt = Adam::default_params(0.001);
        opt.set_lr(0.0005);
        assert_eq!(opt.lr(), 0.0005);
    }
}
