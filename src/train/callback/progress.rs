//! Progress callback for logging training progress

use super::traits::{CallbackAction, CallbackContext, TrainerCallback};

/// Progress callback for logging training progress
#[derive(Clone, Debug)]
pub struct ProgressCallback {
    /// Log every N steps
    log_interval: usize,
}

impl ProgressCallback {
    /// Create progress callback
    pub fn new(log_interval: usize) -> Self {
        Self { log_interval }
    }

    /// Steps between log lines
    pub fn log_interval(&self) -> usize {
        self.log_interval
    }

    /// Whether a log line is due after the given 0-based step
    pub fn should_log(&self, step: usize) -> bool {
        self.log_interval > 0 && step > 0 && step % self.log_interval == 0
    }
}

impl Default for ProgressCallback {
    fn default() -> Self {
        Self { log_interval: 100 }
    }
}

impl TrainerCallback for ProgressCallback {
    fn on_epoch_begin(&mut self, ctx: &CallbackContext) -> CallbackAction {
        println!(
            "Epoch {}/{} starting (lr: {:.2e})",
            ctx.epoch + 1,
            ctx.max_epochs,
            ctx.lr
        );
        CallbackAction::Continue
    }

    fn on_epoch_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        let val_str = match (ctx.val_loss, ctx.val_f1) {
            (Some(vl), Some(vf)) => format!(", val_loss: {vl:.4}, val_f1: {vf:.4}"),
            (Some(vl), None) => format!(", val_loss: {vl:.4}"),
            _ => String::new(),
        };

        println!(
            "Epoch {}/{}: loss: {:.4}{} ({:.1}s)",
            ctx.epoch + 1,
            ctx.max_epochs,
            ctx.loss,
            val_str,
            ctx.elapsed_secs
        );
        CallbackAction::Continue
    }

    fn on_step_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        if self.should_log(ctx.step) {
            println!(
                "  Step {}/{}: mean loss: {:.4}",
                ctx.step, ctx.steps_per_epoch, ctx.loss
            );
        }
        CallbackAction::Continue
    }

    fn on_validation(&mut self, ctx: &CallbackContext) -> CallbackAction {
        if let Some(f1) = ctx.val_f1 {
            let best_str = ctx
                .best_f1
                .map(|b| format!(" (best: {b:.4})"))
                .unwrap_or_default();
            println!("  Validation F1: {f1:.4}{best_str}");
        }
        CallbackAction::Continue
    }

    fn name(&self) -> &'static str {
        "ProgressCallback"
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Progress callback should always continue
        #[test]
        fn progress_callback_never_stops(
            epoch in 0usize..100,
            step in 0usize..1000,
            loss in -100.0f32..100.0,
        ) {
            let mut progress = ProgressCallback::new(10);
            let ctx = CallbackContext {
                epoch,
                max_epochs: 100,
                step,
                steps_per_epoch: 100,
                loss,
                lr: 0.001,
                ..Default::default()
            };

            prop_assert_eq!(progress.on_train_begin(&ctx), CallbackAction::Continue);
            prop_assert_eq!(progress.on_epoch_begin(&ctx), CallbackAction::Continue);
            prop_assert_eq!(progress.on_step_begin(&ctx), CallbackAction::Continue);
            prop_assert_eq!(progress.on_step_end(&ctx), CallbackAction::Continue);
            prop_assert_eq!(progress.on_epoch_end(&ctx), CallbackAction::Continue);
            prop_assert_eq!(progress.on_validation(&ctx), CallbackAction::Continue);
        }
    }
}
