//! Full training runs
//!
//! `fit` drives the whole schedule: a baseline validation pass before any
//! training, then per-epoch train/validate cycles where each validation
//! runs a threshold sweep. A strict F1 improvement saves a checkpoint;
//! `patience` consecutive non-improving epochs stop the run. After every
//! completed epoch the linear decay schedule is re-applied to the
//! optimizer, and a resumed run fast-forwards the schedule to its epoch.

use std::fs;
use std::time::Instant;

use super::core::Trainer;
use super::result::FitResult;
use crate::error::{Error, Result};
use crate::eval::{collect_outputs, evaluate_split, sweep_f1, EvalSummary, SweepResult, TestReport};
use crate::io::{checkpoint_file_name, latest_checkpoint, save_model, Model, ModelMetadata};
use crate::optim::{LRScheduler, LinearDecayLR};
use crate::train::callback::{CallbackAction, ProgressCallback};
use crate::train::stopping::{EarlyStopping, StopDecision};
use crate::train::Batch;
use crate::Tensor;

impl Trainer {
    /// Run the full training schedule
    ///
    /// # Arguments
    ///
    /// * `train_fn` - Returns the training batches for each epoch
    /// * `val_fn` - Returns the validation batches for each evaluation
    /// * `forward_fn` - Computes logits from inputs and the optional flow
    ///   stream
    ///
    /// # Errors
    ///
    /// Fails if no loss function is set, the validation split is empty, or
    /// a checkpoint cannot be written.
    pub fn fit<F, BT, BV, IT, IV>(
        &mut self,
        train_fn: BT,
        val_fn: BV,
        forward_fn: F,
    ) -> Result<FitResult>
    where
        F: Fn(&Tensor, Option<&Tensor>) -> Tensor,
        BT: Fn() -> IT,
        BV: Fn() -> IV,
        IT: IntoIterator<Item = Batch>,
        IV: IntoIterator<Item = Batch>,
    {
        if self.loss_fn.is_none() {
            return Err(Error::Config(
                "loss function must be set before fit".to_string(),
            ));
        }

        let max_epochs = self.config.num_epochs;
        self.start_time = Some(Instant::now());

        // Progress lines at the configured step interval unless the caller
        // installed their own callbacks
        if self.callbacks.is_empty() {
            self.callbacks
                .add(ProgressCallback::new(self.config.log_interval));
        }

        // Replay the decay schedule up to the resume point
        let mut scheduler =
            LinearDecayLR::new(self.lr(), max_epochs, self.config.num_epochs_decay);
        scheduler.set_epoch(self.start_epoch);
        scheduler.apply(self.optimizer.as_mut());

        // Baseline validation before any training this run
        let val_batches: Vec<Batch> = val_fn().into_iter().collect();
        let (baseline_loss, baseline) = self.validate(&val_batches, &forward_fn)?;
        self.metrics.record_val(baseline_loss, baseline.f1_max);
        if self.start_epoch > 0 {
            // Resumed weights re-establish the bar new epochs must beat
            let recorded = self.best_f1.unwrap_or(f32::NEG_INFINITY);
            self.best_f1 = Some(baseline.f1_max.max(recorded));
        }

        // A fresh run starts from 0, so a zero-F1 epoch is no improvement
        let mut stopper =
            EarlyStopping::new(self.config.patience).with_best(self.best_f1.unwrap_or(0.0));

        let ctx = self.build_context(self.start_epoch, max_epochs, 0, 0, 0.0, None, None);
        if self.callbacks.on_train_begin(&ctx) == CallbackAction::Stop {
            return Ok(FitResult {
                final_epoch: self.start_epoch,
                final_loss: 0.0,
                best_f1: self.best_f1.unwrap_or(0.0),
                best_threshold: self.best_threshold,
                best_checkpoint: self.best_checkpoint.clone(),
                stopped_early: true,
                final_lr: self.lr(),
                elapsed_secs: self.elapsed(),
            });
        }

        let mut stopped_early = false;
        let mut final_loss = 0.0;
        let mut completed = self.start_epoch;

        for epoch in self.start_epoch..max_epochs {
            let ctx = self.build_context(epoch, max_epochs, 0, 0, final_loss, None, None);
            match self.callbacks.on_epoch_begin(&ctx) {
                CallbackAction::Stop => {
                    stopped_early = true;
                    break;
                }
                CallbackAction::SkipEpoch => continue,
                CallbackAction::Continue => {}
            }

            // Training phase
            let train_batches: Vec<Batch> = train_fn().into_iter().collect();
            let steps_per_epoch = train_batches.len();
            let mut total_loss = 0.0;

            for (step, batch) in train_batches.iter().enumerate() {
                let ctx = self.build_context(
                    epoch,
                    max_epochs,
                    step,
                    steps_per_epoch,
                    final_loss,
                    None,
                    None,
                );
                if self.callbacks.on_step_begin(&ctx) == CallbackAction::Stop {
                    stopped_early = true;
                    break;
                }

                let loss = self.train_step(batch, &forward_fn);
                total_loss += loss;

                // Step-end context carries the running mean loss this epoch
                let mean_loss = total_loss / (step + 1) as f32;
                let ctx = self.build_context(
                    epoch,
                    max_epochs,
                    step,
                    steps_per_epoch,
                    mean_loss,
                    None,
                    None,
                );
                if self.callbacks.on_step_end(&ctx) == CallbackAction::Stop {
                    stopped_early = true;
                    break;
                }
            }

            if stopped_early {
                break;
            }

            let avg_loss = if steps_per_epoch > 0 {
                total_loss / steps_per_epoch as f32
            } else {
                0.0
            };
            final_loss = avg_loss;
            self.metrics.record_epoch(avg_loss, self.lr());
            completed = epoch + 1;

            // Validation phase with threshold sweep
            let (val_loss, sweep) = self.validate(&val_batches, &forward_fn)?;
            self.metrics.record_val(val_loss, sweep.f1_max);

            let decision = stopper.update(sweep.f1_max);
            if decision == StopDecision::Improved {
                self.best_f1 = stopper.best_score();
                self.best_threshold = sweep.best_threshold;
                self.save_checkpoint(epoch + 1, steps_per_epoch, &sweep)?;
            }

            let ctx = self.build_context(
                epoch,
                max_epochs,
                steps_per_epoch,
                steps_per_epoch,
                avg_loss,
                Some(val_loss),
                Some(sweep.f1_max),
            );
            if self.callbacks.on_validation(&ctx) == CallbackAction::Stop
                || self.callbacks.on_epoch_end(&ctx) == CallbackAction::Stop
            {
                stopped_early = true;
                break;
            }

            if decision == StopDecision::Stop {
                stopped_early = true;
                break;
            }

            // Linear decay after each completed epoch
            scheduler.step();
            scheduler.apply(self.optimizer.as_mut());
        }

        let ctx = self.build_context(completed, max_epochs, 0, 0, final_loss, None, None);
        self.callbacks.on_train_end(&ctx);

        Ok(FitResult {
            final_epoch: completed,
            final_loss,
            best_f1: self.best_f1.unwrap_or(0.0),
            best_threshold: self.best_threshold,
            best_checkpoint: self.best_checkpoint.clone(),
            stopped_early,
            final_lr: self.lr(),
            elapsed_secs: self.elapsed(),
        })
    }

    /// Evaluate a split and sweep the decision threshold
    ///
    /// Returns the mean validation loss and the sweep outcome.
    pub fn validate<F>(&self, val_batches: &[Batch], forward_fn: &F) -> Result<(f32, SweepResult)>
    where
        F: Fn(&Tensor, Option<&Tensor>) -> Tensor,
    {
        let loss_fn = self.loss_fn.as_deref().ok_or_else(|| {
            Error::Config("loss function must be set before validation".to_string())
        })?;
        let (probs, targets, val_loss) = collect_outputs(val_batches, forward_fn, loss_fn)?;
        let sweep = sweep_f1(&probs, &targets, self.config.sweep_points);
        Ok((val_loss, sweep))
    }

    /// Score the test split at the validation-optimal threshold
    pub fn evaluate_test<F>(&self, test_batches: &[Batch], forward_fn: &F) -> Result<EvalSummary>
    where
        F: Fn(&Tensor, Option<&Tensor>) -> Tensor,
    {
        let loss_fn = self.loss_fn.as_deref().ok_or_else(|| {
            Error::Config("loss function must be set before evaluation".to_string())
        })?;
        evaluate_split(test_batches, forward_fn, loss_fn, self.best_threshold)
    }

    /// Final test pass against a trained checkpoint
    ///
    /// Restores the given checkpoint, or the most recent one in the
    /// configured directory when `checkpoint` is `None`. The decision
    /// threshold is re-derived by sweeping the validation split, never the
    /// test split, and the test metrics are scored at that operating point.
    ///
    /// The report is written to the configured report path, or as
    /// `{au}_{fold:02}.txt` next to the checkpoints when no path is set.
    pub fn run_test<F>(
        &mut self,
        checkpoint: Option<&std::path::Path>,
        val_batches: &[Batch],
        test_batches: &[Batch],
        forward_fn: &F,
    ) -> Result<TestReport>
    where
        F: Fn(&Tensor, Option<&Tensor>) -> Tensor,
    {
        let resolved = match checkpoint {
            Some(path) => Some(path.to_path_buf()),
            None => match &self.config.checkpoint_dir {
                Some(dir) => latest_checkpoint(dir)?,
                None => None,
            },
        };
        if let Some(path) = &resolved {
            self.resume_from(path)?;
        }

        let (_, sweep) = self.validate(val_batches, forward_fn)?;
        self.best_threshold = sweep.best_threshold;

        let summary = self.evaluate_test(test_batches, forward_fn)?;
        let report = TestReport {
            au: self.config.au.clone(),
            fold: self.config.fold,
            checkpoint: resolved.map(|p| p.display().to_string()),
            val_f1: sweep.f1_max,
            summary,
        };

        let destination = self.config.report_path.clone().or_else(|| {
            self.config
                .checkpoint_dir
                .as_ref()
                .map(|dir| dir.join(format!("{}_{:02}.txt", self.config.au, self.config.fold)))
        });
        if let Some(path) = &destination {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            report.write(path)?;
        }

        Ok(report)
    }

    fn save_checkpoint(&mut self, epoch: usize, step: usize, sweep: &SweepResult) -> Result<()> {
        let Some(dir) = self.config.checkpoint_dir.clone() else {
            return Ok(());
        };
        fs::create_dir_all(&dir)?;

        let metadata = ModelMetadata {
            au: self.config.au.clone(),
            fold: self.config.fold,
            epoch,
            step,
            val_f1: sweep.f1_max,
            threshold: sweep.best_threshold,
            flow: self.config.flow,
        };
        let path = dir.join(checkpoint_file_name(epoch, step));
        let model = Model::from_params(metadata, &self.params);
        save_model(&model, &path)?;
        self.best_checkpoint = Some(path);
        Ok(())
    }

    fn elapsed(&self) -> f64 {
        self.start_time.map_or(0.0, |t| t.elapsed().as_secs_f64())
    }
}
