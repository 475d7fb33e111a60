//! Early stopping on validation F1
//!
//! Tracks the best validation F1 and counts consecutive epochs without a
//! strict improvement. Once the count reaches the configured patience,
//! training halts. Because the monitored score is a metric to maximize
//! (not a loss), an epoch improves only when its F1 strictly exceeds the
//! best seen so far.

/// Decision returned after recording an epoch's validation score
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopDecision {
    /// The score improved; best was updated
    Improved,
    /// No improvement, but patience not yet exhausted
    NoImprovement,
    /// Patience exhausted; training should halt
    Stop,
}

/// Patience-based early stopping, monitoring a score to maximize
#[derive(Clone, Debug)]
pub struct EarlyStopping {
    patience: usize,
    best_score: Option<f32>,
    non_improving: usize,
}

impl EarlyStopping {
    /// Create an early stopper with the given patience
    pub fn new(patience: usize) -> Self {
        Self {
            patience,
            best_score: None,
            non_improving: 0,
        }
    }

    /// Seed the best score, e.g. from a checkpoint's recorded F1
    pub fn with_best(mut self, best: f32) -> Self {
        self.best_score = Some(best);
        self
    }

    /// Record an epoch's validation score and decide whether to continue
    pub fn update(&mut self, score: f32) -> StopDecision {
        let improved = match self.best_score {
            Some(best) => score > best,
            None => true,
        };

        if improved {
            self.best_score = Some(score);
            self.non_improving = 0;
            return StopDecision::Improved;
        }

        self.non_improving += 1;
        if self.non_improving >= self.patience {
            StopDecision::Stop
        } else {
            StopDecision::NoImprovement
        }
    }

    /// Best score recorded so far
    pub fn best_score(&self) -> Option<f32> {
        self.best_score
    }

    /// Consecutive non-improving epochs
    pub fn non_improving(&self) -> usize {
        self.non_improving
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A strictly increasing score sequence never stops
        #[test]
        fn monotone_improvement_never_stops(
            start in 0.0f32..0.5,
            steps in 1usize..30,
        ) {
            let mut es = EarlyStopping::new(1);
            for i in 0..steps {
                let score = start + (i as f32 + 1.0) * 0.01;
                prop_assert_eq!(es.update(score), StopDecision::Improved);
            }
        }

        /// A constant score stops after exactly `patience` repeats
        #[test]
        fn constant_score_stops_at_patience(
            patience in 1usize..10,
            score in 0.0f32..1.0,
        ) {
            let mut es = EarlyStopping::new(patience);
            es.update(score);
            for i in 1..=patience {
                let decision = es.update(score);
                if i < patience {
                    prop_assert_eq!(decision, StopDecision::NoImprovement);
                } else {
                    prop_assert_eq!(decision, StopDecision::Stop);
                }
            }
        }
    }
}
