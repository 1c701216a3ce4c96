use crate::core::{Line, Progress, ProgressSink, SequencePlan, SequenceReport, Sleeper, TriggerPort};
use crate::utils::duration::format_hms;
use crate::utils::error::{Result, TriggerError};
use chrono::Utc;
use std::future::Future;
use std::time::Duration;

/// Settle time used for the wake-up pulse and added to every exposure.
pub const DEFAULT_OFFSET: Duration = Duration::from_millis(300);

/// Process exit code after an interrupted run.
pub const EXIT_INTERRUPTED: u8 = 130;

/// How a supervised run ended. The lines are low in every case.
#[derive(Debug)]
pub enum RunOutcome {
    Finished(SequenceReport),
    Failed(TriggerError),
    Interrupted,
}

impl RunOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::Finished(_) => 0,
            RunOutcome::Failed(_) => 1,
            RunOutcome::Interrupted => EXIT_INTERRUPTED,
        }
    }
}

pub struct Sequencer<T: TriggerPort, S: Sleeper, P: ProgressSink> {
    trigger: T,
    sleeper: S,
    progress: P,
    offset: Duration,
}

impl<T: TriggerPort, S: Sleeper, P: ProgressSink> Sequencer<T, S, P> {
    pub fn new(trigger: T, sleeper: S, progress: P, offset: Duration) -> Self {
        Self {
            trigger,
            sleeper,
            progress,
            offset,
        }
    }

    /// Wake-up pulse, then `plan.shots` exposures separated by `plan.interval`.
    pub async fn run(&mut self, plan: &SequencePlan) -> Result<SequenceReport> {
        let started_at = Utc::now();

        tracing::info!(
            "Starting sequence: exposure={:?}, shots={}, interval={:?}, estimated {}",
            plan.exposure,
            plan.shots,
            plan.interval,
            format_hms(plan.estimated_duration(self.offset))
        );

        self.save_progress(Progress::after_shot(0, plan.shots));
        self.wake_up().await?;

        let hold = self.offset.saturating_add(plan.exposure);
        for shot in 1..=plan.shots {
            println!("Photo {}/{}: exposure = {:?}", shot, plan.shots, plan.exposure);

            self.trigger.write(Line::Shutter, true)?;
            self.trigger.write(Line::Focus, true)?;
            self.sleeper.sleep(hold).await;
            self.trigger.write(Line::Shutter, false)?;
            self.trigger.write(Line::Focus, false)?;
            tracing::debug!("Shot {} closed", shot);

            self.save_progress(Progress::after_shot(shot, plan.shots));
            self.sleeper.sleep(plan.interval).await;
        }

        let report = SequenceReport {
            shots_taken: plan.shots,
            started_at,
            finished_at: Utc::now(),
        };
        tracing::info!(
            "Sequence finished: {} shots in {}",
            report.shots_taken,
            format_hms(report.elapsed())
        );
        Ok(report)
    }

    /// Runs `plan` until it ends or `stop` resolves, then releases the lines.
    pub async fn run_until<F>(&mut self, plan: &SequencePlan, stop: F) -> RunOutcome
    where
        F: Future<Output = ()>,
    {
        let outcome = tokio::select! {
            result = self.run(plan) => match result {
                Ok(report) => RunOutcome::Finished(report),
                Err(e) => RunOutcome::Failed(e),
            },
            _ = stop => {
                tracing::warn!("Interrupted, sequence aborted");
                RunOutcome::Interrupted
            }
        };

        if let Err(e) = self.shutdown() {
            tracing::error!("Could not release GPIO lines: {}", e);
        }
        outcome
    }

    /// Drives both lines low. Safe to call more than once.
    pub fn shutdown(&mut self) -> Result<()> {
        tracing::debug!("Releasing GPIO lines");
        self.trigger.release()
    }

    async fn wake_up(&mut self) -> Result<()> {
        tracing::debug!("Waking up camera");
        self.trigger.write(Line::Focus, true)?;
        self.sleeper.sleep(self.offset / 2).await;
        self.trigger.write(Line::Focus, false)?;
        self.sleeper.sleep(self.offset).await;
        Ok(())
    }

    // A lost progress update must not abort an exposure run.
    fn save_progress(&self, progress: Progress) {
        if let Err(e) = self.progress.record(&progress) {
            tracing::warn!("Could not save progress: {}", e);
        }
    }
}
