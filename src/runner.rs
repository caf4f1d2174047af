// src/runner.rs
//! The batch loop: strictly sequential row processing with per-row
//! checkpoints and a cooldown between provider calls.
//!
//! Rows are visited in table order, one at a time. The next row's call never
//! starts before the previous row's call, parse, and checkpoint write have
//! all completed, so checkpoint N always reflects rows 1..N.

use crate::config::RunConfig;
use crate::constants::SUBJECT_SLOTS;
use crate::error::AppError;
use crate::parsing::ParsedFields;
use crate::pipeline::{RowOutcome, RowProcessor};
use crate::table::LeadTable;
use std::time::Duration;

/// Pacing between consecutive provider calls.
///
/// Injectable so the fixed pause can be swapped for adaptive backoff without
/// touching the row loop.
#[async_trait::async_trait]
pub trait CooldownPolicy: Send + Sync {
    async fn wait_before_next_call(&self);
}

/// The default policy: a fixed pause, long enough to stay under the
/// provider's request-rate ceiling for a sequential batch.
pub struct FixedCooldown {
    pause: Duration,
}

impl FixedCooldown {
    pub fn new(pause: Duration) -> Self {
        Self { pause }
    }
}

#[async_trait::async_trait]
impl CooldownPolicy for FixedCooldown {
    async fn wait_before_next_call(&self) {
        if self.pause.is_zero() {
            return;
        }
        log::info!("Waiting {:?} before next call", self.pause);
        tokio::time::sleep(self.pause).await;
    }
}

/// Per-outcome tallies for a finished run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Rows left untouched by `--resume`.
    pub already_complete: usize,
}

impl RunSummary {
    fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Rows for which a provider call was actually attempted.
    #[allow(dead_code)] // Used via the library API
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Drives every row of a table through a [`RowProcessor`].
pub struct BatchRunner<'a> {
    processor: RowProcessor<'a>,
    cooldown: Box<dyn CooldownPolicy>,
    config: &'a RunConfig,
}

impl<'a> BatchRunner<'a> {
    pub fn new(
        processor: RowProcessor<'a>,
        cooldown: Box<dyn CooldownPolicy>,
        config: &'a RunConfig,
    ) -> Self {
        Self {
            processor,
            cooldown,
            config,
        }
    }

    /// Visits every row in order, then writes the final table.
    ///
    /// Skipped and failed rows leave their result columns blank but never
    /// stop iteration; only a checkpoint or final-table write failure aborts,
    /// since losing durability defeats the point of the loop.
    pub async fn run(&self, table: &mut LeadTable) -> Result<RunSummary, AppError> {
        let total = table.len();
        let mut summary = RunSummary::new(total);
        let endpoint_column = self.config.mode.endpoint_column();

        for index in 0..total {
            let position = index + 1;
            log::info!("--- Processing row {}/{} ---", position, total);

            if self.config.resume && !table.get(index, endpoint_column).is_empty() {
                log::info!("Row {} already has results, leaving untouched", position);
                summary.already_complete += 1;
                continue;
            }

            // The row view's borrow must end before the success arm mutates
            // the table.
            let outcome = self.processor.process(&table.row(index)).await;
            match outcome {
                RowOutcome::Skipped => {
                    log::info!("Skipping row {} due to missing URL", position);
                    summary.skipped += 1;
                    // No call was made, so no cooldown either.
                    continue;
                }
                RowOutcome::Completed(fields) => {
                    self.apply_fields(table, index, &fields)?;
                    self.write_checkpoint(table, position)?;
                    summary.succeeded += 1;
                }
                RowOutcome::Failed(error) => {
                    log::error!("Error processing row {}: {}", position, error);
                    summary.failed += 1;
                }
            }

            self.cooldown.wait_before_next_call().await;
        }

        table.write_csv_path(&self.config.output_path)?;
        log::info!(
            "Final table written to {} ({} succeeded, {} failed, {} skipped, {} already complete)",
            self.config.output_path.display(),
            summary.succeeded,
            summary.failed,
            summary.skipped,
            summary.already_complete,
        );

        Ok(summary)
    }

    /// Merges parsed fields into the row, endpoint column first.
    ///
    /// Column names come from the mode's declared result columns, so the
    /// writer and the header can't drift apart.
    fn apply_fields(
        &self,
        table: &mut LeadTable,
        index: usize,
        fields: &ParsedFields,
    ) -> Result<(), AppError> {
        let columns = self.config.mode.result_columns();
        table.set(index, columns[0], self.config.model.to_string())?;

        match fields {
            ParsedFields::Copy(copy) => {
                let subject_columns = &columns[1..1 + SUBJECT_SLOTS];
                for (column, subject) in subject_columns.iter().zip(&copy.subjects) {
                    table.set(index, column, subject.clone())?;
                }
                table.set(index, columns[1 + SUBJECT_SLOTS], copy.body.clone())?;
            }
            ParsedFields::Research(research) => {
                table.set(index, columns[1], research.research_text.clone())?;
            }
        }
        Ok(())
    }

    /// Writes a full snapshot of the table, keyed by the just-completed
    /// row's position. Replaced wholesale on the next success, never appended.
    fn write_checkpoint(&self, table: &LeadTable, position: usize) -> Result<(), AppError> {
        let path = self.config.checkpoint_path(position);
        table
            .write_csv_path(&path)
            .map_err(|e| AppError::CheckpointFailed {
                row: position,
                cause: e.to_string(),
            })?;
        log::info!("Saved checkpoint to {}", path.display());
        Ok(())
    }
}
