use std::{
    collections::BTreeMap,
    fs::{File, OpenOptions},
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{
    draw::RngDraw,
    error::{DrawError, LuckError},
    handler::{LuckHandler, Outcome},
};

pub const OUTCOMES_FILE: &str = "outcomes.csv";
pub const SUMMARY_FILE: &str = "summary.csv";

/// Outcomes of a batch of independent invocations drawn from a single seed.
#[derive(Debug, Clone)]
pub struct Trial {
    pub seed: u64,
    pub outcomes: Vec<Outcome>,
    pub summary: TrialSummary,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialSummary {
    pub invocations: usize,
    pub lucky: usize,
    pub draws: BTreeMap<u32, usize>,
}

impl TrialSummary {
    fn record(&mut self, outcome: &Outcome) {
        self.invocations += 1;
        if outcome.result {
            self.lucky += 1;
        }
        *self.draws.entry(outcome.drawn).or_default() += 1;
    }

    pub fn luck_rate(&self) -> f64 {
        if self.invocations == 0 {
            return 0.0;
        }
        self.lucky as f64 / self.invocations as f64
    }

    pub fn frequency(&self, drawn: u32) -> f64 {
        if self.invocations == 0 {
            return 0.0;
        }
        self.draws.get(&drawn).copied().unwrap_or_default() as f64 / self.invocations as f64
    }
}

pub fn run_trial(
    handler: &LuckHandler,
    invocations: usize,
    seed: u64,
) -> Result<Trial, DrawError> {
    let mut draw = RngDraw::from_seed(seed);
    let mut outcomes = Vec::with_capacity(invocations);
    let mut summary = TrialSummary::default();
    for _ in 0..invocations {
        let outcome = handler.guess(&mut draw)?;
        summary.record(&outcome);
        outcomes.push(outcome);
    }
    tracing::info!(
        seed,
        invocations,
        lucky = summary.lucky,
        luck_rate = summary.luck_rate(),
        "trial completed"
    );
    Ok(Trial {
        seed,
        outcomes,
        summary,
    })
}

#[derive(Serialize)]
struct OutcomeRow {
    invocation: usize,
    drawn: u32,
    result: bool,
}

#[derive(Serialize)]
struct SummaryRow {
    drawn: u32,
    count: usize,
    frequency: f64,
}

impl Trial {
    /// Writes `outcomes.csv` and `summary.csv` into `dir`. Existing files are never overwritten,
    /// and a failed save removes the files it created.
    pub fn save(&self, dir: &Path) -> Result<(PathBuf, PathBuf), LuckError> {
        let outcomes_path = dir.join(OUTCOMES_FILE);
        let summary_path = dir.join(SUMMARY_FILE);

        let outcomes_file = create_new(&outcomes_path)?;
        let saved = create_new(&summary_path).and_then(|summary_file| {
            let saved = self
                .save_outcomes(outcomes_file)
                .and_then(|_| self.save_summary(summary_file));
            if saved.is_err() {
                discard(&summary_path);
            }
            saved
        });
        if let Err(e) = saved {
            discard(&outcomes_path);
            return Err(e);
        }
        Ok((outcomes_path, summary_path))
    }

    fn save_outcomes(&self, file: File) -> Result<(), LuckError> {
        let mut writer = csv::Writer::from_writer(file);
        for (invocation, outcome) in self.outcomes.iter().enumerate() {
            writer.serialize(OutcomeRow {
                invocation,
                drawn: outcome.drawn,
                result: outcome.result,
            })?;
        }
        writer.flush()?;
        Ok(())
    }

    fn save_summary(&self, file: File) -> Result<(), LuckError> {
        let mut writer = csv::Writer::from_writer(file);
        for (&drawn, &count) in self.summary.draws.iter() {
            writer.serialize(SummaryRow {
                drawn,
                count,
                frequency: self.summary.frequency(drawn),
            })?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn create_new(path: &Path) -> Result<File, LuckError> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => LuckError::AlreadyExists(path.to_path_buf()),
            _ => LuckError::Io(e),
        })
}

fn discard(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        tracing::error!(err = %e, path = %path.display(), "fail to remove partial trial output");
    }
}
