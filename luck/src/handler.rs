use std::ops::RangeInclusive;

use crate::{
    draw::Draw,
    error::{DrawError, LuckError, SettingsError},
    presentation::{LuckContext, Response, Template},
};

pub const DRAW_RANGE_START: u32 = 3;
pub const DRAW_RANGE_END: u32 = 6;
pub const REFERENCE: u32 = 4;

/// Result of a single invocation: the drawn value and whether it hit the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub drawn: u32,
    pub result: bool,
}

/// Draws an integer from `range` and reports whether it equals `reference`.
///
/// Holds no mutable state, so a single handler can serve any number of invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuckHandler {
    range: RangeInclusive<u32>,
    reference: u32,
}

impl Default for LuckHandler {
    fn default() -> Self {
        Self {
            range: DRAW_RANGE_START..=DRAW_RANGE_END,
            reference: REFERENCE,
        }
    }
}

impl LuckHandler {
    pub fn new(range: RangeInclusive<u32>, reference: u32) -> Result<Self, SettingsError> {
        if range.is_empty() {
            return Err(SettingsError::EmptyRange {
                start: *range.start(),
                end: *range.end(),
            });
        }
        if !range.contains(&reference) {
            return Err(SettingsError::ReferenceOutOfRange {
                reference,
                start: *range.start(),
                end: *range.end(),
            });
        }
        Ok(Self { range, reference })
    }

    pub fn range(&self) -> &RangeInclusive<u32> {
        &self.range
    }

    pub fn reference(&self) -> u32 {
        self.reference
    }

    /// Probability of a `true` outcome under uniform draws.
    pub fn expected_luck_rate(&self) -> f64 {
        let size = (*self.range.end() - *self.range.start()) as f64 + 1.0;
        1.0 / size
    }

    pub fn judge(&self, drawn: u32) -> Outcome {
        Outcome {
            drawn,
            result: drawn == self.reference,
        }
    }

    pub fn guess<D: Draw>(&self, draw: &mut D) -> Result<Outcome, DrawError> {
        let drawn = draw.draw(&self.range)?;
        let outcome = self.judge(drawn);
        tracing::debug!(drawn, result = outcome.result, "guessed");
        Ok(outcome)
    }

    pub fn handle<D: Draw>(&self, draw: &mut D, template: Template) -> Result<Response, LuckError> {
        let outcome = self.guess(draw)?;
        Ok(Response::render(LuckContext::from(outcome), template)?)
    }
}
