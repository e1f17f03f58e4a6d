//! Ordered, session-owned collection of process steps.

use shared::protocol::{StepEcho, StepPayload};
use tracing::debug;

use crate::model::{ProcessStep, StepPrefill, StepUpdate};

#[derive(Debug, Default, Clone)]
pub struct StepStore {
    steps: Vec<ProcessStep>,
    wait_times_stale: bool,
    revision: u64,
}

impl StepStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[ProcessStep] {
        &self.steps
    }

    pub fn get(&self, index: usize) -> Option<&ProcessStep> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// True when the model changed since wait times were last written back.
    pub fn wait_times_stale(&self) -> bool {
        self.wait_times_stale
    }

    /// Bumped by every mutation. Write-back does not count.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.wait_times_stale = true;
    }

    /// Appends a step and returns its position. Duplicate names are accepted.
    pub fn add_step(&mut self, prefill: StepPrefill) -> usize {
        let position = self.steps.len();
        let step = prefill.build(position);
        debug!(index = position, name = %step.name, "step added");
        self.steps.push(step);
        self.touch();
        position
    }

    /// Removes the step at `index`. Dependencies naming it are left as they are.
    pub fn remove_step(&mut self, index: usize) -> Option<ProcessStep> {
        if index >= self.steps.len() {
            return None;
        }
        let removed = self.steps.remove(index);
        debug!(index, name = %removed.name, "step removed");
        self.touch();
        Some(removed)
    }

    /// Applies a partial edit. Returns false when `index` is out of range.
    pub fn update_step(&mut self, index: usize, update: StepUpdate) -> bool {
        let Some(step) = self.steps.get_mut(index) else {
            return false;
        };
        update.apply(step, index);
        self.touch();
        true
    }

    pub fn clear(&mut self) {
        self.steps.clear();
        self.touch();
    }

    pub fn payload(&self) -> Vec<StepPayload> {
        self.steps.iter().map(ProcessStep::to_payload).collect()
    }

    /// Writes scheduled waits back by position: echo `i` updates step `i`.
    /// Echoes beyond the current model length are ignored. The annotations
    /// only count as fresh when `snapshot` is still the current revision.
    pub fn write_back_wait_times(&mut self, echoes: &[StepEcho], snapshot: u64) -> usize {
        let mut written = 0;
        for (step, echo) in self.steps.iter_mut().zip(echoes) {
            step.wait_time = echo.scheduled_wait();
            written += 1;
        }
        if snapshot == self.revision {
            self.wait_times_stale = false;
        } else {
            debug!(snapshot, revision = self.revision, "model changed while analysing");
        }
        written
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
