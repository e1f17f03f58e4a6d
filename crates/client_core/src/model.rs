//! Process step model and the input normalisation applied to edits.

use shared::protocol::StepPayload;

pub const DEFAULT_CYCLE_TIME: f64 = 1.0;
pub const DEFAULT_COST: f64 = 100.0;

/// One activity of the mapped process.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessStep {
    pub name: String,
    /// Hours of active work.
    pub cycle_time: f64,
    /// Hours of idle time, known only after an analysis.
    pub wait_time: f64,
    pub cost: f64,
    pub value_added: bool,
    pub depends_on: Vec<String>,
}

impl ProcessStep {
    pub fn to_payload(&self) -> StepPayload {
        StepPayload {
            name: self.name.clone(),
            cycle_time: self.cycle_time,
            cost: self.cost,
            value_added: self.value_added,
            depends_on: self.depends_on.clone(),
        }
    }
}

/// Optional initial values for a new step. Unset fields take the defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepPrefill {
    pub name: Option<String>,
    pub cycle_time: Option<f64>,
    pub wait_time: Option<f64>,
    pub cost: Option<f64>,
    pub value_added: bool,
    pub depends_on: Vec<String>,
}

impl StepPrefill {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub(crate) fn build(self, position: usize) -> ProcessStep {
        ProcessStep {
            name: resolve_name(self.name.as_deref().unwrap_or_default(), position),
            cycle_time: self.cycle_time.unwrap_or(DEFAULT_CYCLE_TIME),
            wait_time: self.wait_time.unwrap_or_default(),
            cost: self.cost.unwrap_or(DEFAULT_COST),
            value_added: self.value_added,
            depends_on: self
                .depends_on
                .into_iter()
                .map(|dep| dep.trim().to_string())
                .filter(|dep| !dep.is_empty())
                .collect(),
        }
    }
}

/// Partial edit of a step, carrying the raw text the user typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepUpdate {
    pub name: Option<String>,
    pub cycle_time: Option<String>,
    pub cost: Option<String>,
    pub value_added: Option<bool>,
    pub depends_on: Option<String>,
}

impl StepUpdate {
    pub(crate) fn apply(self, step: &mut ProcessStep, position: usize) {
        if let Some(name) = self.name {
            step.name = resolve_name(&name, position);
        }
        if let Some(raw) = self.cycle_time {
            step.cycle_time = parse_number_or_zero(&raw);
        }
        if let Some(raw) = self.cost {
            step.cost = parse_number_or_zero(&raw);
        }
        if let Some(value_added) = self.value_added {
            step.value_added = value_added;
        }
        if let Some(raw) = self.depends_on {
            step.depends_on = parse_depends_on(&raw);
        }
    }
}

pub fn default_step_name(position: usize) -> String {
    format!("Step {}", position + 1)
}

fn resolve_name(raw: &str, position: usize) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        default_step_name(position)
    } else {
        trimmed.to_string()
    }
}

/// Parses a numeric field. Anything unparsable or non-finite becomes 0.
pub fn parse_number_or_zero(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Splits a comma-separated dependency list, dropping blank entries.
pub fn parse_depends_on(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|dep| !dep.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn format_depends_on(depends_on: &[String]) -> String {
    depends_on.join(",")
}
