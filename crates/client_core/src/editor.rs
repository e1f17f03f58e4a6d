//! Editable table view kept in sync with the [`StepStore`].
//!
//! Each row is keyed by its position in the store. Typing into a cell only
//! changes the row's input buffer; the store is updated when the cell's change
//! event fires ([`StepEditor::change_cell`]) or when pending edits are flushed
//! before an action that reads the model.

use std::collections::BTreeSet;

use tracing::debug;

use crate::{
    model::{format_depends_on, ProcessStep, StepPrefill, StepUpdate},
    store::StepStore,
};

pub const EMPTY_TABLE_PLACEHOLDER: &str = "Add steps to get started";

#[derive(Debug, Clone, PartialEq)]
pub enum CellEdit {
    Name(String),
    CycleTime(String),
    Cost(String),
    ValueAdded(bool),
    DependsOn(String),
}

/// Current contents of one row's inputs, as the user sees them.
#[derive(Debug, Clone, PartialEq)]
pub struct RowInput {
    pub name: String,
    pub cycle_time: String,
    pub cost: String,
    pub value_added: bool,
    pub depends_on: String,
}

impl RowInput {
    fn from_step(step: &ProcessStep) -> Self {
        Self {
            name: step.name.clone(),
            cycle_time: step.cycle_time.to_string(),
            cost: step.cost.to_string(),
            value_added: step.value_added,
            depends_on: format_depends_on(&step.depends_on),
        }
    }

    fn apply(&mut self, edit: CellEdit) {
        match edit {
            CellEdit::Name(value) => self.name = value,
            CellEdit::CycleTime(value) => self.cycle_time = value,
            CellEdit::Cost(value) => self.cost = value,
            CellEdit::ValueAdded(value) => self.value_added = value,
            CellEdit::DependsOn(value) => self.depends_on = value,
        }
    }

    /// The whole row as one update, so a commit never applies half an edit.
    fn to_update(&self) -> StepUpdate {
        StepUpdate {
            name: Some(self.name.clone()),
            cycle_time: Some(self.cycle_time.clone()),
            cost: Some(self.cost.clone()),
            value_added: Some(self.value_added),
            depends_on: Some(self.depends_on.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Position in the store. Shifts when an earlier row is removed.
    pub key: usize,
    pub input: RowInput,
    pub wait_time: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub rows: Vec<RowView>,
    /// Set only when there are no rows.
    pub placeholder: Option<&'static str>,
    /// Process name shown in the summary panel; `None` hides the panel.
    pub summary_panel: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct RowState {
    input: RowInput,
    wait_time: f64,
}

#[derive(Debug)]
pub struct StepEditor {
    process_name: String,
    rows: Vec<RowState>,
    dirty: BTreeSet<usize>,
}

impl StepEditor {
    pub fn new(process_name: impl Into<String>) -> Self {
        Self {
            process_name: process_name.into(),
            rows: Vec::new(),
            dirty: BTreeSet::new(),
        }
    }

    pub fn process_name(&self) -> &str {
        &self.process_name
    }

    /// Rebuilds every row from the store, discarding unflushed input.
    pub fn render(&mut self, store: &StepStore) {
        self.rows = store
            .steps()
            .iter()
            .map(|step| RowState {
                input: RowInput::from_step(step),
                wait_time: step.wait_time,
            })
            .collect();
        self.dirty.clear();
    }

    pub fn view(&self) -> TableView {
        let rows: Vec<RowView> = self
            .rows
            .iter()
            .enumerate()
            .map(|(key, row)| RowView {
                key,
                input: row.input.clone(),
                wait_time: row.wait_time,
            })
            .collect();
        let empty = rows.is_empty();
        TableView {
            rows,
            placeholder: empty.then_some(EMPTY_TABLE_PLACEHOLDER),
            summary_panel: (!empty).then(|| self.process_name.clone()),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn input(&self, index: usize) -> Option<&RowInput> {
        self.rows.get(index).map(|row| &row.input)
    }

    pub fn has_pending(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Types into a cell without committing. Returns false for unknown rows.
    pub fn edit_cell(&mut self, index: usize, edit: CellEdit) -> bool {
        let Some(row) = self.rows.get_mut(index) else {
            return false;
        };
        row.input.apply(edit);
        self.dirty.insert(index);
        true
    }

    /// Types into a cell and fires its change event.
    pub fn change_cell(&mut self, store: &mut StepStore, index: usize, edit: CellEdit) -> bool {
        self.edit_cell(index, edit) && self.commit_row(store, index)
    }

    /// Commits the full row with a single store update, then mirrors the
    /// normalised values back into the row.
    pub fn commit_row(&mut self, store: &mut StepStore, index: usize) -> bool {
        let Some(row) = self.rows.get_mut(index) else {
            return false;
        };
        if !store.update_step(index, row.input.to_update()) {
            return false;
        }
        if let Some(step) = store.get(index) {
            row.input = RowInput::from_step(step);
        }
        self.dirty.remove(&index);
        true
    }

    /// Commits every row with unflushed input, as if each field lost focus.
    pub fn flush_pending(&mut self, store: &mut StepStore) -> usize {
        let pending: Vec<usize> = self.dirty.iter().copied().collect();
        let committed = pending
            .into_iter()
            .filter(|&index| self.commit_row(store, index))
            .count();
        if committed > 0 {
            debug!(rows = committed, "flushed pending edits");
        }
        // Rows that vanished from the store cannot be committed.
        self.dirty.clear();
        committed
    }

    pub fn add_row(&mut self, store: &mut StepStore, prefill: StepPrefill) -> usize {
        self.flush_pending(store);
        let index = store.add_step(prefill);
        self.render(store);
        index
    }

    pub fn remove_row(&mut self, store: &mut StepStore, index: usize) -> Option<ProcessStep> {
        self.flush_pending(store);
        let removed = store.remove_step(index);
        self.render(store);
        removed
    }

    pub fn clear(&mut self, store: &mut StepStore) {
        self.dirty.clear();
        store.clear();
        self.render(store);
    }
}

#[cfg(test)]
#[path = "tests/editor_tests.rs"]
mod tests;
