use crate::model::{Budget, BudgetRange, Selection};

/// Budget explorer window shown after a successful solve.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BudgetExplorerState {
    pub open: bool,
    /// Current date of the spreadsheet the solve ran on.
    pub date_label: String,
    /// Slider bounds; `None` until the first successful solve.
    pub range: Option<BudgetRange>,
    pub budget: Budget,
    pub people: Vec<String>,
    pub groups: Vec<String>,
    pub checklist_pending: bool,
    pub checklist_text: String,
}

impl BudgetExplorerState {
    /// Point the explorer at a fresh solve, starting at the range midpoint.
    pub fn reset_for(&mut self, range: BudgetRange, date_label: String) {
        self.open = true;
        self.date_label = date_label;
        self.range = Some(range);
        self.budget = range.initial();
        self.people.clear();
        self.groups.clear();
        self.checklist_text.clear();
    }

    pub fn title(&self) -> String {
        format!("Budget Explorer ({})", self.date_label)
    }

    pub fn budget_label(&self) -> String {
        format!("Budget = {}", self.budget)
    }

    pub fn checklist_label(&self) -> String {
        format!("Produce checklist for budget B = {}", self.budget)
    }

    pub fn show_selection(&mut self, selection: &Selection) {
        self.people = selection.people.clone();
        self.groups = selection.groups.clone();
    }

    pub fn clear_selection(&mut self) {
        self.people.clear();
        self.groups.clear();
    }
}
