//! Shared state types for the egui UI.

mod explorer;
mod forms;
mod progress;
mod risk_editor;
mod status;

pub use explorer::BudgetExplorerState;
pub use forms::{DateFormState, ModelSelectState, ModelSelector, SolverFormState};
pub use progress::{ProgressPhase, SolveProgressState};
pub use risk_editor::RiskEditorState;
pub use status::StatusBarState;

use time::Date;

use crate::config::UiDefaults;
use crate::egui_app::charts::ChartSlot;
use crate::egui_app::diagram::NetworkDiagram;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub dates: DateFormState,
    pub models: ModelSelectState,
    pub solver: SolverFormState,
    pub risk: RiskEditorState,
    pub explorer: BudgetExplorerState,
    pub progress: SolveProgressState,
    pub charts: ChartsState,
    pub diagram: NetworkDiagram,
}

impl UiState {
    pub fn new(defaults: &UiDefaults, today: Date) -> Self {
        Self {
            status: StatusBarState::idle(),
            dates: DateFormState::for_today(today),
            models: ModelSelectState::default(),
            solver: SolverFormState::from_defaults(defaults),
            risk: RiskEditorState::from_defaults(defaults),
            explorer: BudgetExplorerState::default(),
            progress: SolveProgressState::default(),
            charts: ChartsState::default(),
            diagram: NetworkDiagram::default(),
        }
    }
}

/// One slot per chart on screen.
#[derive(Clone, Debug, Default)]
pub struct ChartsState {
    pub coefficient: ChartSlot,
    pub discount_factor: ChartSlot,
    pub group_weights: ChartSlot,
}
