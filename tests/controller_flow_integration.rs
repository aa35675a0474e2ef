mod support;

use std::thread::sleep;
use std::time::Duration;

use riskdesk::api::{ApiClient, Endpoint};
use riskdesk::config::{NetworkSettings, UiDefaults};
use riskdesk::egui_app::controller::EguiController;
use riskdesk::egui_app::state::{ModelSelector, ProgressPhase};
use serde_json::json;
use support::mock_backend::{MockBackend, Reply};
use time::macros::date;

struct ControllerHarness {
    backend: MockBackend,
    controller: EguiController,
}

impl ControllerHarness {
    fn new() -> Self {
        let backend = MockBackend::start();
        let api = ApiClient::new(backend.base_url(), &NetworkSettings::default())
            .expect("mock url parses");
        let controller = EguiController::new(api, &UiDefaults::default(), date!(2024 - 05 - 02));
        Self {
            backend,
            controller,
        }
    }

    /// Poll the job channel until `done` holds or the wait runs out.
    fn wait_until(&mut self, mut done: impl FnMut(&EguiController) -> bool) {
        for _ in 0..400 {
            self.controller.poll_background_jobs();
            if done(&self.controller) {
                return;
            }
            sleep(Duration::from_millis(5));
        }
        panic!(
            "controller never reached the expected state; status: {}",
            self.controller.ui.status.text
        );
    }

    fn settle(&mut self) {
        self.wait_until(|controller| !controller.has_pending_jobs());
    }
}

fn solution_json() -> serde_json::Value {
    let mut response = serde_json::Map::new();
    for budget in 10..=20 {
        response.insert(
            budget.to_string(),
            json!([
                [format!("2020_person{budget}_1")],
                [format!("g{}", budget % 2)]
            ]),
        );
    }
    json!({"state": true, "message": "Solved 11 budgets", "response": response})
}

fn serve_happy_path(backend: &MockBackend) {
    backend.json(
        "spreadsheet",
        json!({"state": true, "message": "Spreadsheet ready"}),
    );
    backend.json(
        "model_list",
        json!({"state": true, "list": ["base.yaml", "alt.yaml"]}),
    );
    backend.json(
        "risk_model",
        json!({
            "state": true,
            "coefficients": [1.0, 0.8, 0.6],
            "discount_factor": [1.0, 0.9],
            "coeff_kind": "custom",
            "coeff_vector": [1, 0.8, 0.6],
            "discount_kind": "sigmoid",
            "discount_vector": null
        }),
    );
    backend.json("solve", solution_json());
    backend.route(
        "progress",
        Reply::EventStream("data:0.0\n\ndata:50.0\n\ndata:100.0\n\n".into()),
    );
    backend.json(
        "institution",
        json!({
            "state": true,
            "response": {
                "group": [
                    {"group": "g0", "weight": [0.1, 0.2]},
                    {"group": "g1", "weight": [0.3, 0.4]}
                ],
                "graph": {
                    "2020_person15_1": ["g1"],
                    "2020_person16_1": ["g0", "g1"]
                }
            }
        }),
    );
    backend.json(
        "checklist",
        json!({"state": true, "message": "Checklist written"}),
    );
}

#[test]
fn full_desk_session_against_backend() {
    let mut harness = ControllerHarness::new();
    serve_happy_path(&harness.backend);

    harness.controller.load_spreadsheet();
    harness.settle();
    assert_eq!(harness.controller.ui.dates.result_text, "Spreadsheet ready");
    assert!(harness.controller.ui.solver.visible);
    assert_eq!(
        harness.controller.ui.models.models,
        vec!["base.yaml".to_string(), "alt.yaml".to_string()]
    );
    assert_eq!(
        harness.controller.ui.models.selected.as_deref(),
        Some("base.yaml")
    );
    let spreadsheet = harness.backend.requests_to("spreadsheet");
    assert_eq!(spreadsheet[0].query["currentDate"], "2024-05-02");
    assert_eq!(spreadsheet[0].query["previousDate"], "2024-05-01");

    harness.controller.open_risk_editor();
    harness.settle();
    assert_eq!(harness.controller.ui.risk.coefficient_value, "1,0.8,0.6");
    let coefficient = harness.controller.ui.charts.coefficient.get().unwrap();
    assert_eq!(coefficient.data().title, "Coefficient");
    assert!(harness.controller.ui.charts.discount_factor.is_created());
    assert_eq!(
        harness.backend.requests_to("risk_model")[0].query["path"],
        "base.yaml"
    );

    harness
        .controller
        .select_model("alt.yaml".into(), ModelSelector::Solver);
    harness.controller.ui.solver.min_budget = "10".into();
    harness.controller.ui.solver.max_budget = "20".into();
    harness.controller.ui.solver.ratio = "0.5".into();
    harness.controller.solve();
    assert!(!harness.controller.ui.solver.solve_enabled());
    harness.wait_until(|controller| {
        !controller.has_pending_jobs() && controller.ui.progress.phase == ProgressPhase::Done
    });

    let solve = &harness.backend.requests_to("solve")[0];
    assert_eq!(solve.query["Bmin"], "10");
    assert_eq!(solve.query["Bmax"], "20");
    assert_eq!(solve.query["model_path"], "alt.yaml");
    assert!(harness.controller.ui.solver.solve_enabled());
    assert_eq!(harness.controller.ui.solver.solve_label, "Solve again");
    assert_eq!(harness.controller.ui.solver.result_text, "Solved 11 budgets");
    assert_eq!(harness.controller.ui.progress.label(), "100.0%");

    let explorer = &harness.controller.ui.explorer;
    assert!(explorer.open);
    assert_eq!(explorer.title(), "Budget Explorer (2024-05-02)");
    assert_eq!(explorer.budget, 15);
    assert_eq!(explorer.people, vec!["2020_person15_1".to_string()]);
    assert_eq!(explorer.groups, vec!["g1".to_string()]);
    assert_eq!(harness.controller.ui.diagram.people().len(), 2);
    assert_eq!(harness.controller.ui.diagram.edges().len(), 3);
    let weights = harness.controller.ui.charts.group_weights.get().unwrap();
    assert_eq!(weights.data().series.len(), 2);
    assert_eq!(weights.data().series[0].points[0], [10.0, 0.1]);

    harness.controller.set_budget(16);
    assert_eq!(
        harness.controller.ui.explorer.people,
        vec!["2020_person16_1".to_string()]
    );
    assert_eq!(harness.controller.ui.explorer.groups, vec!["g0".to_string()]);
    assert_eq!(
        harness.controller.ui.explorer.checklist_label(),
        "Produce checklist for budget B = 16"
    );

    harness.controller.request_checklist();
    harness.settle();
    assert_eq!(
        harness.controller.ui.explorer.checklist_text,
        "Checklist written"
    );
    assert_eq!(harness.backend.requests_to("checklist")[0].query["budget"], "16");
}

#[test]
fn backend_rejection_surfaces_its_error_text() {
    let mut harness = ControllerHarness::new();
    harness.backend.json(
        "spreadsheet",
        json!({"state": false, "error": "Spreadsheet for 2024-05-02 not found"}),
    );

    harness.controller.load_spreadsheet();
    harness.settle();

    assert_eq!(
        harness.controller.ui.dates.result_text,
        "Spreadsheet for 2024-05-02 not found"
    );
    assert!(harness.controller.ui.dates.load_enabled);
    assert!(!harness.controller.ui.solver.visible);
    assert!(harness.backend.requests_to("model_list").is_empty());
}

#[test]
fn failed_solve_keeps_explorer_closed() {
    let mut harness = ControllerHarness::new();
    serve_happy_path(&harness.backend);
    harness.backend.route(
        "solve",
        Reply::Status(500, "solver crashed".into()),
    );
    harness.backend.route("progress", Reply::EventStream("data:20.0\n\n".into()));

    harness.controller.load_spreadsheet();
    harness.settle();
    harness.controller.solve();
    harness.settle();

    assert!(!harness.controller.is_request_in_flight(Endpoint::Solve));
    assert!(harness.controller.solved().is_none());
    assert!(!harness.controller.ui.explorer.open);
    assert_eq!(
        harness.controller.ui.progress.phase,
        ProgressPhase::Interrupted
    );
    assert!(harness.controller.ui.solver.solve_enabled());
    assert!(harness.backend.requests_to("institution").is_empty());
}
