use super::jobs::JobMessage;
use super::*;
use crate::api::SolveReply;
use crate::config::NetworkSettings;
use crate::model::{Budget, Graph, GroupWeights, Institution, Membership, Selection};
use time::macros::date;

/// Controller pointed at a port nothing listens on; tests feed replies
/// through `handle_job_message` instead.
pub(super) fn dummy_controller() -> EguiController {
    let api = ApiClient::new("http://127.0.0.1:9/", &NetworkSettings::default()).unwrap();
    let mut controller = EguiController::new(api, &UiDefaults::default(), date!(2024 - 05 - 02));
    controller.ui.solver.visible = true;
    controller
}

pub(super) fn selection_for(budget: Budget) -> Selection {
    Selection {
        people: vec![format!("2020_person{budget}_1")],
        groups: vec![format!("g{}", budget % 2)],
    }
}

pub(super) fn solution_without(range: BudgetRange, skip: &[Budget]) -> Solution {
    range
        .iter()
        .filter(|budget| !skip.contains(budget))
        .map(|budget| (budget, selection_for(budget)))
        .collect()
}

/// Deliver a successful solve reply for `range`.
pub(super) fn deliver_solve(controller: &mut EguiController, range: BudgetRange, solution: Solution) {
    let token = controller.jobs.requests.restart(Endpoint::Solve);
    controller.handle_job_message(JobMessage::Solved {
        token,
        range,
        result: Ok(SolveReply {
            message: "Solved".into(),
            solution,
        }),
    });
}

pub(super) fn institution_for(range: BudgetRange) -> Institution {
    let members = range
        .iter()
        .map(|budget| Membership {
            person: format!("2020_person{budget}_1"),
            groups: vec![format!("g{}", budget % 2)],
        })
        .collect();
    Institution {
        group: vec![
            GroupWeights {
                group: "g0".into(),
                weight: vec![0.5; range.len()],
            },
            GroupWeights {
                group: "g1".into(),
                weight: vec![0.25; range.len()],
            },
        ],
        graph: Graph::new(members),
    }
}

/// Deliver the institution reply the explorer requested after a solve.
pub(super) fn deliver_institution(controller: &mut EguiController, range: BudgetRange) {
    let token = controller.jobs.requests.restart(Endpoint::Institution);
    controller.handle_job_message(JobMessage::InstitutionLoaded {
        token,
        range,
        result: Ok(institution_for(range)),
    });
}
