use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use riskdesk::egui_app::diagram::NetworkDiagram;
use riskdesk::model::{Graph, Membership};

const PEOPLE: usize = 2_000;
const GROUPS: usize = 40;

fn group_ids() -> Vec<String> {
    (0..GROUPS).map(|i| format!("group{i}")).collect()
}

fn synthetic_graph() -> Graph {
    Graph::new(
        (0..PEOPLE)
            .map(|i| Membership {
                person: format!("2020_person{i}_{i}"),
                groups: (0..3)
                    .map(|k| format!("group{}", (i * 7 + k * 13) % GROUPS))
                    .collect(),
            })
            .collect(),
    )
}

fn bench_render(c: &mut Criterion) {
    let graph = synthetic_graph();
    let groups = group_ids();
    c.bench_with_input(BenchmarkId::new("render", PEOPLE), &graph, |b, graph| {
        let mut diagram = NetworkDiagram::default();
        b.iter(|| diagram.render(black_box(graph), black_box(&groups)));
    });
}

fn bench_highlight(c: &mut Criterion) {
    let groups = group_ids();
    let mut diagram = NetworkDiagram::default();
    diagram.render(&synthetic_graph(), &groups);
    let people: Vec<String> = (0..PEOPLE)
        .step_by(5)
        .map(|i| format!("2020_person{i}_{i}"))
        .collect();
    let picked: Vec<String> = groups.iter().step_by(3).cloned().collect();
    c.bench_with_input(
        BenchmarkId::new("highlight", people.len()),
        &people,
        |b, people| {
            b.iter(|| diagram.highlight(black_box(people), black_box(&picked)));
        },
    );
}

criterion_group!(benches, bench_render, bench_highlight);
criterion_main!(benches);
