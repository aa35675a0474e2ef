use crate::egui_app::diagram::{self, CANVAS_SIZE, NetworkDiagram};
use eframe::egui::{self, Pos2, Rect, Sense, Stroke, Ui, Vec2};

const HOVER_SLACK: f32 = 2.0;

/// Paint the network into a square scaled from the 400x400 canvas.
pub(super) fn render_diagram(ui: &mut Ui, network: &mut NetworkDiagram, max_side: f32) {
    let side = ui.available_width().min(max_side).max(100.0);
    let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::hover());
    let rect = response.rect;
    let scale = rect.width() / CANVAS_SIZE;
    let to_screen = |pos: Pos2| rect.min + pos.to_vec2() * scale;

    painter.rect_filled(rect, 0.0, egui::Color32::WHITE);
    for edge in network.edges() {
        painter.line_segment(
            [to_screen(edge.from), to_screen(edge.to)],
            Stroke::new(edge.style.width, edge.style.color),
        );
    }
    for person in network.people() {
        painter.circle_filled(
            to_screen(person.pos),
            diagram::PERSON_RADIUS * scale,
            diagram::PERSON_FILL,
        );
    }
    for group in network.groups() {
        painter.circle_filled(to_screen(group.pos), diagram::GROUP_RADIUS * scale, group.fill);
    }

    if let Some(pointer) = response.hover_pos() {
        let canvas = canvas_pos(rect, scale, pointer);
        if let Some(node) = network.node_at(canvas, HOVER_SLACK / scale.max(f32::EPSILON)) {
            network.hover(node);
        }
    }
}

fn canvas_pos(rect: Rect, scale: f32, pointer: Pos2) -> Pos2 {
    let local = pointer - rect.min;
    Pos2::new(local.x / scale, local.y / scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_maps_back_to_canvas() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::splat(200.0));
        let pos = canvas_pos(rect, 0.5, Pos2::new(110.0, 120.0));
        assert_eq!(pos, Pos2::new(200.0, 200.0));
    }
}
