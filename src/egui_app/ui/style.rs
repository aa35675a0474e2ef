use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

/// Light palette; chart series include black and yellow, so plots sit on a
/// pale background.
#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub warning: Color32,
    pub success: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(248, 249, 250),
        bg_secondary: Color32::from_rgb(255, 255, 255),
        bg_tertiary: Color32::from_rgb(233, 236, 239),
        panel_outline: Color32::from_rgb(206, 212, 218),
        text_primary: Color32::from_rgb(33, 37, 41),
        text_muted: Color32::from_rgb(108, 117, 125),
        accent: Color32::from_rgb(13, 110, 253),
        warning: Color32::from_rgb(192, 138, 43),
        success: Color32::from_rgb(25, 135, 84),
    }
}

/// Severity of a status-bar message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

pub fn status_badge_label(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Idle => "Idle",
        StatusTone::Busy => "Busy",
        StatusTone::Info => "Info",
        StatusTone::Warning => "Warning",
        StatusTone::Error => "Error",
    }
}

pub fn status_badge_color(tone: StatusTone) -> Color32 {
    let palette = palette();
    match tone {
        StatusTone::Idle => Color32::from_rgb(134, 142, 150),
        StatusTone::Busy => palette.accent,
        StatusTone::Info => palette.success,
        StatusTone::Warning => palette.warning,
        StatusTone::Error => Color32::from_rgb(192, 57, 43),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    *visuals = Visuals::light();
    visuals.panel_fill = palette.bg_primary;
    visuals.window_fill = palette.bg_secondary;
    visuals.extreme_bg_color = palette.bg_secondary;
    visuals.faint_bg_color = palette.bg_tertiary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.selection.bg_fill = palette.accent;
    visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);
    visuals.hyperlink_color = palette.accent;
    set_widget(&mut visuals.widgets.noninteractive, palette, palette.bg_primary);
    set_widget(&mut visuals.widgets.inactive, palette, palette.bg_tertiary);
    set_widget(&mut visuals.widgets.hovered, palette, palette.panel_outline);
    set_widget(&mut visuals.widgets.active, palette, palette.panel_outline);
    set_widget(&mut visuals.widgets.open, palette, palette.bg_tertiary);
    visuals.window_corner_radius = CornerRadius::same(4);
    visuals.popup_shadow = Shadow::NONE;
    visuals.button_frame = true;
}

fn set_widget(vis: &mut WidgetVisuals, palette: Palette, fill: Color32) {
    vis.corner_radius = CornerRadius::same(3);
    vis.bg_fill = fill;
    vis.weak_bg_fill = fill;
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

pub fn outer_border() -> Stroke {
    Stroke::new(1.0, palette().panel_outline)
}

pub fn compartment_fill() -> Color32 {
    palette().bg_secondary
}

pub fn muted_text() -> Color32 {
    palette().text_muted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tone_has_distinct_badge() {
        let tones = [
            StatusTone::Idle,
            StatusTone::Busy,
            StatusTone::Info,
            StatusTone::Warning,
            StatusTone::Error,
        ];
        for (i, tone) in tones.iter().enumerate() {
            for other in &tones[i + 1..] {
                assert_ne!(status_badge_color(*tone), status_badge_color(*other));
                assert_ne!(status_badge_label(*tone), status_badge_label(*other));
            }
        }
    }
}
