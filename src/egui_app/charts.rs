//! Line charts shown by the desk.
//!
//! Each chart lives in a [`ChartSlot`]. The first dataset creates the chart;
//! later datasets replace it in place so there is never more than one live
//! chart per slot.

use egui::Color32;
use egui::ecolor::Hsva;

use crate::model::{BudgetRange, GroupWeights};

/// Named base colors used before generated hues.
pub const BASE_PALETTE: [Color32; 7] = [
    Color32::from_rgb(255, 0, 0),
    Color32::from_rgb(0, 128, 0),
    Color32::from_rgb(0, 0, 255),
    Color32::from_rgb(0, 255, 255),
    Color32::from_rgb(255, 0, 255),
    Color32::from_rgb(255, 255, 0),
    Color32::from_rgb(0, 0, 0),
];

const GOLDEN_ANGLE_TURNS: f32 = 0.381_966;

/// Color of the `index`-th series.
///
/// The first seven series use [`BASE_PALETTE`]; later ones step around the hue
/// wheel by the golden angle so neighbours stay distinguishable.
pub fn series_color(index: usize) -> Color32 {
    if let Some(color) = BASE_PALETTE.get(index) {
        return *color;
    }
    let step = (index - BASE_PALETTE.len()) as f32;
    let hue = (step * GOLDEN_ANGLE_TURNS).fract();
    Color32::from(Hsva::new(hue, 0.75, 0.8, 1.0))
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub label: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineChartData {
    pub title: String,
    pub series: Vec<Series>,
    pub show_legend: bool,
}

/// A live chart. `revision` increments on every in-place update.
#[derive(Clone, Debug, PartialEq)]
pub struct LineChart {
    data: LineChartData,
    revision: u64,
    needs_reset: bool,
}

impl LineChart {
    pub fn data(&self) -> &LineChartData {
        &self.data
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True once per update; the renderer uses it to refit the plot bounds.
    pub fn take_reset(&mut self) -> bool {
        std::mem::take(&mut self.needs_reset)
    }
}

/// Holder of at most one chart.
#[derive(Clone, Debug, Default)]
pub struct ChartSlot {
    chart: Option<LineChart>,
}

impl ChartSlot {
    /// Create the chart on first use, otherwise replace its data in place.
    pub fn upsert(&mut self, data: LineChartData) -> &LineChart {
        let revision = self.chart.as_ref().map_or(0, |chart| chart.revision + 1);
        self.chart.insert(LineChart {
            data,
            revision,
            needs_reset: true,
        })
    }

    pub fn get(&self) -> Option<&LineChart> {
        self.chart.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut LineChart> {
        self.chart.as_mut()
    }

    pub fn is_created(&self) -> bool {
        self.chart.is_some()
    }
}

/// Chart of a sampled curve against sample indices `0..samples`.
///
/// Values past the label count are not drawn.
pub fn sampled_curve_chart(
    title: &str,
    color: Color32,
    values: &[f64],
    samples: u32,
) -> LineChartData {
    let points = values
        .iter()
        .take(samples as usize)
        .enumerate()
        .map(|(index, value)| [index as f64, *value])
        .collect();
    LineChartData {
        title: title.to_string(),
        series: vec![Series {
            label: title.to_string(),
            color,
            points,
        }],
        show_legend: false,
    }
}

pub fn coefficient_chart(values: &[f64], samples: u32) -> LineChartData {
    sampled_curve_chart("Coefficient", Color32::from_rgb(0, 0, 255), values, samples)
}

pub fn discount_factor_chart(values: &[f64], samples: u32) -> LineChartData {
    sampled_curve_chart("Discount Factor", Color32::from_rgb(255, 0, 0), values, samples)
}

/// One series per group over the budget axis, colored by position.
pub fn group_weight_chart(groups: &[GroupWeights], range: &BudgetRange) -> LineChartData {
    let series = groups
        .iter()
        .enumerate()
        .map(|(index, group)| Series {
            label: group.group.clone(),
            color: series_color(index),
            points: range
                .iter()
                .zip(group.weight.iter())
                .map(|(budget, weight)| [budget as f64, *weight])
                .collect(),
        })
        .collect();
    LineChartData {
        title: "Group weights per test budget".to_string(),
        series,
        show_legend: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_keeps_single_chart_and_bumps_revision() {
        let mut slot = ChartSlot::default();
        assert!(!slot.is_created());
        assert_eq!(slot.upsert(coefficient_chart(&[1.0, 0.5], 2)).revision(), 0);
        let chart = slot.upsert(coefficient_chart(&[0.2, 0.1], 2));
        assert_eq!(chart.revision(), 1);
        assert_eq!(chart.data().series[0].points, vec![[0.0, 0.2], [1.0, 0.1]]);
        assert_eq!(chart.data().series[0].color, Color32::from_rgb(0, 0, 255));
    }

    #[test]
    fn reset_flag_is_consumed_once() {
        let mut slot = ChartSlot::default();
        slot.upsert(discount_factor_chart(&[1.0], 1));
        let chart = slot.get_mut().unwrap();
        assert!(chart.take_reset());
        assert!(!chart.take_reset());
    }

    #[test]
    fn curve_is_truncated_to_sample_labels() {
        let data = sampled_curve_chart("c", Color32::BLACK, &[3.0, 2.0, 1.0], 2);
        assert_eq!(data.series[0].points.len(), 2);
        assert!(!data.show_legend);
    }

    #[test]
    fn group_chart_uses_budget_axis_and_palette_order() {
        let range = BudgetRange::new(10, 12).unwrap();
        let groups = vec![
            GroupWeights {
                group: "g1".into(),
                weight: vec![0.1, 0.2, 0.3],
            },
            GroupWeights {
                group: "g2".into(),
                weight: vec![0.4],
            },
        ];
        let data = group_weight_chart(&groups, &range);
        assert!(data.show_legend);
        assert_eq!(data.series[0].color, Color32::from_rgb(255, 0, 0));
        assert_eq!(data.series[1].color, Color32::from_rgb(0, 128, 0));
        assert_eq!(data.series[0].points[2], [12.0, 0.3]);
        assert_eq!(data.series[1].points, vec![[10.0, 0.4]]);
    }

    #[test]
    fn colors_past_the_base_palette_are_distinct() {
        let extra: Vec<Color32> = (7..20).map(series_color).collect();
        for (i, color) in extra.iter().enumerate() {
            assert!(!BASE_PALETTE.contains(color));
            assert!(extra[i + 1..].iter().all(|other| other != color));
        }
    }
}
