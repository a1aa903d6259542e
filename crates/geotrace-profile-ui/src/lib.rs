//! Elevation profile chart: elevation over cumulative distance along the path.

use egui::{Color32, RichText, Ui};
use egui_plot::{Line, Plot, PlotPoint, PlotPoints, Points};
use geotrace_geo::UnitLocale;
use geotrace_path::{ElevationSeries, ProfileStats};

const LINE_COLOR: Color32 = Color32::from_rgb(0x4B, 0xC0, 0xC0);

/// Plot data derived from one revision of an [`ElevationSeries`]
#[derive(Debug, Default, Clone, PartialEq)]
struct ChartData {
    /// Runs of consecutive resolved samples, a pending or failed lookup splits the line
    lines: Vec<Vec<PlotPoint>>,
    /// Every resolved sample
    points: Vec<PlotPoint>,
    stats: Option<ProfileStats>,
}

impl ChartData {
    fn from_series(series: &ElevationSeries) -> Self {
        let mut lines = Vec::new();
        let mut current: Vec<PlotPoint> = Vec::new();
        for sample in series.samples() {
            match sample.elevation_m {
                Some(e) => current.push(PlotPoint::new(sample.cumulative_distance_m, e)),
                None if !current.is_empty() => lines.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }

        Self {
            points: series
                .resolved()
                .map(|(d, e)| PlotPoint::new(d, e))
                .collect(),
            lines,
            stats: series.stats(),
        }
    }
}

/// Chart surface for the elevation series, data is replaced whenever the series revision changes
#[derive(Debug, Default)]
pub struct ElevationChart {
    revision: Option<u64>,
    data: ChartData,
}

impl ElevationChart {
    /// Rebuild the cached plot data if `series` changed since the last call
    pub fn update(&mut self, series: Option<&ElevationSeries>) {
        let revision = series.map(ElevationSeries::revision);
        if revision == self.revision {
            return;
        }
        log::trace!("Rebuilding elevation chart for revision {revision:?}");
        self.data = series.map(ChartData::from_series).unwrap_or_default();
        self.revision = revision;
    }

    pub fn revision(&self) -> Option<u64> {
        self.revision
    }

    pub fn show(&mut self, ui: &mut Ui, series: Option<&ElevationSeries>, locale: UnitLocale) {
        self.update(series);

        show_stats(ui, self.data.stats.as_ref(), locale);

        let elevation = locale.elevation_caption();
        Plot::new("elevation_profile")
            .x_axis_label(format!(
                "{} ({})",
                locale.distance_caption(),
                locale.meter_long()
            ))
            .y_axis_label(format!("{elevation} ({})", locale.meter_long()))
            .y_axis_min_width(50.0)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for line in &self.data.lines {
                    plot_ui.line(
                        Line::new(elevation, PlotPoints::Borrowed(line))
                            .color(LINE_COLOR)
                            .width(2.0),
                    );
                }
                plot_ui.points(
                    Points::new(elevation, PlotPoints::Borrowed(&self.data.points))
                        .color(LINE_COLOR)
                        .radius(3.0),
                );
            });
    }
}

fn show_stats(ui: &mut Ui, stats: Option<&ProfileStats>, locale: UnitLocale) {
    let m = locale.meter_long();
    ui.horizontal(|ui| match stats {
        Some(s) => {
            ui.label(format!("Min {:.0} {m}", s.min_elevation_m));
            ui.separator();
            ui.label(format!("Max {:.0} {m}", s.max_elevation_m));
            ui.separator();
            ui.label(format!("Ascent {:.0} {m}", s.total_ascent_m));
            ui.separator();
            ui.label(format!("Descent {:.0} {m}", s.total_descent_m));
        }
        None => {
            ui.label(RichText::new("No elevation data yet").weak());
        }
    });
}
