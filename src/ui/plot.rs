use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Align2, Color32, FontId, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{GridMark, Legend, Plot, Points};

use crate::chart::{PieChart, ScatterChart};

const PIE_SIZE: f32 = 320.0;
const SCATTER_HEIGHT: f32 = 380.0;
/// Maximum angle covered by one triangle of a pie slice.
const PIE_SEGMENT: f32 = 0.05;

fn chart_title(ui: &mut Ui, text: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(text);
    });
}

fn on_circle(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + Vec2::angled(angle) * radius
}

// ---------------------------------------------------------------------------
// Success pie chart
// ---------------------------------------------------------------------------

/// Draw the pie with the egui painter; egui_plot has no pie primitive.
pub fn success_pie_chart(ui: &mut Ui, chart: &PieChart) {
    chart_title(ui, &chart.title.text);

    let total = chart.total();
    if total == 0 {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new("No launches for this selection.").weak());
        });
        return;
    }

    let side = PIE_SIZE.min(ui.available_width() * 0.6);
    ui.horizontal(|ui: &mut Ui| {
        let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::hover());
        let center = response.rect.center();
        let radius = side * 0.45;

        // Start at twelve o'clock and go clockwise.
        let mut start = -FRAC_PI_2;
        for slice in &chart.slices {
            if slice.value == 0 {
                continue;
            }
            let fraction = slice.value as f32 / total as f32;
            let sweep = fraction * TAU;
            let fill = Color32::from(slice.color);

            let steps = (sweep / PIE_SEGMENT).ceil().max(1.0) as usize;
            for i in 0..steps {
                let a0 = start + sweep * i as f32 / steps as f32;
                let a1 = start + sweep * (i + 1) as f32 / steps as f32;
                painter.add(Shape::convex_polygon(
                    vec![center, on_circle(center, radius, a0), on_circle(center, radius, a1)],
                    fill,
                    Stroke::NONE,
                ));
            }

            // percent+label, inside the slice
            let mid = start + sweep / 2.0;
            painter.text(
                on_circle(center, radius * 0.62, mid),
                Align2::CENTER_CENTER,
                format!("{}\n{:.1}%", slice.label, fraction * 100.0),
                FontId::proportional(12.0),
                Color32::WHITE,
            );

            start += sweep;
        }

        ui.vertical(|ui: &mut Ui| {
            for slice in &chart.slices {
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
                    ui.painter().rect_filled(swatch, 2.0, Color32::from(slice.color));
                    ui.label(format!("{}  ({})", slice.label, slice.value));
                });
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Payload vs outcome scatter
// ---------------------------------------------------------------------------

/// Scatter of payload (x) against outcome class (y), one series per booster category.
pub fn payload_scatter_chart(ui: &mut Ui, chart: &ScatterChart) {
    chart_title(ui, &chart.title.text);

    let ticks = chart.y_axis.ticks.clone().unwrap_or_default();
    let tick_labels = ticks.clone();
    let marker = &chart.marker;

    ui.label(RichText::new(&chart.legend_title).strong());

    let mut plot = Plot::new("success_payload_scatter")
        .height(SCATTER_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(chart.x_axis.title.clone())
        .y_axis_label(chart.y_axis.title.clone())
        .include_x(0.0)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .label_formatter(|name, value| {
            if name.is_empty() {
                String::new()
            } else {
                format!("{name}\n{:.0} kg", value.x)
            }
        });

    if !ticks.is_empty() {
        plot = plot
            .y_grid_spacer(move |_input| {
                ticks
                    .iter()
                    .map(|t| GridMark {
                        value: t.value,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .y_axis_formatter(move |mark, _range| {
                tick_labels
                    .iter()
                    .find(|t| t.value == mark.value)
                    .map(|t| t.label.clone())
                    .unwrap_or_default()
            });
    }

    plot.show(ui, |plot_ui| {
        let radius = marker.size / 2.0;
        for series in &chart.series {
            plot_ui.points(
                Points::new(series.points.clone())
                    .radius(radius)
                    .color(series.color.with_opacity(marker.opacity))
                    .filled(true)
                    .name(&series.name),
            );
            // Unnamed, so it stays out of the legend.
            plot_ui.points(
                Points::new(series.points.clone())
                    .radius(radius)
                    .color(Color32::from(marker.line_color))
                    .filled(false),
            );
        }
    });

    if chart.series.is_empty() {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new("No launches in the selected payload range.").weak());
        });
    }
}
