//! Draws a scene frame on an egui_plot surface.

use egui::{Align2, Color32, RichText};
use egui_plot::{Line, Plot, PlotBounds, PlotPoint, PlotPoints, Points, Text};
use pvt_scene::{Axes, CurveGroup, Frame, Placement};

const AXIS_COLOR: Color32 = Color32::from_gray(200);
const DOME_COLOR: Color32 = Color32::from_rgb(88, 196, 221);
const REAL_COLOR: Color32 = Color32::from_rgb(252, 98, 85);
const IDEAL_COLOR: Color32 = Color32::from_rgb(131, 193, 103);
const DOT_COLOR: Color32 = Color32::from_rgb(255, 134, 47);

fn curve_color(group: CurveGroup) -> Color32 {
    match group {
        CurveGroup::Dome => DOME_COLOR,
        CurveGroup::RealIsotherm => REAL_COLOR,
        CurveGroup::IdealIsotherm => IDEAL_COLOR,
    }
}

fn text_color(slot: pvt_scene::TextSlot) -> Color32 {
    use pvt_scene::TextSlot;
    match slot {
        TextSlot::RealLaw => REAL_COLOR,
        TextSlot::IdealLaw => IDEAL_COLOR,
        _ => Color32::WHITE,
    }
}

/// Data coordinates of a text placement under the current camera.
fn place(frame: &Frame, axes: &Axes, placement: Placement) -> (PlotPoint, Align2) {
    let x_unit = (axes.x_range[1] - axes.x_range[0]) / axes.width;
    let y_unit = (axes.y_range[1] - axes.y_range[0]) / axes.height;
    match placement {
        Placement::XAxis { dx, dy } => (
            PlotPoint::new(
                axes.x_range[1] + dx * x_unit,
                axes.y_range[0] + (dy - 0.5) * y_unit,
            ),
            Align2::CENTER_TOP,
        ),
        Placement::YAxis => (
            PlotPoint::new(axes.x_range[0] - 0.5 * x_unit, axes.y_range[1]),
            Align2::RIGHT_CENTER,
        ),
        Placement::View { x, y } => {
            let scale = frame.camera.scale;
            (
                PlotPoint::new(
                    frame.camera.center[0] + x * x_unit * scale,
                    frame.camera.center[1] + y * y_unit * scale,
                ),
                Align2::LEFT_CENTER,
            )
        }
    }
}

pub fn show(ui: &mut egui::Ui, frame: &Frame, axes: &Axes) {
    let (x_bounds, y_bounds) = frame.camera.bounds(axes.x_range, axes.y_range);
    let [x0, x1] = axes.x_range;
    let [y0, y1] = axes.y_range;
    let progress = frame.axes_progress;

    Plot::new("pv_scene")
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [x_bounds[0], y_bounds[0]],
                [x_bounds[1], y_bounds[1]],
            ));

            if progress > 0.0 {
                let x_axis = vec![[x0, y0], [x0 + (x1 - x0) * progress, y0]];
                let y_axis = vec![[x0, y0], [x0, y0 + (y1 - y0) * progress]];
                for axis in [x_axis, y_axis] {
                    plot_ui.line(Line::new(PlotPoints::from(axis)).color(AXIS_COLOR).width(1.5));
                }
            }

            for curve in &frame.curves {
                plot_ui.line(
                    Line::new(PlotPoints::from(curve.points.clone()))
                        .color(curve_color(curve.group))
                        .width(2.5)
                        .name(&curve.label),
                );
            }

            if let Some(dot) = frame.dot {
                plot_ui.points(
                    Points::new(PlotPoints::from(vec![dot.position]))
                        .radius((7.0 * dot.visibility) as f32)
                        .color(DOT_COLOR),
                );
            }

            for label in frame.labels.iter().filter(|l| !l.text.is_empty()) {
                let (position, anchor) = place(frame, axes, label.placement);
                plot_ui.text(
                    Text::new(
                        position,
                        RichText::new(&label.text)
                            .size(18.0)
                            .color(text_color(label.slot)),
                    )
                    .anchor(anchor),
                );
            }
        });
}
