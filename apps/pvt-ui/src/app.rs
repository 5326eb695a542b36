use crate::playback::Playback;
use crate::scene_view;
use pvt_core::constants::ZERO_CELSIUS_K;
use pvt_fluids::canned::pseudo_water;
use pvt_fluids::{CoolPropOracle, PropertyOracle, Species};
use pvt_scene::{SceneConfig, Timeline, build_timeline};
use tracing::{error, info};

pub struct PvtApp {
    config: SceneConfig,
    offline: bool,
    isotherm_c: f64,
    timeline: Option<Timeline>,
    last_error: Option<String>,
    playback: Playback,
}

impl PvtApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: SceneConfig,
        offline: bool,
        load_error: Option<String>,
    ) -> Self {
        let isotherm_c = config.isotherm_temperature_k - ZERO_CELSIUS_K;
        let mut app = Self {
            config,
            offline,
            isotherm_c,
            timeline: None,
            last_error: None,
            playback: Playback::default(),
        };
        app.rebuild();
        if let Some(err) = load_error {
            app.last_error = Some(match app.last_error.take() {
                Some(build) => format!("{err}\n{build}"),
                None => err,
            });
        }
        app
    }

    fn rebuild(&mut self) {
        self.config.isotherm_temperature_k = self.isotherm_c + ZERO_CELSIUS_K;
        let oracle: Box<dyn PropertyOracle> = if self.offline {
            Box::new(pseudo_water::oracle())
        } else {
            Box::new(CoolPropOracle::new())
        };

        match build_timeline(oracle.as_ref(), &self.config) {
            Ok(timeline) => {
                info!(
                    fluid = %self.config.fluid,
                    duration = timeline.duration(),
                    "scene rebuilt"
                );
                self.timeline = Some(timeline);
                self.last_error = None;
                self.playback.restart();
            }
            Err(e) => {
                error!(error = %e, "scene build failed");
                self.last_error = Some(e.to_string());
            }
        }
    }
}

impl eframe::App for PvtApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let duration = self.timeline.as_ref().map(Timeline::duration).unwrap_or(0.0);

        if self.playback.is_playing && duration > 0.0 {
            let dt = ctx.input(|i| i.unstable_dt).min(0.1) as f64;
            self.playback.advance(dt, duration);
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("playback").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.playback.is_playing { "Pause" } else { "Play" })
                    .clicked()
                {
                    self.playback.toggle(duration);
                }
                if ui.button("Restart").clicked() {
                    self.playback.restart();
                }
                ui.add(
                    egui::DragValue::new(&mut self.playback.speed)
                        .speed(0.1)
                        .range(0.1..=10.0)
                        .prefix("x"),
                );
                ui.add(
                    egui::Slider::new(&mut self.playback.time_s, 0.0..=duration).text("t (s)"),
                );
                if let Some(timeline) = &self.timeline {
                    let step = timeline.step_index_at(self.playback.time_s);
                    ui.label(format!("Step {}: {}", step + 1, timeline.script().steps[step].label));
                }
            });
        });

        let mut rebuild = false;
        egui::SidePanel::left("scene_settings")
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Scene");
                let mut fluid = self.config.fluid;
                egui::ComboBox::from_label("Fluid")
                    .selected_text(fluid.display_name())
                    .show_ui(ui, |ui| {
                        for species in Species::ALL {
                            ui.selectable_value(&mut fluid, species, species.display_name());
                        }
                    });
                if fluid != self.config.fluid {
                    self.config.set_fluid(fluid);
                    self.isotherm_c = self.config.isotherm_temperature_k - ZERO_CELSIUS_K;
                    rebuild = true;
                }
                ui.add(
                    egui::DragValue::new(&mut self.isotherm_c)
                        .speed(1.0)
                        .range(-270.0..=2000.0)
                        .prefix("T = ")
                        .suffix(" °C"),
                );
                ui.checkbox(&mut self.offline, "Offline (analytic water)");
                if ui.button("Rebuild").clicked() {
                    rebuild = true;
                }

                if let Some(err) = &self.last_error {
                    ui.separator();
                    ui.colored_label(egui::Color32::RED, err);
                }

                if let Some(timeline) = &self.timeline {
                    let reference = &timeline.data().reference;
                    ui.separator();
                    ui.label(format!("pmin = {:.4e} Pa", reference.p_min_pa()));
                    ui.label(format!("pcrit = {:.4e} Pa", reference.p_max_pa()));
                    ui.label(format!("vmin = {:.4e} m³/kg", reference.v_min()));
                    ui.label(format!("vcrit = {:.4e} m³/kg", reference.v_crit()));
                    ui.label(format!("vmax = {:.4e} m³/kg", reference.v_max()));
                }
            });
        if rebuild {
            self.rebuild();
        }

        egui::CentralPanel::default().show(ctx, |ui| match &self.timeline {
            Some(timeline) => {
                let frame = timeline.frame_at(self.playback.time_s);
                scene_view::show(ui, &frame, &timeline.data().axes);
            }
            None => {
                ui.label("No scene loaded");
            }
        });
    }
}
