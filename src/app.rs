use crate::context::AppContext;
use crate::logic::FetchCommand;
use crate::model::{AppState, RefreshMode, host_rows};
use eframe::egui;
use eframe::egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, HLine, Plot};
use tr::tr;

/// Fetch RTT above this is drawn at full bar height and flagged slow.
const SLOW_FETCH_MS: f64 = 1000.0;

pub struct EguiHostview {
    pub(crate) ctx: AppContext,
    pub input_url: String,
    pub(crate) settings_open: bool,
}

/// Helper for application-specific colors adapted for light/dark themes.
struct FetchVisuals {
    pub is_dark: bool,
}

impl FetchVisuals {
    fn from_ctx(ctx: &egui::Context) -> Self {
        Self {
            is_dark: ctx.style().visuals.dark_mode,
        }
    }

    fn limit_line_color(&self) -> Color32 {
        if self.is_dark {
            Color32::from_gray(80)
        } else {
            Color32::from_gray(160)
        }
    }

    fn latency_color(&self, rtt: f64) -> Color32 {
        if rtt.is_nan() {
            if self.is_dark {
                Color32::RED
            } else {
                Color32::from_rgb(200, 0, 0)
            }
        } else if rtt > SLOW_FETCH_MS {
            if self.is_dark {
                Color32::from_rgb(160, 32, 240)
            } else {
                Color32::from_rgb(120, 0, 200)
            }
        } else if rtt > 300.0 {
            if self.is_dark {
                Color32::YELLOW
            } else {
                Color32::from_rgb(180, 140, 0)
            }
        } else {
            if self.is_dark {
                Color32::from_rgb(0, 255, 100)
            } else {
                Color32::from_rgb(0, 150, 0)
            }
        }
    }

    fn status_color(&self, alive: bool, latency: f64) -> Color32 {
        if !alive {
            self.latency_color(f64::NAN)
        } else {
            self.latency_color(latency)
        }
    }
}

impl EguiHostview {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let restored = match cc.storage {
            Some(storage) => match storage.get_string(eframe::APP_KEY) {
                Some(serialized) => serde_json::from_str(&serialized).unwrap_or_default(),
                None => AppState::default(),
            },
            None => AppState::default(),
        };
        Self::from_context(AppContext::bootstrap(restored))
    }

    pub fn from_context(ctx: AppContext) -> Self {
        let input_url = {
            let state = ctx.state.lock().expect("state lock poisoned");
            state.settings.base_url.clone()
        };
        Self {
            ctx,
            input_url,
            settings_open: false,
        }
    }

    fn request_hosts(&self) {
        // Dropped only when the channel backlog is full; the task drains fast
        if self.ctx.commands.try_send(FetchCommand::GetHosts).is_err() {
            tracing::warn!("fetch task is not accepting commands");
        }
    }

    pub fn ui_layout(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::ScrollArea::horizontal().show(ui, |ui| {
                    self.toolbar(ui);
                    ui.separator();
                    self.status_row(ctx, ui);
                    self.host_list(ui);
                    self.settings_window(ctx);
                })
            })
        });
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.input_url)
                    .hint_text(tr!("Server URL"))
                    .desired_width(8.0 * 30.0),
            );
            if response.changed() {
                let mut state = self.ctx.state.lock().expect("state lock poisoned");
                state.settings.base_url = self.input_url.trim().to_string();
            }

            if ui.button(tr!("Get hosts")).clicked() {
                self.request_hosts();
            }

            if ui.button("⚙").clicked() {
                self.settings_open = true;
            }

            // Theme switcher on the right
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut theme = ui.ctx().options(|o| o.theme_preference);
                let old_theme = theme;
                theme.radio_buttons(ui);
                if theme != old_theme {
                    ui.ctx().options_mut(|o| o.theme_preference = theme);
                }
            });
        });
    }

    fn status_row(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let (display, status) = {
            let state = self.ctx.state.lock().expect("state lock poisoned");
            (state.settings.display.clone(), state.status.clone())
        };
        if !display.show_status {
            return;
        }

        let visuals = FetchVisuals::from_ctx(ctx);

        ui.horizontal(|ui| {
            if display.show_chart {
                // Thin bars, one per fetch; failures drawn at full height in red
                let chart = BarChart::new(
                    tr!("Fetches"),
                    status
                        .history
                        .iter()
                        .enumerate()
                        .map(|(i, &rtt)| {
                            let height = if rtt.is_nan() { SLOW_FETCH_MS } else { rtt };
                            let fill = visuals.latency_color(rtt);

                            Bar::new(i as f64, height).width(1.0).fill(fill)
                        })
                        .collect(),
                );

                Plot::new("fetch_history")
                    .height(30.0)
                    .width(337.0)
                    .show_axes(false)
                    .show_grid(false)
                    .allow_zoom(false)
                    .allow_drag(false)
                    .allow_scroll(false)
                    .set_margin_fraction(egui::Vec2::new(0.0, 0.05))
                    .include_x(-0.5)
                    .include_x(98.5)
                    .include_y(0.0)
                    .include_y(SLOW_FETCH_MS)
                    .show(ui, |plot_ui| {
                        plot_ui.hline(
                            HLine::new("", SLOW_FETCH_MS)
                                .color(visuals.limit_line_color())
                                .width(1.0),
                        );
                        plot_ui.bar_chart(chart);
                    });
            }

            let color = visuals.status_color(status.alive, status.latency);

            let mut parts = Vec::new();
            if status.sent == 0 {
                parts.push(tr!("no fetches yet"));
            } else if status.alive {
                parts.push(format!("{:4.0}ms", status.latency));
            } else {
                parts.push(tr!("DOWN"));
            }
            parts.push(format!("{}: {:4.1}", tr!("M"), status.mean));
            parts.push(format!("{}: {}/{}", tr!("L"), status.lost, status.sent));
            if display.show_last_update {
                if let Some(at) = status.last_update {
                    parts.push(format!("{}: {}", tr!("upd"), at.format("%H:%M:%S")));
                }
            }

            ui.colored_label(color, RichText::new(parts.join(", ")).monospace().strong());
        });
        ui.separator();
    }

    fn host_list(&mut self, ui: &mut egui::Ui) {
        let (data, template) = {
            let state = self.ctx.state.lock().expect("state lock poisoned");
            (state.data.clone(), state.settings.row_template.clone())
        };

        // Nothing fetched yet, or the last state is all we have: either way
        // the rows area shows data or stays empty, never an error message
        let Some(data) = data else {
            return;
        };

        for row in host_rows(&data) {
            let text = self.ctx.interpolator.render(&template, &row);
            ui.label(RichText::new(text).monospace());
        }
    }

    fn settings_window(&mut self, ctx: &egui::Context) {
        if !self.settings_open {
            return;
        }

        let mut is_open = true;
        let mut settings = {
            let state = self.ctx.state.lock().expect("state lock poisoned");
            state.settings.clone()
        };

        egui::Window::new(tr!("Viewer Settings"))
            .open(&mut is_open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(format!("{}:", tr!("Row template")));
                    ui.text_edit_singleline(&mut settings.row_template);
                });

                ui.add_space(8.0);
                ui.label(tr!("Refresh:"));
                ui.radio_value(&mut settings.refresh, RefreshMode::Off, tr!("Manual only"));
                ui.radio_value(&mut settings.refresh, RefreshMode::Slow, tr!("Slow (1m)"));
                ui.radio_value(&mut settings.refresh, RefreshMode::Fast, tr!("Fast (5s)"));

                ui.add_space(8.0);
                ui.label(tr!("Show fields:"));
                ui.checkbox(&mut settings.display.show_status, tr!("Fetch status line"));
                ui.checkbox(&mut settings.display.show_chart, tr!("Fetch time chart"));
                ui.checkbox(&mut settings.display.show_last_update, tr!("Last update time"));
            });

        {
            let mut state = self.ctx.state.lock().expect("state lock poisoned");
            state.settings = settings;
        }

        if !is_open {
            self.settings_open = false;
        }
    }
}

impl eframe::App for EguiHostview {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let state = self.ctx.state.lock().expect("state lock poisoned");
        let serialized = serde_json::to_string_pretty(&*state).unwrap_or_default();
        storage.set_string(eframe::APP_KEY, serialized);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_layout(ctx);
        ctx.request_repaint_after(std::time::Duration::from_millis(1000));
    }
}
