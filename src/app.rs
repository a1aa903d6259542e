use std::time::Duration;

use egui::{Align2, RichText, Ui};
use egui_notify::Toasts;
use egui_phosphor::regular;
use geotrace_elevation::{ElevationFetcher, ElevationMessage};
use geotrace_export::ExportFormat;
use geotrace_geo::{UnitLocale, format_distance};
use geotrace_map_ui::{MapEvent, MapPanel};
use geotrace_path::{Edit, ElevationUpdate, FetchTicket, PathEditor};
use geotrace_profile_ui::ElevationChart;
use strum::IntoEnumIterator as _;

use crate::config::{ApiTarget, Settings};

mod file_dialog;

/// Poll interval for elevation results while lookups are in flight
const ELEVATION_POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Lookups without any result for this long are no longer polled for, their results
/// are still picked up on the next repaint
const ELEVATION_POLL_WINDOW_SECS: f64 = 60.0;
const TOAST_DURATION: Duration = Duration::from_secs(3);

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
///
/// The path itself is not persisted, every session starts with an empty path.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct App {
    settings: Settings,
    map: MapPanel,

    #[serde(skip)]
    editor: PathEditor,
    #[serde(skip)]
    fetcher: Option<ElevationFetcher<FetchTicket>>,
    #[serde(skip)]
    chart: ElevationChart,
    #[serde(skip)]
    toasts: Toasts,
    #[serde(skip)]
    settings_open: bool,
    /// Endpoint the fetcher was last built for
    #[serde(skip)]
    connected: Option<ApiTarget>,
    /// `egui` input time of the last dispatched request or received result
    #[serde(skip)]
    last_elevation_activity: f64,
}

impl Default for App {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            editor: PathEditor::new(settings.locale),
            settings,
            map: MapPanel::default(),
            fetcher: None,
            chart: ElevationChart::default(),
            toasts: Toasts::default(),
            settings_open: false,
            connected: None,
            last_elevation_activity: 0.0,
        }
    }
}

impl App {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // Load previous app state (if any).
        let mut app: Self = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        app.settings.apply_env_overrides();
        app.editor.set_locale(app.settings.locale);
        app.connect_elevation_api();
        app
    }

    /// (Re)create the elevation provider from the current settings
    fn connect_elevation_api(&mut self) {
        self.connected = Some(self.settings.api_target());
        match self.settings.elevation_api() {
            Ok(api) => {
                log::info!("Elevation API: {}", api.api_url());
                match &mut self.fetcher {
                    Some(fetcher) => fetcher.set_provider(api),
                    None => self.fetcher = Some(ElevationFetcher::new(api)),
                }
            }
            Err(e) => log::error!("Failed setting up elevation lookups: {e}"),
        }
    }

    fn apply_edit(&mut self, edit: Edit) {
        if let Err(e) = self.editor.apply(edit) {
            log::error!("Rejected edit {edit}: {e}");
            debug_assert!(false, "Rejected edit {edit}: {e}");
        }
    }

    fn clear(&mut self) {
        self.apply_edit(Edit::Clear);
        self.map.close_popup();
        log::info!("Path cleared");
    }

    /// Send the lookups requested by the latest edits
    fn dispatch_elevation_requests(&mut self, now: f64) {
        let requests = self.editor.take_elevation_requests();
        if !requests.is_empty() {
            self.last_elevation_activity = now;
        }
        let Some(fetcher) = &mut self.fetcher else {
            if !requests.is_empty() {
                log::warn!(
                    "No elevation API configured, skipping {} lookups",
                    requests.len()
                );
            }
            return;
        };
        for request in requests {
            fetcher.request(request.ticket, request.position);
        }
    }

    fn receive_elevations(&mut self, ctx: &egui::Context) {
        let Some(fetcher) = &mut self.fetcher else {
            return;
        };
        let now = ctx.input(|i| i.time);
        let messages = fetcher.poll();
        if !messages.is_empty() {
            self.last_elevation_activity = now;
        }
        for ElevationMessage {
            ticket,
            point,
            outcome,
        } in messages
        {
            match outcome {
                Ok(elevation) => {
                    if let ElevationUpdate::Applied { .. } =
                        self.editor.resolve_elevation(ticket, elevation)
                    {
                        self.map.open_popup(ticket.marker);
                    }
                }
                Err(e) => log::error!("Elevation lookup for {point} failed: {e}"),
            }
        }
        if keep_polling(fetcher.is_idle(), now - self.last_elevation_activity) {
            ctx.request_repaint_after(ELEVATION_POLL_INTERVAL);
        }
    }

    fn export(&mut self, format: ExportFormat) {
        let points = self.editor.points();
        #[cfg(not(target_arch = "wasm32"))]
        let result = file_dialog::native::save(format, points);
        #[cfg(target_arch = "wasm32")]
        let result = file_dialog::web::download(format, points);

        match result {
            Ok(true) => {
                self.toasts
                    .success(format!("Exported {}", format.file_name()))
                    .duration(Some(TOAST_DURATION));
            }
            Ok(false) => log::debug!("{format} export cancelled"),
            Err(e) => log::error!("{format} export failed: {e:#}"),
        }
    }
}

impl eframe::App for App {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.receive_elevations(ctx);

        show_top_panel(self, ctx);
        if self.settings.show_side_menu {
            egui::SidePanel::left("side_menu")
                .resizable(false)
                .default_width(180.0)
                .show(ctx, |ui| show_side_menu(self, ui));
        }
        if self.settings.show_elevation_panel {
            egui::TopBottomPanel::bottom("elevation_panel")
                .resizable(true)
                .default_height(220.0)
                .show(ctx, |ui| {
                    self.chart
                        .show(ui, self.editor.series(), self.settings.locale);
                });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                for event in self.map.show(ui, &self.editor) {
                    let edit = match event {
                        MapEvent::Clicked(point) => Edit::Append(point),
                        MapEvent::MarkerMoved { index, to } => Edit::Move { index, to },
                    };
                    self.apply_edit(edit);
                }
            });

        if self.settings.show_distance_panel {
            show_distance_window(&self.editor, self.settings.locale, ctx);
        }
        show_settings_window(self, ctx);

        self.dispatch_elevation_requests(ctx.input(|i| i.time));
        self.toasts.show(ctx);
    }
}

fn show_top_panel(app: &mut App, ctx: &egui::Context) {
    egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            if ui
                .selectable_label(app.settings.show_side_menu, regular::LIST)
                .on_hover_text("Toggle side menu")
                .clicked()
            {
                app.settings.show_side_menu = !app.settings.show_side_menu;
            }
            ui.label(RichText::new(format!("{} {}", regular::MAP_TRIFOLD, crate::APP_NAME)).strong());
            ui.separator();
            ui.label(format!(
                "{} points | {}: {}",
                app.editor.len(),
                app.settings.locale.total_distance_caption(),
                format_distance(app.editor.total_distance_m(), app.settings.locale)
            ));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                egui::widgets::global_theme_preference_switch(ui);
                egui::warn_if_debug_build(ui);
            });
        });
    });
}

fn show_side_menu(app: &mut App, ui: &mut Ui) {
    ui.add_space(4.0);
    ui.heading("Path");
    ui.vertical_centered_justified(|ui| {
        if ui
            .add_enabled(
                !app.editor.is_empty(),
                egui::Button::new(format!("{} Undo", regular::ARROW_COUNTER_CLOCKWISE)),
            )
            .on_hover_text("Remove the last point")
            .clicked()
        {
            app.apply_edit(Edit::Undo);
        }
        if ui
            .add_enabled(
                !app.editor.is_empty(),
                egui::Button::new(format!("{} Clear", regular::TRASH)),
            )
            .on_hover_text("Remove all points")
            .clicked()
        {
            app.clear();
        }
        if ui
            .add_enabled(
                !app.editor.is_empty(),
                egui::Button::new(format!("{} Fit to path", regular::CORNERS_OUT)),
            )
            .clicked()
        {
            app.map.fit_to_points(app.editor.points());
        }
    });

    ui.separator();
    ui.heading("Panels");
    ui.toggle_value(
        &mut app.settings.show_distance_panel,
        format!("{} Distance info", regular::RULER),
    );
    ui.toggle_value(
        &mut app.settings.show_elevation_panel,
        format!("{} Elevation profile", regular::MOUNTAINS),
    );

    ui.separator();
    ui.heading("Export");
    ui.vertical_centered_justified(|ui| {
        for format in ExportFormat::iter() {
            if ui
                .button(format!("{} {format}", regular::DOWNLOAD_SIMPLE))
                .on_hover_text(format.file_name())
                .clicked()
            {
                app.export(format);
            }
        }
    });

    ui.separator();
    ui.toggle_value(&mut app.settings_open, format!("{} Settings", regular::GEAR));
}

fn show_distance_window(editor: &PathEditor, locale: UnitLocale, ctx: &egui::Context) {
    egui::Window::new("Distance")
        .anchor(Align2::RIGHT_TOP, [-10.0, 10.0])
        .resizable(false)
        .collapsible(true)
        .show(ctx, |ui| {
            ui.label(
                RichText::new(format!(
                    "{}: {:.2} {}",
                    locale.total_distance_caption(),
                    editor.total_distance_m(),
                    locale.meter_long()
                ))
                .strong(),
            );
            let labels = editor.overlay().labels();
            if labels.is_empty() {
                return;
            }
            ui.collapsing(format!("{} segments", labels.len()), |ui| {
                egui::Grid::new("segment_grid").striped(true).show(ui, |ui| {
                    for (i, label) in labels.iter().enumerate() {
                        ui.label(format!("{} → {}", i + 1, i + 2));
                        ui.label(&label.text);
                        ui.end_row();
                    }
                });
            });
        });
}

fn show_settings_window(app: &mut App, ctx: &egui::Context) {
    let mut open = app.settings_open;
    egui::Window::new(format!("{} Settings", regular::GEAR))
        .open(&mut open)
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("settings_grid").num_columns(2).show(ui, |ui| {
                ui.label("Elevation API");
                ui.text_edit_singleline(&mut app.settings.elevation_api_url);
                ui.end_row();

                ui.label("Request timeout");
                ui.horizontal(|ui| {
                    let mut has_timeout = app.settings.request_timeout_secs.is_some();
                    if ui.checkbox(&mut has_timeout, "").changed() {
                        app.settings.request_timeout_secs = has_timeout.then_some(30);
                    }
                    if let Some(secs) = &mut app.settings.request_timeout_secs {
                        ui.add(egui::DragValue::new(secs).range(1..=600).suffix(" s"));
                    } else {
                        ui.label(RichText::new("none").weak());
                    }
                });
                ui.end_row();

                ui.label("Units");
                let mut locale = app.settings.locale;
                egui::ComboBox::from_id_salt("unit_locale")
                    .selected_text(locale.to_string())
                    .show_ui(ui, |ui| {
                        for l in UnitLocale::iter() {
                            ui.selectable_value(&mut locale, l, l.to_string());
                        }
                    });
                if locale != app.settings.locale {
                    app.settings.locale = locale;
                    app.editor.set_locale(locale);
                }
                ui.end_row();
            });
        });
    app.settings_open = open;

    // Apply endpoint edits once the user is done typing or dragging
    let editing = ctx.memory(|m| m.focused().is_some()) || ctx.dragged_id().is_some();
    if needs_reconnect(app.connected.as_ref(), &app.settings.api_target(), editing) {
        app.connect_elevation_api();
    }
}

fn needs_reconnect(connected: Option<&ApiTarget>, wanted: &ApiTarget, editing: bool) -> bool {
    !editing && connected != Some(wanted)
}

/// Keep polling for results while lookups are pending, but give up on lookups that
/// went quiet for longer than [`ELEVATION_POLL_WINDOW_SECS`]
fn keep_polling(idle: bool, secs_since_activity: f64) -> bool {
    !idle && secs_since_activity < ELEVATION_POLL_WINDOW_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(url: &str, timeout_secs: Option<u64>) -> ApiTarget {
        ApiTarget {
            url: url.to_owned(),
            timeout_secs,
        }
    }

    #[test]
    fn test_typed_timeout_is_applied_after_editing() {
        let connected = target("http://localhost/lookup", None);
        let typed = target("http://localhost/lookup", Some(45));

        assert!(!needs_reconnect(Some(&connected), &typed, true));
        assert!(needs_reconnect(Some(&connected), &typed, false));
        assert!(!needs_reconnect(Some(&typed), &typed, false));
    }

    #[test]
    fn test_reconnect_when_never_connected() {
        assert!(needs_reconnect(None, &target("http://localhost/lookup", None), false));
    }

    #[test]
    fn test_polling_stops_for_hung_lookups() {
        assert!(keep_polling(false, 0.5));
        assert!(!keep_polling(false, ELEVATION_POLL_WINDOW_SECS + 1.0));
        assert!(!keep_polling(true, 0.5));
    }
}
