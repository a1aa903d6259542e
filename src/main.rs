#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

// Native desktop build
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    // Logs go to stderr, filtered by `RUST_LOG`
    env_logger::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    eframe::run_native(
        &format!("{} v{}", geotrace::APP_NAME, env!("CARGO_PKG_VERSION")),
        native_options,
        Box::new(|cc| Ok(Box::new(geotrace::App::new(cc)))),
    )
}

/// Id of the canvas element in `index.html` the app renders into
#[cfg(target_arch = "wasm32")]
const CANVAS_ID: &str = "geotrace_canvas";

#[cfg(target_arch = "wasm32")]
fn find_canvas(document: &web_sys::Document) -> Result<web_sys::HtmlCanvasElement, String> {
    use eframe::wasm_bindgen::JsCast as _;
    document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| format!("no element with id '{CANVAS_ID}'"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| format!("'{CANVAS_ID}' is not a canvas element"))
}

// Web build via trunk
#[cfg(target_arch = "wasm32")]
fn main() {
    // Route `log` output to the browser console
    _ = eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    wasm_bindgen_futures::spawn_local(async {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("{} needs a browser window with a document", geotrace::APP_NAME);
            return;
        };
        let canvas = match find_canvas(&document) {
            Ok(canvas) => canvas,
            Err(e) => {
                log::error!("Cannot start {}: {e}", geotrace::APP_NAME);
                return;
            }
        };

        let started = eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|cc| Ok(Box::new(geotrace::App::new(cc)))),
            )
            .await;

        let status = document.get_element_by_id("loading_status");
        match started {
            Ok(()) => {
                if let Some(status) = status {
                    status.remove();
                }
            }
            Err(e) => {
                log::error!("Failed to start eframe: {e:?}");
                if let Some(status) = status {
                    status.set_inner_html("<p>GeoTrace failed to start, see the browser console.</p>");
                }
            }
        }
    });
}
