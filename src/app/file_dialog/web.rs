use anyhow::{Context as _, anyhow};
use eframe::wasm_bindgen::{JsCast as _, JsValue, closure::Closure};
use geotrace_export::ExportFormat;
use geotrace_geo::LatLng;

/// Time the browser gets to start the download before the object URL is released
const REVOKE_DELAY_MS: i32 = 10_000;

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow!("{e:?}")
}

/// Triggers a browser download of the export, there is no way to tell if the user cancelled it
pub(crate) fn download(format: ExportFormat, points: &[LatLng]) -> anyhow::Result<bool> {
    let contents = format.serialize(points)?;

    let window = web_sys::window().context("No window")?;
    let document = window.document().context("No document")?;

    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(&contents));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(format.mime_type());
    let blob =
        web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let anchor = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| anyhow!("Created element is not an anchor"))?;
    anchor.set_href(&url);
    anchor.set_download(format.file_name());
    anchor.click();

    // Revoking right after the click can abort the download in some browsers
    let revoke = Closure::once_into_js(move || {
        if let Err(e) = web_sys::Url::revoke_object_url(&url) {
            log::warn!("Failed to revoke download URL: {e:?}");
        }
    });
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            revoke.unchecked_ref(),
            REVOKE_DELAY_MS,
        )
        .map_err(js_err)?;
    log::info!("Downloaded {} ({} points)", format.file_name(), points.len());
    Ok(true)
}
