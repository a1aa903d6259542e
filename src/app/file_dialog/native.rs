use anyhow::Context as _;
use geotrace_export::ExportFormat;
use geotrace_geo::LatLng;

/// Asks where to save and writes the export there.
///
/// Returns `false` if the user cancelled the dialog.
pub(crate) fn save(format: ExportFormat, points: &[LatLng]) -> anyhow::Result<bool> {
    let Some(path) = rfd::FileDialog::new()
        .set_title(format!("Export {format}"))
        .set_file_name(format.file_name())
        .add_filter(format.to_string(), &[format.extension()])
        .save_file()
    else {
        return Ok(false);
    };
    format
        .write_file(points, &path)
        .with_context(|| format!("Failed saving {}", path.display()))?;
    Ok(true)
}
