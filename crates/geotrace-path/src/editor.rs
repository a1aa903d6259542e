use geotrace_geo::{LatLng, UnitLocale};

use crate::{
    ElevationProfile, ElevationSeries, ElevationUpdate, FetchTicket, MarkerLayer, PathError,
    PathOverlay, PathRenderer, PointStore,
};

/// A user-level change to the path
#[derive(Debug, Clone, Copy, PartialEq, strum_macros::Display)]
pub enum Edit {
    /// Map click, adds a point at the end of the path
    Append(LatLng),
    /// Marker drag-end, replaces the point at `index`
    Move { index: usize, to: LatLng },
    /// Remove the last point, no-op on an empty path
    Undo,
    /// Remove all points
    Clear,
}

/// An elevation lookup the caller should dispatch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevationRequest {
    pub ticket: FetchTicket,
    pub position: LatLng,
}

/// Points, markers and everything derived from them.
///
/// Every mutation goes through [`PathEditor::apply`] or [`PathEditor::resolve_elevation`],
/// both of which leave the overlay and the elevation series consistent with the points.
#[derive(Debug, Default)]
pub struct PathEditor {
    points: PointStore,
    markers: MarkerLayer,
    renderer: PathRenderer,
    overlay: PathOverlay,
    profile: ElevationProfile,
    pending_requests: Vec<ElevationRequest>,
}

impl PathEditor {
    pub fn new(locale: UnitLocale) -> Self {
        Self {
            renderer: PathRenderer::new(locale),
            ..Default::default()
        }
    }

    /// Apply an edit to points and markers together, then recompute derived state
    pub fn apply(&mut self, edit: Edit) -> Result<(), PathError> {
        log::debug!("Applying edit: {edit}");
        match edit {
            Edit::Append(point) => {
                self.points.append(point);
                let ticket = self.markers.push(point);
                self.request_elevation(ticket, point);
            }
            Edit::Move { index, to } => {
                self.points.replace(index, to)?;
                let ticket = self.markers.reposition(index, to)?;
                self.request_elevation(ticket, to);
            }
            Edit::Undo => {
                if self.points.remove_last().is_none() {
                    log::debug!("Nothing to undo");
                    return Ok(());
                }
                self.markers.pop();
            }
            Edit::Clear => {
                self.points.clear();
                self.markers.clear();
            }
        }
        self.commit();
        Ok(())
    }

    /// Store a resolved elevation on the marker the ticket refers to.
    ///
    /// Results for removed markers, or for a request superseded by a later drag, are ignored.
    pub fn resolve_elevation(&mut self, ticket: FetchTicket, elevation_m: f64) -> ElevationUpdate {
        let update = self.markers.set_elevation(ticket, elevation_m);
        match update {
            ElevationUpdate::Applied { index } => {
                log::debug!("Elevation {elevation_m} m for point {index} ({ticket})");
                self.profile
                    .refresh(self.points.points(), self.markers.markers());
            }
            ElevationUpdate::Stale => {
                log::debug!("Discarding superseded elevation result for {ticket}");
            }
            ElevationUpdate::Detached => {
                log::debug!("Discarding elevation result for removed marker {ticket}");
            }
        }
        update
    }

    /// Requests issued by edits since the last call
    pub fn take_elevation_requests(&mut self) -> Vec<ElevationRequest> {
        std::mem::take(&mut self.pending_requests)
    }

    pub fn locale(&self) -> UnitLocale {
        self.renderer.locale()
    }

    /// Change the unit locale and re-render the labels
    pub fn set_locale(&mut self, locale: UnitLocale) {
        if self.renderer.locale() != locale {
            self.renderer.set_locale(locale);
            self.overlay = self.renderer.render(self.points.points());
        }
    }

    pub fn points(&self) -> &[LatLng] {
        self.points.points()
    }

    pub fn markers(&self) -> &MarkerLayer {
        &self.markers
    }

    pub fn overlay(&self) -> &PathOverlay {
        &self.overlay
    }

    pub fn total_distance_m(&self) -> f64 {
        self.overlay.total_distance_m()
    }

    pub fn profile(&self) -> &ElevationProfile {
        &self.profile
    }

    pub fn series(&self) -> Option<&ElevationSeries> {
        self.profile.series()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn request_elevation(&mut self, ticket: FetchTicket, position: LatLng) {
        self.pending_requests
            .push(ElevationRequest { ticket, position });
    }

    /// Rebuild everything derived from the points
    fn commit(&mut self) {
        debug_assert_eq!(
            self.points.len(),
            self.markers.len(),
            "points and markers out of sync"
        );
        self.overlay = self.renderer.render(self.points.points());
        self.profile
            .refresh(self.points.points(), self.markers.markers());
    }
}
