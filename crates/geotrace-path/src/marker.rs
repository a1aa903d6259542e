use std::fmt;

use geotrace_geo::{LatLng, UnitLocale};

use crate::PathError;

/// Stable identity of a marker, never reused within a [`MarkerLayer`], not even after a clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(u64);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifies one elevation request: the marker it is for and the marker's
/// request generation at the time it was issued.
///
/// A result is only accepted if the marker still exists and its generation matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    pub marker: MarkerId,
    pub generation: u32,
}

impl fmt::Display for FetchTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.marker, self.generation)
    }
}

/// Draggable handle for one point of the path
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    id: MarkerId,
    position: LatLng,
    /// Meters, `None` until the lookup for this marker resolves
    elevation: Option<f64>,
    generation: u32,
}

impl Marker {
    pub fn id(&self) -> MarkerId {
        self.id
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn elevation(&self) -> Option<f64> {
        self.elevation
    }

    /// Ticket of the most recent elevation request for this marker
    pub fn ticket(&self) -> FetchTicket {
        FetchTicket {
            marker: self.id,
            generation: self.generation,
        }
    }

    /// Popup text shown on the map, derived from the marker state. Display only.
    pub fn annotation(&self, locale: UnitLocale) -> String {
        let elevation = match self.elevation {
            Some(e) => format!("{e} {}", locale.meter_long()),
            None => "…".to_owned(),
        };
        format!(
            "{lat_caption}: {lat:.6}\n{lng_caption}: {lng:.6}\n{elevation_caption}: {elevation}",
            lat_caption = locale.latitude_caption(),
            lat = self.position.lat,
            lng_caption = locale.longitude_caption(),
            lng = self.position.lng,
            elevation_caption = locale.elevation_caption(),
        )
    }
}

/// Outcome of offering an elevation result to the [`MarkerLayer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevationUpdate {
    /// Stored on the marker at `index`
    Applied { index: usize },
    /// The marker was moved again after this request was issued
    Stale,
    /// The marker has been removed (undo/clear)
    Detached,
}

/// One marker per point, aligned by index with the [`PointStore`](crate::PointStore)
#[derive(Debug, Default)]
pub struct MarkerLayer {
    markers: Vec<Marker>,
    next_id: u64,
}

impl MarkerLayer {
    pub(crate) fn push(&mut self, position: LatLng) -> FetchTicket {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        let marker = Marker {
            id,
            position,
            elevation: None,
            generation: 0,
        };
        let ticket = marker.ticket();
        self.markers.push(marker);
        ticket
    }

    /// Move the marker at `index` and start a new request generation for it.
    ///
    /// The elevation of the old position is dropped, the marker has none until the new request resolves.
    pub(crate) fn reposition(
        &mut self,
        index: usize,
        position: LatLng,
    ) -> Result<FetchTicket, PathError> {
        let len = self.markers.len();
        let marker = self
            .markers
            .get_mut(index)
            .ok_or(PathError::OutOfRange { index, len })?;
        marker.position = position;
        marker.elevation = None;
        marker.generation = marker.generation.wrapping_add(1);
        Ok(marker.ticket())
    }

    pub(crate) fn pop(&mut self) -> Option<Marker> {
        self.markers.pop()
    }

    pub(crate) fn clear(&mut self) {
        self.markers.clear();
    }

    pub(crate) fn set_elevation(&mut self, ticket: FetchTicket, elevation: f64) -> ElevationUpdate {
        let Some(index) = self.index_of(ticket.marker) else {
            return ElevationUpdate::Detached;
        };
        let marker = &mut self.markers[index];
        if marker.generation != ticket.generation {
            return ElevationUpdate::Stale;
        }
        marker.elevation = Some(elevation);
        ElevationUpdate::Applied { index }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn get(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index)
    }

    pub fn index_of(&self, id: MarkerId) -> Option<usize> {
        self.markers.iter().position(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
