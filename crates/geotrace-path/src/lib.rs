//! Path state: the ordered points clicked by the user, one marker per point, and the
//! artefacts derived from them (polyline, distance labels, elevation series).
//!
//! All mutation goes through [`PathEditor::apply`], which keeps points and markers in
//! lockstep and recomputes every derived artefact before returning.

pub mod editor;
pub mod error;
pub mod marker;
pub mod overlay;
pub mod profile;
pub mod store;

pub use editor::{Edit, ElevationRequest, PathEditor};
pub use error::PathError;
pub use marker::{ElevationUpdate, FetchTicket, Marker, MarkerId, MarkerLayer};
pub use overlay::{DistanceLabel, PathOverlay, PathRenderer, Segment};
pub use profile::{ElevationProfile, ElevationSeries, ProfileSample, ProfileStats};
pub use store::PointStore;
