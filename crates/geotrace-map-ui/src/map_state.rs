use geotrace_geo::{BoundingBox, LatLng};
use serde::{Deserialize, Serialize};
use walkers::{HttpTiles, MapMemory, Position};

pub(crate) fn to_position(p: LatLng) -> Position {
    Position::new(p.lng, p.lat)
}

pub(crate) fn to_lat_lng(p: Position) -> LatLng {
    LatLng::new(p.y(), p.x())
}

/// Persisted state of the map, meaning tiles cache, centering and zoom
#[derive(Default, Deserialize, Serialize)]
pub struct MapState {
    pub data: MapData,
    /// Cached map data (external), instantiated on first show, loaded on demand
    #[serde(skip)]
    pub tile_state: Option<MapTileState>,
}

impl MapState {
    pub fn init(&mut self, ctx: egui::Context) {
        debug_assert!(self.tile_state.is_none(), "double init");
        egui_extras::install_image_loaders(&ctx);
        let tiles = HttpTiles::new(walkers::sources::OpenStreetMap, ctx);
        let mut map_memory = MapMemory::default();
        map_memory.center_at(self.data.center_position);
        if let Err(e) = map_memory.set_zoom(self.data.zoom) {
            log::warn!("Invalid persisted zoom {}: {e}", self.data.zoom);
            self.data.zoom = MapData::default().zoom;
        }

        self.tile_state = Some(MapTileState { map_memory, tiles });
    }

    pub fn is_initialized(&self) -> bool {
        self.tile_state.is_some()
    }

    pub fn data(&self) -> &MapData {
        &self.data
    }

    /// Centre the map on the bounding box of `points` at a zoom that shows all of them
    pub fn zoom_to_fit(&mut self, points: &[LatLng]) {
        let Some(bounds) = BoundingBox::from_points(points) else {
            log::debug!("No points to fit");
            return;
        };

        let center = to_position(bounds.center());
        let zoom = bounds.zoom_level_to_fit();
        log::info!("Zoom to fit level: {zoom:.1}");

        self.data.center_position = center;
        self.data.zoom = zoom;

        if let Some(tile_state) = &mut self.tile_state {
            tile_state.map_memory.center_at(center);
            if let Err(e) = tile_state.map_memory.set_zoom(zoom) {
                log::error!("failed setting map zoom: {e}");
                debug_assert!(false, "failed setting map zoom {e}");
            }
        }
    }

    /// Copy the view the user panned/zoomed to into the persisted data
    pub(crate) fn sync_view(&mut self) {
        if let Some(tile_state) = &self.tile_state {
            if let Some(center) = tile_state.map_memory.detached() {
                self.data.center_position = center;
            }
            self.data.zoom = tile_state.map_memory.zoom();
        }
    }

    pub(crate) fn tile_state_as_mut(&mut self) -> Option<&mut MapTileState> {
        self.tile_state.as_mut()
    }
}

pub struct MapTileState {
    pub(crate) map_memory: MapMemory,
    pub tiles: HttpTiles,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct MapData {
    pub center_position: Position,
    pub zoom: f64,
}

impl MapData {
    pub fn center(&self) -> LatLng {
        to_lat_lng(self.center_position)
    }
}

impl Default for MapData {
    fn default() -> Self {
        Self {
            center_position: to_position(LatLng::new(16.812032, 100.463233)), // Phitsanulok
            zoom: 13.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotrace_test_util::phitsanulok_walk;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_position_conversion_swaps_axes() {
        let p = LatLng::new(16.812032, 100.463233);
        let pos = to_position(p);
        assert_eq!(pos.x(), 100.463233);
        assert_eq!(pos.y(), 16.812032);
        assert_eq!(to_lat_lng(pos), p);
    }

    #[test]
    fn test_default_view() {
        let data = MapData::default();
        assert_eq!(data.center(), LatLng::new(16.812032, 100.463233));
        assert_eq!(data.zoom, 13.0);
    }

    #[test]
    fn test_zoom_to_fit_before_tiles_are_loaded() {
        let mut state = MapState::default();
        let walk = phitsanulok_walk();
        state.zoom_to_fit(&walk);

        let bounds = BoundingBox::from_points(&walk).unwrap();
        assert_eq!(state.data().center(), bounds.center());
        assert_eq!(state.data().zoom, bounds.zoom_level_to_fit());
        assert!(!state.is_initialized());
    }

    #[test]
    fn test_zoom_to_fit_without_points_keeps_view() {
        let mut state = MapState::default();
        state.zoom_to_fit(&[]);
        assert_eq!(state.data().center(), MapData::default().center());
    }
}
