//! Map surface for the path editor.
//!
//! Draws the path overlay (polyline, distance labels), one draggable marker per point
//! and the marker popups on an OpenStreetMap [`walkers`] map. User interaction is not
//! applied here but reported back as [`MapEvent`]s.

use egui::{Id, Pos2, Rect, Sense, Ui, Vec2};
use geotrace_geo::{LatLng, UnitLocale};
use geotrace_path::{MarkerId, PathEditor};
use serde::{Deserialize, Serialize};
use walkers::{Map, Projector};

use crate::{
    draw::{MARKER_RADIUS, MarkerRole, labels},
    map_state::{MapData, MapState, to_lat_lng, to_position},
};

mod draw;
pub mod map_state;

/// Interaction on the map, to be turned into an edit by the caller
#[derive(Debug, Clone, Copy, PartialEq, strum_macros::Display)]
pub enum MapEvent {
    /// Plain click on the map, not on a marker
    Clicked(LatLng),
    /// A marker was dropped after dragging
    MarkerMoved { index: usize, to: LatLng },
}

/// Marker currently being dragged
#[derive(Debug, Clone, Copy)]
struct DragState {
    index: usize,
    pointer: Pos2,
}

#[derive(Default, Deserialize, Serialize)]
pub struct MapPanel {
    map_state: MapState,
    /// Leaflet style: at most one popup is open
    #[serde(skip)]
    open_popup: Option<MarkerId>,
    #[serde(skip)]
    drag: Option<DragState>,
}

impl MapPanel {
    pub fn data(&self) -> &MapData {
        self.map_state.data()
    }

    pub fn open_popup(&mut self, id: MarkerId) {
        self.open_popup = Some(id);
    }

    pub fn close_popup(&mut self) {
        self.open_popup = None;
    }

    pub fn popup(&self) -> Option<MarkerId> {
        self.open_popup
    }

    /// Re-centre and zoom the map so every point is visible
    pub fn fit_to_points(&mut self, points: &[LatLng]) {
        self.map_state.zoom_to_fit(points);
    }

    /// Renders the map with the path of `editor` on it.
    ///
    /// Loads the tiles on the first call.
    pub fn show(&mut self, ui: &mut Ui, editor: &PathEditor) -> Vec<MapEvent> {
        if !self.map_state.is_initialized() {
            self.map_state.init(ui.ctx().clone());
        }
        let map_center_position = self.map_state.data().center_position;
        let Some(tile_state) = self.map_state.tile_state_as_mut() else {
            return Vec::new();
        };

        let mut events = Vec::new();
        let open_popup = &mut self.open_popup;
        let drag = &mut self.drag;
        let locale = editor.locale();

        Map::new(
            Some(&mut tile_state.tiles),
            &mut tile_state.map_memory,
            map_center_position,
        )
        .double_click_to_zoom(true)
        .show(ui, |ui, projector, _map_rect| {
            let overlay = editor.overlay();
            if let Some(polyline) = overlay.polyline() {
                let screen_points = polyline.iter().map(|p| project(projector, *p)).collect();
                draw::draw_polyline(ui.painter(), screen_points);
            }
            for label in overlay.labels() {
                labels::draw_distance_label(
                    ui.painter(),
                    project(projector, label.position),
                    &label.text,
                );
            }

            let marker_hovered = show_markers(ui, projector, editor, open_popup, drag, &mut events);

            let popup_rect = match *open_popup {
                Some(id) => show_popup(ui, projector, editor, id, locale, open_popup),
                None => None,
            };

            let clicked = ui.input(|i| i.pointer.primary_clicked());
            if clicked && ui.ui_contains_pointer() {
                if let Some(pointer) = ui
                    .input(|i| i.pointer.interact_pos())
                    .filter(|p| lands_on_map(*p, marker_hovered, popup_rect))
                {
                    let point = unproject(projector, pointer);
                    log::trace!("Map clicked at {point}");
                    *open_popup = None;
                    events.push(MapEvent::Clicked(point));
                }
            }
        });

        self.map_state.sync_view();
        events
    }
}

#[inline]
fn project(projector: &Projector, p: LatLng) -> Pos2 {
    projector.project(to_position(p)).to_pos2()
}

#[inline]
fn unproject(projector: &Projector, screen_pos: Pos2) -> LatLng {
    to_lat_lng(projector.unproject(screen_pos.to_vec2()))
}

/// A click is a map click unless it hits a marker or the open popup
fn lands_on_map(pointer: Pos2, marker_hovered: bool, popup_rect: Option<Rect>) -> bool {
    !marker_hovered && !popup_rect.is_some_and(|r| r.contains(pointer))
}

/// Draws the markers and handles clicking and dragging them, returns true if the pointer is over one
fn show_markers(
    ui: &Ui,
    projector: &Projector,
    editor: &PathEditor,
    open_popup: &mut Option<MarkerId>,
    drag: &mut Option<DragState>,
    events: &mut Vec<MapEvent>,
) -> bool {
    let markers = editor.markers().markers();
    let mut any_hovered = false;

    for (index, marker) in markers.iter().enumerate() {
        let center = project(projector, marker.position());
        let rect = Rect::from_center_size(center, Vec2::splat(2.0 * (MARKER_RADIUS + 2.0)));
        let response = ui.interact(
            rect,
            Id::new(("geotrace_marker", marker.id())),
            Sense::click_and_drag(),
        );

        if response.hovered() || response.dragged() {
            any_hovered = true;
        }

        if response.clicked() {
            // Clicking a marker toggles its popup
            *open_popup = if *open_popup == Some(marker.id()) {
                None
            } else {
                Some(marker.id())
            };
        }

        if response.dragged() {
            if let Some(pointer) = response.interact_pointer_pos() {
                *drag = Some(DragState { index, pointer });
            }
        }

        if response.drag_stopped() {
            if let Some(DragState { index, pointer }) = drag.take() {
                let to = unproject(projector, pointer);
                log::debug!("Marker {} dropped at {to}", marker.id());
                events.push(MapEvent::MarkerMoved { index, to });
            }
        }

        let role = MarkerRole::of(index, markers.len());
        match *drag {
            Some(DragState {
                index: dragged,
                pointer,
            }) if dragged == index => {
                let neighbours = [index.checked_sub(1), index.checked_add(1)]
                    .into_iter()
                    .flatten()
                    .filter_map(|i| markers.get(i))
                    .map(|m| project(projector, m.position()));
                draw::draw_drag_ghost(ui.painter(), center, pointer, neighbours);
            }
            _ => {
                draw::draw_marker(ui.painter(), center, role);
                if response.hovered() {
                    draw::draw_hover_highlight(ui.painter(), center);
                }
            }
        }
    }
    any_hovered
}

fn show_popup(
    ui: &Ui,
    projector: &Projector,
    editor: &PathEditor,
    id: MarkerId,
    locale: UnitLocale,
    open_popup: &mut Option<MarkerId>,
) -> Option<Rect> {
    let Some(marker) = editor
        .markers()
        .index_of(id)
        .and_then(|i| editor.markers().get(i))
    else {
        // The marker was removed by undo or clear
        *open_popup = None;
        return None;
    };
    let anchor = project(projector, marker.position());
    Some(labels::draw_popup(
        ui.painter(),
        anchor,
        &marker.annotation(locale),
    ))
}
