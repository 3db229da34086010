//! Map collaborator abstraction.
//!
//! The interactive map widget is out of scope; the dashboard only needs to
//! recenter it, move its marker, and react to the events it emits.

/// Interface a map widget implements for the dashboard.
pub trait MapView {
    /// Recenter the viewport on a coordinate.
    fn center(&mut self, latitude: f64, longitude: f64);

    /// Move the location marker.
    fn set_marker(&mut self, latitude: f64, longitude: f64);
}

/// Events the map widget feeds back into the dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    /// User clicked somewhere on the map.
    Clicked { latitude: f64, longitude: f64 },
    /// User finished dragging the marker.
    MarkerDragged { latitude: f64, longitude: f64 },
}

impl MapEvent {
    pub fn coordinates(&self) -> (f64, f64) {
        match *self {
            MapEvent::Clicked { latitude, longitude }
            | MapEvent::MarkerDragged { latitude, longitude } => (latitude, longitude),
        }
    }
}

/// No-op map for headless use and tests.
#[derive(Debug, Default)]
pub struct NullMapView;

impl MapView for NullMapView {
    fn center(&mut self, _latitude: f64, _longitude: f64) {}
    fn set_marker(&mut self, _latitude: f64, _longitude: f64) {}
}
