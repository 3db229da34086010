//! Dashboard session and plumbing for Skycast.
//!
//! Holds the request-scoped analysis state, runs the fetch-and-analyze
//! cycle, debounces map interaction, and sends results back to the UI
//! thread via mpsc. All analysis is synchronous; the network fetches are
//! the only suspension points.

pub mod debounce;
pub mod map;
pub mod service;
pub mod session;

pub use debounce::Debouncer;
pub use map::{MapEvent, MapView, NullMapView};
pub use service::{Dashboard, DashboardMessage};
pub use session::{ForecastSnapshot, ProfileSnapshot, Session};
