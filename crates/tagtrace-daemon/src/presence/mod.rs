//! Presence derivation and live viewer sessions

mod session;
mod view;

pub use session::live_view_stream;
pub use view::{compute_presence, reader_view, PresenceSettings};
