use maybe_sync::{MaybeSend, MaybeSync};

/// Notifies the application that the map should be drawn again, e.g. because a tile finished
/// loading.
pub trait Messenger: MaybeSend + MaybeSync {
    /// Requests a redraw of the map.
    fn request_redraw(&self);
}

