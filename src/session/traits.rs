//! Callbacks the overlay exposes to its host

/// Host-side reactions to terminal and pass-through overlay events
///
/// Navigation belongs to the host: the session only reports what happened.
pub trait OverlayCallbacks {
    /// A spot row was chosen. The overlay closes right after.
    fn on_select(&mut self, spot_name: &str);

    /// The overlay was dismissed or closed after a selection
    fn on_close(&mut self);

    /// The optional filter control was tapped. No effect on session state.
    fn on_filters(&mut self) {}
}
