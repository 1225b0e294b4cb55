//! Base trait for intents (mutation requests) in the store layer.

/// Marker trait for intent objects.
///
/// Intents represent user actions (tapping +1, toggling a favorite) and
/// carry everything the reducer needs that is not derived from the clock,
/// including freshly generated ids.
pub trait Intent: Send + 'static {}
