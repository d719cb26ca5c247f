/// Snapshot a view renders from.
///
/// `Default` is the state before anything was fetched, and what a driver
/// leaves behind while a reducer runs. `PartialEq` lets tests compare a
/// reused view with a freshly built one.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
