/// An event a driver feeds to its reducer: a read issued, a read settled,
/// a descriptor cleared, a filter reset.
///
/// Intents carry the generation they belong to, so a reducer can drop the
/// ones a newer read has made irrelevant.
pub trait Intent: Send + 'static {}
