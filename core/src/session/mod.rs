mod compare;
mod error;
mod history;
mod lifetime;
mod named;
mod snapshot;
mod store;

pub use compare::{ComparisonReport, MetricDelta, SideBySide};
pub use error::SnapshotError;
pub use history::SessionHistory;
pub use lifetime::LifetimeTotals;
pub use named::NamedSnapshots;
pub use snapshot::{Snapshot, dps};
pub use store::SessionStore;
