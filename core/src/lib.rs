pub mod combat;
pub mod combat_log;
pub mod context;
pub mod metrics;
pub mod session;
pub mod state;
pub mod tracker;

// Re-exports for convenience
pub use combat::{CombatDetector, CombatTimer};
pub use combat_log::*;
pub use context::{
    Clock, ConfigError, LogFeeder, ManualClock, MeterConfig, MeterConfigExt, ParseResult,
    StoreError, SystemClock, TimeSource, parse_file, resolve_log_path,
};
pub use metrics::{LiveSession, MeleeCounters, SpellBook, SpellCounters};
pub use session::{
    ComparisonReport, LifetimeTotals, MetricDelta, NamedSnapshots, SessionHistory, SessionStore,
    SideBySide, Snapshot, SnapshotError,
};
pub use state::CharacterRecord;
pub use tracker::Tracker;
