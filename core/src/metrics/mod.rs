mod counters;
mod live;

pub use counters::{MeleeCounters, SpellCounters, percent};
pub use live::{LiveSession, SpellBook};

pub(crate) use live::breakdown;
