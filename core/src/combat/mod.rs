mod detector;
mod timer;

pub use detector::CombatDetector;
pub use timer::CombatTimer;
