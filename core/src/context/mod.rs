mod clock;
mod config;
mod error;
mod parser;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DEFAULT_COMBAT_TIMEOUT_SECS, MAX_HISTORY, MeterConfig, MeterConfigExt};
pub use error::{ConfigError, StoreError};
pub use parser::{LogFeeder, ParseResult, TimeSource, parse_file, resolve_log_path};
