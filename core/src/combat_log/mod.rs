mod combat_event;
mod error;
mod log_line;
mod parser;
mod reader;
mod template;

pub use combat_event::*;
pub use error::ReaderError;
pub use log_line::LogLine;
pub use parser::LineParser;
pub use reader::{Reader, TrackerHandle};
pub use template::{Piece, Rule, Template, parse_amount};
