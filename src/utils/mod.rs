pub mod filter;
pub mod size;
pub mod types;

pub use filter::{classify, is_hidden, matches_suffix};
pub use size::format_size;
pub use types::{Entry, EntryKind, Frame, Highlight};
