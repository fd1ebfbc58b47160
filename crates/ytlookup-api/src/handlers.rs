//! Request handlers.

pub mod captions;
pub mod health;
pub mod history;
pub mod media;
pub mod parse;
pub mod playlist;
pub mod video;

pub use captions::*;
pub use health::*;
pub use history::*;
pub use media::*;
pub use parse::*;
pub use playlist::*;
pub use video::*;

use ytlookup_models::trim_input;

/// Trimmed query value, `None` when absent or blank.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(trim_input).filter(|s| !s.is_empty())
}
