//! Sessions: keeping one document's regions current while it is edited.
//!
//! The host reports edits with [`OutlineSession::edit`] and drives the clock
//! with [`OutlineSession::poll`]; a run happens once edits have been quiet
//! for the configured period. Each run that changes the outlining yields a
//! [`RegionsChanged`] for the host to forward to its views.

mod debounce;
mod host;

pub use debounce::{DEFAULT_QUIET, Debouncer};
pub use host::{OutlineSession, RegionsChanged};
