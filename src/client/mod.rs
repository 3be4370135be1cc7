//! Client for the translation backend: classified failures, debounced
//! requests and a capped local history.

pub mod api;
pub mod history;
pub mod session;
pub mod status;

pub use api::{BackendClient, ClientError, TranslateOutcome};
pub use history::{EntryId, History, HistoryEntry, LocalStorage, HISTORY_KEY, HISTORY_LIMIT};
pub use session::{TranslatorSession, DEBOUNCE};
pub use status::Condition;
