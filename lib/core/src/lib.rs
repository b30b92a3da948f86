pub mod error;
pub mod notify;
pub mod types;

pub use error::ServiceError;
pub use notify::{NullNotifier, Notifier};
pub use types::{new_id, now_rfc3339};
