//! Ports layer - contracts between the domain and the outside world.
//!
//! Adapters implement these traits; application services depend on them
//! through generics or trait objects, never on concrete adapters.

mod conversation_store;
mod notification_publisher;
mod team_directory;

pub use conversation_store::ConversationStore;
pub use notification_publisher::NotificationPublisher;
pub use team_directory::TeamDirectory;
