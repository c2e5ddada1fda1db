//! In-memory adapters for testing and local development.

mod conversation_store;
mod notification_publisher;
mod team_directory;

pub use conversation_store::InMemoryConversationStore;
pub use notification_publisher::{FailingNotificationPublisher, InMemoryNotificationPublisher};
pub use team_directory::InMemoryTeamDirectory;
