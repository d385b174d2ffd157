pub mod record;
pub mod store;

pub use record::{TopicRecord, TopicRepository};
