//! Infrastructure layer - Database, HTTP, wiki and filesystem access

pub mod backup;
pub mod config;
pub mod posts;
pub mod remote;
pub mod wiki;

pub use backup::BackupStore;
pub use config::Config;
pub use posts::{MySqlPostRepository, PostFilter, PostRepository};
pub use remote::{HttpTagSource, MarkupConverter, ParsoidConverter};
pub use wiki::{MediaWikiClient, WikiClient};
