//! Database persistence layer

pub mod questdb;

pub use questdb::QuestDatabase;
