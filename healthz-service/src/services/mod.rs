pub mod database;

pub use database::{probe, redact_uri, DatabaseProbe, MongoConnection};
