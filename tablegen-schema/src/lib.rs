pub mod db;
pub mod query;
pub mod schema;
