pub mod resolve;
pub mod schema;
pub mod store;
