pub mod static_schema;
