pub mod actor_context;
pub mod diff_service;
pub mod log_service;
pub mod relation_registry;
