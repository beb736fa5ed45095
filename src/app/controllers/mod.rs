pub mod ingestion_controller;
pub mod session_controller;
pub mod stored_controller;
pub mod tree_controller;
