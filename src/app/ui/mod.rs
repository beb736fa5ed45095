pub mod charts;
pub mod file_viewer;
pub mod helpers;
pub mod ingest_panel;
pub mod notice;
pub mod stored_panel;
pub mod summary_panel;
pub mod top_bar;
pub mod tree_panel;
