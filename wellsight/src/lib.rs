// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{build_figures, output_filename, render_dashboard, resolve_data_dir, select_charts};
