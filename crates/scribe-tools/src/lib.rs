//! Adapter tool implementations for Scribe
//!
//! Each tool is a thin translation layer over a host or network service:
//! validate arguments, call the service, map the outcome into a uniform
//! `ToolResult`.

pub mod time;
pub mod web;

pub use time::CurrentTimeTool;
pub use web::WebMetadataTool;

use scribe_core::tools::Tool;
use std::sync::Arc;

/// The default adapter tool set
pub fn default_tools() -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(CurrentTimeTool::new()),
        Arc::new(WebMetadataTool::new()),
    ]
}
