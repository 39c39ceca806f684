//! LLM tool-calling loops
//!
//! Everything that talks to the chat API lives here: the blocking client,
//! the tool-loop state machine, and the two toolsets built on it (watermark
//! proposal and filename generation). The rest of the crate consumes their
//! outputs as plain data.

pub mod client;
pub mod driver;
pub mod filename;
pub mod watermarks;

// Re-export commonly used items
pub use client::ChatClient;
pub use driver::{run_tool_loop, ToolFlow, ToolSet};
pub use filename::generate_filename;
pub use watermarks::propose_watermarks;
