//! Command handlers for promptline.

pub mod init;
pub mod layout;
pub mod render;

// Re-export command types for convenience
pub use init::InitCommand;
pub use layout::LayoutCommand;
pub use render::RenderCommand;
