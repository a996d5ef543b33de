//! CLI command implementations.
//!
//! - `layout` - YAML layout files
//! - `render` - the `render`, `check` and `preview` subcommands

pub mod layout;
pub mod render;

pub use render::{cmd_check, cmd_preview, cmd_render};
