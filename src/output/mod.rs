// src/output/mod.rs
// =============================================================================
// Everything that leaves the program locally: the template file on disk and
// the (optionally paged) language list on the terminal.
// =============================================================================

mod pager;
mod writer;

pub use pager::{pager_from_env, show, Pager};
pub use writer::write_template;
