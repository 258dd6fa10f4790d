//! Link discovery and static site generation for markdown notes whose YAML
//! frontmatter links them together through `contents` and `part_of`.

pub mod config;
pub mod discovery;
pub mod frontmatter;
pub mod ids;
pub mod links;
pub mod render;
pub mod site;

pub use discovery::{DiscoverError, DiscoverOptions, Discovery, discover};
pub use ids::DocumentId;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
