//! Static site generation from a discovery closure.
//!
//! One HTML page is written per discovered document, mirroring the source layout,
//! and the non-document files next to each document are copied alongside.

pub mod assets;
pub mod builder;

pub use assets::{AssetError, copy_dir_assets};
pub use builder::{BuildError, BuildReport, SiteBuilder, output_path};
