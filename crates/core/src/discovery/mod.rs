//! Link graph discovery.
//!
//! Starting from a root document, follows the links held in navigable frontmatter
//! properties (`contents` and `part_of` by default) and collects every document
//! reachable from the root. Both properties are followed the same way, so a
//! `part_of` back-reference is an edge like any other.

pub mod traversal;
pub mod types;

pub use traversal::{DiscoverError, discover};
pub use types::{
    DEFAULT_LINK_FIELDS, DiscoverOptions, Discovery, DiscoveryWarning, WarningKind,
};
