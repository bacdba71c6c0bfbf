//! Filesystem traversal and asset discovery.
//!
//! Two traversals share this module: asset discovery walks for files in the
//! configured extension set, and the reference harvester walks for source
//! files. Both consume the same exclusion rules and pruning walker.

mod assets;
mod exclude;
mod walker;

pub use assets::{AssetDiscoverer, DiscoveryReport};
pub use exclude::{relative_unix, ExcludeSet};
pub use walker::{WalkReport, Walker};
