//! Localization subsystem: translation tree merging, the runtime
//! locale catalog, directory sync, bootstrap of new languages, and
//! language display metadata.

pub mod bootstrap;
pub mod catalog;
pub mod languages;
pub mod sync;
pub mod tree;

pub use bootstrap::{bootstrap, BootstrapReport, DEFAULT_BOOTSTRAP_CODES};
pub use catalog::{LocaleCatalog, CANONICAL_CODE, PROTECTED_CODE};
pub use sync::{sync_all, SyncOptions, SyncReport};
pub use tree::{merge, MergePolicy, TreeNode};
