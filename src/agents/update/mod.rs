// Update module - per-run bookkeeping for collection version resolution
pub mod context;

pub use context::ResolvedVersions;
