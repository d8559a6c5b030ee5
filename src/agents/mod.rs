pub mod galaxy_execution;
pub mod manifest;
pub mod manifest_updater;
pub mod update;

pub use galaxy_execution::GalaxyExecutionAgent;
pub use manifest::ManifestDocument;
pub use manifest_updater::ManifestUpdater;
pub use update::ResolvedVersions;
