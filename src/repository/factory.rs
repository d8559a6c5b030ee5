use crate::agents::GalaxyExecutionAgent;
use crate::repository::VersionResolver;
use std::path::PathBuf;

pub struct ResolverFactory;

impl ResolverFactory {
    pub fn create_galaxy(
        galaxy_bin: PathBuf,
        scratch_root: Option<PathBuf>,
    ) -> Box<dyn VersionResolver> {
        let agent = GalaxyExecutionAgent::new(galaxy_bin);
        match scratch_root {
            Some(root) => Box::new(agent.with_scratch_root(root)),
            None => Box::new(agent),
        }
    }
}
