use crate::error::Result;

pub mod factory;
pub use factory::ResolverFactory;

/// Source of the latest available version for a collection.
pub trait VersionResolver {
    fn resolve_latest(&self, name: &str) -> Result<String>;
}

impl<R: VersionResolver + ?Sized> VersionResolver for Box<R> {
    fn resolve_latest(&self, name: &str) -> Result<String> {
        (**self).resolve_latest(name)
    }
}
