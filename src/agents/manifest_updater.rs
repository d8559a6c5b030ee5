use crate::agents::manifest::ManifestDocument;
use crate::agents::update::ResolvedVersions;
use crate::error::{BumpError, Result};
use crate::repository::VersionResolver;
use crate::utils::verbose::verbose;
use crate::utils::yaml::YamlUtils;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// ManifestUpdater moves every collection pin to its latest resolved version
pub struct ManifestUpdater<R: VersionResolver> {
    resolver: R,
    show_progress: bool,
}

impl<R: VersionResolver> ManifestUpdater<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            show_progress: true,
        }
    }

    /// Hide the progress bar (used by tests and non-interactive callers)
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Resolve every collection in document order and rewrite changed pins in memory.
    ///
    /// The first resolution failure aborts the whole pass; nothing is written here.
    pub fn update_document(&self, doc: &mut ManifestDocument) -> Result<ResolvedVersions> {
        let entries = doc.collections_mut()?;
        let mut resolved = ResolvedVersions::new();

        let pb = ProgressBar::new(entries.len() as u64);
        if !self.show_progress || entries.is_empty() {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  [{bar:40}] {pos}/{len} {msg}")
                .map_err(|e| BumpError::Resolution(format!("Invalid progress template: {e}")))?
                .progress_chars("=>-"),
        );

        for entry in entries.iter_mut() {
            let name = YamlUtils::extract_name(entry)
                .map(str::to_string)
                .ok_or_else(|| BumpError::Manifest("Collection entry without a name".into()))?;
            pb.set_message(format!("Resolving {}", name));

            let latest = match self.resolver.resolve_latest(&name) {
                Ok(version) => version,
                Err(e) => {
                    pb.abandon();
                    return Err(e);
                }
            };
            let current = YamlUtils::extract_version(entry);

            if current.as_deref() != Some(latest.as_str()) {
                let previous = YamlUtils::describe_version(entry);
                verbose!(
                    "{}: {} -> {}",
                    name,
                    previous.as_deref().unwrap_or("(unpinned)"),
                    latest
                );
                YamlUtils::update_version(entry, &latest);
                resolved.record_update(name, previous, latest);
            } else {
                verbose!("{}: {} is current", name, latest);
                resolved.record_unchanged(name);
            }

            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(resolved)
    }
}
