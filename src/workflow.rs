use crate::agents::{ManifestDocument, ManifestUpdater, ResolvedVersions};
use crate::error::Result;
use crate::repository::VersionResolver;
use crate::utils::verbose::verbose;
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;

/// Inputs for one update run
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    pub requirements_yml: PathBuf,
    /// Collections whose versions are printed, in print order
    pub print_names: Vec<String>,
    pub dry_run: bool,
}

/// Execute the update workflow, printing requested versions to stdout
pub fn execute_update<R: VersionResolver>(options: &UpdateOptions, resolver: R) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_update(options, resolver, true, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Resolve, persist when changed, then write one line per requested name to `out`.
///
/// Progress and the summary go to stderr so `out` only carries versions.
fn run_update<R: VersionResolver, W: Write>(
    options: &UpdateOptions,
    resolver: R,
    show_progress: bool,
    out: &mut W,
) -> Result<ResolvedVersions> {
    eprintln!(
        "{}",
        format!(
            "Updating collection versions in {}...",
            options.requirements_yml.display()
        )
        .cyan()
        .bold()
    );

    // Step 1: Load manifest
    eprintln!("\n{}", "1. Reading manifest...".yellow());
    let mut doc = ManifestDocument::load(&options.requirements_yml)?;
    let count = doc.collections()?.len();
    eprintln!("{}", format!("✓ Found {} collection(s)", count).green());
    verbose!("Collections: {}", doc.collection_names()?.join(", "));

    // Step 2: Resolve latest versions
    eprintln!("\n{}", "2. Resolving latest versions...".yellow());
    let mut updater = ManifestUpdater::new(resolver);
    if !show_progress {
        updater = updater.without_progress();
    }
    let resolved = updater.update_document(&mut doc)?;
    eprintln!("{}", "✓ Resolution completed".green());

    // Step 3: Persist
    if resolved.has_changes() {
        if options.dry_run {
            eprintln!("\n{}", "3. Dry run: manifest not written".yellow());
        } else {
            eprintln!("\n{}", "3. Writing manifest...".yellow());
            doc.save()?;
            eprintln!("{}", format!("✓ Wrote {}", doc.path().display()).green());
        }
    } else {
        eprintln!("\n{}", "3. All collections are up to date".yellow());
    }

    print_update_report(&resolved);

    // Step 4: Print requested versions; every name must resolve before any is printed
    let lines = resolved.render(&options.print_names)?;
    for line in lines {
        writeln!(out, "{}", line)?;
    }

    Ok(resolved)
}

fn print_update_report(resolved: &ResolvedVersions) {
    if resolved.total_updates() == 0 {
        return;
    }

    eprintln!("\n{}", "Update Summary:".cyan().bold());
    eprintln!(
        "{}",
        format!("Total updates: {}", resolved.total_updates()).green()
    );
    for (name, old, new) in resolved.updates() {
        eprintln!(
            "  • {} {} → {}",
            name.white().bold(),
            old.unwrap_or("(unpinned)").red(),
            new.green()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BumpError;
    use std::collections::HashMap;
    use std::fs;
    use std::path::Path;
    use tempfile::{TempDir, tempdir};

    struct TableResolver(HashMap<String, String>);

    impl TableResolver {
        fn new(latest: &[(&str, &str)]) -> Self {
            Self(
                latest
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            )
        }
    }

    impl VersionResolver for TableResolver {
        fn resolve_latest(&self, name: &str) -> Result<String> {
            self.0
                .get(name)
                .cloned()
                .ok_or_else(|| BumpError::Resolution(format!("no install line for '{name}'")))
        }
    }

    fn write_manifest(content: &str) -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("requirements.yml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    fn options(path: &Path, print_names: &[&str]) -> UpdateOptions {
        UpdateOptions {
            requirements_yml: path.to_path_buf(),
            print_names: print_names.iter().map(|s| s.to_string()).collect(),
            dry_run: false,
        }
    }

    fn run(options: &UpdateOptions, resolver: TableResolver) -> Result<String> {
        let mut out = Vec::new();
        run_update(options, resolver, false, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    const SINGLE: &str = "collections:\n  - name: a.b\n    version: \"1.0.0\"\n";

    #[test]
    fn newer_version_is_written_and_printed() {
        let (_dir, path) = write_manifest(SINGLE);

        let stdout = run(
            &options(&path, &["a.b"]),
            TableResolver::new(&[("a.b", "1.1.0")]),
        )
        .unwrap();

        assert_eq!(stdout, "1.1.0\n");
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("version: 1.1.0"));
        assert!(!written.contains("1.0.0"));
    }

    #[test]
    fn unchanged_manifest_is_left_byte_for_byte() {
        let original = "# pinned by CI\ncollections:\n  - name: a.b\n    version: \"1.0.0\"\n  - {name: c.d, version: '2.0.0'}\n";
        let (_dir, path) = write_manifest(original);

        let stdout = run(
            &options(&path, &["a.b", "c.d"]),
            TableResolver::new(&[("a.b", "1.0.0"), ("c.d", "2.0.0")]),
        )
        .unwrap();

        assert_eq!(stdout, "NONE\nNONE\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn print_order_follows_request_not_manifest() {
        let (_dir, path) = write_manifest(
            "collections:\n  - name: a.b\n    version: 1.0.0\n  - name: c.d\n    version: 1.0.0\n",
        );

        let stdout = run(
            &options(&path, &["c.d", "a.b"]),
            TableResolver::new(&[("a.b", "1.0.0"), ("c.d", "1.2.0")]),
        )
        .unwrap();

        assert_eq!(stdout, "1.2.0\nNONE\n");
    }

    #[test]
    fn unknown_print_name_fails_without_output() {
        let (_dir, path) = write_manifest(SINGLE);
        let mut out = Vec::new();

        let err = run_update(
            &options(&path, &["a.b", "not.listed"]),
            TableResolver::new(&[("a.b", "1.1.0")]),
            false,
            &mut out,
        )
        .unwrap_err();

        assert!(matches!(err, BumpError::Lookup(ref name) if name == "not.listed"));
        assert!(out.is_empty());
    }

    #[test]
    fn resolution_failure_leaves_manifest_untouched() {
        let original =
            "collections:\n  - name: a.b\n    version: 1.0.0\n  - name: broken.one\n";
        let (_dir, path) = write_manifest(original);

        let err = run(
            &options(&path, &["a.b"]),
            TableResolver::new(&[("a.b", "2.0.0")]),
        )
        .unwrap_err();

        assert!(matches!(err, BumpError::Resolution(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn dry_run_prints_without_writing() {
        let (_dir, path) = write_manifest(SINGLE);
        let mut opts = options(&path, &["a.b"]);
        opts.dry_run = true;

        let stdout = run(&opts, TableResolver::new(&[("a.b", "1.1.0")])).unwrap();

        assert_eq!(stdout, "1.1.0\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), SINGLE);
    }

    #[test]
    fn missing_manifest_is_fatal() {
        let dir = tempdir().unwrap();
        let err = run(
            &options(&dir.path().join("requirements.yml"), &["a.b"]),
            TableResolver::new(&[]),
        )
        .unwrap_err();
        assert!(matches!(err, BumpError::Manifest(_)));
    }
}
