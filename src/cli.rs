use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_REQUIREMENTS_YML: &str = "requirements.yml";
pub const DEFAULT_COLLECTION: &str = "fedora.linux_system_roles";
pub const DEFAULT_GALAXY_BIN: &str = "ansible-galaxy";

#[derive(Parser, Debug)]
#[command(
    name = "galaxy-bump",
    about = "Update requirements.yml with the latest Ansible collection versions",
    version,
    author
)]
pub struct Cli {
    /// Path/filename for requirements.yml
    #[arg(
        long = "requirements-yml",
        value_name = "PATH",
        env = "REQUIREMENTS_YML",
        default_value = DEFAULT_REQUIREMENTS_YML
    )]
    pub requirements_yml: PathBuf,

    /// Print the versions of the given collections if they are updated.
    /// The versions are printed in the order given. If there is no version
    /// update, the output will be the literal string 'NONE'.
    #[arg(long = "coll-vers-to-print", value_name = "NAME")]
    pub coll_vers_to_print: Vec<String>,

    /// Resolve and print versions without rewriting requirements.yml
    #[arg(long)]
    pub dry_run: bool,

    /// ansible-galaxy executable used to resolve versions
    #[arg(
        long = "galaxy-bin",
        value_name = "PATH",
        env = "ANSIBLE_GALAXY_BIN",
        default_value = DEFAULT_GALAXY_BIN
    )]
    pub galaxy_bin: PathBuf,

    /// Directory under which scratch install directories are created
    /// (defaults to the system temp directory)
    #[arg(long = "scratch-dir", value_name = "DIR")]
    pub scratch_dir: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Collections whose versions are printed, in print order.
    pub fn collections_to_print(&self) -> Vec<String> {
        if self.coll_vers_to_print.is_empty() {
            vec![DEFAULT_COLLECTION.to_string()]
        } else {
            self.coll_vers_to_print.clone()
        }
    }
}
