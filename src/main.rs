mod agents;
mod cli;
mod error;
mod repository;
mod utils;
mod workflow;

use clap::Parser;
use cli::Cli;
use colored::Colorize;
use std::process;
use workflow::UpdateOptions;

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        unsafe {
            std::env::set_var(utils::verbose::VERBOSE_ENV, "1");
        }
    }

    let options = UpdateOptions {
        print_names: cli.collections_to_print(),
        requirements_yml: cli.requirements_yml,
        dry_run: cli.dry_run,
    };
    let resolver = repository::ResolverFactory::create_galaxy(cli.galaxy_bin, cli.scratch_dir);

    if let Err(e) = workflow::execute_update(&options, resolver) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
