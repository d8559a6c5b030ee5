pub const VERBOSE_ENV: &str = "GALAXY_BUMP_VERBOSE";

pub fn enabled() -> bool {
    std::env::var_os(VERBOSE_ENV).is_some()
}

/// Print a `[VERBOSE]` diagnostic line on stderr when verbose output is on.
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::utils::verbose::enabled() {
            eprintln!("[VERBOSE] {}", format!($($arg)*));
        }
    };
}

pub(crate) use verbose;
