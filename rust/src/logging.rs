//! Logging macros for the routing engine with verbosity level control.
//!
//! Output goes to stderr and costs nothing when the level is below the
//! threshold. Levels:
//! - 0: SILENT (nothing; errors are returned, not logged)
//! - 1: CHANGES (jobs placed on the route, final costs)
//! - 2: CHECKS (candidate jobs considered, skip reasons)
//! - 3: DEBUG (Dijkstra runs, DP table statistics)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at CHANGES level (verbosity >= 1).
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            eprintln!("[routeplan] {}", format_args!($($arg)*));
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!("[routeplan]   {}", format_args!($($arg)*));
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!("[routeplan:debug] {}", format_args!($($arg)*));
        }
    };
}
