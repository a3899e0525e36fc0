//! Console output.

pub mod console;

pub use console::{
    print_banner, print_config_summary, print_error, print_info, print_run_stats, print_success,
    print_warning,
};
