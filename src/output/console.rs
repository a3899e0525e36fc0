//! Console output utilities.

use console::style;

use crate::download::RunStats;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════╗
║     IG Saved Collection Downloader        ║
╚═══════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(username: &str, settings: &str, target_dir: &str) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Username: {}", username);
    println!("  Settings: {}", settings);
    println!("  Directory: {}", target_dir);
    println!();
}

/// Print the end-of-run counters.
pub fn print_run_stats(stats: &RunStats) {
    println!();
    println!("{}", style("Run complete:").bold());
    println!("  Items processed: {}", stats.items);
    println!("  Items unsaved: {}", stats.unsaved);
    println!("  Images downloaded: {}", stats.images_downloaded);
    println!("  Items skipped (no images): {}", stats.items_skipped);
}
