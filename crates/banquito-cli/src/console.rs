//! CLI console utilities

use banquito_core::bootstrap::{CheckStatus, VerificationCheck};
use banquito_core::error::{BootstrapError, UserFriendlyError};
use colored::*;

/// CLI console for formatted output
pub struct CliConsole {
    verbose: bool,
}

impl CliConsole {
    /// Create a new CLI console
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.verbose {
            println!("{} {}", "ℹ".blue().bold(), message);
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message.green());
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }

    /// Print a header
    pub fn print_header(&self, title: &str) {
        println!();
        println!("{}", title.bold().underline());
        println!("{}", "=".repeat(title.len()).dimmed());
    }

    /// Print one verification check
    pub fn print_check(&self, check: &VerificationCheck) {
        let label = format!("{} {}", check.kind, check.name);
        match &check.status {
            CheckStatus::Ok => println!("  {} {}", "✓".green().bold(), label),
            CheckStatus::Missing => {
                println!("  {} {} {}", "✗".red().bold(), label, "missing".red())
            }
            CheckStatus::Mismatch(detail) => println!(
                "  {} {} {}",
                "⚠".yellow().bold(),
                label,
                detail.yellow()
            ),
            CheckStatus::Unexpected => println!(
                "  {} {} {}",
                "⚠".yellow().bold(),
                label,
                "not in plan".yellow()
            ),
        }
    }

    /// Print a failed run to stderr
    pub fn report_error(&self, error: &anyhow::Error) {
        match error.downcast_ref::<BootstrapError>() {
            Some(bootstrap) => {
                let friendly = UserFriendlyError::from(bootstrap);
                self.error(&friendly.format_display());
                if self.verbose {
                    eprintln!("{}", format!("[{}]", friendly.error_code).dimmed());
                }
            }
            None => self.error(&format!("{:#}", error)),
        }
    }
}
