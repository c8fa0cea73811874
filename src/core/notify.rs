//! User facing notifications

use console::style;

/// Fire-and-forget sink for success and error messages.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Prints styled notifications to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        eprintln!("{} {}", style("✔").green().bold(), message);
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", style("✘").red().bold(), style(message).red());
    }
}
