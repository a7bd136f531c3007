use tracing::{error, warn};

use crate::usecase::ports::notifier::Notifier;

/// Headless sessions: notices are log events, printed by the stderr subscriber.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn warn(&self, title: &str, message: &str) {
        warn!(notice = title, "{message}");
    }

    fn error(&self, title: &str, message: &str) {
        error!(notice = title, "{message}");
    }
}
