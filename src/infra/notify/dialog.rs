use rfd::{MessageButtons, MessageDialog, MessageLevel};

use crate::usecase::ports::notifier::Notifier;

/// Native message boxes for desktop sessions.
pub struct DialogNotifier;

impl DialogNotifier {
    fn show(level: MessageLevel, title: &str, message: &str) {
        let _ = MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

impl Notifier for DialogNotifier {
    fn warn(&self, title: &str, message: &str) {
        Self::show(MessageLevel::Warning, title, message);
    }

    fn error(&self, title: &str, message: &str) {
        Self::show(MessageLevel::Error, title, message);
    }
}
