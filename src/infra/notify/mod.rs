use std::sync::Arc;

use crate::config::NoticeMode;
use crate::usecase::ports::notifier::Notifier;

pub mod dialog;
pub mod log;

pub fn notifier_for(mode: NoticeMode) -> Arc<dyn Notifier> {
    match mode {
        NoticeMode::Dialog => Arc::new(dialog::DialogNotifier),
        NoticeMode::Log => Arc::new(log::LogNotifier),
    }
}
