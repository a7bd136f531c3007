pub mod notifier;
pub mod spreadsheet;
