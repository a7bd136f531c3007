/// User-visible notices. Implementations must not panic.
pub trait Notifier: Send + Sync {
    fn warn(&self, title: &str, message: &str);
    fn error(&self, title: &str, message: &str);
}
