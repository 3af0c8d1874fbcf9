use std::sync::Arc;

/// Leveled, namespaced log sink shared across threads.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    /// Something was ignored or dropped but the session is unaffected.
    fn warn(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    fn error(&self, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
    /// Returns a logger whose lines are prefixed with `parent:namespace`.
    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync>;
}
