/// Compile time check that the provided value may be shared across
/// threads.
pub fn is_send_sync<T: Send + Sync>(_: &T) {}
