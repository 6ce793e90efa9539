/// Threshold-based, at-most-once visibility notification.
pub mod notifier;
