pub mod notifier;
pub mod pricing;
