// Application Layer - Use Cases and Business Logic

pub mod debounce;
pub mod media_filter;
pub mod service;
pub mod toggle_delta;

// Re-exports
pub use debounce::{ToggleDebouncer, DEFAULT_DEBOUNCE_INTERVAL};
pub use media_filter::{filter_relevant_media_types, is_mixed};
pub use service::{QueueToggleService, ToggleReport, Transition};
pub use toggle_delta::build_toggle_delta;
