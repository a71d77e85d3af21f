//! Application constants
//!
//! Centralized location for collection names, localized strings and defaults.

/// Default managed backend (PostgREST-compatible) base URL
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:54321";

/// Collection holding contractor activity types
pub const ACTIVITY_TYPES: &str = "activity_types";

/// Collection holding organizational positions
pub const ORGANIZATIONAL_POSITIONS: &str = "organizational_positions";

/// Collection holding provinces
pub const PROVINCES: &str = "provinces";

/// Collection holding service categories
pub const SERVICE_CATEGORIES: &str = "service_categories";

/// Hold time before a long-press is confirmed
pub const DEFAULT_HOLD_MS: u64 = 3000;

/// Request timeout against the remote data service
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shown by the default deferred-section fallback
pub const LOADING_TEXT: &str = "در حال بارگذاری...";

/// Shown while the environment reports no connectivity
pub const OFFLINE_NOTICE: &str = "اتصال اینترنت برقرار نیست. برخی امکانات در دسترس نیستند.";

/// Application name
pub const APP_NAME: &str = "سازیار";
