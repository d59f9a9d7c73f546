//! Centralized constants for limits, formats and defaults.

use chrono_tz::Tz;

/// Maximum number of characters accepted for a guest name.
pub const MAX_NAME_CHAR: usize = 15;

/// Maximum number of characters accepted for a message.
pub const MAX_MESSAGE_CHAR: usize = 50;

/// Timestamp format written with every entry. The `PST` suffix is literal and
/// stays the same during daylight saving time.
pub const TIMESTAMP_FMT: &str = "%Y-%m-%d %I:%M:%S %p PST";

/// Zone entries are stamped in (US/Pacific).
pub const PACIFIC_TZ: Tz = chrono_tz::America::Los_Angeles;

/// Database file used when neither `--db` nor `GUESTBOOK_DB` is given.
pub const DEFAULT_DB_PATH: &str = "data/guestbook.db";

/// Address the server binds to by default.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5001";

/// Directory holding `style.css` and `assets/`.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// htmx trigger used by the update area to poll for new entries.
pub const REFRESH_TRIGGER: &str = "every 10s";

/// Route returning the full page.
pub const ROUTE_PAGE: &str = "/";

/// Route accepting form submissions.
pub const ROUTE_SUBMIT: &str = "/submit-message";

/// Route returning the current update area.
pub const ROUTE_UPDATE: &str = "/update-messages";
