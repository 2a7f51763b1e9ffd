//! App store site behaviors
//!
//! Everything on the submission site besides the entry generator itself:
//!
//! - **Theme**: dark/light flag persisted in a preference slot
//! - **Copy**: clipboard copy of the rendered entry with timed feedback
//! - **Stats**: best-effort remote counters
//! - **Schedule**: next index rebuild in local time and UTC
//! - **Ux**: back-to-top visibility, in-page anchors, outbound links
//!
//! Platform pieces (storage, clipboard, HTTP) sit behind traits so the
//! behaviors can run anywhere.
//!
//! # Example
//!
//! ```rust,ignore
//! use appstore_site::{SiteSettings, SiteStats, StatsClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = SiteSettings::load(None)?;
//! let client = StatsClient::from_settings(&settings)?;
//! let stats = SiteStats::fetch(&client, &settings).await;
//! println!("{} stars, {} apps", stats.stars, stats.apps);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod copy;
pub mod error;
pub mod logging;
pub mod schedule;
pub mod settings;
pub mod stats;
pub mod theme;
pub mod ux;

// Re-exports for convenience
pub use copy::{is_copyable, Clipboard, CopyButton, CopyFeedback, FileClipboard};
pub use error::{ClipboardError, SettingsError, StatsError, StorageError};
pub use schedule::{IndexingNotice, IndexingSchedule, ViewerZone};
pub use settings::{ContentRef, RepoRef, SiteSettings};
pub use stats::{RepoCounters, SiteStats, StatDisplay, StatsClient, StatsSource};
pub use theme::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, Theme, ThemeController, ThemeIcon,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for site behaviors
    pub use crate::{
        Clipboard, CopyButton, IndexingNotice, IndexingSchedule, PreferenceStore, SiteSettings,
        SiteStats, StatsClient, StatsSource, Theme, ThemeController, ViewerZone,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
