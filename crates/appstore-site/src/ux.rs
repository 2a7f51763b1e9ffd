//! Page navigation helpers

use std::collections::HashSet;

/// Scroll offset past which the back-to-top control shows
pub const BACK_TO_TOP_THRESHOLD: f64 = 300.0;

/// Fork page of the config repository
pub const FORK_URL: &str = "https://github.com/ONE-APP-STORE/config-repo/fork";

/// Public store front
pub const EXPLORE_URL: &str = "https://one-app-store.com";

/// Whether the back-to-top control is visible at `scroll_y`
#[inline]
#[must_use]
pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_THRESHOLD
}

/// Element id an in-page link scrolls to
///
/// `None` for links that are not fragments, for a bare `#`, and for ids
/// missing from the page.
#[must_use]
pub fn resolve_anchor<'a>(href: &'a str, ids: &HashSet<String>) -> Option<&'a str> {
    let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
    if ids.contains(id) {
        Some(id)
    } else {
        tracing::debug!(href, "anchor target not on page");
        None
    }
}
