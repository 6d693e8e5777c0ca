use serde::Deserialize;

/// Sizing and presentation parameters shared by every view.
///
/// Deserialised from the `[view]` table of the config file; every key is
/// optional and falls back to the value in `Default`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Number of commits in the scroll viewport.
    pub window_size: usize,
    /// Height of one narrative item in scroll units (pixels or rows).
    pub item_height: f64,
    /// Prefix joined with a commit id to link to the commit, e.g.
    /// `https://github.com/owner/repo/commit/`.
    pub commit_url_base: Option<String>,
    /// Smallest and largest scatterplot dot radius.
    pub min_radius: f64,
    pub max_radius: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            window_size: 20,
            item_height: 150.0,
            commit_url_base: None,
            min_radius: 2.0,
            max_radius: 30.0,
        }
    }
}
