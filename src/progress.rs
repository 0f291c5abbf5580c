//! Progress bar display for tarball downloads

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for the download stage
pub struct DownloadProgress {
    bar: ProgressBar,
}

impl DownloadProgress {
    /// Create a bar over `total` artifacts; `enabled = false` draws nothing.
    ///
    /// indicatif hides the bar on its own when stderr is not a terminal.
    pub fn new(total: usize, enabled: bool) -> Self {
        if !enabled {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let bar = ProgressBar::new(total as u64);
        bar.set_style(style);
        Self { bar }
    }

    /// Record one finished artifact
    pub fn finish_one(&self, locator: &str) {
        let name = locator.rsplit('/').next().unwrap_or(locator);
        self.bar.set_message(name.to_string());
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.bar.abandon();
    }
}
