use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::core::constants::display;

/// Shorten `url` to at most `max_chars` characters, marking the cut with `...`.
pub fn preview_url(url: &str, max_chars: usize) -> String {
    if url.chars().count() <= max_chars {
        url.to_string()
    } else {
        let head: String = url.chars().take(max_chars).collect();
        format!("{head}...")
    }
}

/// Probe progress bar: `index/total` plus a truncated preview of the URL
/// being dispatched.
pub struct ProgressReporter {
    probe_progress: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            probe_progress: None,
            enabled,
        }
    }

    pub fn start_probing(&mut self, total_urls: usize) {
        if !self.enabled {
            return;
        }

        let pb = ProgressBar::new(total_urls as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message("Verifying URLs");
        pb.enable_steady_tick(Duration::from_millis(120));
        self.probe_progress = Some(pb);
    }

    /// Called when a probe is dispatched.
    pub fn on_dispatch(&self, url: &str) {
        if let Some(ref pb) = self.probe_progress {
            pb.set_message(format!(
                "Checking {}",
                preview_url(url, display::URL_PREVIEW_CHARS)
            ));
        }
    }

    /// Called when a probe has produced its outcome.
    pub fn on_resolved(&self) {
        if let Some(ref pb) = self.probe_progress {
            pb.inc(1);
        }
    }

    pub fn finish_probing(&self, resolved: usize, total: usize) {
        if let Some(ref pb) = self.probe_progress {
            let message = if resolved == total {
                format!("Verified {total} URLs")
            } else {
                format!("Stopped after {resolved}/{total} URLs")
            };
            pb.finish_with_message(message);
        }
    }

    pub fn finish_and_clear(&self) {
        if let Some(ref pb) = self.probe_progress {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn test_preview_url__short_url_untouched() {
        assert_eq!(preview_url("https://a.io", 60), "https://a.io");
    }

    #[test]
    fn test_preview_url__long_url_truncated() {
        let url = format!("https://docs.foo.io/{}", "a".repeat(100));

        let preview = preview_url(&url, 60);

        assert_eq!(preview.chars().count(), 63);
        assert!(preview.ends_with("..."));
        assert!(preview.starts_with("https://docs.foo.io/aaa"));
    }

    #[test]
    fn test_preview_url__multibyte_safe() {
        let url = "https://ドキュメント.example.jp/ページ";

        let preview = preview_url(url, 10);

        assert_eq!(preview, "https://ドキ...");
    }

    #[test]
    fn test_progress_methods_dont_panic_when_disabled() {
        let mut reporter = ProgressReporter::new(false);

        reporter.start_probing(10);
        reporter.on_dispatch("https://a.io");
        reporter.on_resolved();
        reporter.finish_probing(10, 10);
        reporter.finish_and_clear();

        assert!(reporter.probe_progress.is_none());
    }

    #[test]
    fn test_enabled_progress_reporter() {
        let mut reporter = ProgressReporter::new(true);

        reporter.start_probing(3);
        assert!(reporter.probe_progress.is_some());

        reporter.on_dispatch("https://a.io");
        reporter.on_resolved();
        reporter.finish_probing(1, 3);
    }

    #[test]
    fn test_progress_reporter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProgressReporter>();
    }
}
