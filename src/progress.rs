// src/progress.rs
/// Lightweight progress reporting used by long-running operations (scrape/export).
/// Frontends implement this to surface status to users.
pub trait Progress: Send {
    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when pagination moves on to another page.
    /// `total` is whatever the page-count indicator said, if anything.
    fn page(&mut self, page: usize, total: Option<u32>) {
        self.log(&page_message(page, total));
    }

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Collects every status line; handy for tests and for replaying to a log.
#[derive(Default, Debug)]
pub struct RecordingProgress {
    pub lines: Vec<String>,
    pub finished: bool,
}

impl Progress for RecordingProgress {
    fn log(&mut self, msg: &str) {
        self.lines.push(s!(msg));
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}

pub fn page_message(page: usize, total: Option<u32>) -> String {
    match total {
        Some(t) => format!("Fetching page {page} of {t}…"),
        None => format!("Fetching page {page} of ?…"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_message_with_and_without_total() {
        assert_eq!(page_message(2, Some(12)), "Fetching page 2 of 12…");
        assert_eq!(page_message(3, None), "Fetching page 3 of ?…");
    }

    #[test]
    fn default_page_hook_goes_through_log() {
        let mut p = RecordingProgress::default();
        p.page(4, Some(5));
        assert_eq!(p.lines, vec![s!("Fetching page 4 of 5…")]);
    }
}
