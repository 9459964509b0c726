use std::io;
use std::path::Path;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use walkdir::WalkDir;

/// Receives one tick per rendered entry, after its subtree is done.
pub trait ProgressSink {
    fn advance(&mut self, n: u64);
}

impl ProgressSink for ProgressBar {
    fn advance(&mut self, n: u64) {
        self.inc(n);
    }
}

/// Something drawn on the terminal that must step aside while tree output
/// is written, or the two end up on the same row.
pub trait Overlay {
    fn suspend_for(&self, write: &mut dyn FnMut() -> io::Result<()>) -> io::Result<()>;
}

impl Overlay for ProgressBar {
    fn suspend_for(&self, write: &mut dyn FnMut() -> io::Result<()>) -> io::Result<()> {
        self.suspend(|| write())
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct Counter(pub u64);

#[cfg(test)]
impl ProgressSink for Counter {
    fn advance(&mut self, n: u64) {
        self.0 += n;
    }
}

/// Every entry below `root`, hidden ones included. Symlinks are not
/// followed and unreadable directories contribute nothing.
pub fn count_entries(root: &Path) -> u64 {
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(Result::ok)
        .count() as u64
}

/// Progress bar on stderr sized by a full precount of `root`.
pub fn start(root: &Path) -> ProgressBar {
    let total = count_entries(root);
    let pb = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
    let style = ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len} entries")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    pb.set_style(style);
    pb.set_message("Generating Tree");
    pb
}
