use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::Result;
use termcolor::StandardStream;

use crate::cli::{Cli, Format};
use crate::core::output::{
    color_choice, write_banner, JsonSink, PlainSink, Suspended, TreeSink,
};
use crate::core::progress::{self, ProgressSink};
use crate::error::TreeError;
use crate::utils::{classify, format_size, is_hidden, matches_suffix, Entry, Frame, Highlight};

const TEE: &str = "├── ";
const ELBOW: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// Everything that shapes one render. Built once, never mutated.
#[derive(Clone, Debug)]
pub struct TraversalOptions {
    pub max_depth: Option<usize>,
    pub file_suffix: Option<String>,
    pub exclude_hidden: bool,
    pub search_query: Option<String>,
    pub source_suffix: String,
    pub follow_symlinks: bool,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            file_suffix: None,
            exclude_hidden: true,
            search_query: None,
            source_suffix: ".py".to_string(),
            follow_symlinks: false,
        }
    }
}

impl TraversalOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            max_depth: cli.max_depth,
            file_suffix: non_empty(cli.suffix.as_deref()),
            exclude_hidden: !cli.hidden,
            search_query: non_empty(cli.search.as_deref()),
            source_suffix: cli.source_suffix.clone(),
            follow_symlinks: cli.follow_symlinks,
        }
    }

    fn is_visible(&self, name: &str) -> bool {
        if self.exclude_hidden && is_hidden(name) {
            return false;
        }
        matches_suffix(name, self.file_suffix.as_deref())
    }

    fn cuts_off(&self, level: usize) -> bool {
        self.max_depth.is_some_and(|max| level >= max)
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.filter(|s| !s.is_empty()).map(str::to_string)
}

/// One visible entry, ready for a sink.
#[derive(Debug)]
pub struct TreeLine<'a> {
    pub prefix: &'a str,
    pub connector: &'static str,
    pub entry: &'a Entry,
    pub highlight: Highlight,
    pub depth: usize,
    pub is_last: bool,
    /// Symlink back into one of its own ancestors; not descended.
    pub circular: bool,
}

impl TreeLine<'_> {
    /// The line without colour: prefix, connector, name and size.
    pub fn plain_text(&self) -> String {
        let mut text = format!("{}{}{}", self.prefix, self.connector, self.entry.name);
        if let Some(size) = self.entry.size {
            text.push_str(&format!(" ({})", format_size(size)));
        }
        text
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub directories: usize,
    pub files: usize,
    pub read_errors: usize,
}

pub fn ensure_directory(root: &Path) -> Result<(), TreeError> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(TreeError::NotADirectory {
            path: root.to_path_buf(),
        })
    }
}

/// Walks `root` depth first and hands every visible entry to `sink` in
/// output order. Directories come before files, then names compare
/// case-insensitively.
///
/// Unreadable directories are reported through `sink` and skipped. Only a
/// root that is not a directory, or a sink that fails to write, ends the
/// render with an error.
pub fn render(
    root: &Path,
    opts: &TraversalOptions,
    sink: &mut dyn TreeSink,
    mut progress: Option<&mut dyn ProgressSink>,
) -> Result<RenderStats, TreeError> {
    ensure_directory(root)?;

    let query = opts.search_query.as_deref().map(str::to_lowercase);
    let mut stats = RenderStats::default();
    let mut stack: Vec<Frame> = Vec::new();

    let root_canonical = canonical_if_following(root, opts);
    if let Some(frame) = open_frame(
        root,
        String::new(),
        0,
        root_canonical,
        false,
        opts,
        sink,
        &mut stats,
    )? {
        stack.push(frame);
    }

    while let Some(frame) = stack.last_mut() {
        if frame.idx >= frame.entries.len() {
            if let Some(done) = stack.pop() {
                if done.tick_on_pop {
                    tick(&mut progress);
                }
            }
            continue;
        }

        let idx = frame.idx;
        frame.idx += 1;
        // "Last" is taken from the full listing, before filtering.
        let is_last = idx + 1 == frame.entries.len();
        if !opts.is_visible(&frame.entries[idx].name) {
            continue;
        }
        let entry = frame.entries[idx].clone();
        let prefix = frame.prefix.clone();
        let level = frame.level;

        let mut descend = None;
        let mut circular = false;
        if entry.is_dir() && !opts.cuts_off(level + 1) {
            if !opts.follow_symlinks {
                if !entry.is_symlink {
                    descend = Some(None);
                }
            } else {
                let canonical = fs::canonicalize(&entry.path).ok();
                circular = canonical
                    .as_ref()
                    .is_some_and(|c| stack.iter().any(|f| f.canonical.as_ref() == Some(c)));
                if !circular {
                    descend = Some(canonical);
                }
            }
        }

        let line = TreeLine {
            prefix: &prefix,
            connector: if is_last { ELBOW } else { TEE },
            entry: &entry,
            highlight: classify(&entry, query.as_deref(), &opts.source_suffix),
            depth: level,
            is_last,
            circular,
        };
        sink.entry(&line)?;
        if entry.is_dir() {
            stats.directories += 1;
        } else {
            stats.files += 1;
        }

        let mut pushed = false;
        if let Some(canonical) = descend {
            let child_prefix = format!("{}{}", prefix, if is_last { BLANK } else { PIPE });
            if let Some(child) = open_frame(
                &entry.path,
                child_prefix,
                level + 1,
                canonical,
                true,
                opts,
                sink,
                &mut stats,
            )? {
                stack.push(child);
                pushed = true;
            }
        }
        if !pushed {
            tick(&mut progress);
        }
    }

    Ok(stats)
}

fn tick(progress: &mut Option<&mut dyn ProgressSink>) {
    if let Some(p) = progress.as_deref_mut() {
        p.advance(1);
    }
}

fn canonical_if_following(path: &Path, opts: &TraversalOptions) -> Option<PathBuf> {
    if opts.follow_symlinks {
        fs::canonicalize(path).ok()
    } else {
        None
    }
}

/// Lists and sorts one directory. `None` when the depth limit stops here,
/// when listing failed (already reported), or when it is empty.
#[allow(clippy::too_many_arguments)]
fn open_frame(
    path: &Path,
    prefix: String,
    level: usize,
    canonical: Option<PathBuf>,
    tick_on_pop: bool,
    opts: &TraversalOptions,
    sink: &mut dyn TreeSink,
    stats: &mut RenderStats,
) -> Result<Option<Frame>, TreeError> {
    if opts.cuts_off(level) {
        return Ok(None);
    }

    let rd = match fs::read_dir(path) {
        Ok(r) => r,
        Err(e) => {
            stats.read_errors += 1;
            sink.problem(&prefix, &TreeError::read(path, e))?;
            return Ok(None);
        }
    };

    let mut entries = Vec::new();
    for de in rd {
        match de {
            Ok(de) => entries.push(Entry::from_dir_entry(&de)),
            Err(e) => {
                stats.read_errors += 1;
                sink.problem(&prefix, &TreeError::read(path, e))?;
            }
        }
    }
    if entries.is_empty() {
        return Ok(None);
    }

    sort_entries(&mut entries);

    Ok(Some(Frame {
        entries,
        idx: 0,
        prefix,
        level,
        canonical,
        tick_on_pop,
    }))
}

/// Directories (and anything else that is not a plain file) first, then
/// case-insensitive name, then raw name so the order is total.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by_cached_key(|e| (e.is_file(), e.name.to_lowercase(), e.name.clone()));
}

// ---------------------------------------------------------------------
// CLI entry
// ---------------------------------------------------------------------
pub fn run_tree(cli: &Cli) -> Result<()> {
    let root = cli.path.clone().unwrap_or_else(|| PathBuf::from("."));
    let opts = TraversalOptions::from_cli(cli);

    match render_to_stdout(&root, cli, &opts) {
        Ok(stats) => {
            if stats.read_errors > 0 {
                eprintln!("[warn] {} path(s) could not be read", stats.read_errors);
            }
            Ok(())
        }
        Err(TreeError::NotADirectory { .. }) => {
            eprintln!("Error: The specified path is not a valid directory.");
            Ok(())
        }
        Err(e) if e.is_broken_pipe() => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn render_to_stdout(
    root: &Path,
    cli: &Cli,
    opts: &TraversalOptions,
) -> Result<RenderStats, TreeError> {
    ensure_directory(root)?;
    let mut sink: Box<dyn TreeSink> = match cli.format {
        Format::Plain => {
            let mut out = StandardStream::stdout(color_choice(cli.color));
            if !cli.no_banner {
                write_banner(&mut out)?;
            }
            Box::new(PlainSink::new(out))
        }
        Format::Json => Box::new(JsonSink::new(io::stdout().lock())),
    };

    if cli.no_progress || !io::stderr().is_terminal() {
        return render(root, opts, sink.as_mut(), None);
    }

    let bar = progress::start(root);
    let mut ticks = bar.clone();
    let result = render(
        root,
        opts,
        &mut Suspended::new(sink.as_mut(), &bar),
        Some(&mut ticks),
    );
    bar.finish_and_clear();
    result
}
