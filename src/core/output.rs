use std::io::{self, IsTerminal, Write};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, WriteColor};

use crate::cli::ColorMode;
use crate::core::progress::Overlay;
use crate::core::tree::TreeLine;
use crate::error::TreeError;
use crate::utils::{format_size, EntryKind, Highlight};

pub const BANNER: &str = "Directory Tree Structure:";

/// Where rendered lines go. Implementations must write each line as soon as
/// it arrives; the tree is streamed.
pub trait TreeSink {
    fn entry(&mut self, line: &TreeLine<'_>) -> io::Result<()>;

    /// A subtree or entry that could not be read, shown where it would have been.
    fn problem(&mut self, prefix: &str, err: &TreeError) -> io::Result<()>;
}

pub fn color_choice(mode: ColorMode) -> ColorChoice {
    match mode {
        ColorMode::Auto if io::stdout().is_terminal() => ColorChoice::Auto,
        ColorMode::Auto => ColorChoice::Never,
        ColorMode::Always => ColorChoice::Always,
        ColorMode::Never => ColorChoice::Never,
    }
}

pub fn highlight_spec(highlight: Highlight) -> Option<ColorSpec> {
    let color = match highlight {
        Highlight::Match => Color::Red,
        Highlight::Directory => Color::Blue,
        Highlight::SourceFile => Color::Yellow,
        Highlight::Plain => return None,
    };
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(color));
    Some(spec)
}

pub fn write_banner(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{BANNER}")?;
    writeln!(out)
}

/// Hides `overlay` (the progress bar) around every write to `inner`, so
/// tree lines never share a terminal row with it.
pub struct Suspended<'a> {
    inner: &'a mut dyn TreeSink,
    overlay: &'a dyn Overlay,
}

impl<'a> Suspended<'a> {
    pub fn new(inner: &'a mut dyn TreeSink, overlay: &'a dyn Overlay) -> Self {
        Self { inner, overlay }
    }
}

impl TreeSink for Suspended<'_> {
    fn entry(&mut self, line: &TreeLine<'_>) -> io::Result<()> {
        let inner = &mut *self.inner;
        self.overlay.suspend_for(&mut || inner.entry(line))
    }

    fn problem(&mut self, prefix: &str, err: &TreeError) -> io::Result<()> {
        let inner = &mut *self.inner;
        self.overlay.suspend_for(&mut || inner.problem(prefix, err))
    }
}

// ---------------------------------------------------------------------
// Plain text
// ---------------------------------------------------------------------
pub struct PlainSink<W: WriteColor> {
    out: W,
}

impl<W: WriteColor> PlainSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: WriteColor> TreeSink for PlainSink<W> {
    fn entry(&mut self, line: &TreeLine<'_>) -> io::Result<()> {
        write!(self.out, "{}{}", line.prefix, line.connector)?;
        match highlight_spec(line.highlight) {
            Some(spec) => {
                self.out.set_color(&spec)?;
                write!(self.out, "{}", line.entry.name)?;
                self.out.reset()?;
            }
            None => write!(self.out, "{}", line.entry.name)?,
        }
        if let Some(size) = line.entry.size {
            write!(self.out, " ({})", format_size(size))?;
        }
        if line.circular {
            write!(self.out, "  [skipped: circular link]")?;
        }
        writeln!(self.out)
    }

    fn problem(&mut self, prefix: &str, err: &TreeError) -> io::Result<()> {
        write!(self.out, "{prefix}")?;
        self.out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
        write!(self.out, "[error: {err}]")?;
        self.out.reset()?;
        writeln!(self.out)
    }
}

// ---------------------------------------------------------------------
// NDJSON
// ---------------------------------------------------------------------
#[derive(Serialize)]
struct JsonLine<'a> {
    name: &'a str,
    path: String,
    depth: usize,
    kind: EntryKind,
    highlight: Highlight,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_human: Option<String>,
    is_last: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    circular: bool,
    line: String,
}

#[derive(Serialize)]
struct JsonProblem {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    error: String,
}

pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TreeSink for JsonSink<W> {
    fn entry(&mut self, line: &TreeLine<'_>) -> io::Result<()> {
        let entry = line.entry;
        let record = JsonLine {
            name: &entry.name,
            path: entry.path.display().to_string(),
            depth: line.depth,
            kind: entry.kind,
            highlight: line.highlight,
            size: entry.size,
            size_human: entry.size.map(format_size),
            is_last: line.is_last,
            circular: line.circular,
            line: line.plain_text(),
        };
        serde_json::to_writer(&mut self.out, &record)?;
        writeln!(self.out)
    }

    fn problem(&mut self, _prefix: &str, err: &TreeError) -> io::Result<()> {
        let path = match err {
            TreeError::NotADirectory { path } | TreeError::DirectoryRead { path, .. } => {
                Some(path.display().to_string())
            }
            TreeError::Output(_) => None,
        };
        let record = JsonProblem {
            path,
            error: err.to_string(),
        };
        serde_json::to_writer(&mut self.out, &record)?;
        writeln!(self.out)
    }
}
