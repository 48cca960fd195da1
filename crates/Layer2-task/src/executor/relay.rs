//! Line filter relay for the plugin's stderr
//!
//! Reads a byte stream, splits it into `\n` lines (a trailing `\r` is
//! dropped, an unterminated final line is still processed) and writes every
//! line the filter keeps, followed by `\n`.
//!
//! The reader is always drained to EOF. Closing the pipe early would make the
//! plugin die on its next stderr write.

use ecssh_foundation::strings::SESSION_START_MARKER;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::warn;

/// Decides which lines are dropped
pub trait LineFilter: Send + Sync {
    /// `true` to drop `line`
    fn suppress(&self, line: &str) -> bool;
}

impl<F> LineFilter for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn suppress(&self, line: &str) -> bool {
        self(line)
    }
}

/// Drops the plugin's "Starting session with SessionId:" notice
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionNoticeFilter;

impl LineFilter for SessionNoticeFilter {
    fn suppress(&self, line: &str) -> bool {
        line.contains(SESSION_START_MARKER)
    }
}

/// Drops a line when any member filter drops it
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn LineFilter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters applied to Session Manager plugin stderr
    pub fn plugin_default() -> Self {
        Self::new().with(SessionNoticeFilter)
    }

    pub fn with(mut self, filter: impl LineFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl LineFilter for FilterChain {
    fn suppress(&self, line: &str) -> bool {
        self.filters.iter().any(|f| f.suppress(line))
    }
}

/// Line counts of a finished relay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    pub forwarded: usize,
    pub suppressed: usize,
    /// Kept lines read after the writer failed
    pub discarded: usize,
}

/// Copy `reader` to `writer` line by line, dropping filtered lines.
///
/// Runs until `reader` reaches EOF. Each forwarded line is flushed
/// immediately. After the first write failure the remaining lines are read
/// and discarded; only read failures end the relay early.
pub async fn relay_lines<R, W, F>(reader: R, mut writer: W, filter: &F) -> std::io::Result<RelayStats>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    F: LineFilter + ?Sized,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut stats = RelayStats::default();
    let mut sink_open = true;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let text = String::from_utf8_lossy(&buf);
        let line = text.trim_end_matches(['\n', '\r']);
        if filter.suppress(line) {
            stats.suppressed += 1;
            continue;
        }

        if !sink_open {
            stats.discarded += 1;
            continue;
        }

        match write_line(&mut writer, line).await {
            Ok(()) => stats.forwarded += 1,
            Err(e) => {
                warn!(error = %e, "stderr sink failed, discarding remaining lines");
                sink_open = false;
                stats.discarded += 1;
            }
        }
    }

    Ok(stats)
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> std::io::Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}
