use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

use tracing::Level;

/// Lines kept by the handle returned from [`capture_logs`].
pub const DEFAULT_MAX_LINES: usize = 2000;

static CAPTURE: OnceLock<LogCapture> = OnceLock::new();

#[derive(Debug)]
struct CaptureBuffer {
    lines: VecDeque<String>,
    max_lines: usize,
    pending: Vec<u8>,
}

impl CaptureBuffer {
    fn new(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            max_lines: max_lines.max(1),
            pending: Vec::new(),
        }
    }

    fn push_line(&mut self, line: String) {
        self.lines.push_back(line);
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
    }

    fn absorb(&mut self, data: &[u8]) {
        self.pending.extend_from_slice(data);
        let Some(pos) = self.pending.iter().rposition(|b| *b == b'\n') else {
            return;
        };
        let drained: Vec<u8> = self.pending.drain(..=pos).collect();
        let text = String::from_utf8_lossy(&drained).into_owned();
        for line in text.split('\n') {
            if !line.is_empty() {
                self.push_line(line.to_string());
            }
        }
    }
}

/// Shared in-memory sink for log output, for hosts that show logs in their
/// own surface instead of a terminal. Keeps only the most recent lines.
#[derive(Clone, Debug)]
pub struct LogCapture {
    inner: Arc<Mutex<CaptureBuffer>>,
}

impl Default for LogCapture {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES)
    }
}

impl LogCapture {
    pub fn new(max_lines: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CaptureBuffer::new(max_lines))),
        }
    }

    /// Retained lines, oldest first, followed by any unterminated tail.
    pub fn contents(&self) -> String {
        let buf = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let mut out = String::new();
        for line in &buf.lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&String::from_utf8_lossy(&buf.pending));
        out
    }

    /// Complete lines only, oldest first.
    pub fn lines(&self) -> Vec<String> {
        let buf = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        buf.lines.iter().cloned().collect()
    }

    pub fn max_lines(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).max_lines
    }

    pub fn clear(&self) {
        let mut buf = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        buf.lines.clear();
        buf.pending.clear();
    }
}

impl Write for LogCapture {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .absorb(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route all subsequent log output into memory. Returns the same handle on
/// every call.
pub fn capture_logs() -> LogCapture {
    CAPTURE.get_or_init(LogCapture::default).clone()
}

pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    Capture(LogCapture),
    Stderr(io::Stderr),
}

impl DelegatingWriter {
    fn new() -> Self {
        if let Some(capture) = CAPTURE.get() {
            DelegatingWriter {
                inner: DelegatingInner::Capture(capture.clone()),
            }
        } else {
            DelegatingWriter {
                inner: DelegatingInner::Stderr(io::stderr()),
            }
        }
    }
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::Capture(c) => c.write(buf),
            DelegatingInner::Stderr(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::Capture(c) => c.flush(),
            DelegatingInner::Stderr(s) => s.flush(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SubscriberMakeWriter;

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        DelegatingWriter::new()
    }
}

/// Initialize the global subscriber at `DEBUG`. Writes go to the capture
/// buffer once [`capture_logs`] has been called, otherwise to stderr. Safe to
/// call multiple times; later calls are no-ops.
pub fn init_default() {
    init_with_filter(Level::DEBUG);
}

/// Same as [`init_default`] with a caller-chosen maximum level. Window
/// movement is logged at `TRACE`.
pub fn init_with_filter(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(SubscriberMakeWriter)
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}
