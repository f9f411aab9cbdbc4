use crate::error::{CliError, Result};
use crate::ui::UiEvent;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, MakeWriter, writer::BoxMakeWriter},
    prelude::*,
};

/// Installs the global subscriber.
///
/// Console lines go through the progress UI when `ui_sender` is given, so they do not tear the
/// progress bars; otherwise they go straight to stderr.
pub fn setup_logging(
    verbosity: u8,
    quiet: bool,
    log_file: Option<PathBuf>,
    ui_sender: Option<mpsc::Sender<UiEvent>>,
) -> Result<()> {
    let level_filter = if quiet {
        LevelFilter::ERROR
    } else {
        match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    let console_writer = match ui_sender {
        Some(sender) => BoxMakeWriter::new(UiLogWriter { sender }),
        None => BoxMakeWriter::new(io::stderr),
    };
    let console_layer = fmt::layer()
        .with_writer(console_writer)
        .with_ansi(true)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(level_filter)
        .with(console_layer);

    let result = if let Some(path) = log_file {
        let file = File::create(&path).map_err(CliError::Io)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_thread_ids(true)
            .with_target(true);

        subscriber.with(file_layer).try_init()
    } else {
        subscriber.try_init()
    };

    result.map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install logger: {}", e)))
}

/// Hands every formatted log line to the UI task as a [`UiEvent::Log`].
#[derive(Clone)]
struct UiLogWriter {
    sender: mpsc::Sender<UiEvent>,
}

impl<'a> MakeWriter<'a> for UiLogWriter {
    type Writer = UiLogLine;

    fn make_writer(&'a self) -> Self::Writer {
        UiLogLine {
            sender: self.sender.clone(),
            buffer: Vec::new(),
        }
    }
}

/// Buffers one event and sends it when dropped. Falls back to stderr if the UI is gone or busy.
struct UiLogLine {
    sender: mpsc::Sender<UiEvent>,
    buffer: Vec<u8>,
}

impl Write for UiLogLine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for UiLogLine {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buffer).trim_end().to_string();
        if self.sender.try_send(UiEvent::Log(line)).is_err() {
            let _ = io::stderr().write_all(&self.buffer);
        }
    }
}
