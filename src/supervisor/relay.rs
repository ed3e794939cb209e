// src/supervisor/relay.rs

//! Output relays: forward one child stream to the supervisor's own output,
//! line by line.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::{ChildStderr, ChildStdout};
use tokio::task::JoinHandle;
use tracing::debug;

/// Marker prepended to the tagged copy of each line in verbose mode.
const VERBOSE_TAG: &str = "| ";

/// Forward `reader` to `writer` one line at a time.
///
/// In verbose mode every line is preceded by a tagged copy of itself. The
/// relay stops at end-of-stream or on the first read or write error; its
/// lifetime is exactly one child's lifetime and it never resurrects itself.
///
/// Generic over reader and writer so tests can drive it with in-memory
/// buffers; production binds the child pipes to the process streams below.
pub async fn relay_lines<R, W>(reader: R, mut writer: W, verbose: bool)
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(reader).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        let out = if verbose {
            format!("{VERBOSE_TAG}{line}\n{line}\n")
        } else {
            format!("{line}\n")
        };
        if writer.write_all(out.as_bytes()).await.is_err() {
            break;
        }
        if writer.flush().await.is_err() {
            break;
        }
    }

    debug!("output relay finished");
}

/// Spawn the relay for the child's stdout.
pub fn spawn_stdout_relay(stdout: ChildStdout, verbose: bool) -> JoinHandle<()> {
    tokio::spawn(relay_lines(stdout, tokio::io::stdout(), verbose))
}

/// Spawn the relay for the child's stderr.
pub fn spawn_stderr_relay(stderr: ChildStderr, verbose: bool) -> JoinHandle<()> {
    tokio::spawn(relay_lines(stderr, tokio::io::stderr(), verbose))
}
