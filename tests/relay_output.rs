mod common;
use crate::common::init_tracing;

use std::error::Error;

use watchrun::supervisor::relay::relay_lines;
use watchrun::supervisor::ChildHandle;

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn relays_lines_in_order() {
    init_tracing();

    let input: &[u8] = b"a\nb\n";
    let mut output = Vec::new();

    relay_lines(input, &mut output, false).await;

    assert_eq!(output, b"a\nb\n");
}

#[tokio::test]
async fn verbose_emits_tagged_copy_first() {
    init_tracing();

    let input: &[u8] = b"a\nb\n";
    let mut output = Vec::new();

    relay_lines(input, &mut output, true).await;

    assert_eq!(output, b"| a\na\n| b\nb\n");
}

#[tokio::test]
async fn relay_stops_at_end_of_stream() {
    init_tracing();

    let input: &[u8] = b"";
    let mut output = Vec::new();

    // Must return, not hang or retry.
    relay_lines(input, &mut output, false).await;

    assert!(output.is_empty());
}

#[tokio::test]
async fn relay_drains_a_real_child_stream() -> TestResult {
    init_tracing();

    let (mut child, stdout, stderr) = ChildHandle::spawn("echo a; echo b; echo oops >&2")?;

    let mut out = Vec::new();
    let mut err = Vec::new();
    relay_lines(stdout, &mut out, false).await;
    relay_lines(stderr, &mut err, false).await;
    child.wait().await?;

    assert_eq!(out, b"a\nb\n");
    assert_eq!(err, b"oops\n");
    Ok(())
}
