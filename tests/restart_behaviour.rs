mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::fs;
use std::path::Path;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use watchrun::config::RunConfig;
use watchrun::errors::WatchrunError;
use watchrun::supervisor::Supervisor;
use watchrun::watch::split_include_list;

type TestResult = Result<(), Box<dyn Error>>;

/// Poll until `path` holds at least `want` lines (or give up after ~5s).
async fn wait_for_lines(path: &Path, want: usize) -> Vec<String> {
    for _ in 0..200 {
        if let Ok(contents) = fs::read_to_string(path) {
            let lines: Vec<String> = contents.lines().map(str::to_string).collect();
            if lines.len() >= want {
                return lines;
            }
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("{path:?} never reached {want} lines");
}

#[tokio::test]
async fn file_change_restarts_after_full_drain() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("w.txt"), "seed")?;
    let log = dir.path().join("out.log");

    // Every execution logs `start` on spawn and `stop` when its group gets
    // SIGTERM, so the log is a timeline of the supervisor's sequencing.
    let cmd = format!(
        "trap 'echo stop >> {0}; exit 0' TERM; echo start >> {0}; while :; do sleep 0.05; done",
        log.display()
    );

    let config = RunConfig {
        command: cmd,
        include: vec!["w.txt".to_string()],
        verbose: false,
    };
    let (stop_tx, stop_rx) = mpsc::channel(1);
    let mut supervisor = Supervisor::new(config, dir.path().to_path_buf(), stop_rx);
    let handle = tokio::spawn(async move { supervisor.run().await });

    wait_for_lines(&log, 1).await;
    // Give the cycle a moment to finish registering its watch set.
    tokio::time::sleep(Duration::from_millis(300)).await;

    fs::write(dir.path().join("w.txt"), "changed")?;

    // Old run fully retired (stop) strictly before the new one starts:
    // no overlapping executions, output drained between generations.
    let lines = wait_for_lines(&log, 3).await;
    assert_eq!(lines[..3], ["start", "stop", "start"]);

    stop_tx.send(()).await?;
    timeout(Duration::from_secs(10), handle).await???;

    let lines = wait_for_lines(&log, 4).await;
    assert_eq!(lines, ["start", "stop", "start", "stop"]);
    Ok(())
}

#[tokio::test]
async fn empty_include_runs_once_until_terminated() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let log = dir.path().join("out.log");
    let config = RunConfig {
        command: format!("echo hi >> {}", log.display()),
        include: split_include_list(""),
        verbose: false,
    };

    let (stop_tx, stop_rx) = mpsc::channel(1);
    let mut supervisor = Supervisor::new(config, dir.path().to_path_buf(), stop_rx);
    let handle = tokio::spawn(async move { supervisor.run().await });

    wait_for_lines(&log, 1).await;
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(wait_for_lines(&log, 1).await, ["hi"]);

    // Nothing is watched, so only an external termination ends the run.
    stop_tx.send(()).await?;
    timeout(Duration::from_secs(10), handle).await???;

    assert_eq!(fs::read_to_string(&log)?, "hi\n");
    Ok(())
}

#[tokio::test]
async fn creation_in_unregistered_directory_does_not_restart() -> TestResult {
    init_tracing();

    // `dir/*.txt` matches nothing at cycle start, so nothing is registered:
    // the watch set stays fixed until the next resolution, and a file
    // created inside `dir` mid-cycle is invisible.
    let dir = tempfile::tempdir()?;
    fs::create_dir(dir.path().join("dir"))?;
    let log = dir.path().join("out.log");

    let config = RunConfig {
        command: format!("echo run >> {}", log.display()),
        include: vec!["dir/*.txt".to_string()],
        verbose: false,
    };

    let (stop_tx, stop_rx) = mpsc::channel(1);
    let mut supervisor = Supervisor::new(config, dir.path().to_path_buf(), stop_rx);
    let handle = tokio::spawn(async move { supervisor.run().await });

    wait_for_lines(&log, 1).await;
    tokio::time::sleep(Duration::from_millis(300)).await;

    fs::write(dir.path().join("dir/a.txt"), "new")?;
    tokio::time::sleep(Duration::from_millis(700)).await;

    assert_eq!(fs::read_to_string(&log)?, "run\n");

    stop_tx.send(()).await?;
    timeout(Duration::from_secs(10), handle).await???;
    Ok(())
}

#[tokio::test]
async fn invalid_include_pattern_aborts_the_run() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let config = RunConfig {
        command: "sleep 5".to_string(),
        include: vec!["[".to_string()],
        verbose: false,
    };

    let (_stop_tx, stop_rx) = mpsc::channel(1);
    let mut supervisor = Supervisor::new(config, dir.path().to_path_buf(), stop_rx);

    let err = supervisor.run().await.unwrap_err();
    assert!(matches!(err, WatchrunError::Pattern { .. }));
    Ok(())
}
