//! Signal handling.
//!
//! Ctrl+C, SIGTERM, SIGQUIT or a closed terminal (SIGHUP) would otherwise
//! kill the process without running any destructor, leaving the session file
//! behind. A single-worker tokio runtime listens for those signals, removes
//! the file, wipes the screen and exits with status 128 + the signal number.
//!
//! The watcher is installed before the session file exists; the file is
//! handed over with [`SignalGuard::watch`] once it has been created. The
//! runtime lives as long as the returned guard.

use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::{Arc, OnceLock};

use tokio::runtime::{Builder, Runtime};
use tracing::info;

use crate::screen;

/// Keeps the signal watcher alive.
pub struct SignalGuard {
    target: Arc<OnceLock<PathBuf>>,
    _runtime: Runtime,
}

impl SignalGuard {
    /// Remove `artifact` if a signal arrives from now on.
    pub fn watch(&self, artifact: &Path) {
        let _ = self.target.set(artifact.to_path_buf());
    }
}

/// Start watching for termination signals.
pub fn install() -> Result<SignalGuard, String> {
    let runtime = Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("trustee-signals")
        .enable_all()
        .build()
        .map_err(|e| format!("cannot start signal watcher: {e}"))?;

    let shutdown = {
        let _ctx = runtime.enter();
        ShutdownSignal::register().map_err(|e| format!("cannot watch signals: {e}"))?
    };

    let target = Arc::new(OnceLock::new());
    let watched = Arc::clone(&target);
    runtime.spawn(async move {
        let (name, status) = shutdown.recv().await;
        info!(signal = name, "interrupted");
        cleanup(&watched);
        process::exit(status);
    });

    Ok(SignalGuard {
        target,
        _runtime: runtime,
    })
}

/// Best effort only: after SIGHUP the terminal may already be gone.
fn cleanup(target: &OnceLock<PathBuf>) {
    let removed = match remove_target(target) {
        Ok(removed) => removed,
        Err(e) => {
            let path = target.get().map(|p| p.display().to_string()).unwrap_or_default();
            let _ = writeln!(io::stderr(), "warning: could not remove temporary file {path}: {e}");
            false
        }
    };

    let mut out = io::stdout();
    let _ = screen::wipe(&mut out);
    let message = if removed {
        "Interrupted. Temporary file cleaned up."
    } else {
        "Interrupted."
    };
    let _ = writeln!(out, "{message}").and_then(|()| out.flush());
}

/// Delete the watched file. `Ok(false)` when no file has been handed over yet.
fn remove_target(target: &OnceLock<PathBuf>) -> io::Result<bool> {
    let Some(path) = target.get() else {
        return Ok(false);
    };
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(true),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
struct ShutdownSignal {
    hangup: tokio::signal::unix::Signal,
    interrupt: tokio::signal::unix::Signal,
    quit: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl ShutdownSignal {
    /// Registers handlers immediately; must run inside the runtime context.
    fn register() -> io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Self {
            hangup: signal(SignalKind::hangup())?,
            interrupt: signal(SignalKind::interrupt())?,
            quit: signal(SignalKind::quit())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    /// Signal name and the conventional exit status for it.
    async fn recv(mut self) -> (&'static str, i32) {
        tokio::select! {
            _ = self.hangup.recv() => ("SIGHUP", 129),
            _ = self.interrupt.recv() => ("SIGINT", 130),
            _ = self.quit.recv() => ("SIGQUIT", 131),
            _ = self.terminate.recv() => ("SIGTERM", 143),
        }
    }
}

#[cfg(not(unix))]
struct ShutdownSignal {
    ctrl_c: tokio::signal::windows::CtrlC,
    close: tokio::signal::windows::CtrlClose,
}

#[cfg(not(unix))]
impl ShutdownSignal {
    fn register() -> io::Result<Self> {
        Ok(Self {
            ctrl_c: tokio::signal::windows::ctrl_c()?,
            close: tokio::signal::windows::ctrl_close()?,
        })
    }

    async fn recv(mut self) -> (&'static str, i32) {
        tokio::select! {
            _ = self.ctrl_c.recv() => ("Ctrl+C", 130),
            _ = self.close.recv() => ("console closed", 129),
        }
    }
}
