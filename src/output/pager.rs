// src/output/pager.rs
// =============================================================================
// Shows long text (the language list) through $PAGER when one is available.
//
// Strategy:
// - PAGER unset or empty                  -> print directly
// - PAGER names a program we can't find   -> print directly
// - PAGER runs but fails                  -> print directly
// - stdout is a closed pipe (`| head`)    -> stop quietly
//
// The listing code only sees the Pager trait, so tests can capture output
// without spawning processes.
// =============================================================================

use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{anyhow, Context, Result};
use tracing::debug;

/// Something that can display a block of text to the user.
pub trait Pager {
    fn page(&self, text: &str) -> Result<()>;
}

/// Prints straight to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl Pager for Passthrough {
    fn page(&self, text: &str) -> Result<()> {
        write_text(&mut io::stdout().lock(), text).context("failed to write to stdout")
    }
}

// Unlike println!, returns EPIPE instead of panicking on it
fn write_text(out: &mut dyn Write, text: &str) -> io::Result<()> {
    writeln!(out, "{}", text)?;
    out.flush()
}

// True when the reader on the other end went away, e.g. `--list | head`
fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|e| e.kind() == io::ErrorKind::BrokenPipe)
}

/// Pipes text into an external program such as `less`.
#[derive(Debug, Clone)]
pub struct CommandPager {
    program: PathBuf,
}

impl CommandPager {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Pager for CommandPager {
    fn page(&self, text: &str) -> Result<()> {
        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .spawn()
            .with_context(|| format!("failed to start pager {}", self.program.display()))?;

        // Dropping stdin at the end of this block closes the pipe so the
        // pager sees EOF
        {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| anyhow!("pager stdin was not captured"))?;
            match stdin.write_all(text.as_bytes()) {
                // The user quit the pager before reading everything
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
                other => other.context("failed to write to pager")?,
            }
        }

        let status = child.wait().context("failed to wait for pager")?;
        if !status.success() {
            return Err(anyhow!("pager exited with {}", status));
        }

        Ok(())
    }
}

/// Pager selected from the `PAGER` environment variable.
pub fn pager_from_env() -> Box<dyn Pager> {
    let path_var = env::var_os("PATH");

    match env::var("PAGER")
        .ok()
        .and_then(|name| resolve_program(&name, path_var.as_deref()))
    {
        Some(program) => {
            debug!(pager = %program.display(), "using pager");
            Box::new(CommandPager::new(program))
        }
        None => Box::new(Passthrough),
    }
}

/// Displays `text` through `pager`, printing it directly if the pager fails.
pub fn show(pager: &dyn Pager, text: &str) {
    show_with_fallback(pager, text, &mut io::stdout().lock());
}

fn show_with_fallback(pager: &dyn Pager, text: &str, fallback: &mut dyn Write) {
    let err = match pager.page(text) {
        Ok(()) => return,
        Err(e) => e,
    };

    if is_broken_pipe(&err) {
        debug!("output closed before the list was fully written");
        return;
    }

    debug!(error = %format!("{:#}", err), "pager failed, printing directly");
    if let Err(e) = write_text(fallback, text) {
        debug!(error = %e, "could not print language list");
    }
}

// Finds an executable the way a shell would.
//
// Names containing a path separator are used as-is; bare names are looked
// up in each PATH directory.
fn resolve_program(name: &str, path_var: Option<&std::ffi::OsStr>) -> Option<PathBuf> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    env::split_paths(path_var?)
        .map(|dir| dir.join(name))
        .find(|p| is_executable(p))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Failing;

    impl Pager for Failing {
        fn page(&self, _text: &str) -> Result<()> {
            Err(anyhow!("boom"))
        }
    }

    struct Recording(RefCell<Vec<String>>);

    impl Pager for Recording {
        fn page(&self, text: &str) -> Result<()> {
            self.0.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_empty_pager_name_is_ignored() {
        assert_eq!(resolve_program("", None), None);
        assert_eq!(resolve_program("   ", None), None);
    }

    #[test]
    fn test_unknown_program_is_not_resolved() {
        let dir = tempfile::tempdir().unwrap();
        let path = env::join_paths([dir.path()]).unwrap();

        assert_eq!(resolve_program("definitely-not-a-pager", Some(path.as_os_str())), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_program_found_on_path() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let program = dir.path().join("mypager");
        std::fs::write(&program, "#!/bin/sh\ncat\n").unwrap();
        std::fs::set_permissions(&program, std::fs::Permissions::from_mode(0o755)).unwrap();

        let path = env::join_paths([dir.path()]).unwrap();
        assert_eq!(resolve_program("mypager", Some(path.as_os_str())), Some(program.clone()));

        // Absolute names skip the PATH search
        let absolute = program.to_string_lossy().to_string();
        assert_eq!(resolve_program(&absolute, None), Some(program));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes"), "plain file").unwrap();

        let path = env::join_paths([dir.path()]).unwrap();
        assert_eq!(resolve_program("notes", Some(path.as_os_str())), None);
    }

    #[test]
    fn test_show_uses_pager() {
        let pager = Recording(RefCell::new(Vec::new()));
        show(&pager, "Available languages:\n\ngo");
        assert_eq!(pager.0.borrow().as_slice(), ["Available languages:\n\ngo"]);
    }

    // A reader that has already hung up
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    // Same as Passthrough, but aimed at a closed pipe
    struct PipedToHead;

    impl Pager for PipedToHead {
        fn page(&self, text: &str) -> Result<()> {
            write_text(&mut ClosedPipe, text).context("failed to write to stdout")
        }
    }

    #[test]
    fn test_write_text_reports_broken_pipe() {
        let err = write_text(&mut ClosedPipe, "go\npython").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_broken_pipe_is_not_retried() {
        let mut fallback = Vec::new();
        show_with_fallback(&PipedToHead, "Available languages:\n\ngo", &mut fallback);
        assert!(fallback.is_empty());
    }

    #[test]
    fn test_failing_pager_falls_back_to_direct_output() {
        let mut fallback = Vec::new();
        show_with_fallback(&Failing, "Available languages:\n\ngo", &mut fallback);
        assert_eq!(fallback, b"Available languages:\n\ngo\n");
    }

    #[test]
    fn test_fallback_into_closed_pipe_does_not_panic() {
        show_with_fallback(&Failing, "Available languages:\n", &mut ClosedPipe);
    }

    #[test]
    fn test_missing_command_pager_errors() {
        let pager = CommandPager::new("/nonexistent/pager-binary");
        assert!(pager.page("text").is_err());
    }
}
