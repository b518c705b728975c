//! PTY provisioning via `portable-pty`, with the master file descriptor put
//! into non-blocking mode so term-app's readiness-based run loop (§5) can
//! poll it alongside the window connection and stdin instead of dedicating
//! a reader thread to it.
//!
//! @module term-platform/pty

use portable_pty::{native_pty_system, Child, CommandBuilder, MasterPty, PtySize};
use std::io::{ErrorKind, Read, Write};

use term_common::errors::PtyError;

/// A spawned shell living inside a pseudo-terminal.
///
/// Unlike a reader-thread design, [`PtyHandle::read`] is genuinely
/// non-blocking: the master fd is marked `O_NONBLOCK` at construction time
/// (§6 "the master file descriptor is set non-blocking after creation"),
/// so a `WouldBlock` read simply means "nothing ready yet" rather than
/// something the caller needs a background thread to avoid.
pub struct PtyHandle {
    master: Box<dyn MasterPty + Send>,
    writer: Box<dyn Write + Send>,
    reader: Box<dyn Read + Send>,
    child: Box<dyn Child + Send + Sync>,
}

impl PtyHandle {
    /// Spawn `shell` (with `args`) inside a PTY of the given size.
    pub fn spawn(
        shell: &str,
        args: &[String],
        cols: u16,
        rows: u16,
    ) -> Result<Self, PtyError> {
        let pty_system = native_pty_system();

        let pair = pty_system
            .openpty(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| PtyError::SpawnFailed(e.to_string()))?;

        let mut cmd = CommandBuilder::new(shell);
        cmd.args(args);
        cmd.env("TERM", "xterm-256color");

        let child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| PtyError::SpawnFailed(e.to_string()))?;
        drop(pair.slave);

        let reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| PtyError::SpawnFailed(e.to_string()))?;

        let writer = pair
            .master
            .take_writer()
            .map_err(|e| PtyError::SpawnFailed(e.to_string()))?;

        #[cfg(unix)]
        {
            if let Some(fd) = pair.master.as_raw_fd() {
                set_nonblocking(fd)?;
            }
        }

        Ok(PtyHandle {
            master: pair.master,
            writer,
            reader,
            child,
        })
    }

    /// The master fd the run loop registers with `mio` for readability.
    #[cfg(unix)]
    pub fn raw_fd(&self) -> Option<std::os::unix::io::RawFd> {
        self.master.as_raw_fd()
    }

    /// Drain whatever is currently available from the child. `Ok(0)` means
    /// the fd would have blocked, not that the child exited (see
    /// [`PtyHandle::is_alive`] for that).
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, PtyError> {
        match self.reader.read(buf) {
            Ok(n) => Ok(n),
            Err(e) if e.kind() == ErrorKind::WouldBlock => Ok(0),
            Err(e) => Err(PtyError::Io(e)),
        }
    }

    /// Write user input to the child, looping over short writes (§5).
    pub fn write_all(&mut self, mut data: &[u8]) -> Result<(), PtyError> {
        while !data.is_empty() {
            match self.writer.write(data) {
                Ok(0) => break,
                Ok(n) => data = &data[n..],
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(PtyError::Io(e)),
            }
        }
        self.writer.flush().map_err(PtyError::Io)
    }

    pub fn resize(&self, cols: u16, rows: u16) -> Result<(), PtyError> {
        self.master
            .resize(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| PtyError::ResizeFailed(e.to_string()))
    }

    pub fn is_alive(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    pub fn kill(&mut self) {
        let _ = self.child.kill();
    }

    pub fn wait(&mut self) -> Option<portable_pty::ExitStatus> {
        self.child.wait().ok()
    }
}

impl Drop for PtyHandle {
    fn drop(&mut self) {
        let _ = self.child.kill();
    }
}

#[cfg(unix)]
fn set_nonblocking(fd: std::os::fd::RawFd) -> Result<(), PtyError> {
    // SAFETY: `fd` is the master's own fd, valid for the lifetime of this
    // call; fcntl with F_GETFL/F_SETFL does not take ownership of it.
    unsafe {
        let flags = libc::fcntl(fd, libc::F_GETFL, 0);
        if flags < 0 {
            return Err(PtyError::Io(std::io::Error::last_os_error()));
        }
        if libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) < 0 {
            return Err(PtyError::Io(std::io::Error::last_os_error()));
        }
    }
    Ok(())
}
