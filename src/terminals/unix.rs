// Unix terminal implementation using termios over stdin/stdout

use crate::{Result, Terminal};
use std::io::{self, Write};
use std::os::unix::io::{AsRawFd, RawFd};

/// Scoped raw-mode token: the terminal configuration saved for `fd` when raw
/// mode was entered.
///
/// The configuration is restored exactly once — explicitly through
/// [`restore`](Self::restore), or on drop if the session unwinds first.
pub struct RawMode {
    fd: RawFd,
    saved: libc::termios,
}

impl RawMode {
    /// Switches `fd` to cbreak-style raw input: no line buffering, no local
    /// echo, single-byte reads without timeout.
    pub fn enter(fd: RawFd) -> io::Result<Self> {
        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();

            if libc::tcgetattr(fd, &mut termios) != 0 {
                return Err(io::Error::last_os_error());
            }

            let saved = termios;

            // Disable canonical mode and echo
            termios.c_lflag &= !(libc::ECHO | libc::ICANON);

            // Block for one byte at a time, no read timeout
            termios.c_cc[libc::VMIN] = 1;
            termios.c_cc[libc::VTIME] = 0;

            if libc::tcsetattr(fd, libc::TCSAFLUSH, &termios) != 0 {
                return Err(io::Error::last_os_error());
            }

            Ok(Self { fd, saved })
        }
    }

    /// Restores the saved configuration, reporting failure.
    pub fn restore(self) -> io::Result<()> {
        let rc = unsafe { libc::tcsetattr(self.fd, libc::TCSAFLUSH, &self.saved) };
        std::mem::forget(self);

        if rc == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        // Unwind path; a failure here has nowhere to be reported
        unsafe {
            libc::tcsetattr(self.fd, libc::TCSAFLUSH, &self.saved);
        }
    }
}

/// Unix terminal over process stdin/stdout with termios raw-mode control.
pub struct StdioTerminal {
    stdin: io::Stdin,
    stdout: io::Stdout,
    raw: Option<RawMode>,
}

impl StdioTerminal {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
            raw: None,
        }
    }
}

impl Default for StdioTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for StdioTerminal {
    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize> {
        let fd = self.stdin.as_raw_fd();

        // One read(2) per logical key, so a complete escape sequence already
        // queued by the tty arrives as a single chunk
        loop {
            let n = unsafe { libc::read(fd, buf.as_mut_ptr() as *mut libc::c_void, buf.len()) };

            if n >= 0 {
                return Ok(n as usize);
            }

            let err = io::Error::last_os_error();
            if err.kind() != io::ErrorKind::Interrupted {
                return Err(err.into());
            }
        }
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.stdout.write_all(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        if self.raw.is_none() {
            self.raw = Some(RawMode::enter(self.stdin.as_raw_fd())?);
        }

        Ok(())
    }

    fn exit_raw_mode(&mut self) -> Result<()> {
        if let Some(raw) = self.raw.take() {
            raw.restore()?;
        }

        Ok(())
    }
}
