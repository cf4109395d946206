//! Interactive raw-mode shell front end.
//!
//! This library reads keystrokes one at a time from a terminal in raw mode,
//! renders an editable command line, recalls previously entered lines with
//! the arrow keys, and dispatches each finished line to a registered command
//! handler. All editing logic is separated from I/O through the [`Terminal`]
//! trait, so the same state machine runs against a real tty or against
//! scripted input in tests.
//!
//! # Features
//!
//! - **Key decoding**: one chunked read per logical key, enough to capture a
//!   complete arrow-key escape sequence
//! - **History recall**: append-only log with adjacent-duplicate suppression
//!   and circular or clamped up/down navigation
//! - **Cursorless rendering**: the visible line is always `prompt + buffer`,
//!   redrawn by overwriting the previous width with spaces at column 0
//! - **Command dispatch**: whitespace-split lines routed through a name →
//!   handler table; handler failures are reported, never fatal
//! - **Scoped raw mode**: the terminal configuration is restored on every
//!   exit path
//!
//! # Quick Start
//!
//! ```no_run
//! use lineshell::terminals::StdioTerminal;
//! use lineshell::{CommandSet, History, Outcome, Shell};
//!
//! let mut commands = CommandSet::new();
//! commands.register("greet", |args: &[&str]| {
//!     println!("hello {}", args.join(" "));
//!     Ok(Outcome::Continue)
//! });
//! commands.register("exit", |_: &[&str]| Ok(Outcome::Exit));
//!
//! let mut shell = Shell::new("> ", History::new(true), commands);
//! let mut terminal = StdioTerminal::new();
//! shell.run(&mut terminal)?;
//! # Ok::<(), lineshell::Error>(())
//! ```
//!
//! # Architecture
//!
//! - [`KeyEvent`]: the decoded key alphabet and the chunk decoder
//! - [`History`]: recall log with its cursor
//! - [`Shell`]: the REPL loop — raw-mode lifecycle, per-key dispatch,
//!   rendering, and submission
//! - [`CommandSet`]: the name → handler table the shell submits lines to
//!
//! Platform I/O lives behind the [`Terminal`] trait; a Unix termios
//! implementation is provided in [`terminals`].

use thiserror::Error;

mod command;
pub mod terminals;

pub use command::{Command, CommandError, CommandResult, CommandSet, DispatchError, Outcome};

/// Errors that can end a shell session.
///
/// Command-level failures are not represented here; they are contained at
/// the dispatch boundary (see [`DispatchError`]) and never terminate the
/// session.
#[derive(Debug, Error)]
pub enum Error {
    /// The input stream closed; there are no more keys to read.
    #[error("input stream closed")]
    Eof,
    /// Terminal I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for shell operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Logical key events decoded from raw input bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// A literal character, printable or control.
    Char(char),
    /// Up arrow (history previous)
    Up,
    /// Down arrow (history next)
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Tab
    Tab,
    /// Enter/Return
    Enter,
    /// Backspace/Delete
    Backspace,
}

impl KeyEvent {
    /// Reads one logical key from `terminal`.
    ///
    /// Performs a single chunk read of up to three bytes — enough to capture
    /// a complete arrow-key escape sequence — and decodes whatever arrived.
    /// Blocks until at least one byte is available. A zero-length read means
    /// the input stream closed, which is fatal to the session.
    pub fn read<T: Terminal>(terminal: &mut T) -> Result<Self> {
        let mut chunk = [0u8; 3];
        let n = terminal.read_chunk(&mut chunk)?;

        if n == 0 {
            return Err(Error::Eof);
        }

        Ok(Self::decode(&chunk[..n]))
    }

    /// Decodes one chunk of raw bytes into a logical key event.
    ///
    /// A three-byte chunk is treated as an escape sequence and keyed on its
    /// final byte: `ESC [ A` through `ESC [ D` become the arrow keys. Any
    /// other chunk is keyed on the literal value of its last byte. Escape
    /// sequences split across reads are not reassembled; each chunk decodes
    /// on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use lineshell::KeyEvent;
    ///
    /// assert_eq!(KeyEvent::decode(&[0x1b, b'[', b'A']), KeyEvent::Up);
    /// assert_eq!(KeyEvent::decode(&[b'A']), KeyEvent::Char('A'));
    /// ```
    pub fn decode(chunk: &[u8]) -> Self {
        match *chunk {
            [_, _, b'A'] => KeyEvent::Up,
            [_, _, b'B'] => KeyEvent::Down,
            [_, _, b'C'] => KeyEvent::Right,
            [_, _, b'D'] => KeyEvent::Left,
            [.., last] => Self::from_byte(last),
            // read_chunk never hands us an empty chunk; NUL keeps the match total
            [] => KeyEvent::Char('\0'),
        }
    }

    fn from_byte(byte: u8) -> Self {
        match byte {
            b'\r' | b'\n' => KeyEvent::Enter,
            b'\t' => KeyEvent::Tab,
            0x08 | 0x7f => KeyEvent::Backspace,
            _ => KeyEvent::Char(byte as char),
        }
    }
}

/// Terminal abstraction that separates the shell's state machine from I/O.
///
/// Implement this trait to drive the shell from any byte-oriented stream:
/// a real tty, a serial line, or scripted input in tests.
///
/// # Example
///
/// ```
/// use lineshell::{Terminal, Result};
///
/// struct MockTerminal {
///     input: Vec<u8>,
///     output: Vec<u8>,
/// }
///
/// impl Terminal for MockTerminal {
///     fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize> {
///         let n = self.input.len().min(buf.len());
///         buf[..n].copy_from_slice(&self.input[..n]);
///         self.input.drain(..n);
///         Ok(n)
///     }
///
///     fn write(&mut self, data: &[u8]) -> Result<()> {
///         self.output.extend_from_slice(data);
///         Ok(())
///     }
///
///     // ... implement the remaining methods
/// #   fn flush(&mut self) -> Result<()> { Ok(()) }
/// #   fn enter_raw_mode(&mut self) -> Result<()> { Ok(()) }
/// #   fn exit_raw_mode(&mut self) -> Result<()> { Ok(()) }
/// }
/// ```
pub trait Terminal {
    /// Reads one chunk of input, up to `buf.len()` bytes, blocking until at
    /// least one byte is available.
    ///
    /// Each call must correspond to one burst from the input source (one
    /// `read(2)` on Unix), so that a multi-byte escape sequence already
    /// queued by the tty arrives as a single chunk. Returns the number of
    /// bytes read; `0` means the stream closed.
    fn read_chunk(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Writes raw bytes to the output.
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Flushes any buffered output.
    ///
    /// Called after each key event to ensure immediate visual feedback.
    fn flush(&mut self) -> Result<()>;

    /// Enters raw mode for character-by-character input.
    ///
    /// Should disable line buffering and local echo, and save the prior
    /// configuration for [`exit_raw_mode`](Self::exit_raw_mode).
    fn enter_raw_mode(&mut self) -> Result<()>;

    /// Exits raw mode and restores the saved terminal configuration.
    fn exit_raw_mode(&mut self) -> Result<()>;
}

/// Append-only recall log of submitted lines.
///
/// Lines are deduplicated against the most recent entry, and the empty line
/// is never stored. A recall cursor walks the log via
/// [`previous`](Self::previous)/[`next_entry`](Self::next_entry); the
/// position one past the newest entry is the "fresh line" sentinel and reads
/// back as the empty string. The `circular` flag fixed at construction
/// decides whether the cursor wraps around the ends or clamps at them.
///
/// # Examples
///
/// ```
/// use lineshell::History;
///
/// let mut history = History::new(false);
/// history.push("first");
/// history.push("second");
///
/// assert_eq!(history.previous(), "second");
/// assert_eq!(history.previous(), "first");
/// assert_eq!(history.previous(), "first"); // clamped, never wraps
/// ```
pub struct History {
    entries: Vec<String>,
    cursor: usize,
    circular: bool,
}

impl History {
    /// Creates an empty history.
    ///
    /// With `circular` set, `previous` past the oldest entry wraps to the
    /// fresh-line sentinel and `next_entry` past the sentinel wraps back to
    /// the oldest entry; otherwise both clamp at the ends.
    pub fn new(circular: bool) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            circular,
        }
    }

    /// Appends a submitted line and resets the cursor to the fresh position.
    ///
    /// Empty lines and lines equal to the most recent entry are skipped
    /// entirely; a skipped push does not move the cursor either.
    pub fn push(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }

        if let Some(last) = self.entries.last() {
            if last == line {
                return;
            }
        }

        self.entries.push(line.to_string());
        self.cursor = self.entries.len();
    }

    /// Moves the cursor one step toward older entries and returns the entry
    /// there, or `""` at the fresh-line sentinel.
    pub fn previous(&mut self) -> &str {
        if self.circular && self.cursor == 0 {
            self.cursor = self.entries.len();
        } else if self.cursor > 0 {
            self.cursor -= 1;
        }

        self.current()
    }

    /// Moves the cursor one step toward newer entries and returns the entry
    /// there, or `""` at the fresh-line sentinel.
    pub fn next_entry(&mut self) -> &str {
        if self.circular && self.cursor == self.entries.len() {
            self.cursor = 0;
        } else if self.cursor < self.entries.len() {
            self.cursor += 1;
        }

        self.current()
    }

    /// The stored entries, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Current recall position, always in `[0, len]`; `len` is the
    /// fresh-line sentinel.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn current(&self) -> &str {
        self.entries.get(self.cursor).map(String::as_str).unwrap_or("")
    }
}

/// The interactive shell: prompt, line buffer, history, and command table.
///
/// [`run`](Self::run) drives a whole session — raw-mode lifecycle, key
/// handling, rendering, and dispatch of submitted lines. After every fully
/// processed key event the visible terminal line equals `prompt + buffer`.
///
/// # Examples
///
/// ```no_run
/// use lineshell::terminals::StdioTerminal;
/// use lineshell::{CommandSet, History, Outcome, Shell};
///
/// let mut commands = CommandSet::new();
/// commands.register("exit", |_: &[&str]| Ok(Outcome::Exit));
///
/// let mut shell = Shell::new("> ", History::new(true), commands);
/// let mut terminal = StdioTerminal::new();
/// shell.run(&mut terminal)?;
/// # Ok::<(), lineshell::Error>(())
/// ```
pub struct Shell {
    prompt: String,
    history: History,
    commands: CommandSet,
}

impl Shell {
    /// Creates a shell with the given prompt, history, and command table.
    pub fn new(prompt: impl Into<String>, history: History, commands: CommandSet) -> Self {
        Self {
            prompt: prompt.into(),
            history,
            commands,
        }
    }

    /// The history log for this session.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Runs the session until a command requests shutdown or the input
    /// stream fails.
    ///
    /// Raw mode is entered for the whole session and restored before this
    /// returns, on the success path and the failure path alike. A handler
    /// returning [`Outcome::Exit`] ends the session with `Ok(())`; a closed
    /// or unreadable input stream ends it with the underlying error.
    pub fn run<T: Terminal>(&mut self, terminal: &mut T) -> Result<()> {
        terminal.enter_raw_mode()?;

        let result = self.repl(terminal);

        // Always restore the terminal, even if the loop failed
        terminal.exit_raw_mode()?;

        result
    }

    fn repl<T: Terminal>(&mut self, terminal: &mut T) -> Result<()> {
        let mut buffer = String::new();

        terminal.write(self.prompt.as_bytes())?;
        terminal.flush()?;

        loop {
            match KeyEvent::read(terminal)? {
                KeyEvent::Up => {
                    let recalled = self.history.previous().to_string();
                    if !recalled.is_empty() || !buffer.is_empty() {
                        self.replace_line(terminal, &mut buffer, recalled)?;
                    }
                }
                KeyEvent::Down => {
                    let recalled = self.history.next_entry().to_string();
                    if !recalled.is_empty() || !buffer.is_empty() {
                        self.replace_line(terminal, &mut buffer, recalled)?;
                    }
                }
                KeyEvent::Tab => {
                    // Placeholder completion marker; real completion is out of scope
                    buffer.push_str("tab");
                    terminal.write(b"tab")?;
                }
                KeyEvent::Enter => {
                    terminal.write(b"\n")?;

                    if !buffer.is_empty() {
                        self.history.push(&buffer);

                        match self.commands.dispatch(&buffer) {
                            Ok(Outcome::Exit) => {
                                terminal.flush()?;
                                return Ok(());
                            }
                            Ok(Outcome::Continue) => {}
                            Err(err) => {
                                terminal.write(err.to_string().as_bytes())?;
                                terminal.write(b"\n")?;
                            }
                        }

                        buffer.clear();
                    }

                    terminal.write(self.prompt.as_bytes())?;
                }
                KeyEvent::Left | KeyEvent::Right => {
                    // Cursor stays pinned to the end of the line
                }
                KeyEvent::Backspace => {
                    if !buffer.is_empty() {
                        self.erase_line(terminal, &buffer)?;
                        buffer.pop();
                        terminal.write(self.prompt.as_bytes())?;
                        terminal.write(buffer.as_bytes())?;
                    }
                }
                KeyEvent::Char(c) => {
                    buffer.push(c);
                    let mut utf8 = [0u8; 4];
                    terminal.write(c.encode_utf8(&mut utf8).as_bytes())?;
                }
            }

            terminal.flush()?;
        }
    }

    /// Erases the rendered line by overwriting its full previous visible
    /// width with spaces, leaving the cursor back at column 0.
    ///
    /// Overwriting the whole previous width guarantees no stale trailing
    /// characters when the replacement is shorter.
    fn erase_line<T: Terminal>(&self, terminal: &mut T, buffer: &str) -> Result<()> {
        let width = self.prompt.chars().count() + buffer.chars().count();

        terminal.write(b"\r")?;
        terminal.write(" ".repeat(width).as_bytes())?;
        terminal.write(b"\r")?;

        Ok(())
    }

    fn replace_line<T: Terminal>(
        &self,
        terminal: &mut T,
        buffer: &mut String,
        recalled: String,
    ) -> Result<()> {
        self.erase_line(terminal, buffer)?;
        *buffer = recalled;
        terminal.write(self.prompt.as_bytes())?;
        terminal.write(buffer.as_bytes())?;

        Ok(())
    }
}
