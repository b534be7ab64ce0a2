//! Console command parsing and dispatch.
//!
//! A dedicated thread blocks on stdin and hands each line to the registered
//! handlers, in registration order, synchronously. A slow handler therefore
//! delays later console input but never the gateway. When the stop command is
//! enabled and a line equals the stop keyword, the reader signals shutdown
//! and exits.

use std::io::BufRead;
use std::thread;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

/// A console line split into a command name and arguments.
///
/// The name is the first whitespace-delimited token; the remaining tokens are
/// the arguments. The raw line is kept as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleCommand {
    raw: String,
    name: String,
    args: Vec<String>,
}

impl ConsoleCommand {
    /// Parses a console line. `"test arg1  arg2"` becomes name `"test"` with
    /// arguments `["arg1", "arg2"]`.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or_default().to_string();
        let args = parts.map(str::to_string).collect();
        Self {
            raw: line.to_string(),
            name,
            args,
        }
    }

    /// The full raw line as typed.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The command name (first whitespace-delimited token).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The arguments after the command name.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The argument at `index`, if present.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

impl std::fmt::Display for ConsoleCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A registered console command handler.
pub type ConsoleHandler = Box<dyn Fn(&ConsoleCommand) + Send + Sync>;

/// Spawns the blocking stdin reader thread.
pub(crate) fn spawn_reader(
    handlers: Vec<ConsoleHandler>,
    stop_keyword: Option<String>,
    stop_tx: UnboundedSender<()>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        read_loop(
            std::io::stdin().lock(),
            &handlers,
            stop_keyword.as_deref(),
            &stop_tx,
        );
    })
}

/// The reader loop behind [`spawn_reader`].
///
/// Each line is parsed into a [`ConsoleCommand`] and dispatched to every
/// handler in registration order. When `stop_keyword` is `Some` and the raw
/// line equals it, a unit is sent on `stop_tx` and the loop exits without
/// dispatching that line; the bot side turns the signal into a gateway
/// shutdown. With no stop keyword the line goes to the handlers like any
/// other.
fn read_loop(
    input: impl BufRead,
    handlers: &[ConsoleHandler],
    stop_keyword: Option<&str>,
    stop_tx: &UnboundedSender<()>,
) {
    for line in input.lines() {
        let Ok(line) = line else { break };
        if stop_keyword == Some(line.as_str()) {
            info!("Stop command received from console");
            let _ = stop_tx.send(());
            return;
        }
        let command = ConsoleCommand::parse(&line);
        debug!("Dispatching console command: {}", command.name());
        for handler in handlers {
            handler(&command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_name_and_args() {
        let command = ConsoleCommand::parse("test arg1 arg2");
        assert_eq!(command.name(), "test");
        assert_eq!(command.args(), ["arg1", "arg2"]);
        assert_eq!(command.raw(), "test arg1 arg2");
    }

    #[test]
    fn splits_on_runs_of_whitespace() {
        let command = ConsoleCommand::parse("  test \t arg1   arg2 ");
        assert_eq!(command.name(), "test");
        assert_eq!(command.args(), ["arg1", "arg2"]);
    }

    #[test]
    fn no_args() {
        let command = ConsoleCommand::parse("stop");
        assert_eq!(command.name(), "stop");
        assert!(command.args().is_empty());
        assert_eq!(command.arg(0), None);
    }

    #[test]
    fn empty_line() {
        let command = ConsoleCommand::parse("");
        assert_eq!(command.name(), "");
        assert!(command.args().is_empty());
    }

    #[test]
    fn arg_accessor() {
        let command = ConsoleCommand::parse("say hello world");
        assert_eq!(command.arg(0), Some("hello"));
        assert_eq!(command.arg(1), Some("world"));
        assert_eq!(command.arg(2), None);
    }

    mod reader {
        use super::super::*;
        use std::io::Cursor;
        use std::sync::{Arc, Mutex};
        use tokio::sync::mpsc;

        fn recording_handler(log: &Arc<Mutex<Vec<String>>>, tag: &str) -> ConsoleHandler {
            let log = Arc::clone(log);
            let tag = tag.to_string();
            Box::new(move |command| {
                log.lock().unwrap().push(format!("{tag}:{}", command.name()));
            })
        }

        #[test]
        fn handlers_run_in_registration_order() {
            let log = Arc::new(Mutex::new(Vec::new()));
            let handlers = vec![
                recording_handler(&log, "first"),
                recording_handler(&log, "second"),
            ];
            let (stop_tx, _stop_rx) = mpsc::unbounded_channel();
            read_loop(Cursor::new("ping\npong\n"), &handlers, None, &stop_tx);
            assert_eq!(
                *log.lock().unwrap(),
                ["first:ping", "second:ping", "first:pong", "second:pong"]
            );
        }

        #[test]
        fn stop_line_signals_and_ends_dispatch() {
            let log = Arc::new(Mutex::new(Vec::new()));
            let handlers = vec![recording_handler(&log, "h")];
            let (stop_tx, mut stop_rx) = mpsc::unbounded_channel();
            read_loop(
                Cursor::new("before\nstop\nafter\n"),
                &handlers,
                Some("stop"),
                &stop_tx,
            );
            // The stop line itself and everything after it never reach handlers
            assert_eq!(*log.lock().unwrap(), ["h:before"]);
            assert!(stop_rx.try_recv().is_ok());
        }

        #[test]
        fn without_a_stop_keyword_stop_is_an_ordinary_command() {
            let log = Arc::new(Mutex::new(Vec::new()));
            let handlers = vec![recording_handler(&log, "h")];
            let (stop_tx, mut stop_rx) = mpsc::unbounded_channel();
            read_loop(Cursor::new("stop\n"), &handlers, None, &stop_tx);
            assert_eq!(*log.lock().unwrap(), ["h:stop"]);
            assert!(stop_rx.try_recv().is_err());
        }

        #[test]
        fn keyword_must_match_the_raw_line() {
            let log = Arc::new(Mutex::new(Vec::new()));
            let handlers = vec![recording_handler(&log, "h")];
            let (stop_tx, mut stop_rx) = mpsc::unbounded_channel();
            read_loop(Cursor::new("stop now\n"), &handlers, Some("stop"), &stop_tx);
            assert_eq!(*log.lock().unwrap(), ["h:stop"]);
            assert!(stop_rx.try_recv().is_err());
        }
    }
}
