use std::io::{BufRead, Write};

/// The host capabilities the evaluator needs: an output sink and an input
/// sink.
///
/// The interpreter never touches stdin or stdout directly; the `print` and
/// `prompt` built-ins go through whatever implementation was injected at
/// construction. Tests substitute a recording implementation, embedders
/// substitute their own.
pub trait HostIo {
    /// Writes `text` to the output sink, verbatim.
    fn write(&mut self, text: &str);

    /// Shows `prompt` on the output sink and blocks for one line of input.
    ///
    /// Returns the line without its terminator, or `None` when the input
    /// is exhausted.
    fn read_line(&mut self, prompt: &str) -> Option<String>;
}

/// The process's own stdin and stdout.
pub struct StdIo;

impl HostIo for StdIo {
    fn write(&mut self, text: &str) {
        print!("{text}");
        let _ = std::io::stdout().flush();
    }

    fn read_line(&mut self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                while line.ends_with(['\n', '\r']) {
                    line.pop();
                }
                Some(line)
            },
        }
    }
}
