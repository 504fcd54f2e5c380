use crate::error::Error;
use std::cell::RefCell;
use std::io::{Stdout, Write};

/// Write all stdout outputs in the app
///
/// In either plain text mode or structured (JSON) mode.
#[derive(Default)]
pub(crate) struct Writer {
    is_structured: bool,

    /// Collects stdout output instead of printing it
    captured: Option<RefCell<String>>,
}

impl Writer {
    pub(crate) fn new(is_structured: bool) -> Self {
        Writer {
            is_structured,
            captured: None,
        }
    }

    /// A writer keeping stdout output in memory
    #[cfg(test)]
    pub(crate) fn buffered(is_structured: bool) -> Self {
        Writer {
            is_structured,
            captured: Some(RefCell::new(String::new())),
        }
    }

    /// Output plain text
    ///
    /// Prints out nothing but a warning (in warn log level) when the writer is in structured mode.
    pub(crate) fn text(&self, output: &str) -> Result<(), Error> {
        if self.is_structured {
            log::warn!("Skipping output (not structured data): {output}");
            return Ok(());
        }

        self.write(output)
    }

    /// Output serialized JSON
    ///
    /// Prints out nothing but a warning (in warn log level) when the writer is in plain text mode.
    pub(crate) fn json(&self, output: serde_json::Value) -> Result<(), Error> {
        if !self.is_structured {
            log::warn!("Skipping output (not plain text): {output}");
            return Ok(());
        }

        self.write(&format!("{output}\n"))
    }

    /// General method for writing to stdout
    fn write(&self, output: &str) -> Result<(), Error> {
        if let Some(captured) = &self.captured {
            captured.borrow_mut().push_str(output);
            return Ok(());
        }

        let mut stdout: Stdout = std::io::stdout();

        stdout
            .write_all(output.as_bytes())
            .and_then(|_| stdout.flush())
            .map_err(|e| {
                log::error!("Error while writing to stdout: {e:?}");
                Error::new("Output error", Some("Could not write the report to the terminal"))
            })
    }

    /// Everything written to stdout so far, in buffered mode
    #[cfg(test)]
    pub(crate) fn output(&self) -> String {
        self.captured
            .as_ref()
            .map(|captured| captured.borrow().clone())
            .unwrap_or_default()
    }
}
