use is_terminal::IsTerminal;
use nsstats_checker::ReportSink;
use nsstats_types::{AssertionRecord, Status};
use owo_colors::OwoColorize;

/// Prints each report line to stdout as soon as it is produced
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    color: bool,
}

impl ConsoleSink {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Colour only when stdout is a terminal; piped output stays byte-exact
    pub fn for_stdout() -> Self {
        Self::new(std::io::stdout().is_terminal())
    }

    pub fn render_line(&self, prefix: &str, record: &AssertionRecord) -> String {
        if !self.color {
            return record.line(prefix);
        }

        let text = record.to_string();
        let status = record.status.to_string();
        let rest = &text[status.len()..];
        let token = match record.status {
            Status::Ok => status.green().bold().to_string(),
            Status::Fail => status.red().bold().to_string(),
        };

        if prefix.is_empty() {
            format!("{}{}", token, rest)
        } else {
            format!("{} {}{}", prefix, token, rest)
        }
    }
}

impl ReportSink for ConsoleSink {
    fn report(&mut self, prefix: &str, record: &AssertionRecord) {
        println!("{}", self.render_line(prefix, record));
    }
}
