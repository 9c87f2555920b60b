use crate::sink::ReportSink;
use crate::{Error, Result};
use nsstats_core::CheckerConfig;
use nsstats_types::{AssertionKind, AssertionRecord, Expectation, Summary};
use regex::Regex;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Where a checker's log snapshot came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSource {
    pub pid: String,
    pub process_index: u32,
    pub user: String,
    pub path: PathBuf,
}

/// One loaded log snapshot plus the assertions run against it
pub struct LogChecker {
    prefix: String,
    source: Option<LogSource>,
    content: String,
    compiled: RefCell<HashMap<String, Regex>>,
    records: Vec<AssertionRecord>,
    sink: Option<Box<dyn ReportSink>>,
}

impl fmt::Debug for LogChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogChecker")
            .field("prefix", &self.prefix)
            .field("source", &self.source)
            .field("content_len", &self.content.len())
            .field("records", &self.records.len())
            .finish()
    }
}

impl LogChecker {
    /// Resolve and load the log of process `process_index`.
    ///
    /// Reads the pid file named by `config`, derives
    /// `<log_dir>/<user>_test<pid>.<process_index>` and loads it whole. Either
    /// read failing is fatal: nothing can be checked without the log. Bytes
    /// that are not valid UTF-8 are replaced rather than rejected.
    pub fn open(
        config: &CheckerConfig,
        process_index: u32,
        prefix: impl Into<String>,
    ) -> Result<Self> {
        let prefix = prefix.into();

        let pid = config.read_pid().inspect_err(|e| {
            tracing::error!(prefix = %prefix, "{}", e);
        })?;

        let path = config.log_file(&pid, process_index);
        let bytes = std::fs::read(&path).map_err(|source| {
            let err = Error::LogFile {
                path: path.clone(),
                source,
            };
            tracing::error!(prefix = %prefix, "{}", err);
            err
        })?;

        // Stray non-UTF-8 bytes become U+FFFD; the rest of the log is still checked
        let content = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(path = %path.display(), "log is not valid UTF-8");
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };

        tracing::debug!(
            path = %path.display(),
            bytes = content.len(),
            "loaded log snapshot"
        );

        let mut checker = Self::from_content(content, prefix);
        checker.source = Some(LogSource {
            pid,
            process_index,
            user: config.user.clone(),
            path,
        });
        Ok(checker)
    }

    /// Checker over text that is already in memory
    pub fn from_content(content: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            source: None,
            content: content.into(),
            compiled: RefCell::new(HashMap::new()),
            records: Vec::new(),
            sink: None,
        }
    }

    /// Forward every record to `sink` as it is produced
    pub fn with_sink(mut self, sink: Box<dyn ReportSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `None` for checkers built with [`LogChecker::from_content`]
    pub fn source(&self) -> Option<&LogSource> {
        self.source.as_ref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Number of non-overlapping matches of `pattern` in the whole log
    pub fn count_matches(&self, pattern: &str) -> Result<usize> {
        let re = self.compile(pattern)?;
        Ok(re.find_iter(&self.content).count())
    }

    /// OK when `min <= count <= max`
    pub fn assert_count_in_range(
        &mut self,
        pattern: &str,
        min: usize,
        max: usize,
    ) -> Result<usize> {
        self.check(AssertionKind::InRange, pattern, Expectation::between(min, max))
    }

    /// OK when `count >= min`
    pub fn assert_count_at_least(&mut self, pattern: &str, min: usize) -> Result<usize> {
        self.check(AssertionKind::AtLeast, pattern, Expectation::at_least(min))
    }

    /// OK when the pattern does not occur
    pub fn assert_count_absent(&mut self, pattern: &str) -> Result<usize> {
        self.check(AssertionKind::Absent, pattern, Expectation::none())
    }

    /// OK when the pattern occurs at least once
    pub fn assert_count_present(&mut self, pattern: &str) -> Result<usize> {
        self.check(AssertionKind::Present, pattern, Expectation::some())
    }

    pub fn records(&self) -> &[AssertionRecord] {
        &self.records
    }

    pub fn summary(&self) -> Summary {
        Summary::from_records(&self.records)
    }

    /// Report lines so far, prefixed
    pub fn lines(&self) -> Vec<String> {
        self.records.iter().map(|r| r.line(&self.prefix)).collect()
    }

    fn check(
        &mut self,
        kind: AssertionKind,
        pattern: &str,
        expected: Expectation,
    ) -> Result<usize> {
        let observed = self.count_matches(pattern)?;
        let record = AssertionRecord::evaluate(kind, pattern, observed, expected);

        tracing::debug!(
            status = %record.status,
            ?kind,
            observed,
            "checked pattern"
        );

        if let Some(sink) = self.sink.as_mut() {
            sink.report(&self.prefix, &record);
        }
        self.records.push(record);

        Ok(observed)
    }

    fn compile(&self, pattern: &str) -> Result<Regex> {
        if let Some(re) = self.compiled.borrow().get(pattern) {
            return Ok(re.clone());
        }

        let re = Regex::new(pattern).map_err(|source| Error::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.compiled
            .borrow_mut()
            .insert(pattern.to_string(), re.clone());
        Ok(re)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsstats_types::Status;
    use std::rc::Rc;

    const LOG: &str = "\
INFO [nsStatistics] STATISTICS OF NOTIFICATION FACTORY Alarm [ Active event channels='AlarmChannel' Num active event channels='1' ]
INFO [nsStatistics] STATISTICS OF NOTIFICATION FACTORY Logging [ Active event channels='LoggingChannel' Num active event channels='1' ]
INFO [nsStatistics] STATISTICS OF NOTIFICATION FACTORY Logging [ Active event channels='LoggingChannel' Num active event channels='1' ]
";

    #[test]
    fn test_count_matches_is_idempotent() {
        let checker = LogChecker::from_content(LOG, "");
        let pattern = "STATISTICS OF NOTIFICATION FACTORY Logging";

        assert_eq!(checker.count_matches(pattern).unwrap(), 2);
        assert_eq!(checker.count_matches(pattern).unwrap(), 2);
    }

    #[test]
    fn test_exact_range_passes_only_on_exact_count() {
        let mut checker = LogChecker::from_content(LOG, "");
        let pattern = "FACTORY Logging";

        assert_eq!(checker.assert_count_in_range(pattern, 2, 2).unwrap(), 2);
        assert_eq!(checker.assert_count_in_range(pattern, 1, 1).unwrap(), 2);
        assert_eq!(checker.assert_count_in_range(pattern, 3, 3).unwrap(), 2);

        let statuses: Vec<Status> = checker.records().iter().map(|r| r.status).collect();
        assert_eq!(statuses, vec![Status::Ok, Status::Fail, Status::Fail]);
    }

    #[test]
    fn test_at_least_zero_always_passes() {
        let mut checker = LogChecker::from_content("", "");
        assert_eq!(checker.assert_count_at_least("anything", 0).unwrap(), 0);
        assert!(checker.summary().all_passed());
    }

    #[test]
    fn test_failures_do_not_stop_later_checks() {
        let mut checker = LogChecker::from_content(LOG, "Test1");

        checker.assert_count_absent("FACTORY Alarm").unwrap();
        checker.assert_count_present("FACTORY Archive").unwrap();
        checker.assert_count_present("FACTORY Alarm").unwrap();

        assert_eq!(
            checker.lines(),
            vec![
                "Test1 FAIL - Pattern 'FACTORY Alarm' found 1 times",
                "Test1 FAIL - Pattern 'FACTORY Archive' not found",
                "Test1 OK - Pattern 'FACTORY Alarm' found",
            ]
        );
        let summary = checker.summary();
        assert_eq!((summary.passed, summary.failed), (1, 2));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let checker = LogChecker::from_content(LOG, "");
        let err = checker.count_matches("(unclosed").unwrap_err();
        assert!(matches!(err, Error::Pattern { .. }));
    }

    #[test]
    fn test_sink_sees_each_record() {
        struct Shared(Rc<RefCell<Vec<String>>>);

        impl ReportSink for Shared {
            fn report(&mut self, prefix: &str, record: &AssertionRecord) {
                self.0.borrow_mut().push(record.line(prefix));
            }
        }

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut checker =
            LogChecker::from_content(LOG, "T").with_sink(Box::new(Shared(Rc::clone(&seen))));

        checker.assert_count_absent("nothing here").unwrap();

        assert_eq!(
            seen.borrow().as_slice(),
            ["T OK - Pattern 'nothing here' not found"]
        );
    }
}
