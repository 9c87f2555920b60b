use nsstats_checker::{Error, LogChecker};
use nsstats_core::CheckerConfig;
use nsstats_patterns::{factory_header, factory_stats};
use std::path::Path;
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(pid: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::create_dir_all(dir.path().join("tmp")).unwrap();
        std::fs::write(dir.path().join("tmp").join("pid_test"), pid).unwrap();
        Self { dir }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn config(&self) -> CheckerConfig {
        CheckerConfig::new(self.root().join("tmp/pid_test"), self.root(), "tester")
    }

    fn write_log(&self, name: &str, content: impl AsRef<[u8]>) {
        std::fs::write(self.root().join(name), content).unwrap();
    }
}

const ALARM_ONLY: &str = "INFO [nsStatistics] STATISTICS OF NOTIFICATION FACTORY Alarm [ Active event channels='' Num active event channels='0' ]\n";

#[test]
fn test_open_reads_log_for_pid_and_index() {
    let fixture = Fixture::new("4711\n");
    fixture.write_log("tester_test4711.0", ALARM_ONLY);

    let mut checker = LogChecker::open(&fixture.config(), 0, "Test1").unwrap();

    let source = checker.source().unwrap();
    assert_eq!(source.pid, "4711");
    assert_eq!(source.path, fixture.root().join("tester_test4711.0"));

    assert_eq!(
        checker
            .assert_count_in_range(&factory_stats("Alarm"), 1, 2)
            .unwrap(),
        1
    );
    assert_eq!(
        checker
            .assert_count_absent(&factory_header("Archive"))
            .unwrap(),
        0
    );
    assert!(checker.summary().all_passed());
    assert_eq!(
        checker.lines()[1],
        "Test1 OK - Pattern 'STATISTICS OF NOTIFICATION FACTORY Archive' not found"
    );
}

#[test]
fn test_process_index_selects_file() {
    let fixture = Fixture::new("10");
    fixture.write_log("tester_test10.0", "");
    fixture.write_log("tester_test10.1", ALARM_ONLY);

    let first = LogChecker::open(&fixture.config(), 0, "").unwrap();
    let second = LogChecker::open(&fixture.config(), 1, "").unwrap();

    assert_eq!(first.count_matches("FACTORY Alarm").unwrap(), 0);
    assert_eq!(second.count_matches("FACTORY Alarm").unwrap(), 1);
}

#[test]
fn test_missing_pid_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = CheckerConfig::new(dir.path().join("tmp/pid_test"), dir.path(), "tester");

    let err = LogChecker::open(&config, 0, "").unwrap_err();
    assert!(matches!(err, Error::Setup(_)));
    assert!(err.to_string().contains("pid_test"));
}

#[test]
fn test_missing_log_file_is_fatal() {
    let fixture = Fixture::new("99");

    let err = LogChecker::open(&fixture.config(), 0, "").unwrap_err();
    assert!(matches!(err, Error::LogFile { .. }));
    assert!(err.to_string().contains("tester_test99.0"));
}

#[test]
fn test_empty_log_fails_every_presence_check() {
    let fixture = Fixture::new("5");
    fixture.write_log("tester_test5.0", "");
    let mut checker = LogChecker::open(&fixture.config(), 0, "").unwrap();

    for name in ["Alarm", "Archive", "Logging", "DefaultNotifyService"] {
        assert_eq!(checker.assert_count_present(&factory_stats(name)).unwrap(), 0);
    }

    let summary = checker.summary();
    assert_eq!(summary.total, 4);
    assert_eq!(summary.failed, 4);
}

#[test]
fn test_latin1_bytes_do_not_abort_loading() {
    let fixture = Fixture::new("77");
    let mut bytes = ALARM_ONLY.as_bytes().to_vec();
    bytes.extend_from_slice(b"INFO [Consumer] caf\xe9 reconnected\n");
    fixture.write_log("tester_test77.0", &bytes);

    let mut checker = LogChecker::open(&fixture.config(), 0, "Test1").unwrap();

    assert_eq!(
        checker
            .assert_count_in_range(&factory_stats("Alarm"), 1, 2)
            .unwrap(),
        1
    );
    assert!(checker.content().contains("caf\u{fffd} reconnected"));
    assert!(checker.summary().all_passed());
}
