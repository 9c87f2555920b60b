use nsstats_testing::assertions::assert_all_ok;
use nsstats_testing::{SampleLog, TestWorld};

#[test]
fn test_config_file_in_working_directory() {
    let world = TestWorld::new()
        .without_pid_file()
        .with_config_file("pid_file = \"state/harness.pid\"\n")
        .with_sample(0, &SampleLog::passing(1));
    std::fs::create_dir_all(world.root().join("state")).unwrap();
    std::fs::write(world.root().join("state/harness.pid"), "4242").unwrap();

    let result = world.run(&["1"]).unwrap();

    assert!(result.success(), "{}", result.stderr());
    assert_all_ok(result.stdout()).unwrap();
}

#[test]
fn test_command_line_beats_environment() {
    let world = TestWorld::new();
    let other_logs = world.root().join("other");
    std::fs::create_dir_all(&other_logs).unwrap();
    std::fs::write(
        other_logs.join("tester_test4242.0"),
        SampleLog::passing(3).build(),
    )
    .unwrap();

    let log_dir = other_logs.to_string_lossy().to_string();
    let result = world.run(&["3", "--log-dir", &log_dir]).unwrap();

    assert!(result.success(), "{}", result.stderr());
    assert_all_ok(result.stdout()).unwrap();
}

#[test]
fn test_user_option_changes_file_name() {
    let world = TestWorld::new();
    std::fs::write(
        world.log_dir().join("almamgr_test4242.0"),
        SampleLog::passing(2).build(),
    )
    .unwrap();

    let result = world.run(&["2", "--user", "almamgr"]).unwrap();

    assert!(result.success(), "{}", result.stderr());
    assert_all_ok(result.stdout()).unwrap();
}

#[test]
fn test_environment_beats_config_file() {
    let world = TestWorld::new()
        .with_config_file("pid_file = \"missing/pid\"\n")
        .with_env("NSSTATS_PID_FILE", "tmp/pid_test")
        .with_sample(0, &SampleLog::passing(1));

    let result = world.run(&["1"]).unwrap();

    assert!(result.success(), "{}", result.stderr());
    assert_all_ok(result.stdout()).unwrap();
}
