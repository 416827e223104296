use super::*;
use chrono::NaiveDate;

const EPSILON: f64 = 1e-9;

fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn two_camera_report() -> HealthReport {
    let lost: FrameTally = [("A", 1)].into_iter().collect();
    let missing: FrameTally = [("B", 3)].into_iter().collect();

    HealthReport::compute(&lost, &missing, &ids(&["A", "B"]), 60, 60, 2)
}

#[test]
fn test_expected_frames_baseline() {
    let report = two_camera_report();

    assert_eq!(report.expected_frames, 3600);
    assert_eq!(report.total_expected_frames, 7200);
}

#[test]
fn test_per_camera_percentages() {
    let report = two_camera_report();

    let a = report.camera("A").unwrap();
    assert_eq!(a.frames_lost, 1);
    assert_eq!(a.frames_missing_data, 0);
    assert!((a.lost_percent - 1.0 / 36.0).abs() < EPSILON);
    assert!((a.issue_percent - 0.027_777_777_8).abs() < 1e-6);

    let b = report.camera("B").unwrap();
    assert_eq!(b.frames_lost, 0);
    assert_eq!(b.frames_missing_data, 3);
    assert_eq!(b.issue_frames, 3);
    assert!((b.missing_data_percent - 3.0 / 36.0).abs() < EPSILON);
    assert!((b.issue_percent - 0.083_333_333_3).abs() < 1e-6);
}

#[test]
fn test_aggregate_over_all_cameras() {
    let report = two_camera_report();

    assert_eq!(report.total_issue_frames, 4);
    assert!((report.aggregate_percent - 4.0 / 7200.0 * 100.0).abs() < EPSILON);
}

#[test]
fn test_absent_cameras_count_as_zero() {
    let report = HealthReport::compute(
        &FrameTally::new(),
        &FrameTally::new(),
        &ids(&["Basler_22176483"]),
        60,
        3600,
        1,
    );

    let camera = report.camera("Basler_22176483").unwrap();
    assert_eq!(camera.issue_frames, 0);
    assert_eq!(camera.issue_percent, 0.0);
    assert_eq!(camera.status, HealthStatus::Healthy);
    assert_eq!(report.silent_cameras, vec!["Basler_22176483"]);
}

#[test]
fn test_aggregate_uses_configured_camera_count() {
    let lost: FrameTally = [("A", 36)].into_iter().collect();

    let report = HealthReport::compute(&lost, &FrameTally::new(), &ids(&["A"]), 60, 60, 4);

    assert_eq!(report.total_expected_frames, 14_400);
    assert!((report.aggregate_percent - 0.25).abs() < EPSILON);
    assert!(report.to_string().contains("Only 1 of 4 expected cameras"));
}

#[test]
fn test_unregistered_cameras_are_listed() {
    let lost: FrameTally = [("A", 1), ("Z", 2)].into_iter().collect();
    let missing: FrameTally = [("Z", 1), ("Y", 5)].into_iter().collect();

    let report = HealthReport::compute(&lost, &missing, &ids(&["A"]), 60, 60, 1);

    assert_eq!(report.unregistered_cameras, vec!["Y", "Z"]);
    assert_eq!(report.total_issue_frames, 1);
}

#[test]
fn test_status_classification() {
    let thresholds = HealthThresholds {
        warning_percent: 0.05,
        critical_percent: 0.08,
    };

    let report = two_camera_report().with_thresholds(thresholds);

    assert_eq!(report.camera("A").unwrap().status, HealthStatus::Healthy);
    assert_eq!(report.camera("B").unwrap().status, HealthStatus::Critical);
    assert_eq!(report.status, HealthStatus::Warning);
    assert_eq!(report.worst_status(), HealthStatus::Critical);
}

#[test]
fn test_classify_boundaries() {
    let thresholds = HealthThresholds::default();

    assert_eq!(HealthStatus::classify(0.0, &thresholds), HealthStatus::Healthy);
    assert_eq!(HealthStatus::classify(0.1, &thresholds), HealthStatus::Warning);
    assert_eq!(HealthStatus::classify(1.0, &thresholds), HealthStatus::Critical);
}

#[test]
fn test_text_rendering() {
    let started = NaiveDate::from_ymd_opt(2019, 11, 7)
        .unwrap()
        .and_hms_opt(11, 0, 0)
        .unwrap();
    let report = two_camera_report()
        .with_session_start(Some(started))
        .with_log_file("/tmp/flydra_mainbrain-1.log");

    let text = report.to_string();

    assert!(text.contains(" - Working with file: /tmp/flydra_mainbrain-1.log"));
    assert!(text.contains(" - Session started: 2019-11-07 11:00:00"));
    assert!(text.contains(" * Camera: A -- 1 frames lost over 3600 (0.028 % of frames lost)"));
    assert!(text.contains(" * Camera: B -- 3 frames with missing info over 3600 (0.083 % of frames lost)"));
    assert!(text.contains("(# of frames lost: 3)"));
    assert!(text.contains(" * 4 frames over the total of 7200 had an issue"));
}

#[test]
fn test_json_rendering() {
    let report = two_camera_report();

    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["expected_frames"], 3600);
    assert_eq!(value["total_issue_frames"], 4);
    assert_eq!(value["cameras"][1]["camera_id"], "B");
    assert_eq!(value["cameras"][1]["frames_missing_data"], 3);
    assert_eq!(value["status"], "healthy");
    assert!(value["session_start"].is_null());
}

#[test]
fn test_huge_expectations_saturate() {
    let lost: FrameTally = [("A", u64::MAX)].into_iter().collect();
    let missing: FrameTally = [("A", 1)].into_iter().collect();

    let report = HealthReport::compute(
        &lost,
        &missing,
        &ids(&["A"]),
        u32::MAX,
        u64::MAX / 2,
        usize::MAX,
    );

    assert_eq!(report.expected_frames, u64::MAX);
    assert_eq!(report.total_expected_frames, u64::MAX);
    assert_eq!(report.cameras[0].issue_frames, u64::MAX);
    assert_eq!(report.total_issue_frames, u64::MAX);
}

#[test]
fn test_compute_is_deterministic() {
    assert_eq!(two_camera_report(), two_camera_report());
}
