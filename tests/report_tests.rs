//! Integration tests for session report export

use gradex::core::grades::Grade;
use gradex::core::models::{Session, SubjectRecord};
use gradex::core::report::{render, write_report, ReportContext, ReportFormat};
use std::fs;
use tempfile::TempDir;

fn reachable_session() -> Session {
    Session::new(
        "Sem 3".to_string(),
        vec![
            SubjectRecord::new("Maths", 50.0, Grade::A, 4),
            SubjectRecord::new("Physics", 50.0, Grade::BPlus, 3),
        ],
        53.0 / 7.0,
    )
}

#[test]
fn test_markdown_report_written_to_dir() {
    let dir = TempDir::new().expect("temp dir");
    let reports = dir.path().join("reports");
    let session = reachable_session();
    let ctx = ReportContext::from_session(&session);

    let path = write_report(&ctx, ReportFormat::Markdown, &reports).expect("write report");
    assert_eq!(path, reports.join("sem_3.md"));

    let text = fs::read_to_string(&path).expect("read");
    assert!(text.contains("\n# Sem 3\n"));
    assert!(text.contains("| Maths | 50.00 | A (8) | 4 | 39.38 | yes |"));
    assert!(text.contains("| Physics | 50.00 | B+ (7) | 3 | 20.63 | yes |"));
    assert!(text.contains("**SGPA:** 7.57"));
}

#[test]
fn test_html_report_marks_unreachable_subjects() {
    let session = Session::new(
        "Hopeful <draft>".to_string(),
        vec![
            SubjectRecord::new("Maths", 0.0, Grade::O, 4),
            SubjectRecord::new("OS", 20.0, Grade::B, 3),
        ],
        0.0,
    );
    let ctx = ReportContext::from_session(&session);
    let html = render(&ctx, ReportFormat::Html).expect("render");

    assert!(html.contains("Hopeful &lt;draft&gt;"));
    assert!(html.contains("class=\"unreachable\""));
    assert!(html.contains("170.63"));
    assert!(html.contains("58.13"));
    assert!(html.contains("Error in desired grade of Maths"));
    assert!(!html.contains("Estimated SGPA"));
}

#[test]
fn test_same_name_overwrites_previous_report() {
    let dir = TempDir::new().expect("temp dir");
    let session = reachable_session();
    let ctx = ReportContext::from_session(&session);

    let first = write_report(&ctx, ReportFormat::Html, dir.path()).expect("first");
    let second = write_report(&ctx, ReportFormat::Html, dir.path()).expect("second");
    assert_eq!(first, second);
    assert_eq!(
        fs::read_dir(dir.path()).expect("list").count(),
        1
    );
}

#[test]
fn test_sessions_sharing_a_stem_keep_separate_reports() {
    let dir = TempDir::new().expect("temp dir");
    let first = Session::new(
        "Sem 1".to_string(),
        vec![SubjectRecord::new("Maths", 50.0, Grade::A, 4)],
        8.0,
    );
    let second = Session::new(
        "Sem-1".to_string(),
        vec![SubjectRecord::new("Physics", 50.0, Grade::BPlus, 3)],
        7.0,
    );

    let first_path = write_report(
        &ReportContext::from_session(&first),
        ReportFormat::Markdown,
        dir.path(),
    )
    .expect("first export");
    let second_path = write_report(
        &ReportContext::from_session(&second),
        ReportFormat::Markdown,
        dir.path(),
    )
    .expect("second export");

    assert_eq!(first_path, dir.path().join("sem_1.md"));
    assert_eq!(second_path, dir.path().join("sem_1_2.md"));
    let first_text = fs::read_to_string(&first_path).expect("read first");
    let second_text = fs::read_to_string(&second_path).expect("read second");
    assert!(first_text.contains("| Maths |"));
    assert!(!first_text.contains("Physics"));
    assert!(second_text.contains("| Physics |"));

    // Re-exporting either session finds its own file again
    let again = write_report(
        &ReportContext::from_session(&second),
        ReportFormat::Markdown,
        dir.path(),
    )
    .expect("re-export");
    assert_eq!(again, second_path);
    assert_eq!(fs::read_dir(dir.path()).expect("list").count(), 2);
}

#[test]
fn test_unrelated_file_is_not_overwritten() {
    let dir = TempDir::new().expect("temp dir");
    let notes = dir.path().join("sem_3.html");
    fs::write(&notes, "my own notes").expect("write notes");

    let session = reachable_session();
    let path = write_report(
        &ReportContext::from_session(&session),
        ReportFormat::Html,
        dir.path(),
    )
    .expect("export");

    assert_eq!(path, dir.path().join("sem_3_2.html"));
    assert_eq!(fs::read_to_string(&notes).expect("read"), "my own notes");
}

#[test]
fn test_non_ascii_names_get_their_own_report() {
    let dir = TempDir::new().expect("temp dir");
    let session = Session::new(
        "学期 一".to_string(),
        vec![SubjectRecord::new("数学", 45.0, Grade::A, 4)],
        8.0,
    );
    let path = write_report(
        &ReportContext::from_session(&session),
        ReportFormat::Markdown,
        dir.path(),
    )
    .expect("export");
    assert_eq!(path, dir.path().join("学期_一.md"));
}
