mod common;

use std::io::Write;
use std::sync::{Arc, Mutex};

use common::{first_names, five_students, make_student, memory_service, seed, sqlite_service};
use roster::modules::students::StudentService;
use roster_core::RosterError;
use roster_models::{GpaBand, StudentFilter, StudentStatus};
use tracing_subscriber::fmt::format::FmtSpan;

async fn services() -> Vec<(&'static str, StudentService)> {
    vec![("memory", memory_service()), ("sqlite", sqlite_service().await)]
}

#[tokio::test]
async fn test_add_then_get_by_id() {
    for (name, service) in services().await {
        let student = make_student("S1001", "Alice Mensah", "Computer Science", 100, 3.8);
        service.add_record(&student).await.unwrap();

        assert_eq!(
            service.get_by_id("S1001").await.unwrap(),
            Some(student),
            "{name}"
        );
        assert_eq!(service.get_by_id("S9999").await.unwrap(), None, "{name}");
    }
}

#[tokio::test]
async fn test_add_duplicate_id_fails_even_when_valid() {
    for (name, service) in services().await {
        seed(&service, &five_students()).await;
        let clash = make_student("S1001", "Someone Else", "Biology", 200, 2.0);

        let err = service.add_record(&clash).await.unwrap_err();
        assert!(matches!(err, RosterError::DuplicateId(ref id) if id == "S1001"), "{name}");
        assert_eq!(err.to_string(), "Student ID 'S1001' already exists.");
        assert_eq!(service.total_count().await.unwrap(), 5, "{name}");
    }
}

#[tokio::test]
async fn test_add_invalid_writes_nothing() {
    for (name, service) in services().await {
        let bad = make_student("S1", "R2D2", "", 150, 4.5);

        let err = service.add_record(&bad).await.unwrap_err();
        let violations = err.violations().expect("validation error");
        assert_eq!(violations.len(), 5, "{name}: {violations}");
        assert_eq!(service.total_count().await.unwrap(), 0, "{name}");
    }
}

#[tokio::test]
async fn test_update_and_delete_missing_id_fail() {
    for (name, service) in services().await {
        let ghost = make_student("S0404", "Ghost Student", "Biology", 100, 2.0);

        let err = service.update_record(&ghost).await.unwrap_err();
        assert!(matches!(err, RosterError::NotFound(_)), "{name}");

        let err = service.delete_record("S0404").await.unwrap_err();
        assert!(matches!(err, RosterError::NotFound(_)), "{name}");
    }
}

#[tokio::test]
async fn test_update_replaces_fields_but_not_id() {
    for (name, service) in services().await {
        seed(&service, &five_students()).await;
        let mut bob = service.get_by_id("S1002").await.unwrap().unwrap();
        bob.gpa = 2.9;
        bob.status = StudentStatus::Inactive;
        service.update_record(&bob).await.unwrap();

        let stored = service.get_by_id("S1002").await.unwrap().unwrap();
        assert_eq!(stored.gpa, 2.9, "{name}");
        assert_eq!(stored.status, StudentStatus::Inactive, "{name}");
        assert_eq!(service.inactive_count().await.unwrap(), 1, "{name}");
    }
}

#[tokio::test]
async fn test_delete_removes_record() {
    for (name, service) in services().await {
        seed(&service, &five_students()).await;
        service.delete_record("S1003").await.unwrap();

        assert_eq!(service.get_by_id("S1003").await.unwrap(), None, "{name}");
        assert_eq!(service.total_count().await.unwrap(), 4, "{name}");
    }
}

#[tokio::test]
async fn test_get_all_sorted_by_name() {
    for (name, service) in services().await {
        seed(&service, &five_students()).await;
        let all = service.get_all().await.unwrap();
        assert_eq!(
            first_names(&all),
            ["Alice", "Bob", "Carol", "Dave", "Eve"],
            "{name}"
        );
    }
}

#[tokio::test]
async fn test_search_matches_id_or_name_ignoring_case() {
    for (name, service) in services().await {
        seed(&service, &five_students()).await;
        seed(&service, &[make_student("S1006", "Émile Zola", "Literature", 300, 3.1)]).await;

        assert_eq!(first_names(&service.search("ca").await.unwrap()), ["Carol"], "{name}");
        assert_eq!(first_names(&service.search("émile").await.unwrap()), ["Émile"], "{name}");
        assert_eq!(first_names(&service.search("ZOLA").await.unwrap()), ["Émile"], "{name}");
        assert_eq!(first_names(&service.search("s1004").await.unwrap()), ["Dave"], "{name}");
        assert_eq!(service.search("").await.unwrap().len(), 6, "{name}");
        assert!(service.search("zzz").await.unwrap().is_empty(), "{name}");
    }
}

/// Log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_search_spans_do_not_record_the_query_text() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_span_events(FmtSpan::NEW)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    for (name, service) in services().await {
        seed(&service, &five_students()).await;
        let found = service.search("Carol Boateng").await.unwrap();
        assert_eq!(first_names(&found), ["Carol"], "{name}");
    }

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("search"), "{output}");
    assert!(output.contains("query.len=13"), "{output}");
    assert!(!output.contains("Boateng"), "{output}");
}

#[tokio::test]
async fn test_filter_is_conjunctive() {
    for (name, service) in services().await {
        seed(&service, &five_students()).await;

        let maths = StudentFilter::new().programme("Mathematics");
        assert_eq!(first_names(&service.filter(&maths).await.unwrap()), ["Bob", "Dave"], "{name}");

        let maths_100 = maths.clone().level(100);
        assert_eq!(first_names(&service.filter(&maths_100).await.unwrap()), ["Dave"], "{name}");

        let inactive = StudentFilter::new().status(StudentStatus::Inactive);
        assert!(service.filter(&inactive).await.unwrap().is_empty(), "{name}");

        let blank = StudentFilter::new().programme("");
        assert_eq!(service.filter(&blank).await.unwrap().len(), 5, "{name}");
    }
}

#[tokio::test]
async fn test_list_programmes_sorted_distinct() {
    for (name, service) in services().await {
        seed(&service, &five_students()).await;
        assert_eq!(
            service.list_programmes().await.unwrap(),
            ["Biology", "Computer Science", "Mathematics"],
            "{name}"
        );
    }
}

#[tokio::test]
async fn test_average_gpa_of_empty_roster_is_zero() {
    for (name, service) in services().await {
        assert_eq!(service.average_gpa().await.unwrap(), 0.0, "{name}");
    }
}

#[tokio::test]
async fn test_top_performers() {
    for (name, service) in services().await {
        seed(&service, &five_students()).await;

        let top = service.top_performers(3, None, None).await.unwrap();
        assert_eq!(first_names(&top), ["Eve", "Alice", "Carol"], "{name}");

        let cs = service
            .top_performers(10, Some("Computer Science"), None)
            .await
            .unwrap();
        assert_eq!(first_names(&cs), ["Alice", "Carol"], "{name}");

        let level_100 = service.top_performers(10, None, Some(100)).await.unwrap();
        assert_eq!(first_names(&level_100), ["Alice", "Dave"], "{name}");
    }
}

#[tokio::test]
async fn test_top_performers_skip_inactive() {
    for (name, service) in services().await {
        seed(&service, &five_students()).await;
        let mut eve = service.get_by_id("S1005").await.unwrap().unwrap();
        eve.status = StudentStatus::Inactive;
        service.update_record(&eve).await.unwrap();

        let top = service.top_performers(3, None, None).await.unwrap();
        assert_eq!(first_names(&top), ["Alice", "Carol", "Bob"], "{name}");
    }
}

#[tokio::test]
async fn test_at_risk() {
    for (name, service) in services().await {
        seed(&service, &five_students()).await;

        let at_risk = service.at_risk(2.0).await.unwrap();
        assert_eq!(first_names(&at_risk), ["Dave", "Bob"], "{name}");

        // Strictly below the threshold
        assert!(service.at_risk(0.9).await.unwrap().is_empty(), "{name}");
    }
}

#[tokio::test]
async fn test_gpa_distribution() {
    for (name, service) in services().await {
        seed(&service, &five_students()).await;

        let distribution = service.gpa_distribution().await.unwrap();
        assert_eq!(distribution.counts(), [1, 1, 1, 2], "{name}");
        assert_eq!(distribution.count(GpaBand::Failing), 1, "{name}");
    }
}

#[tokio::test]
async fn test_empty_distribution_reports_every_band() {
    for (name, service) in services().await {
        let distribution = service.gpa_distribution().await.unwrap();
        let labels: Vec<_> = distribution.bands().iter().map(|b| b.label).collect();
        assert_eq!(
            labels,
            ["0.0 - 1.0", "1.0 - 2.0", "2.0 - 3.0", "3.0 - 4.0"],
            "{name}"
        );
        assert_eq!(distribution.counts(), [0, 0, 0, 0], "{name}");
    }
}

#[tokio::test]
async fn test_programme_summary() {
    for (name, service) in services().await {
        seed(&service, &five_students()).await;

        let rows: Vec<_> = service
            .programme_summary()
            .await
            .unwrap()
            .into_iter()
            .map(|r| (r.programme.clone(), r.total, r.formatted_average_gpa()))
            .collect();
        assert_eq!(
            rows,
            [
                ("Biology".to_string(), 1, "3.90".to_string()),
                ("Computer Science".to_string(), 2, "3.15".to_string()),
                ("Mathematics".to_string(), 2, "1.20".to_string()),
            ],
            "{name}"
        );
    }
}

#[tokio::test]
async fn test_dashboard_stats() {
    for (name, service) in services().await {
        seed(&service, &five_students()).await;
        service.delete_record("S1005").await.unwrap();

        let stats = service.dashboard_stats().await.unwrap();
        assert_eq!((stats.total, stats.active, stats.inactive), (4, 4, 0), "{name}");
        assert!((stats.average_gpa - 2.175).abs() < 1e-9, "{name}");
    }
}
