use std::collections::HashMap;

use quiz_core::model::{QuestionId, QuizResult, StudentId};
use storage::repository::{
    CredentialOverrideRepository, RESULT_CACHE_CAP, ResultCacheRepository, SettingsRepository,
};
use storage::sqlite::SqliteRepository;

fn build_result(id: &str, score: f64, timestamp: &str) -> QuizResult {
    QuizResult {
        student_id: StudentId::new(id),
        student_name: format!("Student {id}"),
        score,
        correct_count: 12,
        total_questions: 20,
        timestamp: timestamp.to_owned(),
        answers: HashMap::new(),
        ai_feedback: None,
    }
}

#[tokio::test]
async fn sqlite_round_trips_full_result_rows() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_result_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let mut result = build_result("HS001", 27.5, "10:15:00 20/08/2026");
    result.answers.insert(QuestionId::new("B01"), 2);
    result.answers.insert(QuestionId::new("B07"), 0);
    result.ai_feedback = Some("Keep at it.".to_owned());

    repo.append_result(&result).await.unwrap();

    let cached = repo.recent_results().await.expect("fetch");
    assert_eq!(cached.len(), 1);
    let fetched = &cached[0];
    assert_eq!(fetched.student_id.as_str(), "HS001");
    assert_eq!(fetched.score, 27.5);
    assert_eq!(fetched.correct_count, 12);
    assert_eq!(fetched.total_questions, 20);
    assert_eq!(fetched.answers.get(&QuestionId::new("B01")), Some(&2));
    assert_eq!(fetched.answers.get(&QuestionId::new("B07")), Some(&0));
    assert_eq!(fetched.ai_feedback.as_deref(), Some("Keep at it."));
}

#[tokio::test]
async fn sqlite_orders_newest_first_and_ignores_duplicates() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_result_order?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.append_result(&build_result("HS001", 10.0, "t1"))
        .await
        .unwrap();
    repo.append_result(&build_result("HS002", 20.0, "t1"))
        .await
        .unwrap();

    // Same identity as the first row; must not pile up or shadow it.
    let mut duplicate = build_result("HS001", 10.0, "t1");
    duplicate.ai_feedback = Some("synced later".to_owned());
    repo.append_result(&duplicate).await.unwrap();

    let cached = repo.recent_results().await.unwrap();
    assert_eq!(cached.len(), 2);
    assert_eq!(cached[0].student_id.as_str(), "HS002");
    assert_eq!(cached[1].student_id.as_str(), "HS001");
    assert_eq!(cached[1].ai_feedback, None);
}

#[tokio::test]
async fn sqlite_prunes_cache_to_capacity() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_result_prune?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    for n in 0..RESULT_CACHE_CAP + 3 {
        repo.append_result(&build_result("HS001", 1.0, &format!("t{n:03}")))
            .await
            .unwrap();
    }

    let cached = repo.recent_results().await.unwrap();
    assert_eq!(cached.len(), RESULT_CACHE_CAP);
    assert_eq!(cached[0].timestamp, format!("t{:03}", RESULT_CACHE_CAP + 2));
    assert!(!cached.iter().any(|r| r.timestamp == "t000"));
    assert!(!cached.iter().any(|r| r.timestamp == "t002"));
}

#[tokio::test]
async fn sqlite_round_trips_password_overrides() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_overrides?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let id = StudentId::new("HS014");
    assert!(repo.password_override(&id).await.unwrap().is_none());

    repo.set_password_override(&id, "first").await.unwrap();
    repo.set_password_override(&id, "second").await.unwrap();

    assert_eq!(
        repo.password_override(&id).await.unwrap().as_deref(),
        Some("second")
    );
    assert!(
        repo.password_override(&StudentId::new("HS015"))
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn sqlite_round_trips_endpoint_setting() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_settings?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.endpoint_url().await.unwrap().is_none());

    repo.set_endpoint_url("https://script.example.com/exec/v1")
        .await
        .unwrap();
    repo.set_endpoint_url("https://script.example.com/exec/v2")
        .await
        .unwrap();

    assert_eq!(
        repo.endpoint_url().await.unwrap().as_deref(),
        Some("https://script.example.com/exec/v2")
    );
}
