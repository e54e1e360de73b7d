use std::sync::Arc;

use quiz_core::model::StudentId;
use quiz_core::time::{fixed_clock, fixed_now};
use quiz_core::{Clock, Roster};
use services::{
    AggregatorClient, AuthService, DispatchOutcome, FeedbackService, MAX_ATTEMPTS, QUIZ_SIZE,
    QuizError, QuizService,
};
use storage::repository::InMemoryRepository;

fn build_quizzes(repo: &InMemoryRepository, clock: Clock) -> QuizService {
    let aggregator = AggregatorClient::new(Arc::new(repo.clone()), Arc::new(repo.clone()))
        .with_default_endpoint(None);
    QuizService::new(clock, aggregator, FeedbackService::new(None)).with_seed(7)
}

#[tokio::test]
async fn first_attempt_runs_end_to_end() {
    let repo = InMemoryRepository::new();
    let auth = AuthService::new(Roster::classroom(), Arc::new(repo.clone()));
    let quizzes = build_quizzes(&repo, fixed_clock());

    let student = auth
        .login(&StudentId::new("HS001"), "pass001")
        .await
        .unwrap();
    assert!(quizzes.result_history().await.is_empty());

    let mut session = quizzes.start_quiz(&student).await.unwrap();
    assert_eq!(session.question_count(), QUIZ_SIZE);

    while let Some(question) = session.current_question() {
        let choice = question.correct_option();
        session.answer_current(choice).unwrap();
    }

    let finished = quizzes.finish_quiz(&session).await.unwrap();
    assert_eq!(finished.result.score, 40.0);
    assert_eq!(finished.result.correct_count, 20);
    assert_eq!(finished.outcome, DispatchOutcome::NotConfigured);

    let history = quizzes.result_history().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].student_id.as_str(), "HS001");

    let stats = quizzes.student_stats(student.id()).await;
    assert_eq!(stats.attempts, 1);
    assert_eq!(stats.total_score, 40.0);

    let board = quizzes.leaderboard().await;
    assert_eq!(board[0].student_id.as_str(), "HS001");
    assert_eq!(board[0].total_score, 40.0);
}

#[tokio::test]
async fn the_sixth_attempt_is_refused() {
    let repo = InMemoryRepository::new();
    let student = Roster::classroom()
        .find(&StudentId::new("HS002"))
        .unwrap()
        .student();

    // Each attempt needs its own timestamp or the rows collapse into one.
    for attempt in 0..MAX_ATTEMPTS {
        let at = fixed_now() + chrono::Duration::minutes(i64::try_from(attempt).unwrap());
        let quizzes = build_quizzes(&repo, Clock::fixed(at));

        let mut session = quizzes.start_quiz(&student).await.unwrap();
        while !session.is_complete() {
            session.skip_current().unwrap();
        }
        quizzes.finish_quiz(&session).await.unwrap();
    }

    let quizzes = build_quizzes(
        &repo,
        Clock::fixed(fixed_now() + chrono::Duration::hours(1)),
    );
    let err = quizzes.start_quiz(&student).await.unwrap_err();

    assert!(matches!(
        err,
        QuizError::AttemptLimitExceeded { attempts } if attempts == MAX_ATTEMPTS
    ));

    let stats = quizzes.student_stats(student.id()).await;
    assert_eq!(stats.attempts_left(), 0);
    assert_eq!(stats.total_score, -50.0);
}
