use rand::rngs::StdRng;
use rand::{SeedableRng, rng};

use quiz_core::Clock;
use quiz_core::bank;
use quiz_core::leaderboard::{
    LeaderboardEntry, aggregate, attempt_count, cumulative_score, merge_history,
};
use quiz_core::model::{Question, QuizResult, Student, StudentId, weighted_score};
use quiz_core::time::display_timestamp;

use crate::aggregator::{AggregatorClient, DispatchOutcome};
use crate::error::QuizError;
use crate::feedback_service::FeedbackService;
use crate::quiz::draw::draw_questions;
use crate::quiz::session::QuizSession;

/// Most results any one student may put on the board.
pub const MAX_ATTEMPTS: usize = 5;

/// Questions drawn for a full-length session.
pub const QUIZ_SIZE: usize = 20;

/// Outcome of finishing a session: the recorded result plus what happened
/// to the remote dispatch.
#[derive(Debug, Clone)]
pub struct FinishedQuiz {
    pub result: QuizResult,
    pub outcome: DispatchOutcome,
}

/// Attempts used and points banked by one student.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentStats {
    pub attempts: usize,
    pub total_score: f64,
}

impl StudentStats {
    /// Sessions the student may still start.
    #[must_use]
    pub fn attempts_left(&self) -> usize {
        MAX_ATTEMPTS.saturating_sub(self.attempts)
    }
}

/// Runs quizzes end to end: drawing questions, enforcing the attempt cap,
/// scoring finished sessions, and handing results to the aggregator.
pub struct QuizService {
    clock: Clock,
    bank: Vec<Question>,
    aggregator: AggregatorClient,
    feedback: FeedbackService,
    seed: Option<u64>,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock, aggregator: AggregatorClient, feedback: FeedbackService) -> Self {
        Self {
            clock,
            bank: bank::builtin(),
            aggregator,
            feedback,
            seed: None,
        }
    }

    /// Replace the built-in question bank.
    #[must_use]
    pub fn with_bank(mut self, bank: Vec<Question>) -> Self {
        self.bank = bank;
        self
    }

    /// Fix the draw order. Every session started from this service draws
    /// the same questions in the same order.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn aggregator(&self) -> &AggregatorClient {
        &self.aggregator
    }

    #[must_use]
    pub fn feedback(&self) -> &FeedbackService {
        &self.feedback
    }

    /// Starts a session for `student` with [`QUIZ_SIZE`] freshly drawn
    /// questions.
    ///
    /// The attempt cap is enforced here and nowhere else; a session already
    /// under way is never cut off. The count comes from the merged history,
    /// so cached attempts still count when the endpoint is unreachable.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::AttemptLimitExceeded`] when the student already
    /// has [`MAX_ATTEMPTS`] results on record, and [`QuizError::EmptyBank`]
    /// when there are no questions to draw from.
    pub async fn start_quiz(&self, student: &Student) -> Result<QuizSession, QuizError> {
        let history = self.result_history().await;
        let attempts = attempt_count(&history, student.id());
        if attempts >= MAX_ATTEMPTS {
            return Err(QuizError::AttemptLimitExceeded { attempts });
        }

        let questions = match self.seed {
            Some(seed) => {
                draw_questions(&self.bank, QUIZ_SIZE, &mut StdRng::seed_from_u64(seed))
            }
            None => draw_questions(&self.bank, QUIZ_SIZE, &mut rng()),
        };
        QuizSession::new(student.clone(), questions)
    }

    /// Scores a completed session, attaches feedback, and records the
    /// result.
    ///
    /// The result always lands in the local cache; the returned outcome
    /// says what happened to the remote dispatch. Feedback never fails a
    /// finish, it degrades to a fixed message.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::SessionIncomplete`] when questions are still
    /// waiting to be answered.
    pub async fn finish_quiz(&self, session: &QuizSession) -> Result<FinishedQuiz, QuizError> {
        if !session.is_complete() {
            return Err(QuizError::SessionIncomplete);
        }

        let correct = session.correct_count();
        let total = u32::try_from(session.question_count()).unwrap_or(u32::MAX);
        let mut result = QuizResult {
            student_id: session.student().id().clone(),
            student_name: session.student().name().to_owned(),
            score: weighted_score(correct, total),
            correct_count: correct,
            total_questions: total,
            timestamp: display_timestamp(self.clock.now()),
            answers: session.answers().clone(),
            ai_feedback: None,
        };
        result.ai_feedback = Some(self.feedback.annotate(&result, session.questions()).await);

        let outcome = self.aggregator.append(&result).await;
        Ok(FinishedQuiz { result, outcome })
    }

    /// Full result history: endpoint rows first, then cached rows the
    /// endpoint does not know about.
    pub async fn result_history(&self) -> Vec<QuizResult> {
        let remote = self.aggregator.fetch_all().await;
        let local = self.aggregator.local_results().await;
        merge_history(remote, local)
    }

    /// Per-student totals over the full history, best first.
    pub async fn leaderboard(&self) -> Vec<LeaderboardEntry> {
        aggregate(&self.result_history().await)
    }

    /// Attempts used and points banked by one student.
    pub async fn student_stats(&self, student_id: &StudentId) -> StudentStats {
        let history = self.result_history().await;
        StudentStats {
            attempts: attempt_count(&history, student_id),
            total_score: cumulative_score(&history, student_id),
        }
    }
}
