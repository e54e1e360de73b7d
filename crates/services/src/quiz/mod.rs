mod draw;
mod progress;
mod service;
mod session;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use draw::draw_questions;
pub use progress::SessionProgress;
pub use service::{FinishedQuiz, MAX_ATTEMPTS, QUIZ_SIZE, QuizService, StudentStats};
pub use session::QuizSession;
