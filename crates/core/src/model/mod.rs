mod ids;
mod question;
mod result;
mod student;

pub use ids::{QuestionId, StudentId};

pub use question::{Question, QuestionError};
pub use result::{CORRECT_POINTS, MISS_PENALTY, QuizResult, weighted_score};
pub use student::{CredentialRecord, Student};
