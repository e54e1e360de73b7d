#![forbid(unsafe_code)]

pub mod aggregator;
pub mod app_services;
pub mod auth_service;
pub mod error;
pub mod feedback_service;
pub mod quiz;

pub use quiz_core::Clock;

pub use error::{AppServicesError, AuthError, FeedbackError, QuizError, RemoteError};

pub use aggregator::{AggregatorClient, DispatchOutcome};
pub use app_services::AppServices;
pub use auth_service::{AuthService, MIN_PASSWORD_LEN};
pub use feedback_service::FeedbackService;
pub use quiz::{
    FinishedQuiz, MAX_ATTEMPTS, QUIZ_SIZE, QuizService, QuizSession, SessionProgress, StudentStats,
};
