/// How far through its drawn questions a session is.
///
/// Answered and skipped questions are counted separately: a skip still
/// moves the session forward but will score as a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub skipped: usize,
    pub remaining: usize,
}
