use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use quiz_core::model::{Question, QuestionId, QuizResult, StudentId};
use services::feedback_service::{
    EMPTY_FEEDBACK_FALLBACK, FEEDBACK_UNAVAILABLE_FALLBACK, FeedbackConfig, FeedbackService,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

//
// ─── HTTP STUB ─────────────────────────────────────────────────────────────────
//

/// Minimal HTTP/1.1 responder bound to an OS-assigned port. Every request
/// gets the same canned status and body; raw requests are captured for
/// assertions.
async fn spawn_stub(status: &'static str, body: &'static str) -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&seen);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let captured = Arc::clone(&captured);
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                loop {
                    let Ok(read) = socket.read(&mut chunk).await else {
                        return;
                    };
                    if read == 0 {
                        break;
                    }
                    request.extend_from_slice(&chunk[..read]);
                    if request_is_complete(&request) {
                        break;
                    }
                }
                captured
                    .lock()
                    .unwrap()
                    .push(String::from_utf8_lossy(&request).into_owned());

                let response = format!(
                    "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len(),
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (format!("http://{addr}"), seen)
}

/// True once the buffer holds the full head plus any advertised body.
fn request_is_complete(request: &[u8]) -> bool {
    let Some(head_end) = request.windows(4).position(|window| window == b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(&request[..head_end]);
    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.trim()
                .eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())?
        })
        .unwrap_or(0);
    request.len() >= head_end + 4 + content_length
}

//
// ─── HELPERS ───────────────────────────────────────────────────────────────────
//

fn build_service(base_url: &str) -> FeedbackService {
    FeedbackService::new(Some(FeedbackConfig {
        base_url: base_url.to_owned(),
        api_key: "test-key".to_owned(),
        model: "test-model".to_owned(),
    }))
}

fn build_question() -> Question {
    Question::new(
        QuestionId::new("B01"),
        "Which organelle produces ATP?",
        vec!["Nucleus".into(), "Mitochondrion".into(), "Ribosome".into()],
        1,
        None,
    )
    .expect("valid question")
}

fn build_result() -> QuizResult {
    let mut answers = HashMap::new();
    answers.insert(QuestionId::new("B01"), 1);
    QuizResult {
        student_id: StudentId::new("HS001"),
        student_name: "Alice Bennett".to_owned(),
        score: 2.0,
        correct_count: 1,
        total_questions: 1,
        timestamp: "t1".to_owned(),
        answers,
        ai_feedback: None,
    }
}

//
// ─── ANNOTATE ──────────────────────────────────────────────────────────────────
//

#[tokio::test]
async fn annotate_passes_provider_text_through() {
    let body =
        r#"{"choices":[{"message":{"content":"  Great work, Alice! Your cell biology is solid.  "}}]}"#;
    let (url, seen) = spawn_stub("200 OK", body).await;
    let service = build_service(&url);

    let text = service.annotate(&build_result(), &[build_question()]).await;

    assert_eq!(text, "Great work, Alice! Your cell biology is solid.");

    let requests = seen.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("POST /chat/completions HTTP/1.1"));
    assert!(
        requests[0]
            .to_ascii_lowercase()
            .contains("authorization: bearer test-key")
    );
    assert!(requests[0].contains(r#""model":"test-model""#));
    // The prompt carries the session details.
    assert!(requests[0].contains("Alice Bennett"));
    assert!(requests[0].contains("Which organelle produces ATP?"));
}

#[tokio::test]
async fn annotate_falls_back_when_provider_text_is_blank() {
    let body = r#"{"choices":[{"message":{"content":"   "}}]}"#;
    let (url, _seen) = spawn_stub("200 OK", body).await;
    let service = build_service(&url);

    let text = service.annotate(&build_result(), &[build_question()]).await;

    assert_eq!(text, EMPTY_FEEDBACK_FALLBACK);
}

#[tokio::test]
async fn annotate_falls_back_on_error_status() {
    let (url, _seen) = spawn_stub("500 Internal Server Error", "{}").await;
    let service = build_service(&url);

    let text = service.annotate(&build_result(), &[build_question()]).await;

    assert_eq!(text, FEEDBACK_UNAVAILABLE_FALLBACK);
}
