use std::io::{self, Write};

use quiz_core::model::{Student, StudentId};
use services::{
    AppServices, AuthService, DispatchOutcome, MAX_ATTEMPTS, MIN_PASSWORD_LEN, QuizService,
};

/// Whether a screen handed control back or the whole console should stop.
enum Flow {
    Continue,
    Quit,
}

/// Drives the interactive console until the user quits or stdin closes.
pub async fn run(services: &AppServices) -> io::Result<()> {
    let auth = services.auth();
    let quizzes = services.quizzes();

    println!("Classroom Biology Quiz");
    if !quizzes.feedback().enabled() {
        println!("AI feedback: off (set QUIZ_AI_API_KEY to enable it)");
    }

    loop {
        println!();
        show_board(&quizzes).await;
        show_endpoint(&quizzes).await;
        println!();

        let Some(id) = prompt_line("Student id (e.g. HS001, 'q' to quit): ")? else {
            return Ok(());
        };
        if id.eq_ignore_ascii_case("q") {
            return Ok(());
        }
        if id.is_empty() {
            continue;
        }

        let Some(password) = prompt_line("Password: ")? else {
            return Ok(());
        };

        match auth.login(&StudentId::new(id), &password).await {
            Ok(student) => {
                if let Flow::Quit = menu(&auth, &quizzes, &student).await? {
                    return Ok(());
                }
            }
            Err(err) => println!("Login failed: {err}."),
        }
    }
}

async fn menu(auth: &AuthService, quizzes: &QuizService, student: &Student) -> io::Result<Flow> {
    loop {
        let stats = quizzes.student_stats(student.id()).await;
        println!();
        println!(
            "Signed in as {} ({}) · attempts {}/{} · total {:.1} pts",
            student.name(),
            student.id(),
            stats.attempts,
            MAX_ATTEMPTS,
            stats.total_score
        );
        println!(
            "[1] Start quiz  [2] Leaderboard  [3] Change password  [4] Results endpoint  [0] Sign out"
        );

        let Some(choice) = prompt_line("> ")? else {
            return Ok(Flow::Quit);
        };
        match choice.as_str() {
            "1" => {
                if let Flow::Quit = quiz_flow(quizzes, student).await? {
                    return Ok(Flow::Quit);
                }
            }
            "2" => show_board(quizzes).await,
            "3" => {
                if let Flow::Quit = password_flow(auth, student).await? {
                    return Ok(Flow::Quit);
                }
            }
            "4" => {
                if let Flow::Quit = endpoint_flow(quizzes).await? {
                    return Ok(Flow::Quit);
                }
            }
            "0" => return Ok(Flow::Continue),
            "q" => return Ok(Flow::Quit),
            "" => {}
            other => println!("Unknown option: {other}"),
        }
    }
}

async fn quiz_flow(quizzes: &QuizService, student: &Student) -> io::Result<Flow> {
    let mut session = match quizzes.start_quiz(student).await {
        Ok(session) => session,
        Err(err) => {
            println!("Cannot start a quiz: {err}.");
            return Ok(Flow::Continue);
        }
    };

    println!();
    println!(
        "{} questions. Answer with a letter, or press Enter to skip; skipped questions score as misses.",
        session.question_count()
    );

    loop {
        let Some(question) = session.current_question() else {
            break;
        };
        println!();
        println!(
            "Question {}/{}: {}",
            session.position() + 1,
            session.question_count(),
            question.prompt()
        );
        for (index, option) in question.options().iter().enumerate() {
            println!("  {}) {}", option_letter(index), option);
        }
        let option_count = question.options().len();

        let Some(input) = prompt_line("> ")? else {
            println!("Input closed; leaving the quiz unfinished.");
            return Ok(Flow::Quit);
        };

        if input.is_empty() {
            let _ = session.skip_current();
        } else if let Some(choice) = parse_choice(&input, option_count) {
            let _ = session.answer_current(choice);
        } else {
            println!(
                "Please answer with a letter between a and {}, or press Enter to skip.",
                option_letter(option_count.saturating_sub(1))
            );
        }
    }

    let progress = session.progress();
    println!();
    println!(
        "Answered {} of {} questions ({} skipped).",
        progress.answered, progress.total, progress.skipped
    );
    println!("Grading...");
    match quizzes.finish_quiz(&session).await {
        Ok(finished) => {
            let result = &finished.result;
            println!();
            println!(
                "Score: {:.1} pts ({}/{} correct)",
                result.score, result.correct_count, result.total_questions
            );
            match finished.outcome {
                DispatchOutcome::Dispatched => println!("Result sent to the class board."),
                DispatchOutcome::NotConfigured => {
                    println!("No endpoint configured; result kept in the local cache.");
                }
                DispatchOutcome::TransportError => {
                    println!("Endpoint unreachable; result kept in the local cache.");
                }
            }
            if let Some(feedback) = result.ai_feedback.as_deref() {
                println!();
                println!("Feedback: {feedback}");
            }

            let stats = quizzes.student_stats(student.id()).await;
            println!();
            println!(
                "New total: {:.1} pts across {} attempts.",
                stats.total_score, stats.attempts
            );
        }
        Err(err) => println!("Could not record the quiz: {err}."),
    }

    Ok(Flow::Continue)
}

async fn password_flow(auth: &AuthService, student: &Student) -> io::Result<Flow> {
    let Some(old) = prompt_line("Current password: ")? else {
        return Ok(Flow::Quit);
    };
    let Some(new) = prompt_line(&format!(
        "New password (at least {MIN_PASSWORD_LEN} characters): "
    ))?
    else {
        return Ok(Flow::Quit);
    };
    let Some(confirm) = prompt_line("Repeat new password: ")? else {
        return Ok(Flow::Quit);
    };

    match auth
        .change_password(student.id(), &old, &new, &confirm)
        .await
    {
        Ok(()) => println!("Password updated."),
        Err(err) => println!("Password not changed: {err}."),
    }
    Ok(Flow::Continue)
}

async fn endpoint_flow(quizzes: &QuizService) -> io::Result<Flow> {
    let client = quizzes.aggregator();
    match client.endpoint().await {
        Some(url) => println!("Current endpoint: {url}"),
        None => println!("No endpoint configured; results stay in the local cache."),
    }

    let Some(input) = prompt_line("New endpoint URL (Enter to keep): ")? else {
        return Ok(Flow::Quit);
    };
    match client.set_endpoint(&input).await {
        Ok(true) => println!("Endpoint saved."),
        Ok(false) => println!("Endpoint unchanged."),
        Err(err) => println!("Could not save the endpoint: {err}."),
    }
    Ok(Flow::Continue)
}

async fn show_board(quizzes: &QuizService) {
    let board = quizzes.leaderboard().await;
    if board.is_empty() {
        println!("No results on the board yet.");
        return;
    }

    println!("Leaderboard:");
    for (rank, entry) in board.iter().enumerate() {
        println!(
            "{:>3}. {:<24} {:>7.1} pts  ({} attempts)",
            rank + 1,
            entry.student_name,
            entry.total_score,
            entry.attempts
        );
    }
}

async fn show_endpoint(quizzes: &QuizService) {
    match quizzes.aggregator().endpoint().await {
        Some(url) => println!("Results endpoint: {url}"),
        None => println!("Results endpoint: none (scores stay on this machine)"),
    }
}

/// Reads one trimmed line, returning `None` once stdin closes.
fn prompt_line(label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_owned()))
}

fn option_letter(index: usize) -> char {
    char::from(b'a' + u8::try_from(index % 26).unwrap_or(0))
}

/// Maps a single-letter answer to an option index, case-insensitively.
fn parse_choice(input: &str, option_count: usize) -> Option<usize> {
    let mut chars = input.chars();
    let letter = chars.next()?.to_ascii_lowercase();
    if chars.next().is_some() || !letter.is_ascii_lowercase() {
        return None;
    }

    let index = usize::from(u8::try_from(letter).ok()? - b'a');
    (index < option_count).then_some(index)
}
