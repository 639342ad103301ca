//! Integration tests for the onboarding flow.
//!
//! Each test builds a small catalog, drives the flow through user events
//! (directly or through a scripted terminal surface), and checks both the
//! rendered screens and the store state.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio::time::timeout;

use hero_onboarding::error::ValidationError;
use hero_onboarding::onboarding::renderer::InputView;
use hero_onboarding::onboarding::{
    Answer, AnswerOption, CardEvent, CardOutcome, CardView, Catalog, OnboardingFlow,
    OnboardingState, OnboardingStore, Question, Screen,
};
use hero_onboarding::session::{SessionEnd, run_session};
use hero_onboarding::surface::TerminalSurface;

/// Maximum time any wait is allowed before we consider the test hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Auto-advance delay used by the tests.
const DELAY: Duration = Duration::from_millis(20);

/// intro, email, role(a, b)
fn three_question_catalog() -> Catalog {
    Catalog::new(vec![
        Question::single_select("intro", "Welcome", vec![AnswerOption::new("go", "Go")]),
        Question::text("email", "What's your email?"),
        Question::single_select(
            "role",
            "Your role?",
            vec![AnswerOption::new("a", "A"), AnswerOption::new("b", "B")],
        ),
    ])
    .unwrap()
}

/// intro, email, role(a, b, other), goals(x, y), company
fn five_question_catalog() -> Catalog {
    Catalog::new(vec![
        Question::single_select("intro", "Welcome", vec![AnswerOption::new("go", "Go")]),
        Question::text("email", "What's your email?"),
        Question::single_select(
            "role",
            "Your role?",
            vec![AnswerOption::new("a", "A"), AnswerOption::new("b", "B")],
        )
        .with_other("Other"),
        Question::multi_select(
            "goals",
            "Your goals?",
            vec![AnswerOption::new("x", "X"), AnswerOption::new("y", "Y")],
        ),
        Question::text("company", "Company?"),
    ])
    .unwrap()
}

fn flow_for(catalog: Catalog) -> OnboardingFlow {
    OnboardingFlow::builder()
        .store(OnboardingStore::new(Arc::new(catalog)))
        .auto_advance_delay(DELAY)
        .build()
        .unwrap()
}

/// Wait until the store reaches `step`.
async fn wait_for_step(flow: &OnboardingFlow, step: usize) -> OnboardingState {
    let mut rx = flow.store().subscribe();
    timeout(TEST_TIMEOUT, async {
        loop {
            let state = flow.store().snapshot().await;
            if state.current_step == step {
                return state;
            }
            let _ = rx.recv().await;
        }
    })
    .await
    .expect("timed out waiting for step")
}

async fn step(flow: &OnboardingFlow) -> usize {
    flow.store().snapshot().await.current_step
}

fn question_panel(screen: Screen) -> hero_onboarding::onboarding::renderer::QuestionPanel {
    match screen {
        Screen::Question {
            card: CardView::Question(panel),
            ..
        } => panel,
        other => panic!("Expected a question panel, got {other:?}"),
    }
}

#[tokio::test]
async fn end_to_end_three_questions() {
    let mut flow = flow_for(three_question_catalog());
    assert!(matches!(
        flow.screen().await,
        Screen::Question {
            card: CardView::Intro(_),
            progress: None
        }
    ));

    assert_eq!(flow.handle(CardEvent::Start).await, CardOutcome::Advanced);
    assert_eq!(step(&flow).await, 1);

    flow.handle(CardEvent::Input("foo".into())).await;
    assert_eq!(
        flow.handle(CardEvent::Next).await,
        CardOutcome::Invalid(ValidationError::InvalidEmail)
    );
    assert_eq!(step(&flow).await, 1);
    let panel = question_panel(flow.screen().await);
    assert_eq!(panel.error.as_deref(), Some("Please enter a valid email address"));

    flow.handle(CardEvent::Input("foo@bar.com".into())).await;
    assert_eq!(flow.handle(CardEvent::Next).await, CardOutcome::Advanced);
    let state = flow.store().snapshot().await;
    assert_eq!(state.current_step, 2);
    assert_eq!(state.answer("email"), Some(&Answer::from("foo@bar.com")));

    assert_eq!(flow.handle(CardEvent::Select("a".into())).await, CardOutcome::Scheduled);
    let state = wait_for_step(&flow, 3).await;
    assert_eq!(state.answer("role"), Some(&Answer::from("a")));
    assert!(state.is_complete);

    assert!(flow.screen().await.is_terminal());
}

#[tokio::test]
async fn blank_email_is_rejected() {
    let mut flow = flow_for(three_question_catalog());
    flow.handle(CardEvent::Start).await;

    // Next is disabled for an empty draft; whitespace counts as typed.
    assert_eq!(flow.handle(CardEvent::Next).await, CardOutcome::Unavailable);
    flow.handle(CardEvent::Input(" ".into())).await;
    assert_eq!(
        flow.handle(CardEvent::Next).await,
        CardOutcome::Invalid(ValidationError::InvalidEmail)
    );
}

#[tokio::test]
async fn back_keeps_stored_email_but_shows_empty_field() {
    let mut flow = flow_for(three_question_catalog());
    flow.handle(CardEvent::Start).await;
    flow.handle(CardEvent::Input("foo@bar.com".into())).await;
    flow.handle(CardEvent::Next).await;
    assert_eq!(step(&flow).await, 2);

    assert_eq!(flow.handle(CardEvent::Back).await, CardOutcome::WentBack);
    let state = flow.store().snapshot().await;
    assert_eq!(state.current_step, 1);
    assert!(!state.is_complete);
    assert_eq!(state.answer("email"), Some(&Answer::from("foo@bar.com")));

    let panel = question_panel(flow.screen().await);
    assert!(matches!(panel.input, InputView::Text { ref value, .. } if value.is_empty()));
}

#[tokio::test]
async fn back_restores_select_answers() {
    let mut flow = flow_for(five_question_catalog());
    flow.handle(CardEvent::Start).await;
    flow.handle(CardEvent::Input("foo@bar.com".into())).await;
    flow.handle(CardEvent::Next).await;

    flow.handle(CardEvent::Select("other".into())).await;
    flow.handle(CardEvent::InputOther("Producer".into())).await;
    assert_eq!(flow.handle(CardEvent::Next).await, CardOutcome::Advanced);

    flow.handle(CardEvent::Toggle("y".into())).await;
    flow.handle(CardEvent::Toggle("x".into())).await;
    flow.handle(CardEvent::Next).await;
    assert_eq!(step(&flow).await, 4);

    flow.handle(CardEvent::Back).await;
    let panel = question_panel(flow.screen().await);
    match panel.input {
        InputView::MultiSelect { options } => {
            assert!(options.iter().all(|o| o.selected));
        }
        other => panic!("Expected multi-select, got {other:?}"),
    }

    flow.handle(CardEvent::Back).await;
    let panel = question_panel(flow.screen().await);
    assert_eq!(panel.question_id, "role");
    assert!(panel.other.is_some(), "other field shown for stored \"other\"");
    let state = flow.store().snapshot().await;
    assert_eq!(state.answer("role"), Some(&Answer::from("other")));
    assert_eq!(
        state.answer("goals"),
        Some(&Answer::from(vec!["y".to_string(), "x".to_string()]))
    );
}

#[tokio::test]
async fn back_before_auto_advance_stays_put() {
    let mut flow = flow_for(three_question_catalog());
    flow.handle(CardEvent::Start).await;
    flow.handle(CardEvent::Input("foo@bar.com".into())).await;
    flow.handle(CardEvent::Next).await;

    flow.handle(CardEvent::Select("a".into())).await;
    flow.handle(CardEvent::Back).await;

    tokio::time::sleep(DELAY * 10).await;
    let state = flow.store().snapshot().await;
    assert_eq!(state.current_step, 1);
    assert!(state.answer("role").is_none());
}

#[tokio::test]
async fn completion_accepts_no_events() {
    let mut flow = flow_for(three_question_catalog());
    flow.handle(CardEvent::Start).await;
    flow.handle(CardEvent::Input("foo@bar.com".into())).await;
    flow.handle(CardEvent::Next).await;
    flow.handle(CardEvent::Select("b".into())).await;
    wait_for_step(&flow, 3).await;

    assert_eq!(flow.handle(CardEvent::Back).await, CardOutcome::Unavailable);
    assert_eq!(step(&flow).await, 3);
}

#[tokio::test]
async fn terminal_session_runs_to_completion() {
    let script = ["", "foo", "foo@bar.com", "1"];
    let lines = futures::stream::iter(script.map(|l| Ok(l.to_string())));
    let mut surface = TerminalSurface::new(lines.boxed(), Vec::new());
    let mut flow = flow_for(three_question_catalog());

    let report = timeout(TEST_TIMEOUT, run_session(&mut flow, &mut surface))
        .await
        .expect("session hung")
        .unwrap();

    assert_eq!(report.end, SessionEnd::Completed);
    assert!(report.state.is_complete);
    assert_eq!(report.state.answer("email"), Some(&Answer::from("foo@bar.com")));
    assert_eq!(report.state.answer("role"), Some(&Answer::from("a")));

    let out = String::from_utf8(surface.into_output()).unwrap();
    assert!(out.contains("Start Your Video Journey"));
    assert!(out.contains("Please enter a valid email address"));
    assert!(out.contains("Question 2 of 2"));
    assert!(out.contains("Welcome to Hero Network!"));
}

#[tokio::test]
async fn terminal_session_quit_keeps_partial_answers() {
    let script = ["start", "foo@bar.com", "/back", "/quit", "never read"];
    let lines = futures::stream::iter(script.map(|l| Ok(l.to_string())));
    let mut surface = TerminalSurface::new(lines.boxed(), Vec::new());
    let mut flow = flow_for(three_question_catalog());

    let report = timeout(TEST_TIMEOUT, run_session(&mut flow, &mut surface))
        .await
        .expect("session hung")
        .unwrap();

    assert_eq!(report.end, SessionEnd::Quit);
    assert_eq!(report.state.current_step, 1);
    assert_eq!(report.state.answer("email"), Some(&Answer::from("foo@bar.com")));
}

#[tokio::test]
async fn terminal_session_ends_when_input_closes() {
    let lines = futures::stream::iter([Ok("".to_string())]);
    let mut surface = TerminalSurface::new(lines.boxed(), Vec::new());
    let mut flow = flow_for(three_question_catalog());

    let report = timeout(TEST_TIMEOUT, run_session(&mut flow, &mut surface))
        .await
        .expect("session hung")
        .unwrap();

    assert_eq!(report.end, SessionEnd::InputClosed);
    assert_eq!(report.state.current_step, 1);
    assert!(!report.state.is_complete);
}

#[tokio::test]
async fn terminal_text_answers_are_not_trimmed() {
    let script = ["", "  foo@bar.com  ", "/quit"];
    let lines = futures::stream::iter(script.map(|l| Ok(l.to_string())));
    let mut surface = TerminalSurface::new(lines.boxed(), Vec::new());
    let mut flow = flow_for(three_question_catalog());

    let report = timeout(TEST_TIMEOUT, run_session(&mut flow, &mut surface))
        .await
        .expect("session hung")
        .unwrap();

    assert_eq!(report.end, SessionEnd::Quit);
    assert_eq!(report.state.current_step, 1);
    assert!(report.state.answer("email").is_none());
    let out = String::from_utf8(surface.into_output()).unwrap();
    assert!(out.contains("Please enter a valid email address"));
}
