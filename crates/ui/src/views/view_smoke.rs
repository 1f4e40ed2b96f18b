use dioxus::prelude::*;
use quiz_core::session::QuizSession;
use quiz_core::shuffle::IdentityShuffler;
use quiz_core::time::fixed_clock;
use services::QuizConfig;

use super::test_harness::{drive_dom, sample_questions, setup_page_harness};
use crate::views::{LoadingView, QuizView, ReportView};
use crate::vm::{QuizVm, ReportVm, map_quiz, map_report};

fn active_session() -> QuizSession {
    let mut session = QuizSession::new()
        .with_duration(90)
        .with_shuffler(IdentityShuffler)
        .with_clock(fixed_clock());
    session.start("student@example.com").unwrap();
    session.on_questions_loaded(sample_questions()).unwrap();
    session
}

fn render<P: Clone + 'static>(component: fn(P) -> Element, props: P) -> String {
    let mut dom = VirtualDom::new_with_props(component, props);
    dom.rebuild_in_place();
    drive_dom(&mut dom);
    dioxus_ssr::render(&dom)
}

#[derive(Props, Clone, PartialEq)]
struct QuizHarnessProps {
    vm: QuizVm,
}

#[component]
fn QuizHarness(props: QuizHarnessProps) -> Element {
    rsx! {
        QuizView {
            vm: props.vm.clone(),
            on_navigate: |_| {},
            on_previous: |_| {},
            on_next: |_| {},
            on_answer: |_| {},
            on_submit: |_| {},
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct ReportHarnessProps {
    vm: ReportVm,
}

#[component]
fn ReportHarness(props: ReportHarnessProps) -> Element {
    rsx! {
        ReportView { vm: props.vm.clone(), on_restart: |_| {} }
    }
}

#[derive(Props, Clone, PartialEq)]
struct LoadingHarnessProps {
    failure: Option<String>,
}

#[component]
fn LoadingHarness(props: LoadingHarnessProps) -> Element {
    rsx! {
        LoadingView {
            failure: props.failure.clone(),
            on_retry: |_| {},
            on_restart: |_| {},
        }
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_page_smoke_starts_on_the_identifier_form() {
    let mut harness = setup_page_harness(QuizConfig::default());
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Start Quiz"), "missing start button in {html}");
    assert!(html.contains("Enter your email"), "missing placeholder in {html}");
    assert!(
        html.contains("15 questions, 30:00 on the clock."),
        "missing quiz summary in {html}"
    );
}

#[test]
fn quiz_view_smoke_renders_palette_and_options() {
    let mut session = active_session();
    session.navigate_to(1).unwrap();
    session.answer("5").unwrap();
    let vm = map_quiz(&session.snapshot()).unwrap();

    let html = render(QuizHarness, QuizHarnessProps { vm });
    assert!(html.contains("Q2"), "missing heading in {html}");
    assert!(html.contains("01:30"), "missing clock in {html}");
    assert!(html.contains("1 / 3"), "missing answered count in {html}");
    assert!(html.contains("palette-item--attempted palette-item--current"));
    assert!(html.contains("palette-item--viewed"));
    assert!(html.contains("palette-item--not-viewed"));
    assert!(html.contains("quiz-option quiz-option--selected"));
    assert!(html.contains("Not Viewed"), "missing legend in {html}");
}

#[test]
fn report_view_smoke_lists_every_question() {
    let mut session = active_session();
    session.answer("Au").unwrap();
    session.submit().unwrap();
    let vm = map_report(&session.report().unwrap());

    let html = render(ReportHarness, ReportHarnessProps { vm });
    assert!(html.contains("Your Score: 1 / 3"), "missing score in {html}");
    assert!(html.contains("Submitted"));
    assert_eq!(html.matches("Not Answered").count(), 2);
    assert!(html.contains("Jupiter"));
    assert!(html.contains("Start over"));
}

#[test]
fn loading_view_smoke_offers_retry_after_failure() {
    let html = render(LoadingHarness, LoadingHarnessProps { failure: None });
    assert!(html.contains("Loading questions..."));
    assert!(!html.contains("Retry"));

    let html = render(
        LoadingHarness,
        LoadingHarnessProps {
            failure: Some("question bank unavailable: offline".to_string()),
        },
    );
    assert!(html.contains("Could not load questions: question bank unavailable: offline"));
    assert!(html.contains("Retry"));
    assert!(html.contains("Start over"));
}
