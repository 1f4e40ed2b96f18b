use dioxus::prelude::*;
use log::warn;

use quiz_core::session::{Phase, format_clock};

use crate::context::AppContext;
use crate::views::{LoadingView, QuizView, ReportView, StartView, ViewError, report_dispatch};
use crate::vm::{map_quiz, map_report};

/// Hosts one quiz session at a time. "Start over" remounts the screen, which
/// abandons the old runner and spawns a new one.
#[component]
pub fn QuizPage() -> Element {
    let mut attempt = use_signal(|| 0_u32);

    rsx! {
        QuizScreen { key: "{attempt}", on_restart: move |()| attempt += 1 }
    }
}

#[component]
fn QuizScreen(on_restart: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let handle = use_hook(|| ctx.spawn_quiz());
    let mut snapshot = use_signal(|| handle.snapshot());
    let mut error = use_signal(|| None::<ViewError>);
    let mut starting = use_signal(|| false);

    {
        let handle = handle.clone();
        use_future(move || {
            let mut updates = handle.subscribe();
            async move {
                loop {
                    let next = updates.borrow_and_update().clone();
                    snapshot.set(next);
                    if updates.changed().await.is_err() {
                        break;
                    }
                }
            }
        });
    }
    {
        let handle = handle.clone();
        use_drop(move || handle.abandon());
    }

    let on_start = {
        let handle = handle.clone();
        EventHandler::new(move |identifier: String| {
            let handle = handle.clone();
            starting.set(true);
            spawn(async move {
                let result = handle.start(identifier).await;
                if let Err(err) = &result {
                    warn!("quiz did not start: {err}");
                }
                error.set(result.err().map(ViewError::from));
                starting.set(false);
            });
        })
    };
    let on_retry = {
        let handle = handle.clone();
        EventHandler::new(move |()| error.set(report_dispatch(handle.retry_fetch())))
    };
    let on_navigate = {
        let handle = handle.clone();
        EventHandler::new(move |index: usize| error.set(report_dispatch(handle.navigate_to(index))))
    };
    let on_previous = {
        let handle = handle.clone();
        EventHandler::new(move |()| error.set(report_dispatch(handle.navigate_previous())))
    };
    let on_next = {
        let handle = handle.clone();
        EventHandler::new(move |()| error.set(report_dispatch(handle.navigate_next())))
    };
    let on_answer = {
        let handle = handle.clone();
        EventHandler::new(move |option: String| error.set(report_dispatch(handle.answer(option))))
    };
    let on_submit = {
        let handle = handle.clone();
        EventHandler::new(move |()| error.set(report_dispatch(handle.submit())))
    };

    let current = snapshot.read().clone();
    let config = ctx.config();

    let body = match current.phase {
        Phase::NotStarted => rsx! {
            StartView {
                question_count: config.question_count,
                time_limit: format_clock(config.duration_secs),
                error: error(),
                busy: starting(),
                on_start,
            }
        },
        Phase::Loading => rsx! {
            LoadingView {
                failure: current.fetch_failure.clone(),
                on_retry,
                on_restart,
            }
        },
        Phase::Active => match map_quiz(&current) {
            Some(vm) => rsx! {
                QuizView {
                    vm,
                    on_navigate,
                    on_previous,
                    on_next,
                    on_answer,
                    on_submit,
                }
            },
            None => rsx! {
                p { class: "loading", "Loading questions..." }
            },
        },
        Phase::Reported => match current.report.as_ref().map(map_report) {
            Some(vm) => rsx! {
                ReportView { vm, on_restart }
            },
            None => rsx! {
                p { "{ViewError::Unknown.message()}" }
            },
        },
    };

    let banner = error().filter(|_| current.phase != Phase::NotStarted);

    rsx! {
        if let Some(err) = banner {
            p { class: "view-error", role: "alert", "{err.message()}" }
        }
        {body}
    }
}
