use dioxus::prelude::*;

use crate::vm::ReportVm;

#[component]
pub fn ReportView(vm: ReportVm, on_restart: EventHandler<()>) -> Element {
    let rows = vm.rows.iter().enumerate().map(|(i, row)| {
        let row = row.clone();
        let given_class = row.given_class();
        rsx! {
            div { key: "{i}", class: "report-row",
                p {
                    strong { "{row.heading} " }
                    span { dangerous_inner_html: "{row.prompt_html}" }
                }
                p {
                    strong { "Your Answer: " }
                    span { class: "{given_class}", dangerous_inner_html: "{row.given_html}" }
                }
                p {
                    strong { "Correct Answer: " }
                    span { dangerous_inner_html: "{row.correct_html}" }
                }
                hr {}
            }
        }
    });

    let reason_class = if vm.timed_out {
        "report-reason report-reason--timeout"
    } else {
        "report-reason"
    };

    rsx! {
        div { class: "page report-page",
            header { class: "view-header",
                h2 { class: "view-title", "Quiz Report" }
                h3 { "Your Score: {vm.score_label}" }
                p { class: "{reason_class}", "{vm.reason}" }
                if let Some(label) = vm.unanswered_label.as_ref() {
                    p { class: "report-unanswered", "{label}" }
                }
                if let Some(elapsed) = vm.elapsed.as_ref() {
                    p { class: "report-elapsed", "Time taken: {elapsed}" }
                }
                if let Some(finished_at) = vm.finished_at.as_ref() {
                    p { class: "report-finished", "Finished {finished_at}" }
                }
            }
            div { class: "view-divider" }
            div { class: "report-rows", {rows} }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| on_restart.call(()),
                "Start over"
            }
        }
    }
}
