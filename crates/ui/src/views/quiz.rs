use dioxus::prelude::*;

use crate::vm::{QuizVm, palette_legend};

#[component]
pub fn QuizView(
    vm: QuizVm,
    on_navigate: EventHandler<usize>,
    on_previous: EventHandler<()>,
    on_next: EventHandler<()>,
    on_answer: EventHandler<String>,
    on_submit: EventHandler<()>,
) -> Element {
    let legend = palette_legend().into_iter().map(|(label, class)| {
        rsx! {
            span { class: "{class} palette-legend-item", "{label}" }
        }
    });

    let palette = vm.palette.iter().map(|item| {
        let index = item.index;
        let class = item.class();
        let title = item.title();
        let number = item.number;
        rsx! {
            button {
                key: "{index}",
                class: "{class}",
                r#type: "button",
                title: "{title}",
                onclick: move |_| on_navigate.call(index),
                "{number}"
            }
        }
    });

    let options = vm.options.iter().enumerate().map(|(i, option)| {
        let value = option.value.clone();
        let html = option.html.clone();
        let class = if option.selected {
            "quiz-option quiz-option--selected"
        } else {
            "quiz-option"
        };
        rsx! {
            button {
                key: "{i}",
                class: "{class}",
                r#type: "button",
                onclick: move |_| on_answer.call(value.clone()),
                dangerous_inner_html: "{html}",
            }
        }
    });

    rsx! {
        div { class: "page quiz-page",
            header { class: "quiz-status",
                p {
                    strong { "Time Left: " }
                    span { class: "quiz-clock", "{vm.time_left}" }
                }
                p {
                    strong { "Answered: " }
                    "{vm.answered_label}"
                }
            }
            div { class: "palette-legend", {legend} }
            nav { class: "palette", {palette} }
            section { class: "quiz-question",
                h2 { "{vm.heading}" }
                if let Some(category) = vm.category.as_ref() {
                    p { class: "quiz-meta",
                        span { dangerous_inner_html: "{category}" }
                        if let Some(difficulty) = vm.difficulty {
                            span { class: "quiz-difficulty", " · {difficulty}" }
                        }
                    }
                }
                p { class: "quiz-prompt", dangerous_inner_html: "{vm.prompt_html}" }
                div { class: "quiz-options", {options} }
                div { class: "quiz-nav",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        disabled: !vm.can_previous,
                        onclick: move |_| on_previous.call(()),
                        "Previous"
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        disabled: !vm.can_next,
                        onclick: move |_| on_next.call(()),
                        "Next"
                    }
                }
                div { class: "quiz-submit",
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_submit.call(()),
                        "Submit"
                    }
                }
            }
        }
    }
}
