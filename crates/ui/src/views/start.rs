use dioxus::prelude::*;

use crate::views::ViewError;

#[component]
pub fn StartView(
    question_count: u32,
    time_limit: String,
    error: Option<ViewError>,
    busy: bool,
    on_start: EventHandler<String>,
) -> Element {
    let mut identifier = use_signal(String::new);

    rsx! {
        div { class: "page start-page",
            header { class: "view-header",
                h2 { class: "view-title", "Quiz App" }
                p { class: "view-subtitle", "{question_count} questions, {time_limit} on the clock." }
            }
            div { class: "start-form",
                input {
                    class: "start-input",
                    r#type: "email",
                    placeholder: "Enter your email",
                    value: "{identifier}",
                    oninput: move |evt| identifier.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy,
                    onclick: move |_| on_start.call(identifier.read().trim().to_string()),
                    "Start Quiz"
                }
            }
            if let Some(err) = error {
                p { class: "view-error", role: "alert", "{err.message()}" }
            }
        }
    }
}
