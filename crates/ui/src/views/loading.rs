use dioxus::prelude::*;

#[component]
pub fn LoadingView(
    failure: Option<String>,
    on_retry: EventHandler<()>,
    on_restart: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "page loading-page",
            match failure {
                None => rsx! {
                    p { class: "loading", "Loading questions..." }
                },
                Some(message) => rsx! {
                    p { class: "view-error", role: "alert", "Could not load questions: {message}" }
                    div { class: "loading-actions",
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| on_retry.call(()),
                            "Retry"
                        }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| on_restart.call(()),
                            "Start over"
                        }
                    }
                },
            }
        }
    }
}
