use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::QuizPage;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", QuizPage)] Quiz {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "app-header",
                h1 { "Quiz App" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
