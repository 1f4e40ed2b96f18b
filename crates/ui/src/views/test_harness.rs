use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::Question;
use quiz_core::time::fixed_clock;
use services::{InMemoryQuestionBank, QuizConfig, QuizRunner};

use crate::context::{UiApp, build_app_context};
use crate::views::QuizPage;

#[derive(Clone)]
struct TestApp {
    runner: QuizRunner,
}

impl UiApp for TestApp {
    fn quiz_runner(&self) -> QuizRunner {
        self.runner.clone()
    }
}

#[derive(Props, Clone)]
struct PageHarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for PageHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn PageRouterHarness(props: PageHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    rsx! { QuizPage {} }
}

pub struct PageHarness {
    pub dom: VirtualDom,
}

impl PageHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn sample_questions() -> Vec<Question> {
    vec![
        Question::new("Symbol for &quot;gold&quot;?", "Au", ["Ag", "Gd", "Go"]).unwrap(),
        Question::new("2 + 2?", "4", ["3", "5", "22"]).unwrap(),
        Question::new("Largest planet?", "Jupiter", ["Mars", "Venus", "Earth"]).unwrap(),
    ]
}

/// Must be called inside a Tokio runtime; the page spawns its runner on mount.
pub fn setup_page_harness(config: QuizConfig) -> PageHarness {
    let bank = Arc::new(InMemoryQuestionBank::new(sample_questions()));
    let runner = QuizRunner::new(bank, config).with_clock(fixed_clock());
    let app = Arc::new(TestApp { runner });

    let dom = VirtualDom::new_with_props(PageRouterHarness, PageHarnessProps { app });
    PageHarness { dom }
}
