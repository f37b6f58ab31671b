use dioxus::prelude::*;

use exam_core::WizardController;
use services::{GeneratedPapers, GenerationPhase, GenerationProgress, PaperOutcome};

use crate::context::AppContext;
use crate::views::state::Notice;

/// Lifecycle of the generation call driven from this step.
#[derive(Clone, Debug, PartialEq)]
enum GenerateState {
    Idle,
    Running(GenerationProgress),
    Done(GeneratedPapers),
    Failed(String),
}

#[component]
pub fn GenerateStep() -> Element {
    let ctx = use_context::<AppContext>();
    let mut wizard = use_context::<Signal<WizardController>>();
    let mut notice = use_context::<Signal<Option<Notice>>>();
    let mut state = use_signal(|| GenerateState::Idle);

    let service = ctx.generation();
    let on_generate = move |_| {
        if let Err(blocked) = wizard.write().begin_generation() {
            notice.set(Some(Notice::warning(blocked.to_string())));
            return;
        }
        let (template, snapshot) = {
            let controller = wizard.read();
            (controller.template().cloned(), controller.snapshot())
        };
        let Some(template) = template else {
            // begin_generation already guarantees a template; stay safe anyway.
            wizard.write().finish_generation();
            return;
        };
        notice.set(None);
        state.set(GenerateState::Running(
            GenerationPhase::ProcessingTemplate.into(),
        ));
        let service = service.clone();
        spawn(async move {
            let result = service
                .generate(&template, &snapshot, |progress| {
                    state.set(GenerateState::Running(progress));
                })
                .await;
            wizard.write().finish_generation();
            match result {
                Ok(papers) => {
                    if papers.outcome() == PaperOutcome::Partial {
                        notice.set(Some(Notice::warning(
                            "Only one of the two documents was generated.",
                        )));
                    }
                    state.set(GenerateState::Done(papers));
                }
                Err(err) => {
                    state.set(GenerateState::Failed(err.to_string()));
                }
            }
        });
    };

    let current = state.read().clone();

    rsx! {
        section { class: "step step-generate",
            h2 { "Generate" }
            match current {
                GenerateState::Idle => rsx! {
                    p { class: "step-hint",
                        "Everything is in place. Generate the Word and PDF papers."
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: on_generate,
                        "Generate Papers"
                    }
                },
                GenerateState::Running(progress) => rsx! {
                    div { class: "generate-progress",
                        div { class: "progress-bar",
                            div {
                                class: "progress-fill",
                                style: "width: {progress.percent}%",
                            }
                        }
                        p { class: "progress-message", "{progress.phase.message()}" }
                        span { class: "progress-percent", "{progress.percent}%" }
                    }
                },
                GenerateState::Done(papers) => rsx! {
                    div { class: "generate-done",
                        h3 { "Your papers are ready" }
                        ul { class: "download-links",
                            if let Some(docx) = papers.docx() {
                                li {
                                    a { href: "{docx}", "Download Word document" }
                                }
                            }
                            if let Some(pdf) = papers.pdf() {
                                li {
                                    a { href: "{pdf}", "Download PDF" }
                                }
                            }
                        }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                wizard.write().return_to_review();
                                state.set(GenerateState::Idle);
                            },
                            "Back to Review"
                        }
                    }
                },
                GenerateState::Failed(message) => rsx! {
                    div { class: "generate-failed",
                        p { class: "generate-error", "Generation failed: {message}" }
                        button {
                            class: "btn btn-primary",
                            r#type: "button",
                            onclick: move |_| {
                                wizard.write().return_to_review();
                                state.set(GenerateState::Idle);
                                notice.set(Some(Notice::warning(
                                    "Check the paper and try generating again.",
                                )));
                            },
                            "Back to Review"
                        }
                    }
                },
            }
        }
    }
}
