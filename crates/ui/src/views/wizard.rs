use dioxus::prelude::*;

use exam_core::{WizardController, WizardStep};

use crate::views::state::Notice;
use crate::views::{BuildStep, DetailsStep, GenerateStep, ReviewStep, UploadStep};

/// Hosts the wizard session: one controller signal, one notice signal,
/// both provided to every step view through context.
#[component]
pub fn WizardView(initial: Option<WizardController>) -> Element {
    let wizard = use_signal(move || initial.clone().unwrap_or_default());
    let notice = use_signal(|| None::<Notice>);
    use_context_provider(|| wizard);
    use_context_provider(|| notice);

    let step = wizard.read().step();
    let banner = notice.read().clone();

    rsx! {
        div { class: "wizard",
            header { class: "wizard-header",
                h1 { "Exam Paper Generator" }
            }
            ProgressTracker { current: step }
            if let Some(banner) = banner {
                div { class: banner.class(), role: "status", "{banner.text()}" }
            }
            match step {
                WizardStep::Upload => rsx! { UploadStep {} },
                WizardStep::Details => rsx! { DetailsStep {} },
                WizardStep::Build => rsx! { BuildStep {} },
                WizardStep::Review => rsx! { ReviewStep {} },
                WizardStep::Generate => rsx! { GenerateStep {} },
            }
        }
    }
}

/// The five-stop progress rail across the top of the wizard.
#[component]
pub fn ProgressTracker(current: WizardStep) -> Element {
    rsx! {
        ol { class: "progress-tracker",
            for step in WizardStep::ALL {
                li {
                    key: "{step.number()}",
                    class: if step == current {
                        "tracker-step tracker-step--active"
                    } else if step < current {
                        "tracker-step tracker-step--done"
                    } else {
                        "tracker-step"
                    },
                    span { class: "tracker-number", "{step.number()}" }
                    span { class: "tracker-title", "{step.title()}" }
                }
            }
        }
    }
}

/// Shared Back/Next footer. `advance` consults the current step's gate;
/// a refusal stays put and surfaces the unmet condition as a warning.
#[component]
pub(crate) fn StepNav(back: bool, next_label: String) -> Element {
    let mut wizard = use_context::<Signal<WizardController>>();
    let mut notice = use_context::<Signal<Option<Notice>>>();

    rsx! {
        div { class: "wizard-nav",
            if back {
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        match wizard.write().retreat() {
                            Ok(_) => notice.set(None),
                            Err(blocked) => notice.set(Some(Notice::warning(blocked.to_string()))),
                        }
                    },
                    "Back"
                }
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| {
                    match wizard.write().advance() {
                        Ok(_) => notice.set(None),
                        Err(blocked) => notice.set(Some(Notice::warning(blocked.to_string()))),
                    }
                },
                "{next_label}"
            }
        }
    }
}
