use dioxus::prelude::*;

use exam_core::{TemplateFile, WizardController};

use crate::views::state::Notice;
use crate::views::wizard::StepNav;

#[component]
pub fn UploadStep() -> Element {
    let mut wizard = use_context::<Signal<WizardController>>();
    let mut notice = use_context::<Signal<Option<Notice>>>();

    let attached = wizard
        .read()
        .template()
        .map(|t| (t.name().to_string(), t.size_kb()));

    rsx! {
        section { class: "step step-upload",
            h2 { "Upload Template" }
            p { class: "step-hint",
                "Upload the .docx template the generated papers will be based on."
            }
            label { class: "upload-drop",
                input {
                    r#type: "file",
                    accept: ".docx",
                    onchange: move |evt| {
                        let Some(file) = evt.files().into_iter().next() else {
                            return;
                        };
                        spawn(async move {
                            let name = file.name();
                            let media_type = file.content_type().unwrap_or_default();
                            match file.read_bytes().await {
                                Ok(bytes) => {
                                    match TemplateFile::new(&name, &media_type, bytes.to_vec()) {
                                        Ok(template) => {
                                            wizard.write().attach_template(template);
                                            notice.set(Some(Notice::success(format!(
                                                "'{name}' uploaded."
                                            ))));
                                        }
                                        Err(err) => {
                                            notice.set(Some(Notice::error(err.to_string())));
                                        }
                                    }
                                }
                                Err(_) => {
                                    notice.set(Some(Notice::error(
                                        "Could not read the selected file.",
                                    )));
                                }
                            }
                        });
                    },
                }
                span { "Choose a .docx file" }
            }
            if let Some((name, size_kb)) = attached {
                div { class: "upload-summary",
                    span { class: "upload-name", "{name}" }
                    span { class: "upload-size", "{size_kb:.1} KB" }
                    button {
                        class: "btn btn-ghost",
                        r#type: "button",
                        onclick: move |_| {
                            wizard.write().clear_template();
                            notice.set(None);
                        },
                        "Remove"
                    }
                }
            }
            StepNav { back: false, next_label: "Continue" }
        }
    }
}
