use dioxus::prelude::*;

use exam_core::WizardController;
use exam_core::model::{McqChoice, QuestionId, QuestionImage, QuestionType, SectionId};

use crate::views::state::Notice;
use crate::views::wizard::StepNav;

#[component]
pub fn BuildStep() -> Element {
    let wizard = use_context::<Signal<WizardController>>();

    let (assigned, declared, section_ids) = {
        let controller = wizard.read();
        let doc = controller.document();
        (
            doc.total_assigned_marks(),
            doc.total_marks(),
            doc.sections()
                .iter()
                .map(|s| s.id().clone())
                .collect::<Vec<_>>(),
        )
    };
    let marks_class = if assigned == declared {
        "marks-summary marks-summary--balanced"
    } else {
        "marks-summary marks-summary--mismatch"
    };

    rsx! {
        section { class: "step step-build",
            h2 { "Add Questions" }
            div { class: marks_class, "Assigned {assigned} of {declared} marks" }
            for section_id in section_ids {
                SectionCard { key: "{section_id}", section_id }
            }
            div { class: "build-actions",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: {
                        let mut wizard = wizard;
                        move |_| {
                            wizard.write().add_section();
                        }
                    },
                    "Add Section"
                }
            }
            StepNav { back: true, next_label: "Review" }
        }
    }
}

#[component]
fn SectionCard(section_id: SectionId) -> Element {
    let mut wizard = use_context::<Signal<WizardController>>();
    let mut notice = use_context::<Signal<Option<Notice>>>();

    let Some((title, section_type, marks, question_ids)) = ({
        let controller = wizard.read();
        controller.document().section(&section_id).map(|section| {
            (
                section.title().to_string(),
                section.section_type(),
                section.assigned_marks(),
                section
                    .questions()
                    .iter()
                    .map(|q| q.id().clone())
                    .collect::<Vec<_>>(),
            )
        })
    }) else {
        return rsx! {};
    };

    let title_id = section_id.clone();
    let type_id = section_id.clone();
    let add_id = section_id.clone();
    let remove_id = section_id.clone();

    rsx! {
        div { class: "section-card",
            div { class: "section-card-header",
                input {
                    class: "section-title",
                    r#type: "text",
                    value: "{title}",
                    oninput: move |evt| {
                        wizard
                            .write()
                            .document_mut()
                            .set_section_title(&title_id, evt.value());
                    },
                }
                select {
                    class: "section-type",
                    value: "{section_type.label()}",
                    onchange: move |evt| {
                        if let Ok(section_type) = evt.value().parse::<QuestionType>() {
                            wizard
                                .write()
                                .document_mut()
                                .set_section_type(&type_id, section_type);
                        }
                    },
                    for question_type in QuestionType::ALL {
                        option { value: "{question_type.label()}", "{question_type.label()}" }
                    }
                }
                span { class: "section-marks", "{marks} marks" }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| {
                        wizard.write().document_mut().remove_section(&remove_id);
                    },
                    "Remove Section"
                }
            }
            for question_id in question_ids {
                QuestionCard {
                    key: "{question_id}",
                    section_id: section_id.clone(),
                    question_id,
                }
            }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| {
                    if let Err(err) = wizard.write().add_question(&add_id) {
                        notice.set(Some(Notice::error(err.to_string())));
                    }
                },
                "Add Question"
            }
        }
    }
}

#[component]
fn QuestionCard(section_id: SectionId, question_id: QuestionId) -> Element {
    let mut wizard = use_context::<Signal<WizardController>>();
    let mut notice = use_context::<Signal<Option<Notice>>>();

    let Some((text, marks, question_type, mcq, image_name)) = ({
        let controller = wizard.read();
        controller
            .document()
            .section(&section_id)
            .and_then(|s| s.question(&question_id))
            .map(|question| {
                (
                    question.text().to_string(),
                    question.marks(),
                    question.question_type(),
                    question
                        .mcq()
                        .map(|answer| (answer.options().clone(), answer.correct())),
                    question.image().map(|image| image.name().to_string()),
                )
            })
    }) else {
        return rsx! {};
    };

    let text_ids = (section_id.clone(), question_id.clone());
    let marks_ids = (section_id.clone(), question_id.clone());
    let correct_ids = (section_id.clone(), question_id.clone());
    let delete_ids = (section_id.clone(), question_id.clone());
    let attach_ids = (section_id.clone(), question_id.clone());
    let detach_ids = (section_id.clone(), question_id.clone());

    rsx! {
        div { class: "question-card",
            textarea {
                class: "question-text",
                placeholder: "Question text",
                value: "{text}",
                oninput: move |evt| {
                    wizard
                        .write()
                        .document_mut()
                        .set_question_text(&text_ids.0, &text_ids.1, evt.value());
                },
            }
            label { class: "question-marks",
                span { "Marks" }
                input {
                    r#type: "number",
                    min: "1",
                    value: "{marks}",
                    oninput: move |evt| {
                        let Ok(marks) = evt.value().parse::<u32>() else {
                            return;
                        };
                        let result = wizard
                            .write()
                            .document_mut()
                            .set_question_marks(&marks_ids.0, &marks_ids.1, marks);
                        if let Err(err) = result {
                            notice.set(Some(Notice::error(err.to_string())));
                        }
                    },
                }
            }
            if let Some((options, correct)) = mcq {
                div { class: "mcq-options",
                    for choice in McqChoice::all() {
                        {
                            let option_ids = (section_id.clone(), question_id.clone());
                            let value = options[choice.index()].clone();
                            rsx! {
                                label { class: "mcq-option",
                                    span { class: "mcq-letter", "{choice.letter()}" }
                                    input {
                                        r#type: "text",
                                        value: "{value}",
                                        oninput: move |evt| {
                                            let result = wizard
                                                .write()
                                                .document_mut()
                                                .set_question_option(
                                                    &option_ids.0,
                                                    &option_ids.1,
                                                    choice,
                                                    evt.value(),
                                                );
                                            if let Err(err) = result {
                                                notice.set(Some(Notice::error(err.to_string())));
                                            }
                                        },
                                    }
                                }
                            }
                        }
                    }
                    label { class: "mcq-correct",
                        span { "Correct Answer" }
                        select {
                            value: "{correct.letter()}",
                            onchange: move |evt| {
                                let Some(choice) = McqChoice::all()
                                    .into_iter()
                                    .find(|c| c.letter().to_string() == evt.value())
                                else {
                                    return;
                                };
                                let result = wizard
                                    .write()
                                    .document_mut()
                                    .set_correct_answer(&correct_ids.0, &correct_ids.1, choice);
                                if let Err(err) = result {
                                    notice.set(Some(Notice::error(err.to_string())));
                                }
                            },
                            for choice in McqChoice::all() {
                                option { value: "{choice.letter()}", "{choice.letter()}" }
                            }
                        }
                    }
                }
            }
            if question_type.expects_image() {
                div { class: "question-image",
                    if let Some(name) = image_name {
                        span { class: "image-name", "{name}" }
                        button {
                            class: "btn btn-ghost",
                            r#type: "button",
                            onclick: move |_| {
                                wizard
                                    .write()
                                    .document_mut()
                                    .remove_question_image(&detach_ids.0, &detach_ids.1);
                            },
                            "Remove Image"
                        }
                    } else {
                        label { class: "image-attach",
                            input {
                                r#type: "file",
                                accept: "image/*",
                                onchange: move |evt| {
                                    let Some(file) = evt.files().into_iter().next() else {
                                        return;
                                    };
                                    let ids = attach_ids.clone();
                                    spawn(async move {
                                        let name = file.name();
                                        let media_type =
                                            file.content_type().unwrap_or_default();
                                        match file.read_bytes().await {
                                            Ok(bytes) => {
                                                wizard.write().document_mut().attach_question_image(
                                                    &ids.0,
                                                    &ids.1,
                                                    QuestionImage::new(
                                                        name,
                                                        media_type,
                                                        bytes.to_vec(),
                                                    ),
                                                );
                                            }
                                            Err(_) => {
                                                notice.set(Some(Notice::error(
                                                    "Could not read the selected image.",
                                                )));
                                            }
                                        }
                                    });
                                },
                            }
                            span { "Attach diagram" }
                        }
                    }
                }
            }
            button {
                class: "btn btn-ghost question-delete",
                r#type: "button",
                onclick: move |_| {
                    wizard
                        .write()
                        .document_mut()
                        .delete_question(&delete_ids.0, &delete_ids.1);
                },
                "Delete"
            }
        }
    }
}
