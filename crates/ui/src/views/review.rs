use dioxus::prelude::*;

use exam_core::WizardController;

use crate::views::wizard::StepNav;
use crate::vm::map_review;

/// Read-only summary of the paper before generation. Advisory only:
/// warnings are rendered, never enforced here.
#[component]
pub fn ReviewStep() -> Element {
    let wizard = use_context::<Signal<WizardController>>();
    let vm = map_review(wizard.read().document());

    rsx! {
        section { class: "step step-review",
            h2 { "Review" }
            dl { class: "review-details",
                dt { "Grade" }
                dd { "Grade {vm.grade}" }
                dt { "Subject" }
                dd { "{vm.subject}" }
                dt { "Academic Year" }
                dd { "{vm.exam_year}" }
                dt { "Exam Date" }
                dd { "{vm.exam_date}" }
                dt { "Duration" }
                dd { "{vm.duration}" }
                dt { "Total Marks" }
                dd { "{vm.declared_marks}" }
                dt { "Questions" }
                dd { "{vm.total_questions}" }
            }
            if let Some(mismatch) = vm.mismatch {
                div { class: "review-warning",
                    "Assigned marks ({mismatch.actual}) do not match the declared total "
                    "({mismatch.expected}); the papers will show a {mismatch.difference()}-mark gap."
                }
            }
            if vm.missing_questions {
                div { class: "review-warning", "Some sections have no questions yet." }
            }
            if vm.questions_needing_text > 0 {
                div { class: "review-warning",
                    "{vm.questions_needing_text} question(s) still need text."
                }
            }
            for section in vm.sections {
                div { class: "review-section",
                    h3 { "{section.title}" }
                    p { class: "review-section-meta",
                        "{section.type_label} | {section.question_count} question(s) | {section.assigned_marks} marks"
                    }
                    ol { class: "review-questions",
                        for question in section.questions {
                            li {
                                class: if question.needs_text {
                                    "review-question review-question--empty"
                                } else {
                                    "review-question"
                                },
                                if question.needs_text {
                                    em { "(no text yet)" }
                                } else {
                                    span { "{question.text}" }
                                }
                                span { class: "review-question-marks", " [{question.marks}]" }
                                if let Some(letter) = question.correct_option {
                                    span { class: "review-question-answer", " Answer: {letter}" }
                                }
                                if question.has_image {
                                    span { class: "review-question-image", " (diagram attached)" }
                                }
                            }
                        }
                    }
                }
            }
            StepNav { back: true, next_label: "Generate" }
        }
    }
}
