use chrono::NaiveDate;
use dioxus::prelude::*;

use exam_core::WizardController;

use crate::views::wizard::StepNav;

const GRADES: [&str; 12] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII",
];

const ACADEMIC_YEARS: [&str; 2] = ["2025-26", "2026-27"];

const DURATIONS: [&str; 5] = ["1 Hour", "1.5 Hours", "2 Hours", "2.5 Hours", "3 Hours"];

/// How many sections the selector offers. The document model accepts up
/// to fifteen; the form deliberately keeps the original's shorter list.
const SECTION_CHOICES: [usize; 5] = [1, 2, 3, 4, 5];

#[component]
pub fn DetailsStep() -> Element {
    let mut wizard = use_context::<Signal<WizardController>>();

    let (grade, subject, exam_year, exam_date, total_marks, duration, section_count) = {
        let controller = wizard.read();
        let doc = controller.document();
        (
            doc.grade().to_string(),
            doc.subject().to_string(),
            doc.exam_year().to_string(),
            doc.exam_date()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            doc.total_marks(),
            doc.duration().to_string(),
            doc.number_of_sections(),
        )
    };

    rsx! {
        section { class: "step step-details",
            h2 { "Exam Details" }
            div { class: "form-grid",
                label { class: "form-field",
                    span { "Grade" }
                    select {
                        value: "{grade}",
                        onchange: move |evt| {
                            wizard.write().document_mut().set_grade(evt.value());
                        },
                        option { value: "", disabled: true, "Select grade" }
                        for g in GRADES {
                            option { value: "{g}", "Grade {g}" }
                        }
                    }
                }
                label { class: "form-field",
                    span { "Subject" }
                    input {
                        r#type: "text",
                        placeholder: "e.g. Mathematics",
                        value: "{subject}",
                        oninput: move |evt| {
                            wizard.write().document_mut().set_subject(evt.value());
                        },
                    }
                }
                label { class: "form-field",
                    span { "Academic Year" }
                    select {
                        value: "{exam_year}",
                        onchange: move |evt| {
                            wizard.write().document_mut().set_exam_year(evt.value());
                        },
                        option { value: "", disabled: true, "Select year" }
                        for year in ACADEMIC_YEARS {
                            option { value: "{year}", "{year}" }
                        }
                    }
                }
                label { class: "form-field",
                    span { "Exam Date" }
                    input {
                        r#type: "date",
                        value: "{exam_date}",
                        oninput: move |evt| {
                            let parsed = NaiveDate::parse_from_str(&evt.value(), "%Y-%m-%d").ok();
                            wizard.write().document_mut().set_exam_date(parsed);
                        },
                    }
                }
                label { class: "form-field",
                    span { "Total Marks" }
                    input {
                        r#type: "number",
                        min: "1",
                        value: "{total_marks}",
                        oninput: move |evt| {
                            let marks = evt.value().parse().unwrap_or(0);
                            wizard.write().document_mut().set_total_marks(marks);
                        },
                    }
                }
                label { class: "form-field",
                    span { "Duration" }
                    select {
                        value: "{duration}",
                        onchange: move |evt| {
                            wizard.write().document_mut().set_duration(evt.value());
                        },
                        option { value: "", disabled: true, "Select duration" }
                        for d in DURATIONS {
                            option { value: "{d}", "{d}" }
                        }
                    }
                }
                label { class: "form-field",
                    span { "Number of Sections" }
                    select {
                        value: "{section_count}",
                        onchange: move |evt| {
                            if let Ok(n) = evt.value().parse::<usize>() {
                                wizard.write().set_section_count(n);
                            }
                        },
                        for n in SECTION_CHOICES {
                            option { value: "{n}", "{n}" }
                        }
                    }
                }
            }
            StepNav { back: true, next_label: "Continue" }
        }
    }
}
