use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use url::Url;

use exam_core::model::McqChoice;
use exam_core::template::DOCX_MEDIA_TYPE;
use exam_core::{TemplateFile, WizardController, WizardStep};
use services::{
    GatewayError, GeneratedPapers, GenerationGateway, GenerationRequest, GenerationService,
};

use crate::context::{UiApp, build_app_context};
use crate::views::WizardView;

/// Gateway double that always delivers both artifacts.
struct StubGateway;

#[async_trait]
impl GenerationGateway for StubGateway {
    async fn generate(
        &self,
        _request: &GenerationRequest,
    ) -> Result<GeneratedPapers, GatewayError> {
        Ok(GeneratedPapers::new(
            Some(Url::parse("https://files.test/paper.docx").expect("url")),
            Some(Url::parse("https://files.test/paper.pdf").expect("url")),
        ))
    }
}

struct TestApp {
    generation: Arc<GenerationService>,
}

impl UiApp for TestApp {
    fn app_name(&self) -> String {
        "Exam Paper Generator".to_string()
    }

    fn generation(&self) -> Arc<GenerationService> {
        Arc::clone(&self.generation)
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<dyn UiApp>,
    controller: WizardController,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn HarnessRoot(props: HarnessProps) -> Element {
    use_context_provider(|| build_app_context(&props.app));
    rsx! {
        WizardView { initial: Some(props.controller.clone()) }
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
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

/// Renders the wizard with a preset controller over a stub gateway.
pub fn setup_view_harness(controller: WizardController) -> ViewHarness {
    let generation = Arc::new(GenerationService::new(Arc::new(StubGateway)));
    let app: Arc<dyn UiApp> = Arc::new(TestApp { generation });
    let dom = VirtualDom::new_with_props(HarnessRoot, HarnessProps { app, controller });
    ViewHarness { dom }
}

// ─── Controller presets ────────────────────────────────────────────────────────

pub fn docx_template() -> TemplateFile {
    TemplateFile::new("template.docx", DOCX_MEDIA_TYPE, vec![1, 2, 3]).expect("docx")
}

pub fn controller_at(step: WizardStep) -> WizardController {
    let mut wizard = WizardController::new();
    if step == WizardStep::Upload {
        return wizard;
    }
    wizard.attach_template(docx_template());
    wizard.advance().expect("to details");
    if step == WizardStep::Details {
        return wizard;
    }

    {
        let doc = wizard.document_mut();
        doc.set_grade("X");
        doc.set_subject("Mathematics");
        doc.set_exam_year("2025-26");
        doc.set_exam_date(chrono::NaiveDate::from_ymd_opt(2026, 3, 1));
        doc.set_duration("2 Hours");
        doc.set_total_marks(50);
    }
    wizard.advance().expect("to build");

    let section = wizard.document().sections()[0].id().clone();
    let question = wizard.add_question(&section).expect("add question");
    {
        let doc = wizard.document_mut();
        doc.set_question_text(&section, &question, "What is 6 x 7?");
        doc.set_question_marks(&section, &question, 50).expect("marks");
        doc.set_question_option(&section, &question, McqChoice::all()[0], "42")
            .expect("option");
    }
    if step == WizardStep::Build {
        return wizard;
    }

    wizard.advance().expect("to review");
    if step == WizardStep::Review {
        return wizard;
    }

    wizard.advance().expect("to generate");
    wizard
}
