use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;
use uuid::Uuid;

use exam_core::model::ExamDocument;
use exam_core::template::{DOCX_MEDIA_TYPE, TemplateFile};

use crate::error::GatewayError;

//
// ─── REQUEST ───────────────────────────────────────────────────────────────────
//

/// Correlates one generation call across logs and retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationRequestId(Uuid);

impl GenerationRequestId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GenerationRequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GenerationRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The bundle handed to the generation backend: raw template bytes plus
/// the serialized exam-data snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    id: GenerationRequestId,
    template_name: String,
    template_bytes: Vec<u8>,
    exam_data: String,
}

impl GenerationRequest {
    /// Serializes the document snapshot alongside the template.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the snapshot cannot be encoded.
    pub fn new(
        template: &TemplateFile,
        snapshot: &ExamDocument,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: GenerationRequestId::new(),
            template_name: template.name().to_string(),
            template_bytes: template.bytes().to_vec(),
            exam_data: serde_json::to_string(snapshot)?,
        })
    }

    #[must_use]
    pub fn id(&self) -> GenerationRequestId {
        self.id
    }

    #[must_use]
    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    #[must_use]
    pub fn template_bytes(&self) -> &[u8] {
        &self.template_bytes
    }

    /// The `examData` payload, exactly as it travels on the wire.
    #[must_use]
    pub fn exam_data(&self) -> &str {
        &self.exam_data
    }
}

//
// ─── RESPONSE ──────────────────────────────────────────────────────────────────
//

/// How much of the requested output the backend delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperOutcome {
    /// Both the editable and the print-ready artifact arrived.
    Complete,
    /// Exactly one artifact arrived; surfaced distinctly from failure.
    Partial,
    /// The backend answered success but delivered nothing.
    Empty,
}

/// Download references for the generated papers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedPapers {
    docx: Option<Url>,
    pdf: Option<Url>,
}

impl GeneratedPapers {
    #[must_use]
    pub fn new(docx: Option<Url>, pdf: Option<Url>) -> Self {
        Self { docx, pdf }
    }

    #[must_use]
    pub fn docx(&self) -> Option<&Url> {
        self.docx.as_ref()
    }

    #[must_use]
    pub fn pdf(&self) -> Option<&Url> {
        self.pdf.as_ref()
    }

    #[must_use]
    pub fn outcome(&self) -> PaperOutcome {
        match (&self.docx, &self.pdf) {
            (Some(_), Some(_)) => PaperOutcome::Complete,
            (None, None) => PaperOutcome::Empty,
            _ => PaperOutcome::Partial,
        }
    }
}

//
// ─── GATEWAY BOUNDARY ──────────────────────────────────────────────────────────
//

/// External boundary that turns a template plus exam data into
/// downloadable papers. Implementations must not retry on their own.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    async fn generate(&self, request: &GenerationRequest)
    -> Result<GeneratedPapers, GatewayError>;
}

/// HTTP implementation: multipart POST with a `template` file part and
/// an `examData` JSON text part.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    endpoint: Url,
}

impl HttpGateway {
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl GenerationGateway for HttpGateway {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedPapers, GatewayError> {
        let template = Part::bytes(request.template_bytes().to_vec())
            .file_name(request.template_name().to_string())
            .mime_str(DOCX_MEDIA_TYPE)?;
        let form = Form::new()
            .part("template", template)
            .text("examData", request.exam_data().to_string());

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GatewayError::Status(response.status()));
        }

        let papers: GeneratedPapers = response.json().await?;
        Ok(papers)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
