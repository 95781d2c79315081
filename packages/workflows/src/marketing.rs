// ABOUTME: Agent Multiplier workflows: notes to marketing copy and room photo analysis
// ABOUTME: Two independent flows, each with at most one gateway call in flight

use bionic_ai::ModelGateway;
use bionic_core::{is_blank, MarketingContent, RoomAnalysis, FLYER_POINT_COUNT};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clipboard::{Clipboard, ClipboardError};
use crate::status::{WorkflowError, WorkflowResult, WorkflowStatus};

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("Image file is empty")]
    Empty,
}

/// Infer an image MIME type from a file extension
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// Identity of one image selection; a new id is minted on every select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(Uuid);

impl ImageId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A room photo chosen for analysis
#[derive(Debug, Clone)]
pub struct ImageSelection {
    name: String,
    mime_type: String,
    bytes: Arc<Vec<u8>>,
}

impl ImageSelection {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: Arc::new(bytes),
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let mime_type = mime_type_for(path)
            .ok_or_else(|| ImageError::UnsupportedType(path.display().to_string()))?;

        let bytes = tokio::fs::read(path).await?;
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        debug!("Loaded image {} ({} bytes, {})", name, bytes.len(), mime_type);
        Ok(Self::new(name, mime_type, bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// What a copy action takes from the generated suite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Listing,
    Caption,
    Flyer,
    /// Zero-based flyer point index
    FlyerPoint(usize),
}

impl CopyTarget {
    pub fn text_from(&self, content: &MarketingContent) -> Option<String> {
        match self {
            CopyTarget::Listing => Some(content.professional_listing.clone()),
            CopyTarget::Caption => Some(content.instagram_caption.clone()),
            CopyTarget::Flyer => Some(content.flyer_block()),
            CopyTarget::FlyerPoint(index) => content.flyer_points.get(*index).cloned(),
        }
    }
}

impl FromStr for CopyTarget {
    type Err = String;

    /// Accepts `listing`, `caption`, `flyer`, or `point:N` with N counted from 1
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "listing" => Ok(CopyTarget::Listing),
            "caption" => Ok(CopyTarget::Caption),
            "flyer" => Ok(CopyTarget::Flyer),
            other => {
                let number = other
                    .strip_prefix("point:")
                    .ok_or_else(|| format!("unknown copy target '{}'", s))?;
                let number: usize = number
                    .parse()
                    .map_err(|_| format!("invalid flyer point '{}'", number))?;
                if number == 0 || number > FLYER_POINT_COUNT {
                    return Err(format!(
                        "flyer point must be between 1 and {}",
                        FLYER_POINT_COUNT
                    ));
                }
                Ok(CopyTarget::FlyerPoint(number - 1))
            }
        }
    }
}

/// Detached notes-to-copy request
#[derive(Debug, Clone)]
pub struct CopyRequest {
    notes: String,
}

impl CopyRequest {
    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub async fn run(self, gateway: &dyn ModelGateway) -> WorkflowResult<MarketingContent> {
        Ok(gateway.generate_marketing_copy(&self.notes).await?)
    }
}

/// Detached image analysis request, tagged with the selection it was made for
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    image_id: ImageId,
    mime_type: String,
    bytes: Arc<Vec<u8>>,
}

impl AnalysisRequest {
    pub fn image_id(&self) -> ImageId {
        self.image_id
    }

    pub async fn run(self, gateway: &dyn ModelGateway) -> (ImageId, WorkflowResult<RoomAnalysis>) {
        let result = gateway
            .analyze_image(&self.bytes, &self.mime_type)
            .await
            .map_err(WorkflowError::from);
        (self.image_id, result)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MarketingGenerator {
    notes: String,
    content: Option<MarketingContent>,
    copy_status: WorkflowStatus,
    image: Option<(ImageId, ImageSelection)>,
    analysis: Option<(ImageId, RoomAnalysis)>,
    analysis_status: WorkflowStatus,
}

impl MarketingGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn content(&self) -> Option<&MarketingContent> {
        self.content.as_ref()
    }

    pub fn copy_status(&self) -> &WorkflowStatus {
        &self.copy_status
    }

    pub fn analysis_status(&self) -> &WorkflowStatus {
        &self.analysis_status
    }

    pub fn can_generate(&self) -> bool {
        !is_blank(&self.notes) && !self.copy_status.is_busy()
    }

    pub fn begin_copy(&mut self) -> Option<CopyRequest> {
        if !self.can_generate() {
            return None;
        }
        self.copy_status = WorkflowStatus::Busy;
        Some(CopyRequest {
            notes: self.notes.clone(),
        })
    }

    pub fn complete_copy(&mut self, result: WorkflowResult<MarketingContent>) {
        match result {
            Ok(content) => {
                info!("Marketing suite ready");
                self.content = Some(content);
                self.copy_status = WorkflowStatus::Idle;
            }
            Err(e) => {
                warn!("Marketing generation failed: {}", e);
                self.copy_status = WorkflowStatus::from_error(&e);
            }
        }
    }

    /// Generate copy in place; false when there was nothing to run
    pub async fn generate_copy(&mut self, gateway: &dyn ModelGateway) -> bool {
        let Some(request) = self.begin_copy() else {
            return false;
        };
        let result = request.run(gateway).await;
        self.complete_copy(result);
        true
    }

    /// Text for a copy action, if a suite has been generated
    pub fn copy_text(&self, target: CopyTarget) -> Option<String> {
        self.content.as_ref().and_then(|c| target.text_from(c))
    }

    pub fn copy_to(
        &self,
        target: CopyTarget,
        clipboard: &mut dyn Clipboard,
    ) -> Result<Option<String>, ClipboardError> {
        let Some(text) = self.copy_text(target) else {
            return Ok(None);
        };
        clipboard.set_text(&text)?;
        Ok(Some(text))
    }

    pub fn select_image(&mut self, selection: ImageSelection) -> ImageId {
        let id = ImageId::new();
        debug!("Selected image {} as {}", selection.name(), id);
        self.image = Some((id, selection));
        self.analysis = None;
        if !self.analysis_status.is_busy() {
            self.analysis_status = WorkflowStatus::Idle;
        }
        id
    }

    pub fn clear_image(&mut self) {
        self.image = None;
        self.analysis = None;
        if !self.analysis_status.is_busy() {
            self.analysis_status = WorkflowStatus::Idle;
        }
    }

    pub fn selected_image(&self) -> Option<&ImageSelection> {
        self.image.as_ref().map(|(_, selection)| selection)
    }

    pub fn selected_image_id(&self) -> Option<ImageId> {
        self.image.as_ref().map(|(id, _)| *id)
    }

    pub fn can_analyze(&self) -> bool {
        self.image.is_some() && !self.analysis_status.is_busy()
    }

    pub fn begin_analysis(&mut self) -> Option<AnalysisRequest> {
        if !self.can_analyze() {
            return None;
        }
        let (id, selection) = self.image.as_ref()?;
        let request = AnalysisRequest {
            image_id: *id,
            mime_type: selection.mime_type.clone(),
            bytes: Arc::clone(&selection.bytes),
        };
        self.analysis_status = WorkflowStatus::Busy;
        Some(request)
    }

    /// Apply an analysis result
    ///
    /// A result for a replaced image is discarded. If the image selected in
    /// its place has no analysis yet, the follow-up request for it is returned.
    pub fn complete_analysis(
        &mut self,
        image_id: ImageId,
        result: WorkflowResult<RoomAnalysis>,
    ) -> Option<AnalysisRequest> {
        if self.selected_image_id() != Some(image_id) {
            debug!("Discarding analysis for replaced image {}", image_id);
            self.analysis_status = WorkflowStatus::Idle;
            if self.visible_analysis().is_none() {
                return self.begin_analysis();
            }
            return None;
        }

        match result {
            Ok(analysis) => {
                info!("Room analysis ready: {}", analysis.architectural_style);
                self.analysis = Some((image_id, analysis));
                self.analysis_status = WorkflowStatus::Idle;
            }
            Err(e) => {
                warn!("Room analysis failed: {}", e);
                self.analysis_status = WorkflowStatus::from_error(&e);
            }
        }
        None
    }

    /// The analysis, but only if it belongs to the image currently selected
    pub fn visible_analysis(&self) -> Option<&RoomAnalysis> {
        let selected = self.selected_image_id()?;
        self.analysis
            .as_ref()
            .filter(|(id, _)| *id == selected)
            .map(|(_, analysis)| analysis)
    }

    pub async fn analyze_image(&mut self, gateway: &dyn ModelGateway) -> bool {
        let Some(request) = self.begin_analysis() else {
            return false;
        };
        let (mut image_id, mut result) = request.run(gateway).await;
        while let Some(follow_up) = self.complete_analysis(image_id, result) {
            (image_id, result) = follow_up.run(gateway).await;
        }
        true
    }
}
