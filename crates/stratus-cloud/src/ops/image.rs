use tracing::info;

use stratus_types::ImageSummary;

use crate::config::CliConfigFile;
use crate::error::{Error, Result};
use crate::provider::{BuildImageRequest, ExportLogsRequest, Orchestrator};

/// Model object for one image-builder pipeline.
pub struct ImageBuilder<'a> {
    orchestrator: &'a dyn Orchestrator,
    image_name: String,
}

impl<'a> ImageBuilder<'a> {
    pub fn new(orchestrator: &'a dyn Orchestrator, image_name: impl Into<String>) -> Self {
        Self {
            orchestrator,
            image_name: image_name.into(),
        }
    }

    pub fn build(&self, config_file: &CliConfigFile) -> Result<()> {
        let template_url = config_file.template_url.clone().ok_or_else(|| {
            Error::Config(
                "no image template configured, set template_url via 'stratus configure'"
                    .to_string(),
            )
        })?;

        info!("Building image: {}", self.image_name);
        self.orchestrator.build_image(&BuildImageRequest {
            image_name: self.image_name.clone(),
            template_url,
        })
    }

    pub fn delete(&self, force: bool) -> Result<()> {
        info!("Deleting image: {}", self.image_name);
        self.orchestrator.delete_image(&self.image_name, force)
    }

    pub fn describe(&self) -> Result<ImageSummary> {
        self.orchestrator.describe_image(&self.image_name)
    }

    /// Forwards the already-validated export request verbatim.
    pub fn export_logs(&self, request: &ExportLogsRequest) -> Result<()> {
        self.orchestrator.export_image_logs(request)
    }
}

pub fn list_images(orchestrator: &dyn Orchestrator) -> Result<Vec<ImageSummary>> {
    orchestrator.list_images()
}
