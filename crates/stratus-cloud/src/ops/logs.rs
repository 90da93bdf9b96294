use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::error::{Error, Result};
use crate::ops::image::ImageBuilder;
use crate::provider::ExportLogsRequest;

/// Export parameters as they arrive from the command line, before the output
/// path has been resolved.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub output: Option<PathBuf>,
    pub bucket: String,
    pub bucket_prefix: Option<String>,
    pub keep_s3_objects: bool,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Sequential export workflow: compute path, validate path, delegate.
///
/// Retries, polling, and the bucket round-trip all belong to the delegate;
/// this layer only guards the local filesystem contract.
pub struct ExportImageLogs<'a, 'b> {
    builder: &'b ImageBuilder<'a>,
    image_id: String,
}

impl<'a, 'b> ExportImageLogs<'a, 'b> {
    pub fn new(builder: &'b ImageBuilder<'a>, image_id: impl Into<String>) -> Self {
        Self {
            builder,
            image_id: image_id.into(),
        }
    }

    /// Runs the export and returns the resolved archive path.
    pub fn execute(&self, opts: ExportOptions) -> Result<PathBuf> {
        let output = self.resolve_output_path(opts.output)?;
        validate_output_path(&output)?;

        info!("Beginning export of logs for the image: {}", self.image_id);
        self.builder.export_logs(&ExportLogsRequest {
            image_id: self.image_id.clone(),
            output: output.clone(),
            bucket: opts.bucket,
            bucket_prefix: opts.bucket_prefix,
            keep_s3_objects: opts.keep_s3_objects,
            start_time: opts.start_time,
            end_time: opts.end_time,
        })?;
        info!("Image's logs exported correctly to {}", output.display());

        Ok(output)
    }

    /// `<image_id>-logs-<YYYYMMDDHHMM>.tar.gz` under the working directory
    /// when no explicit path was given; always absolute.
    fn resolve_output_path(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        let path = explicit.unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}-logs-{}.tar.gz",
                self.image_id,
                Local::now().format("%Y%m%d%H%M")
            ))
        });
        Ok(std::path::absolute(path)?)
    }
}

fn validate_output_path(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(Error::InvalidOperation(format!(
            "File {} already exists, please select another output file to avoid overriding it",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
        if parent.metadata()?.permissions().readonly() {
            return Err(Error::InvalidOperation(format!(
                "Cannot write file {}, directory is not writable",
                path.display()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::Path as StdPath;
    use tempfile::TempDir;

    use stratus_types::{ClusterInstance, ClusterSummary, ImageSummary};

    use crate::provider::{
        BuildImageRequest, CreateStackRequest, Orchestrator, UpdateStackRequest,
    };

    /// Records export requests; every other operation is out of reach for
    /// these tests.
    #[derive(Default)]
    struct RecordingOrchestrator {
        exports: RefCell<Vec<ExportLogsRequest>>,
        fail_export: bool,
    }

    impl Orchestrator for RecordingOrchestrator {
        fn create_stack(&self, _: &CreateStackRequest) -> crate::Result<String> {
            unimplemented!()
        }
        fn update_stack(&self, _: &UpdateStackRequest) -> crate::Result<String> {
            unimplemented!()
        }
        fn delete_stack(&self, _: &str, _: bool, _: bool) -> crate::Result<()> {
            unimplemented!()
        }
        fn describe_stack(&self, _: &str) -> crate::Result<ClusterSummary> {
            unimplemented!()
        }
        fn wait_stack_settled(&self, _: &str) -> crate::Result<ClusterSummary> {
            unimplemented!()
        }
        fn list_stacks(&self) -> crate::Result<Vec<ClusterSummary>> {
            unimplemented!()
        }
        fn list_instances(&self, _: &str) -> crate::Result<Vec<ClusterInstance>> {
            unimplemented!()
        }
        fn head_node(&self, _: &str) -> crate::Result<ClusterInstance> {
            unimplemented!()
        }
        fn set_compute_fleet(&self, _: &str, _: bool) -> crate::Result<()> {
            unimplemented!()
        }
        fn build_image(&self, _: &BuildImageRequest) -> crate::Result<()> {
            unimplemented!()
        }
        fn delete_image(&self, _: &str, _: bool) -> crate::Result<()> {
            unimplemented!()
        }
        fn describe_image(&self, _: &str) -> crate::Result<ImageSummary> {
            unimplemented!()
        }
        fn list_images(&self) -> crate::Result<Vec<ImageSummary>> {
            unimplemented!()
        }
        fn export_image_logs(&self, req: &ExportLogsRequest) -> crate::Result<()> {
            if self.fail_export {
                return Err(Error::Provider("export task FAILED".to_string()));
            }
            self.exports.borrow_mut().push(req.clone());
            Ok(())
        }
        fn dcv_session_url(&self, _: &str, _: &str, _: Option<&StdPath>) -> crate::Result<String> {
            unimplemented!()
        }
    }

    // Explicit paths under a tempdir keep these tests independent of the
    // process working directory.
    fn setup() -> (RecordingOrchestrator, TempDir) {
        (RecordingOrchestrator::default(), TempDir::new().unwrap())
    }

    #[test]
    fn default_path_is_absolute_and_timestamped() {
        let orchestrator = RecordingOrchestrator::default();
        let builder = ImageBuilder::new(&orchestrator, "ami-123");
        let export = ExportImageLogs::new(&builder, "ami-123");

        let path = export.resolve_output_path(None).unwrap();
        assert!(path.is_absolute());

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("ami-123-logs-"));
        assert!(name.ends_with(".tar.gz"));

        // Minute precision: exactly 12 digits between the markers.
        let stamp = name
            .strip_prefix("ami-123-logs-")
            .unwrap()
            .strip_suffix(".tar.gz")
            .unwrap();
        assert_eq!(stamp.len(), 12);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn default_scenario_records_the_expected_request() {
        let orchestrator = RecordingOrchestrator::default();
        let builder = ImageBuilder::new(&orchestrator, "ami-123");
        let export = ExportImageLogs::new(&builder, "ami-123");

        export
            .execute(ExportOptions {
                output: None,
                bucket: "my-bucket".to_string(),
                ..Default::default()
            })
            .unwrap();

        let exports = orchestrator.exports.borrow();
        assert_eq!(exports.len(), 1);
        let req = &exports[0];
        assert_eq!(req.bucket, "my-bucket");
        assert_eq!(req.bucket_prefix, None);
        assert!(!req.keep_s3_objects);
        assert!(req.output.is_absolute());
        let name = req.output.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("ami-123-logs-"));
        assert!(name.ends_with(".tar.gz"));
    }

    #[test]
    fn explicit_path_is_forwarded_verbatim() {
        let (orchestrator, tmp) = setup();
        let builder = ImageBuilder::new(&orchestrator, "ami-123");
        let export = ExportImageLogs::new(&builder, "ami-123");

        let target = tmp.path().join("archive.tar.gz");
        let resolved = export
            .execute(ExportOptions {
                output: Some(target.clone()),
                bucket: "my-bucket".to_string(),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(resolved, std::path::absolute(&target).unwrap());
        let exports = orchestrator.exports.borrow();
        assert_eq!(exports.len(), 1);
        assert_eq!(exports[0].output, resolved);
        assert_eq!(exports[0].bucket, "my-bucket");
        assert_eq!(exports[0].bucket_prefix, None);
        assert!(!exports[0].keep_s3_objects);
    }

    #[test]
    fn existing_output_file_fails_before_the_delegate() {
        let (orchestrator, tmp) = setup();
        let builder = ImageBuilder::new(&orchestrator, "ami-123");
        let export = ExportImageLogs::new(&builder, "ami-123");

        let target = tmp.path().join("taken.tar.gz");
        std::fs::write(&target, b"old archive").unwrap();

        let err = export
            .execute(ExportOptions {
                output: Some(target),
                bucket: "my-bucket".to_string(),
                ..Default::default()
            })
            .unwrap_err();

        assert!(err.to_string().contains("already exists"));
        assert!(orchestrator.exports.borrow().is_empty());
    }

    #[test]
    fn delegate_failure_surfaces_unchanged() {
        let tmp = TempDir::new().unwrap();
        let orchestrator = RecordingOrchestrator {
            fail_export: true,
            ..Default::default()
        };
        let builder = ImageBuilder::new(&orchestrator, "ami-123");
        let export = ExportImageLogs::new(&builder, "ami-123");

        let err = export
            .execute(ExportOptions {
                output: Some(tmp.path().join("out.tar.gz")),
                bucket: "my-bucket".to_string(),
                ..Default::default()
            })
            .unwrap_err();

        assert!(matches!(err, Error::Provider(_)));
    }

    #[test]
    fn parent_directories_are_created() {
        let (orchestrator, tmp) = setup();
        let builder = ImageBuilder::new(&orchestrator, "ami-9");
        let export = ExportImageLogs::new(&builder, "ami-9");

        let target = tmp.path().join("a").join("b").join("logs.tar.gz");
        export
            .execute(ExportOptions {
                output: Some(target.clone()),
                bucket: "b".to_string(),
                ..Default::default()
            })
            .unwrap();

        assert!(target.parent().unwrap().is_dir());
    }
}
