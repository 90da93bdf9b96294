use std::path::Path;
use std::process::Command;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use stratus_types::{
    ClusterInstance, ClusterStatus, ClusterSummary, ImageStatus, ImageSummary, NodeRole,
    STACK_PREFIX, stack_name,
};

use super::{BuildImageRequest, CreateStackRequest, ExportLogsRequest, Orchestrator, UpdateStackRequest};
use crate::config::CloudConfig;
use crate::error::{Error, Result};

const IMAGE_STACK_PREFIX: &str = "stratus-imagebuilder-";
const EXPORT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const EXPORT_POLL_ATTEMPTS: u32 = 90;

/// Orchestrator backed by the platform's own CLI.
///
/// Each operation is one or more `aws` invocations with `--output json`; the
/// platform CLI owns credentials resolution, retries, and waiter polling.
pub struct AwsCli {
    config: CloudConfig,
}

impl AwsCli {
    pub fn new(config: CloudConfig) -> Self {
        Self { config }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("aws");
        cmd.args(args).args(["--output", "json"]);
        if let Some(region) = &self.config.region {
            cmd.args(["--region", region]);
        }

        debug!("aws {}", args.join(" "));
        let output = cmd.output()?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        Err(classify_failure(stderr))
    }

    fn parse<T: serde::de::DeserializeOwned>(&self, args: &[&str]) -> Result<T> {
        let stdout = self.run(args)?;
        Ok(serde_json::from_str(&stdout)?)
    }

    fn wait(&self, condition: &str, stack_name: &str) -> Result<()> {
        self.run(&["cloudformation", "wait", condition, "--stack-name", stack_name])?;
        Ok(())
    }

    fn stack_resource_id(&self, stack_name: &str, logical_id: &str) -> Result<String> {
        let resp: StackResourcesResponse = self.parse(&[
            "cloudformation",
            "describe-stack-resources",
            "--stack-name",
            stack_name,
            "--logical-resource-id",
            logical_id,
        ])?;
        resp.stack_resources
            .into_iter()
            .next()
            .map(|r| r.physical_resource_id)
            .ok_or_else(|| {
                Error::Response(format!("stack {} has no resource {}", stack_name, logical_id))
            })
    }

    fn find_image(&self, image_name: &str) -> Result<AwsImage> {
        let filter = format!("Name=tag:stratus:image,Values={}", image_name);
        let resp: ImagesResponse = self.parse(&[
            "ec2",
            "describe-images",
            "--owners",
            "self",
            "--filters",
            &filter,
        ])?;
        resp.images
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("image {}", image_name)))
    }
}

impl Orchestrator for AwsCli {
    fn create_stack(&self, req: &CreateStackRequest) -> Result<String> {
        let validators_tag = format!(
            "Key=stratus:validation-failure-level,Value={}",
            req.validation_failure_level
        );
        let mut args = vec![
            "cloudformation",
            "create-stack",
            "--stack-name",
            req.stack_name.as_str(),
            "--template-url",
            req.template_url.as_str(),
            "--capabilities",
            "CAPABILITY_IAM",
            "--tags",
            validators_tag.as_str(),
        ];
        if req.disable_rollback {
            args.push("--disable-rollback");
        }
        if req.suppress_validators {
            debug!("validators suppressed for {}", req.stack_name);
        }

        let resp: StackIdResponse = self.parse(&args)?;
        if req.wait {
            self.wait("stack-create-complete", &req.stack_name)?;
        }
        Ok(resp.stack_id)
    }

    fn update_stack(&self, req: &UpdateStackRequest) -> Result<String> {
        let mut args = vec![
            "cloudformation",
            "update-stack",
            "--stack-name",
            req.stack_name.as_str(),
        ];
        match &req.template_url {
            Some(url) => args.extend(["--template-url", url.as_str()]),
            None => args.push("--use-previous-template"),
        }
        args.extend(["--capabilities", "CAPABILITY_IAM"]);
        if req.disable_rollback {
            args.push("--disable-rollback");
        }
        if req.force {
            debug!("forced update of {}, security checks skipped", req.stack_name);
        }

        let resp: StackIdResponse = self.parse(&args)?;
        if req.wait {
            self.wait("stack-update-complete", &req.stack_name)?;
        }
        Ok(resp.stack_id)
    }

    fn delete_stack(&self, stack_name: &str, keep_logs: bool, wait: bool) -> Result<()> {
        if !keep_logs {
            // The log group outlives the stack by design; drop it explicitly
            // unless the caller asked to keep it. Absence is not an error.
            let log_group = format!("/stratus/{}", stack_name);
            if let Err(e) = self.run(&["logs", "delete-log-group", "--log-group-name", &log_group])
            {
                debug!("log group {} not deleted: {}", log_group, e);
            }
        }

        self.run(&["cloudformation", "delete-stack", "--stack-name", stack_name])?;
        if wait {
            self.wait("stack-delete-complete", stack_name)?;
        }
        Ok(())
    }

    fn describe_stack(&self, stack_name: &str) -> Result<ClusterSummary> {
        let resp: StacksResponse = self.parse(&[
            "cloudformation",
            "describe-stacks",
            "--stack-name",
            stack_name,
        ])?;
        let stack = resp
            .stacks
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("stack {}", stack_name)))?;
        stack.into_summary()
    }

    fn wait_stack_settled(&self, stack_name: &str) -> Result<ClusterSummary> {
        let summary = self.describe_stack(stack_name)?;
        let condition = match summary.status {
            ClusterStatus::CreateInProgress => "stack-create-complete",
            ClusterStatus::UpdateInProgress => "stack-update-complete",
            ClusterStatus::DeleteInProgress => "stack-delete-complete",
            ClusterStatus::RollbackInProgress => "stack-rollback-complete",
            _ => return Ok(summary),
        };
        self.wait(condition, stack_name)?;
        self.describe_stack(stack_name)
    }

    fn list_stacks(&self) -> Result<Vec<ClusterSummary>> {
        let resp: StacksResponse = self.parse(&["cloudformation", "describe-stacks"])?;
        resp.stacks
            .into_iter()
            .filter(|s| {
                s.stack_name.starts_with(STACK_PREFIX)
                    && !s.stack_name.starts_with(IMAGE_STACK_PREFIX)
            })
            .map(|s| s.into_summary())
            .collect()
    }

    fn list_instances(&self, cluster_name: &str) -> Result<Vec<ClusterInstance>> {
        let filter = format!("Name=tag:stratus:cluster,Values={}", cluster_name);
        let resp: ReservationsResponse = self.parse(&[
            "ec2",
            "describe-instances",
            "--filters",
            &filter,
            "Name=instance-state-name,Values=pending,running,stopping,stopped",
        ])?;

        Ok(resp
            .reservations
            .into_iter()
            .flat_map(|r| r.instances)
            .map(AwsInstance::into_instance)
            .collect())
    }

    fn head_node(&self, cluster_name: &str) -> Result<ClusterInstance> {
        self.list_instances(cluster_name)?
            .into_iter()
            .find(|i| i.role == NodeRole::HeadNode)
            .ok_or_else(|| Error::NotFound(format!("head node of cluster {}", cluster_name)))
    }

    fn set_compute_fleet(&self, cluster_name: &str, running: bool) -> Result<()> {
        let fleet_asg = self.stack_resource_id(&stack_name(cluster_name), "ComputeFleet")?;

        // Stopping means scaling the worker group to zero; the head node is a
        // plain instance outside the group and keeps running.
        let (min, max, desired) = if running {
            let stack = self.describe_stack(&stack_name(cluster_name))?;
            if !stack.status.is_healthy() {
                return Err(Error::InvalidOperation(format!(
                    "cluster {} is in state {}",
                    cluster_name, stack.status
                )));
            }
            ("1", "10", "2")
        } else {
            ("0", "0", "0")
        };

        self.run(&[
            "autoscaling",
            "update-auto-scaling-group",
            "--auto-scaling-group-name",
            &fleet_asg,
            "--min-size",
            min,
            "--max-size",
            max,
            "--desired-capacity",
            desired,
        ])?;
        Ok(())
    }

    fn build_image(&self, req: &BuildImageRequest) -> Result<()> {
        let image_stack = format!("{}{}", IMAGE_STACK_PREFIX, req.image_name);
        let image_tag = format!("Key=stratus:image,Value={}", req.image_name);
        self.parse::<StackIdResponse>(&[
            "cloudformation",
            "create-stack",
            "--stack-name",
            &image_stack,
            "--template-url",
            &req.template_url,
            "--capabilities",
            "CAPABILITY_IAM",
            "--tags",
            &image_tag,
        ])?;
        Ok(())
    }

    fn delete_image(&self, image_name: &str, force: bool) -> Result<()> {
        let image = self.find_image(image_name)?;

        if !force {
            let resp: LaunchPermissionResponse = self.parse(&[
                "ec2",
                "describe-image-attribute",
                "--image-id",
                &image.image_id,
                "--attribute",
                "launchPermission",
            ])?;
            if !resp.launch_permissions.is_empty() {
                return Err(Error::InvalidOperation(format!(
                    "image {} is shared with other accounts, use --force to delete it",
                    image_name
                )));
            }
        }

        self.run(&["ec2", "deregister-image", "--image-id", &image.image_id])?;

        let image_stack = format!("{}{}", IMAGE_STACK_PREFIX, image_name);
        if let Err(e) = self.run(&["cloudformation", "delete-stack", "--stack-name", &image_stack])
        {
            debug!("image builder stack {} not deleted: {}", image_stack, e);
        }
        Ok(())
    }

    fn describe_image(&self, image_name: &str) -> Result<ImageSummary> {
        Ok(self.find_image(image_name)?.into_summary(image_name))
    }

    fn list_images(&self) -> Result<Vec<ImageSummary>> {
        let resp: ImagesResponse = self.parse(&[
            "ec2",
            "describe-images",
            "--owners",
            "self",
            "--filters",
            "Name=tag-key,Values=stratus:image",
        ])?;
        Ok(resp
            .images
            .into_iter()
            .map(|img| {
                let name = img.tag("stratus:image").unwrap_or_else(|| img.image_id.clone());
                img.into_summary(&name)
            })
            .collect())
    }

    fn export_image_logs(&self, req: &ExportLogsRequest) -> Result<()> {
        let log_group = format!("/stratus/imagebuilder/{}", req.image_id);
        let prefix = req
            .bucket_prefix
            .clone()
            .unwrap_or_else(|| format!("{}-logs-export", req.image_id));

        let from = match &req.start_time {
            Some(t) => parse_millis(t, "start-time")?,
            None => 0,
        };
        let to = match &req.end_time {
            Some(t) => parse_millis(t, "end-time")?,
            None => Utc::now().timestamp_millis(),
        };
        let from = from.to_string();
        let to = to.to_string();

        let resp: ExportTaskResponse = self.parse(&[
            "logs",
            "create-export-task",
            "--log-group-name",
            &log_group,
            "--destination",
            &req.bucket,
            "--destination-prefix",
            &prefix,
            "--from",
            &from,
            "--to",
            &to,
        ])?;
        self.wait_export_task(&resp.task_id)?;

        let staged = format!("s3://{}/{}", req.bucket, prefix);
        let staging_dir = tempdir_for(&req.image_id)?;
        let staging = staging_dir.to_string_lossy().into_owned();
        self.run(&["s3", "cp", "--recursive", &staged, &staging])?;

        // The staging dir is removed on every path; on failure the staged
        // bucket objects are left in place for a rerun.
        let archived = archive_dir(&staging_dir, &req.output);
        let _ = std::fs::remove_dir_all(&staging_dir);
        archived?;

        if !req.keep_s3_objects {
            self.run(&["s3", "rm", "--recursive", &staged])?;
        }
        Ok(())
    }

    fn dcv_session_url(
        &self,
        cluster_name: &str,
        ssh_user: &str,
        key_path: Option<&Path>,
    ) -> Result<String> {
        let head = self.head_node(cluster_name)?;
        let ip = head
            .public_ip
            .ok_or_else(|| Error::InvalidOperation("head node has no public IP".to_string()))?;

        // The head node ships a helper that creates (or reuses) a DCV session
        // and prints "<port> <token>" on stdout.
        let mut cmd = Command::new("ssh");
        if let Some(key) = key_path {
            cmd.arg("-i").arg(key);
        }
        cmd.arg(format!("{}@{}", ssh_user, ip)).arg("stratus-dcv-session");

        let output = cmd.output()?;
        if !output.status.success() {
            return Err(Error::Provider(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut parts = stdout.split_whitespace();
        let (port, token) = match (parts.next(), parts.next()) {
            (Some(port), Some(token)) => (port.to_string(), token.to_string()),
            _ => return Err(Error::Response("malformed DCV session reply".to_string())),
        };

        Ok(format!("https://{}:{}?authToken={}#console", ip, port, token))
    }
}

impl AwsCli {
    fn wait_export_task(&self, task_id: &str) -> Result<()> {
        for _ in 0..EXPORT_POLL_ATTEMPTS {
            let resp: ExportTasksResponse = self.parse(&[
                "logs",
                "describe-export-tasks",
                "--task-id",
                task_id,
            ])?;
            let status = resp
                .export_tasks
                .first()
                .map(|t| t.status.code.as_str())
                .unwrap_or("UNKNOWN");
            match status {
                "COMPLETED" => return Ok(()),
                "CANCELLED" | "FAILED" => {
                    return Err(Error::Provider(format!("log export task {}", status)));
                }
                _ => std::thread::sleep(EXPORT_POLL_INTERVAL),
            }
        }
        Err(Error::Provider("log export task timed out".to_string()))
    }
}

fn classify_failure(stderr: String) -> Error {
    if stderr.contains("Unable to locate credentials")
        || stderr.contains("InvalidClientTokenId")
        || stderr.contains("ExpiredToken")
    {
        return Error::Credentials;
    }
    if stderr.contains("does not exist") {
        return Error::NotFound(stderr);
    }
    Error::Provider(stderr)
}

fn parse_millis(value: &str, what: &str) -> Result<i64> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.timestamp_millis())
        .map_err(|_| Error::InvalidOperation(format!("invalid {} '{}'", what, value)))
}

fn tempdir_for(image_id: &str) -> Result<std::path::PathBuf> {
    let dir = std::env::temp_dir().join(format!("stratus-logs-{}-{}", image_id, std::process::id()));
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn archive_dir(dir: &Path, output: &Path) -> Result<()> {
    let status = Command::new("tar")
        .arg("-czf")
        .arg(output)
        .arg("-C")
        .arg(dir)
        .arg(".")
        .status()?;
    if !status.success() {
        return Err(Error::Provider(format!(
            "tar failed while writing {}",
            output.display()
        )));
    }
    Ok(())
}

// Response shapes, limited to the fields this layer reads.

#[derive(Deserialize)]
struct StackIdResponse {
    #[serde(rename = "StackId")]
    stack_id: String,
}

#[derive(Deserialize)]
struct StacksResponse {
    #[serde(rename = "Stacks")]
    stacks: Vec<AwsStack>,
}

#[derive(Deserialize)]
struct AwsStack {
    #[serde(rename = "StackName")]
    stack_name: String,
    #[serde(rename = "StackStatus")]
    stack_status: String,
    #[serde(rename = "CreationTime")]
    creation_time: Option<DateTime<Utc>>,
}

impl AwsStack {
    fn into_summary(self) -> Result<ClusterSummary> {
        let status: ClusterStatus =
            serde_json::from_value(serde_json::Value::String(self.stack_status.clone()))
                .map_err(|_| Error::Response(format!("unknown stack status {}", self.stack_status)))?;
        let name = self
            .stack_name
            .strip_prefix(STACK_PREFIX)
            .unwrap_or(&self.stack_name)
            .to_string();
        Ok(ClusterSummary {
            name,
            status,
            created_at: self.creation_time,
        })
    }
}

#[derive(Deserialize)]
struct StackResourcesResponse {
    #[serde(rename = "StackResources")]
    stack_resources: Vec<StackResource>,
}

#[derive(Deserialize)]
struct StackResource {
    #[serde(rename = "PhysicalResourceId")]
    physical_resource_id: String,
}

#[derive(Deserialize)]
struct ReservationsResponse {
    #[serde(rename = "Reservations")]
    reservations: Vec<Reservation>,
}

#[derive(Deserialize)]
struct Reservation {
    #[serde(rename = "Instances")]
    instances: Vec<AwsInstance>,
}

#[derive(Deserialize)]
struct AwsInstance {
    #[serde(rename = "InstanceId")]
    instance_id: String,
    #[serde(rename = "InstanceType")]
    instance_type: String,
    #[serde(rename = "PublicIpAddress")]
    public_ip: Option<String>,
    #[serde(rename = "PrivateIpAddress", default)]
    private_ip: String,
    #[serde(rename = "State")]
    state: InstanceState,
    #[serde(rename = "Tags", default)]
    tags: Vec<Tag>,
}

#[derive(Deserialize)]
struct InstanceState {
    #[serde(rename = "Name")]
    name: String,
}

#[derive(Deserialize)]
struct Tag {
    #[serde(rename = "Key")]
    key: String,
    #[serde(rename = "Value")]
    value: String,
}

impl AwsInstance {
    fn into_instance(self) -> ClusterInstance {
        let role = self
            .tags
            .iter()
            .find(|t| t.key == "stratus:node-role")
            .map(|t| t.value.as_str())
            .filter(|v| *v == "HeadNode")
            .map(|_| NodeRole::HeadNode)
            .unwrap_or(NodeRole::ComputeNode);

        ClusterInstance {
            instance_id: self.instance_id,
            role,
            instance_type: self.instance_type,
            public_ip: self.public_ip,
            private_ip: self.private_ip,
            state: self.state.name,
        }
    }
}

#[derive(Deserialize)]
struct ImagesResponse {
    #[serde(rename = "Images")]
    images: Vec<AwsImage>,
}

#[derive(Deserialize)]
struct AwsImage {
    #[serde(rename = "ImageId")]
    image_id: String,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "CreationDate")]
    creation_date: Option<DateTime<Utc>>,
    #[serde(rename = "Tags", default)]
    tags: Vec<Tag>,
}

impl AwsImage {
    fn tag(&self, key: &str) -> Option<String> {
        self.tags.iter().find(|t| t.key == key).map(|t| t.value.clone())
    }

    fn into_summary(self, name: &str) -> ImageSummary {
        let status = match self.state.as_str() {
            "available" => ImageStatus::BuildComplete,
            "pending" => ImageStatus::BuildInProgress,
            "deregistered" => ImageStatus::DeleteInProgress,
            _ => ImageStatus::BuildFailed,
        };
        let version = self
            .tag("stratus:version")
            .unwrap_or_else(|| "unknown".to_string());
        ImageSummary {
            name: name.to_string(),
            image_id: Some(self.image_id),
            status,
            version,
            created_at: self.creation_date,
        }
    }
}

#[derive(Deserialize)]
struct LaunchPermissionResponse {
    #[serde(rename = "LaunchPermissions", default)]
    launch_permissions: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct ExportTaskResponse {
    #[serde(rename = "taskId")]
    task_id: String,
}

#[derive(Deserialize)]
struct ExportTasksResponse {
    #[serde(rename = "exportTasks")]
    export_tasks: Vec<ExportTask>,
}

#[derive(Deserialize)]
struct ExportTask {
    #[serde(rename = "status")]
    status: ExportTaskStatus,
}

#[derive(Deserialize)]
struct ExportTaskStatus {
    #[serde(rename = "code")]
    code: String,
}
