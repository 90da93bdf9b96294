#![allow(dead_code)]

use assert_cmd::Command;

pub use stratus_testing::TestFixture;

/// A `stratus` invocation isolated to the fixture's home and fake `aws`.
pub fn command(fixture: &TestFixture) -> Command {
    let mut cmd = Command::cargo_bin("stratus").expect("binary builds");
    cmd.env("HOME", fixture.home())
        .env("PATH", fixture.path_env())
        .env_remove("AWS_DEFAULT_REGION");
    cmd
}

/// Fake `aws` that answers `describe-instances` with a head node at a
/// public IP plus one compute node, and logs every call.
pub fn instances_body(fixture: &TestFixture) -> String {
    format!(
        r#"echo "$@" >> {log}
case "$*" in
  *describe-instances*)
    cat <<EOF
{{"Reservations": [{{"Instances": [
  {{"InstanceId": "i-0head", "InstanceType": "c5.xlarge",
   "PrivateIpAddress": "10.0.0.4", "PublicIpAddress": "3.3.3.3",
   "State": {{"Name": "running"}},
   "Tags": [{{"Key": "stratus:node-role", "Value": "HeadNode"}}]}},
  {{"InstanceId": "i-0comp", "InstanceType": "c5.large",
   "PrivateIpAddress": "10.0.0.5",
   "State": {{"Name": "running"}},
   "Tags": [{{"Key": "stratus:node-role", "Value": "ComputeNode"}}]}}
]}}]}}
EOF
    ;;
  *)
    echo '{{}}'
    ;;
esac"#,
        log = fixture.call_log().display(),
    )
}

/// Fake `aws` that answers `describe-stacks` with one settled stack and
/// logs every call.
pub fn describe_stacks_body(fixture: &TestFixture, stack_name: &str, status: &str) -> String {
    format!(
        r#"echo "$@" >> {log}
case "$*" in
  *describe-stacks*)
    cat <<EOF
{{"Stacks": [{{"StackName": "{stack_name}", "StackStatus": "{status}", "CreationTime": "2026-08-01T10:00:00Z"}}]}}
EOF
    ;;
  *)
    echo '{{}}'
    ;;
esac"#,
        log = fixture.call_log().display(),
    )
}
