mod common;

use common::{command, TestFixture};
use predicates::prelude::*;

fn export_ok_body(fixture: &TestFixture) -> String {
    format!(
        r#"echo "$@" >> {log}
case "$*" in
  *create-export-task*)
    echo '{{"taskId": "task-42"}}'
    ;;
  *describe-export-tasks*)
    echo '{{"exportTasks": [{{"status": {{"code": "COMPLETED"}}}}]}}'
    ;;
  *)
    echo '{{}}'
    ;;
esac"#,
        log = fixture.call_log().display(),
    )
}

#[test]
fn export_writes_the_archive_and_cleans_the_bucket() {
    let fixture = TestFixture::new();
    fixture.install_fake_aws(&export_ok_body(&fixture));
    let output = fixture.home().join("ami-123.tar.gz");

    command(&fixture)
        .args([
            "export-image-logs",
            "ami-123",
            "--bucket",
            "my-bucket",
            "-o",
        ])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("exported correctly"));

    assert!(output.exists());
    let log = fixture.read_call_log();
    assert!(log.contains("create-export-task"));
    assert!(log.contains("--destination my-bucket"));
    assert!(log.contains("s3 rm --recursive"));
}

#[test]
fn keep_s3_objects_skips_the_bucket_cleanup() {
    let fixture = TestFixture::new();
    fixture.install_fake_aws(&export_ok_body(&fixture));
    let output = fixture.home().join("ami-123.tar.gz");

    command(&fixture)
        .args([
            "export-image-logs",
            "ami-123",
            "--bucket",
            "my-bucket",
            "--keep-s3-objects",
            "-o",
        ])
        .arg(&output)
        .assert()
        .success();

    assert!(!fixture.read_call_log().contains("s3 rm"));
}

#[test]
fn existing_output_file_fails_before_any_export() {
    let fixture = TestFixture::new();
    fixture.install_fake_aws(&export_ok_body(&fixture));
    let output = fixture.home().join("taken.tar.gz");
    std::fs::write(&output, "occupied").unwrap();

    command(&fixture)
        .args(["export-image-logs", "ami-123", "--bucket", "my-bucket", "-o"])
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unable to export image's logs."))
        .stderr(predicate::str::contains("already exists"));

    assert!(!fixture.read_call_log().contains("create-export-task"));
}

#[test]
fn archive_failure_cleans_the_staging_dir() {
    let fixture = TestFixture::new();
    fixture.install_fake_aws(&export_ok_body(&fixture));
    fixture.install_fake_bin("tar", "exit 1");
    let tmp = fixture.home().join("tmp");
    std::fs::create_dir_all(&tmp).unwrap();

    command(&fixture)
        .env("TMPDIR", &tmp)
        .args(["export-image-logs", "ami-777", "--bucket", "my-bucket", "-o"])
        .arg(fixture.home().join("ami-777.tar.gz"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unable to export image's logs."))
        .stderr(predicate::str::contains("tar failed"));

    let leftovers: Vec<_> = std::fs::read_dir(&tmp).unwrap().collect();
    assert!(leftovers.is_empty(), "staging dir left behind: {leftovers:?}");
}

#[test]
fn bucket_is_required() {
    let fixture = TestFixture::new();
    command(&fixture)
        .args(["export-image-logs", "ami-123"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--bucket"));
}

#[test]
fn provider_failure_gets_the_export_prefix() {
    let fixture = TestFixture::new();
    fixture.install_fake_aws(&format!(
        "echo \"$@\" >> {}\necho 'An error occurred (ResourceNotFoundException)' >&2\nexit 254",
        fixture.call_log().display()
    ));

    command(&fixture)
        .args(["export-image-logs", "ami-123", "--bucket", "my-bucket"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unable to export image's logs."))
        .stderr(predicate::str::contains("ResourceNotFoundException"));
}

#[test]
fn credentials_failure_during_export_gets_the_prefix() {
    let fixture = TestFixture::new();
    fixture.install_fake_aws(stratus_testing::no_credentials_body());

    command(&fixture)
        .args(["export-image-logs", "ami-123", "--bucket", "my-bucket"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unable to export image's logs."))
        .stderr(predicate::str::contains("Cloud credentials not found."))
        .stdout(predicate::str::contains("Cloud credentials not found.").not());
}
