mod common;

use common::{command, describe_stacks_body, TestFixture};

#[test]
fn region_flag_reaches_the_platform_cli() {
    let fixture = TestFixture::new();
    let body = format!(
        "echo \"region=$AWS_DEFAULT_REGION $@\" >> {}\necho '{{\"Stacks\": []}}'",
        fixture.call_log().display()
    );
    fixture.install_fake_aws(&body);

    command(&fixture)
        .args(["list", "-r", "eu-west-1"])
        .assert()
        .success();

    let log = fixture.read_call_log();
    // Published both as an argument and in the environment of child processes.
    assert!(log.contains("--region eu-west-1"), "log: {log}");
    assert!(log.contains("region=eu-west-1"), "log: {log}");
}

#[test]
fn config_file_region_is_used_when_no_flag_is_given() {
    let fixture = TestFixture::new();
    fixture.install_fake_aws(&describe_stacks_body(
        &fixture,
        "stratus-hpc1",
        "CREATE_COMPLETE",
    ));
    fixture.write_config("region = \"us-west-2\"\n");

    command(&fixture).arg("list").assert().success();

    assert!(fixture.read_call_log().contains("--region us-west-2"));
}
