//! Release preflight tests

use std::path::Path;

use cicd_toolkit::app::run::{preflight, Preflight};
use cicd_toolkit::errors::ToolkitError;
use cicd_toolkit::storage::layout::ProjectLayout;
use secrecy::SecretString;

use crate::common::{FakeFrontend, FrontendCall};

const API_URL: &str = "https://api.render.com/v1";

fn api_key() -> Option<SecretString> {
    Some(SecretString::from("rnd_test".to_string()))
}

fn git(dir: &Path, args: &[&str]) -> bool {
    std::process::Command::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[tokio::test]
async fn test_missing_tool_is_checked_first() {
    let dir = tempfile::tempdir().unwrap();
    let frontend = FakeFrontend::deploying_to("https://unused.vercel.app");

    let err = preflight(
        &ProjectLayout::new(dir.path()),
        &["definitely-not-a-real-tool-7f3a"],
        API_URL,
        None,
        &frontend,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ToolkitError::ToolMissing(_)));
    assert!(frontend.calls().is_empty());
}

#[tokio::test]
async fn test_missing_api_key_stops_before_frontend() {
    let dir = tempfile::tempdir().unwrap();
    let frontend = FakeFrontend::deploying_to("https://unused.vercel.app");

    let err = preflight(&ProjectLayout::new(dir.path()), &[], API_URL, None, &frontend)
        .await
        .unwrap_err();

    match err {
        ToolkitError::Unauthenticated(message) => {
            assert!(message.contains("RENDER_API_KEY"));
            assert!(message.contains("deploy-credentials.json"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(frontend.calls().is_empty());
}

#[tokio::test]
async fn test_invalid_api_url_stops_before_frontend() {
    let dir = tempfile::tempdir().unwrap();
    let frontend = FakeFrontend::deploying_to("https://unused.vercel.app");

    let err = preflight(
        &ProjectLayout::new(dir.path()),
        &[],
        "not a url",
        api_key(),
        &frontend,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ToolkitError::ConfigError(_)));
    assert!(frontend.calls().is_empty());
}

#[tokio::test]
async fn test_frontend_login_is_required() {
    let dir = tempfile::tempdir().unwrap();
    let mut frontend = FakeFrontend::deploying_to("https://unused.vercel.app");
    frontend.logged_in = false;

    let err = preflight(&ProjectLayout::new(dir.path()), &[], API_URL, api_key(), &frontend)
        .await
        .unwrap_err();

    assert!(matches!(err, ToolkitError::Unauthenticated(_)));
    assert_eq!(frontend.calls(), vec![FrontendCall::CheckAuth]);
}

#[tokio::test]
async fn test_branch_comes_last() {
    let dir = tempfile::tempdir().unwrap();
    if !git(dir.path(), &["--version"]) {
        return;
    }
    let frontend = FakeFrontend::deploying_to("https://unused.vercel.app");

    let err = preflight(&ProjectLayout::new(dir.path()), &[], API_URL, api_key(), &frontend)
        .await
        .unwrap_err();
    assert!(matches!(err, ToolkitError::NotGitRepo(_)));
    assert_eq!(frontend.calls(), vec![FrontendCall::CheckAuth]);

    assert!(git(dir.path(), &["init", "-q"]));
    assert!(git(
        dir.path(),
        &[
            "-c",
            "user.name=ci",
            "-c",
            "user.email=ci@example.com",
            "commit",
            "-q",
            "--allow-empty",
            "-m",
            "init",
        ],
    ));
    assert!(git(dir.path(), &["checkout", "-q", "-b", "beta"]));

    let Preflight { services, branch } =
        preflight(&ProjectLayout::new(dir.path()), &["git"], API_URL, api_key(), &frontend)
            .await
            .unwrap();
    assert_eq!(branch, "beta");
    assert_eq!(services.base_url(), API_URL);
}
