//! Release workflow tests

use std::time::Duration;

use cicd_toolkit::app::run::release;
use cicd_toolkit::deploy::poller::{DeployOutcome, Options};
use cicd_toolkit::deploy::resolver::EnvironmentClass;
use cicd_toolkit::errors::ToolkitError;
use cicd_toolkit::storage::layout::ProjectLayout;

use crate::common::{fake_sleep, service, FakeFrontend, FakeServices, FrontendCall};

const BACKEND_VAR: &str = "API_BASE_URL";
const PROD_URL: &str = "https://cicd-demo-backend-prod.onrender.com";

fn layout(dir: &tempfile::TempDir) -> ProjectLayout {
    let layout = ProjectLayout::new(dir.path());
    std::fs::create_dir(layout.frontend_root()).unwrap();
    layout
}

#[tokio::test]
async fn test_main_branch_releases_backend_then_frontend() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout(&dir);
    let services = FakeServices::with_services(vec![
        service("srv-beta", "cicd-demo-backend-beta", None),
        service("srv-prod", "cicd-demo-backend-prod", Some(PROD_URL)),
    ])
    .statuses(vec![Ok("build_in_progress"), Ok("live")]);
    let frontend = FakeFrontend::deploying_to("https://cicd-demo-frontend.vercel.app");
    let (_slept, sleep_fn) = fake_sleep();

    let report = release(
        &services,
        &frontend,
        &layout,
        &Options::default(),
        BACKEND_VAR,
        "main",
        sleep_fn,
    )
    .await
    .unwrap();

    assert_eq!(*services.triggers.lock().unwrap(), vec!["srv-prod".to_string()]);
    assert_eq!(report.backend_url, PROD_URL);
    assert!(!report.backend_abandoned());
    assert_eq!(report.frontend.project_name, "cicd-demo-frontend");
    assert_eq!(report.frontend.environment, EnvironmentClass::Production);
    assert_eq!(report.frontend.url, "https://cicd-demo-frontend.vercel.app");

    assert_eq!(
        frontend.calls(),
        vec![
            FrontendCall::RemoveEnv(BACKEND_VAR.to_string(), EnvironmentClass::Production),
            FrontendCall::AddEnv(
                BACKEND_VAR.to_string(),
                PROD_URL.to_string(),
                EnvironmentClass::Production
            ),
            FrontendCall::Deploy(
                EnvironmentClass::Production,
                vec![(BACKEND_VAR.to_string(), PROD_URL.to_string())]
            ),
        ]
    );

    // Created for the run and removed afterwards
    assert!(!layout.frontend_config_file().exists().await);
    assert!(!layout.frontend_config_backup().exists().await);
}

#[tokio::test]
async fn test_feature_branch_uses_slugged_names() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout(&dir);
    let services = FakeServices::with_services(vec![service(
        "srv-feat",
        "cicd-demo-backend-feature-x-1",
        None,
    )])
    .statuses(vec![Ok("live")]);
    let frontend = FakeFrontend::deploying_to("https://feat.vercel.app");
    let (_slept, sleep_fn) = fake_sleep();

    let report = release(
        &services,
        &frontend,
        &layout,
        &Options::default(),
        BACKEND_VAR,
        "feature/X-1",
        sleep_fn,
    )
    .await
    .unwrap();

    assert_eq!(report.target.name, "cicd-demo-backend-feature-x-1");
    assert_eq!(
        report.backend_url,
        "https://cicd-demo-backend-feature-x-1.onrender.com"
    );
    assert_eq!(report.frontend.project_name, "cicd-demo-frontend-feature-x-1");
    assert_eq!(report.frontend.environment, EnvironmentClass::Preview);
}

#[tokio::test]
async fn test_missing_service_stops_before_deploy() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout(&dir);
    let services = FakeServices::with_services(vec![service("srv-1", "something-else", None)]);
    let frontend = FakeFrontend::deploying_to("https://unused.vercel.app");
    let (_slept, sleep_fn) = fake_sleep();

    let err = release(
        &services,
        &frontend,
        &layout,
        &Options::default(),
        BACKEND_VAR,
        "beta",
        sleep_fn,
    )
    .await
    .unwrap_err();

    match err {
        ToolkitError::ServiceNotFound { name } => assert_eq!(name, "cicd-demo-backend-beta"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(services.triggers.lock().unwrap().is_empty());
    assert!(frontend.calls().is_empty());
}

#[tokio::test]
async fn test_failed_deploy_skips_frontend() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout(&dir);
    let services = FakeServices::with_services(vec![service(
        "srv-gamma",
        "cicd-demo-backend-gamma",
        None,
    )])
    .statuses(vec![Ok("build_in_progress"), Ok("build_failed")]);
    let frontend = FakeFrontend::deploying_to("https://unused.vercel.app");
    let (_slept, sleep_fn) = fake_sleep();

    let err = release(
        &services,
        &frontend,
        &layout,
        &Options::default(),
        BACKEND_VAR,
        "gamma",
        sleep_fn,
    )
    .await
    .unwrap_err();

    match err {
        ToolkitError::DeployFailed { deploy_id, status } => {
            assert_eq!(deploy_id, "dep-1");
            assert_eq!(status, "build_failed");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(frontend.calls().is_empty());
    assert!(!layout.frontend_config_file().exists().await);
}

#[tokio::test]
async fn test_abandoned_deploy_still_releases_frontend() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout(&dir);
    let services = FakeServices::with_services(vec![service(
        "srv-beta",
        "cicd-demo-backend-beta",
        None,
    )]);
    let frontend = FakeFrontend::deploying_to("https://beta.vercel.app");
    let poll = Options {
        interval: Duration::from_secs(5),
        timeout: Duration::from_secs(10),
    };
    let (slept, sleep_fn) = fake_sleep();

    let report = release(
        &services, &frontend, &layout, &poll, BACKEND_VAR, "beta", sleep_fn,
    )
    .await
    .unwrap();

    assert!(report.backend_abandoned());
    assert!(matches!(report.deploy.outcome, DeployOutcome::Abandoned { .. }));
    assert_eq!(*slept.lock().unwrap(), Duration::from_secs(10));
    assert_eq!(
        frontend.calls()[1],
        FrontendCall::AddEnv(
            BACKEND_VAR.to_string(),
            "https://cicd-demo-backend-beta.onrender.com".to_string(),
            EnvironmentClass::Preview
        )
    );
}

#[tokio::test]
async fn test_env_removal_failure_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout(&dir);
    let services = FakeServices::with_services(vec![service(
        "srv-beta",
        "cicd-demo-backend-beta",
        None,
    )])
    .statuses(vec![Ok("live")]);
    let mut frontend = FakeFrontend::deploying_to("https://beta.vercel.app");
    frontend.fail_remove = true;
    let (_slept, sleep_fn) = fake_sleep();

    let report = release(
        &services,
        &frontend,
        &layout,
        &Options::default(),
        BACKEND_VAR,
        "beta",
        sleep_fn,
    )
    .await
    .unwrap();

    assert_eq!(report.frontend.url, "https://beta.vercel.app");
    assert_eq!(frontend.calls().len(), 3);
}

#[tokio::test]
async fn test_frontend_failure_restores_config() {
    let dir = tempfile::tempdir().unwrap();
    let layout = layout(&dir);
    let config = layout.frontend_config_file();
    config
        .write_string("{\n  \"name\": \"local-dev\",\n  \"framework\": \"vite\"\n}\n")
        .await
        .unwrap();
    let original = config.read_string().await.unwrap();

    let services = FakeServices::with_services(vec![service(
        "srv-prod",
        "cicd-demo-backend-prod",
        Some(PROD_URL),
    )])
    .statuses(vec![Ok("live")]);
    let frontend =
        FakeFrontend::failing_with(ToolkitError::FrontendDeployFailed("exit status 1".into()));
    let (_slept, sleep_fn) = fake_sleep();

    let err = release(
        &services,
        &frontend,
        &layout,
        &Options::default(),
        BACKEND_VAR,
        "production",
        sleep_fn,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ToolkitError::FrontendDeployFailed(_)));
    assert_eq!(config.read_string().await.unwrap(), original);
    assert!(!layout.frontend_config_backup().exists().await);
}

#[tokio::test]
async fn test_missing_frontend_directory_stops_before_publishing() {
    let dir = tempfile::tempdir().unwrap();
    let layout = ProjectLayout::new(dir.path());
    let services = FakeServices::with_services(vec![service(
        "srv-beta",
        "cicd-demo-backend-beta",
        None,
    )])
    .statuses(vec![Ok("live")]);
    let frontend = FakeFrontend::deploying_to("https://beta.vercel.app");
    let (_slept, sleep_fn) = fake_sleep();

    let err = release(
        &services,
        &frontend,
        &layout,
        &Options::default(),
        BACKEND_VAR,
        "beta",
        sleep_fn,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ToolkitError::FrontendError(_)));
    assert!(frontend.calls().is_empty());
    assert!(!layout.frontend_root().exists());
}
