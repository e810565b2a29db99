//! Runtime construction from options, and the process-wide singleton.

use serde_json::json;
use vigil_gateway::bindings::recommendations;
use vigil_gateway::runtime;
use vigil_gateway::{RuntimeOptions, VigilRuntime};

#[test]
fn config_toml_is_applied() {
    let rt = VigilRuntime::new(RuntimeOptions {
        db_path: None,
        config_toml: Some(
            "[persistence]\nmax_retries = 7\n\n[harness]\nrecord_count = 4\n".to_string(),
        ),
    })
    .unwrap();

    assert_eq!(rt.config.persistence.max_retries, 7);
    assert_eq!(rt.harness.config().record_count, 4);
    assert_eq!(rt.monitor.config().window_capacity, rt.config.health.window_capacity);
}

#[test]
fn bad_config_is_rejected() {
    let result = VigilRuntime::new(RuntimeOptions {
        db_path: None,
        config_toml: Some("[health]\nwindow_capacity = 0\n".to_string()),
    });
    assert!(result.is_err());
}

#[tokio::test]
async fn file_backed_runtime_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gateway.db");

    {
        let rt = VigilRuntime::new(RuntimeOptions {
            db_path: Some(path.clone()),
            config_toml: None,
        })
        .unwrap();
        rt.storage.create_analysis("durable", Some(42)).unwrap();
        let saved = recommendations::save_recommendations(
            &rt,
            &json!(42),
            &test_fixtures::make_inputs_value(3),
        )
        .await;
        assert!(saved.success);
        assert_eq!(rt.config.storage.db_path, path.display().to_string());
    }

    let reopened = VigilRuntime::new(RuntimeOptions {
        db_path: Some(path),
        config_toml: None,
    })
    .unwrap();
    let fetched = recommendations::get_recommendations(&reopened, &json!(42)).await;
    assert_eq!(fetched.metadata.total_count, 3);
}

#[test]
fn singleton_initializes_once() {
    runtime::initialize(RuntimeOptions::default()).unwrap();
    assert!(runtime::is_initialized());
    assert!(runtime::get().is_ok());
    assert!(runtime::initialize(RuntimeOptions::default()).is_err());
}
