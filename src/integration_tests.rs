#[cfg(test)]
mod end_to_end_tests {
    use crate::{
        config::AppConfig,
        error::ArtifactError,
        inference::InferenceService,
        model::ModelStore,
        server::{self, types::PredictResponse},
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;
    use tower::ServiceExt;

    fn shipped(path: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(path)
    }

    fn config_for(model_path: PathBuf) -> AppConfig {
        let mut config = AppConfig::from_file(shipped("config.yaml")).unwrap();
        config.model.path = model_path;
        config
    }

    #[tokio::test]
    async fn test_full_system_flow() {
        // request -> router -> service -> shipped forest artifact -> response
        let app = server::build_app(&config_for(shipped("models/house_price.json")), None).unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/predict")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"features":[2000,3,2,2000]}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: PredictResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.prediction.len(), 1);
        assert!(body.prediction[0].is_finite());
    }

    #[test]
    fn test_shipped_artifacts_agree_on_shape() {
        for path in ["models/house_price.json", "models/house_price_linear.json"] {
            let service = InferenceService::new(ModelStore::load(shipped(path)).unwrap());
            let first = service.predict(&[2000.0, 3.0, 2.0, 2000.0]).unwrap();
            let second = service.predict(&[2000.0, 3.0, 2.0, 2000.0]).unwrap();
            assert!(first.is_finite());
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_larger_house_costs_more_with_linear_artifact() {
        let service =
            InferenceService::new(ModelStore::load(shipped("models/house_price_linear.json")).unwrap());
        let small = service.predict(&[1500.0, 3.0, 2.0, 2000.0]).unwrap();
        let large = service.predict(&[3500.0, 3.0, 2.0, 2000.0]).unwrap();
        assert!(large > small);
    }

    #[test]
    fn test_startup_fails_on_missing_artifact() {
        let config = config_for(PathBuf::from("models/does_not_exist.json"));
        match server::build_app(&config, None) {
            Err(ArtifactError::NotFound(_)) => {}
            Err(other) => panic!("Expected NotFound, got {}", other),
            Ok(_) => panic!("Router must not be built without an artifact"),
        }
    }

    #[tokio::test]
    async fn test_serve_never_binds_with_corrupted_artifact() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"\x80\x04\x95 not json").unwrap();

        let mut config = config_for(file.path().to_path_buf());
        // Port 0 would bind successfully if startup got that far.
        config.server.port = 0;
        config.server.host = "127.0.0.1".to_string();

        let err = server::serve(config, None).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ArtifactError>(),
            Some(ArtifactError::Io { .. }) | Some(ArtifactError::Malformed { .. })
        ));
    }
}
