//! Normalization engine: end-to-end scenarios, dry-run purity, AI fallback.

mod support;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use catalogsync_core::{AttributeAdvisor, CompletionModel, NormalizationEngine};
use catalogsync_domain::{
    CatalogSyncError, Category, ExecutionMode, NormalizationStatus, ProductCharacteristic,
    ProductUpdate,
};
use support::advisor::ScriptedModel;
use support::remote::{RecordingRemoteCatalog, RemoteCall};
use support::repositories::{
    category, requirement, MockCategoryRepository, MockRequirementRepository,
};

const CATEGORY_ID: i64 = 10;
const REMOTE_CATEGORY_ID: i64 = 5_000;

fn synced_category() -> Category {
    let mut kitchen = category(CATEGORY_ID, "Kitchen", None);
    kitchen.remote_id = Some(REMOTE_CATEGORY_ID);
    kitchen
}

fn remote_with_abc123() -> RecordingRemoteCatalog {
    RecordingRemoteCatalog::default()
        .with_product(1, "XYZ999", "Frying pan", "")
        .with_product(2, "ABC123", "Bamboo spatula", "Heat resistant spatula made of bamboo")
}

fn engine(
    remote: &RecordingRemoteCatalog,
    models: Vec<Arc<dyn CompletionModel>>,
    requirements: MockRequirementRepository,
) -> NormalizationEngine {
    NormalizationEngine::new(
        Arc::new(MockCategoryRepository::new(vec![synced_category(), category(11, "Garden", None)])),
        Arc::new(requirements),
        Arc::new(remote.clone()),
    )
    .with_advisor(Arc::new(AttributeAdvisor::new(models)))
}

fn material_requirement() -> MockRequirementRepository {
    MockRequirementRepository::new(vec![requirement(CATEGORY_ID, "Material", None)])
}

fn skus(items: &[&str]) -> Vec<String> {
    items.iter().map(|sku| (*sku).to_string()).collect()
}

#[tokio::test]
async fn abc123_is_updated_with_advised_material() {
    let remote = remote_with_abc123();
    let engine = engine(
        &remote,
        vec![Arc::new(ScriptedModel::replying("primary", r#"{"Material": "Bamboo"}"#))],
        material_requirement(),
    );

    let result = engine.apply("ABC123", CATEGORY_ID, ExecutionMode::Apply, true).await.unwrap();

    assert_eq!(result.status, NormalizationStatus::Success);
    assert_eq!(result.attributes_updated, vec!["Material".to_string()]);
    assert_eq!(result.attributes["Material"], "Bamboo");
    assert_eq!(result.category.as_deref(), Some("Kitchen"));
    assert!(result.ai_error.is_none());
    assert_eq!(
        remote.mutations(),
        vec![RemoteCall::UpdateProduct(
            2,
            ProductUpdate {
                category_id: REMOTE_CATEGORY_ID,
                characteristics: vec![ProductCharacteristic {
                    name: "Material".into(),
                    value: "Bamboo".into(),
                }],
            }
        )]
    );
}

#[tokio::test]
async fn missing_sku_is_not_found_regardless_of_mode() {
    for mode in [ExecutionMode::Apply, ExecutionMode::DryRun] {
        let remote = remote_with_abc123();
        let engine = engine(&remote, Vec::new(), material_requirement());

        let result = engine.apply("NOPE-1", CATEGORY_ID, mode, true).await.unwrap();

        assert_eq!(result.status, NormalizationStatus::Error);
        assert!(result.message.as_deref().unwrap().contains("not found"));
        assert!(remote.mutations().is_empty());
    }
}

#[tokio::test]
async fn dry_run_never_mutates_and_reports_would_be_values() {
    let remote = remote_with_abc123();
    let engine = engine(
        &remote,
        vec![Arc::new(ScriptedModel::replying("primary", r#"{"Material": "Bamboo"}"#))],
        material_requirement(),
    );

    let results = engine
        .batch(&skus(&["ABC123", "XYZ999", "MISSING"]), CATEGORY_ID, ExecutionMode::DryRun, true)
        .await
        .unwrap();

    assert!(remote.mutations().is_empty());
    assert_eq!(results[0].status, NormalizationStatus::DryRunPending);
    assert_eq!(results[0].attributes["Material"], "Bamboo");
    assert_eq!(results[0].remote_category_id, Some(REMOTE_CATEGORY_ID));
    assert!(results[0].attributes_updated.is_empty());
    assert_eq!(results[1].status, NormalizationStatus::DryRunPending);
    assert_eq!(results[2].status, NormalizationStatus::Error);
    // Reads are still allowed.
    assert!(remote.calls().contains(&RemoteCall::GetProduct(2)));
}

#[tokio::test]
async fn fallback_model_output_is_used_silently() {
    let remote = remote_with_abc123();
    let primary = ScriptedModel::failing("configured");
    let backup = ScriptedModel::replying("fallback", "Here you go: {\"Material\": \"Steel\"}");
    let (primary_calls, backup_calls) = (primary.call_counter(), backup.call_counter());
    let engine = engine(&remote, vec![Arc::new(primary), Arc::new(backup)], material_requirement());

    let result = engine.apply("ABC123", CATEGORY_ID, ExecutionMode::Apply, true).await.unwrap();

    assert_eq!(result.status, NormalizationStatus::Success);
    assert_eq!(result.attributes["Material"], "Steel");
    assert!(result.ai_error.is_none());
    assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
    assert_eq!(backup_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn all_models_failing_yields_na_and_diagnostic() {
    let remote = remote_with_abc123();
    let engine = engine(
        &remote,
        vec![Arc::new(ScriptedModel::failing("a")), Arc::new(ScriptedModel::failing("b"))],
        MockRequirementRepository::new(vec![
            requirement(CATEGORY_ID, "Material", None),
            requirement(CATEGORY_ID, "Color", None),
        ]),
    );

    let result = engine.apply("ABC123", CATEGORY_ID, ExecutionMode::Apply, true).await.unwrap();

    assert_eq!(result.status, NormalizationStatus::Success);
    assert_eq!(result.attributes["Material"], "N/A");
    assert_eq!(result.attributes["Color"], "N/A");
    assert!(!result.ai_error.as_deref().unwrap().is_empty());
    assert!(result.attributes_updated.is_empty());
    match &remote.mutations()[0] {
        RemoteCall::UpdateProduct(_, update) => {
            assert_eq!(update.category_id, REMOTE_CATEGORY_ID);
            assert!(update.characteristics.is_empty());
        }
        other => panic!("unexpected mutation {other:?}"),
    }
}

#[tokio::test]
async fn default_value_replaces_na() {
    let remote = remote_with_abc123();
    let engine = engine(
        &remote,
        vec![Arc::new(ScriptedModel::replying("primary", r#"{"Material": "Bamboo"}"#))],
        MockRequirementRepository::new(vec![
            requirement(CATEGORY_ID, "Material", Some("Plastic")),
            requirement(CATEGORY_ID, "Warranty", Some("90 days")),
            requirement(CATEGORY_ID, "Color", None),
        ]),
    );

    let result = engine.apply("ABC123", CATEGORY_ID, ExecutionMode::Apply, true).await.unwrap();

    assert_eq!(result.attributes["Material"], "Bamboo");
    assert_eq!(result.attributes["Warranty"], "90 days");
    assert_eq!(result.attributes["Color"], "N/A");
    assert_eq!(result.attributes_updated, vec!["Material".to_string(), "Warranty".to_string()]);
}

#[tokio::test]
async fn unsynchronized_category_makes_no_remote_calls() {
    let remote = remote_with_abc123();
    let engine = engine(&remote, Vec::new(), material_requirement());

    let unsynced = engine.apply("ABC123", 11, ExecutionMode::Apply, true).await.unwrap();
    let missing = engine.apply("ABC123", 99, ExecutionMode::Apply, true).await.unwrap();

    for result in [unsynced, missing] {
        assert_eq!(result.status, NormalizationStatus::Error);
        assert!(result.message.as_deref().unwrap().contains("not synchronized"));
    }
    assert!(remote.calls().is_empty());
}

#[tokio::test]
async fn without_ai_only_category_is_applied() {
    let remote = remote_with_abc123();
    let model = ScriptedModel::replying("primary", r#"{"Material": "Bamboo"}"#);
    let calls = model.call_counter();
    let engine = engine(&remote, vec![Arc::new(model)], material_requirement());

    let result = engine.apply("ABC123", CATEGORY_ID, ExecutionMode::Apply, false).await.unwrap();

    assert_eq!(result.status, NormalizationStatus::Success);
    assert!(result.attributes.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn update_failure_is_isolated_to_its_sku() {
    let remote = remote_with_abc123()
        .failing_update(1, CatalogSyncError::RemoteApi { status: 409, body: "locked".into() });
    let engine = engine(&remote, Vec::new(), MockRequirementRepository::default());

    let results = engine
        .batch(&skus(&["XYZ999", "ABC123"]), CATEGORY_ID, ExecutionMode::Apply, true)
        .await
        .unwrap();

    assert_eq!(results[0].sku, "XYZ999");
    assert_eq!(results[0].status, NormalizationStatus::Error);
    assert!(results[0].message.as_deref().unwrap().contains("409"));
    assert_eq!(results[1].sku, "ABC123");
    assert_eq!(results[1].status, NormalizationStatus::Success);
}

#[tokio::test]
async fn token_error_aborts_the_batch() {
    let remote = remote_with_abc123().failing_update(1, CatalogSyncError::NoToken);
    let engine = engine(&remote, Vec::new(), MockRequirementRepository::default());

    let err = engine
        .batch(&skus(&["XYZ999", "ABC123"]), CATEGORY_ID, ExecutionMode::Apply, true)
        .await
        .unwrap_err();

    assert_eq!(err, CatalogSyncError::NoToken);
}

#[tokio::test]
async fn ai_without_advisor_is_configuration_error() {
    let remote = remote_with_abc123();
    let engine = NormalizationEngine::new(
        Arc::new(MockCategoryRepository::new(vec![synced_category()])),
        Arc::new(material_requirement()),
        Arc::new(remote.clone()),
    );

    let err = engine.apply("ABC123", CATEGORY_ID, ExecutionMode::DryRun, true).await.unwrap_err();
    assert!(matches!(err, CatalogSyncError::Config(_)));
}
