//! Fetch-failure containment: an unreachable backend degrades each source
//! to an empty list instead of aborting the build.

use atlas_common::{AtlasError, ProjectConfig};
use layer_engine::{DirectoryClient, LayerCollectionBuilder};

#[tokio::test]
async fn test_unreachable_backend_degrades_to_empty_map() {
    // Port 0 is never connectable; both fetches fail independently.
    let client = DirectoryClient::new("http://127.0.0.1:0").unwrap();
    let builder = LayerCollectionBuilder::new(ProjectConfig::default());

    let session = builder
        .build(&client, "data/geojson-layer", "data/popup-images")
        .await;

    assert!(session.layers().is_empty());
    assert_eq!(session.rendered_count(), 0);
    assert!(session.legend().nodes().is_empty());
}

#[tokio::test]
async fn test_fetch_failure_is_typed() {
    let client = DirectoryClient::new("http://127.0.0.1:0").unwrap();
    let result = client.fetch_file_list("data/popup-images").await;

    assert!(matches!(
        result,
        Err(AtlasError::FetchFailure { ref source_name, .. }) if source_name == "data/popup-images"
    ));
}
