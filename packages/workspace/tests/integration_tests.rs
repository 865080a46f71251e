/// Integration tests for the preview service
/// Tests submit → store → compose flow over HTTP and directly
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use codepad_common::{Fragment, FragmentSet, DEFAULT_SCRIPT, DEFAULT_STYLES};
use codepad_workspace::{
    compose, open_store, router, AppState, AssetStore, Config, DirectoryBackend, RenderMode,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

fn app_with(store: Arc<AssetStore>, config: Config) -> Router {
    router(Arc::new(AppState::new(store, &config)))
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn form_request(method: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri("/preview")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_submitted_fragments_appear_verbatim_in_inlined_preview() {
    let store = Arc::new(AssetStore::in_memory());
    let app = app_with(store, Config::default());

    let submit = app
        .clone()
        .oneshot(form_request(
            "PUT",
            "html=%3Cp%3Ehi%3C%2Fp%3E&css=p%7Bcolor%3Ared%7D&javascript=console.log(1)",
        ))
        .await
        .unwrap();
    assert_eq!(submit.status(), StatusCode::OK);

    let response = app.oneshot(get("/preview")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let html = body_text(response).await;
    assert!(html.contains("<p>hi</p>"));
    assert!(html.contains("p{color:red}"));
    assert!(html.contains("console.log(1)"));
}

#[tokio::test]
async fn test_submit_response_is_the_composed_document() {
    let store = Arc::new(AssetStore::in_memory());
    let app = app_with(Arc::clone(&store), Config::default());

    let response = app
        .oneshot(form_request("POST", "html=%3Cem%3Ex%3C%2Fem%3E&css=em%7B%7D"))
        .await
        .unwrap();

    let expected = compose(&store.resolve_all().await, RenderMode::Inlined);
    assert_eq!(body_text(response).await, expected);
}

#[tokio::test]
async fn test_fresh_store_serves_default_stylesheet() {
    let app = app_with(Arc::new(AssetStore::in_memory()), Config::default());

    let response = app.oneshot(get("/preview/styles.css")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
    assert_eq!(body_text(response).await, DEFAULT_STYLES);
}

#[tokio::test]
async fn test_every_known_path_resolves_before_any_commit() {
    let store = AssetStore::in_memory();

    for fragment in Fragment::ALL {
        let asset = store.get(fragment.asset_path()).await.unwrap();
        assert!(!asset.content.is_empty(), "{fragment} has no default");
        assert_eq!(asset.content_type, fragment.content_type());
    }
}

#[tokio::test]
async fn test_missing_form_fields_are_stored_empty() {
    let store = Arc::new(AssetStore::in_memory());
    let app = app_with(Arc::clone(&store), Config::default());

    app.clone()
        .oneshot(form_request("PUT", "html=%3Cb%3Eonly%3C%2Fb%3E"))
        .await
        .unwrap();

    assert_eq!(
        store.committed(),
        Some(FragmentSet::new("<b>only</b>", "", ""))
    );

    let response = app.oneshot(get("/preview/script.js")).await.unwrap();
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/javascript"
    );
    assert_eq!(body_text(response).await, "");
}

#[tokio::test]
async fn test_by_reference_preview_links_assets() {
    let store = Arc::new(AssetStore::in_memory());
    store
        .commit(FragmentSet::new("<main></main>", "main{}", "go()"))
        .await
        .unwrap();
    let config = Config {
        render_mode: RenderMode::ByReference,
        ..Config::default()
    };

    let html = body_text(app_with(store, config).oneshot(get("/preview")).await.unwrap()).await;

    assert!(html.contains("<main></main>"));
    assert!(html.contains("/preview/styles.css"));
    assert!(html.contains("/preview/script.js"));
    assert!(!html.contains("go()"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_readers_never_see_mixed_commits() {
    let store = Arc::new(AssetStore::in_memory());
    store.commit(FragmentSet::new("0", "0", "0")).await.unwrap();
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let done = Arc::clone(&done);
            tokio::spawn(async move {
                let mut reads = 0;
                while !done.load(Ordering::Acquire) {
                    let set = store.resolve_all().await;
                    assert_eq!(set.markup, set.styles);
                    assert_eq!(set.styles, set.script);
                    reads += 1;
                    tokio::task::yield_now().await;
                }
                reads
            })
        })
        .collect();

    let writers: Vec<_> = (0..2)
        .map(|w| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                for i in 0..100 {
                    let marker = format!("{w}-{i}");
                    store
                        .commit(FragmentSet::new(&marker, &marker, &marker))
                        .await
                        .unwrap();
                }
            })
        })
        .collect();

    for writer in writers {
        writer.await.unwrap();
    }
    done.store(true, Ordering::Release);
    for reader in readers {
        reader.await.unwrap();
    }

    assert_eq!(store.revision(), 201);
}

#[tokio::test]
async fn test_snapshot_directory_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        store_dir: Some("state".to_string()),
        ..Config::default()
    };

    let store = Arc::new(open_store(&config, dir.path()).await);
    app_with(Arc::clone(&store), config.clone())
        .oneshot(form_request("PUT", "html=%3Ch2%3Ekept%3C%2Fh2%3E&css=h2%7B%7D&javascript=1"))
        .await
        .unwrap();
    drop(store);

    let reopened = open_store(&config, dir.path()).await;
    assert_eq!(reopened.revision(), 1);
    assert_eq!(
        reopened.committed(),
        Some(FragmentSet::new("<h2>kept</h2>", "h2{}", "1"))
    );
}

#[tokio::test]
async fn test_corrupt_snapshot_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let backend = DirectoryBackend::new(dir.path());
    std::fs::write(backend.snapshot_path(), "not json").unwrap();

    let store = AssetStore::open(Box::new(backend)).await;

    assert_eq!(store.revision(), 0);
    assert_eq!(
        store.get("/preview/script.js").await.unwrap().content,
        DEFAULT_SCRIPT
    );
}
