use std::sync::Arc;
use std::time::Duration;

use httpmock::MockServer;
use rentbook::AppContext;
use rentbook::application::auth::{self, AuthError};
use rentbook::application::{MemoryNotifier, Notification};
use rentbook::application::queries::rooms;
use rentbook::cache::{QueryKey, QueryStatus, ResourceTag};
use rentbook::infra::session::{FileSessionStore, MemorySessionStore, SessionStore};
use rentbook::infra::transport::Transport;
use rentbook_api_types::RoomFilter;
use serde_json::json;
use tempfile::TempDir;

fn context(
    server: &MockServer,
    session: Arc<dyn SessionStore>,
    notifier: Arc<MemoryNotifier>,
) -> AppContext {
    let transport =
        Transport::new(&server.base_url(), Duration::from_secs(5)).expect("transport");
    AppContext::builder(transport)
        .session_store(session)
        .notifier(notifier)
        .build()
}

fn mock_login(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method("POST")
            .path("/auth/telegram/auth")
            .json_body(json!({ "code": "777111" }));
        then.status(200).json_body(json!({
            "accessToken": "session-token",
            "profile": { "_id": "u1", "telegramId": 42, "firstName": "Mai" },
        }));
    })
}

#[tokio::test]
async fn generate_returns_code_and_bot_link() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST").path("/auth/telegram/generate");
        then.status(200).json_body(json!({
            "code": "777111",
            "botUrl": "https://t.me/rentbook_bot?start=777111",
        }));
    });

    let ctx = context(
        &server,
        Arc::new(MemorySessionStore::new()),
        Arc::new(MemoryNotifier::new()),
    );
    let code = auth::generate(&ctx).await.expect("login code");
    assert_eq!(code.code, "777111");
    assert!(code.bot_url.is_some());
    mock.assert();
}

#[tokio::test]
async fn authenticate_stores_token_and_latches_profile() {
    let server = MockServer::start();
    let login = mock_login(&server);
    let houses = server.mock(|when, then| {
        when.method("GET")
            .path("/houses")
            .header("authorization", "Bearer session-token");
        then.status(200).json_body(json!({ "items": [], "total": 0 }));
    });

    let session = Arc::new(MemorySessionStore::new());
    let notifier = Arc::new(MemoryNotifier::new());
    let ctx = context(&server, session.clone(), notifier.clone());

    let profile = auth::authenticate(&ctx, "777111").await.expect("signed in");
    assert_eq!(profile.id, "u1");
    assert!(ctx.profile().is_authenticated());
    assert_eq!(
        session.get("rentbook_session").await.expect("cookie read"),
        Some("session-token".to_string())
    );

    ctx.houses()
        .list(&Default::default())
        .await
        .expect("authorized list");

    login.assert();
    houses.assert();
    assert_eq!(
        notifier.notifications(),
        vec![Notification::Success("Signed in.".into())]
    );
}

#[tokio::test]
async fn rejected_code_notifies_and_leaves_session_empty() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/auth/telegram/auth");
        then.status(401)
            .json_body(json!({ "statusCode": 401, "message": "Code expired" }));
    });

    let session = Arc::new(MemorySessionStore::new());
    let notifier = Arc::new(MemoryNotifier::new());
    let ctx = context(&server, session.clone(), notifier.clone());

    let err = auth::authenticate(&ctx, "000000")
        .await
        .expect_err("rejected");
    assert!(matches!(err, AuthError::Api(ref api) if api.is_unauthorized()));
    assert!(!ctx.profile().is_authenticated());
    assert!(!ctx.transport().has_token());
    assert_eq!(session.get("rentbook_session").await.expect("read"), None);
    assert_eq!(
        notifier.notifications(),
        vec![Notification::Error("Code expired".into())]
    );
}

#[tokio::test]
async fn blank_code_is_rejected_locally() {
    let server = MockServer::start();
    let login = mock_login(&server);
    let ctx = context(
        &server,
        Arc::new(MemorySessionStore::new()),
        Arc::new(MemoryNotifier::new()),
    );

    assert!(auth::authenticate(&ctx, "  ").await.is_err());
    login.assert_calls(0);
}

#[tokio::test]
async fn file_session_restores_in_a_new_context() {
    let server = MockServer::start();
    mock_login(&server);
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("session.json");

    let first = context(
        &server,
        Arc::new(FileSessionStore::new(&path)),
        Arc::new(MemoryNotifier::new()),
    );
    auth::authenticate(&first, "777111").await.expect("signed in");

    let second = context(
        &server,
        Arc::new(FileSessionStore::new(&path)),
        Arc::new(MemoryNotifier::new()),
    );
    assert!(!second.profile().is_authenticated());
    let restored = auth::restore(&second).await.expect("restore");

    assert_eq!(restored.map(|p| p.id), Some("u1".to_string()));
    assert!(second.profile().is_authenticated());
    assert!(second.transport().has_token());
}

#[tokio::test]
async fn restore_without_cookie_is_a_no_op() {
    let server = MockServer::start();
    let ctx = context(
        &server,
        Arc::new(MemorySessionStore::new()),
        Arc::new(MemoryNotifier::new()),
    );
    assert_eq!(auth::restore(&ctx).await.expect("restore"), None);
    assert!(!ctx.transport().has_token());
}

#[tokio::test]
async fn logout_clears_session_profile_and_cache() {
    let server = MockServer::start();
    mock_login(&server);

    let session = Arc::new(MemorySessionStore::new());
    let notifier = Arc::new(MemoryNotifier::new());
    let ctx = context(&server, session.clone(), notifier.clone());
    auth::authenticate(&ctx, "777111").await.expect("signed in");
    ctx.cache()
        .set_query_data(&QueryKey::detail(ResourceTag::Houses, "h1"), 1_u8);

    auth::logout(&ctx).await.expect("signed out");

    assert!(!ctx.profile().is_authenticated());
    assert!(!ctx.transport().has_token());
    assert!(ctx.cache().is_empty());
    assert_eq!(session.get("rentbook_session").await.expect("read"), None);
    assert_eq!(
        session.get("rentbook_session_profile").await.expect("read"),
        None
    );
    assert_eq!(
        notifier.take(),
        vec![
            Notification::Success("Signed in.".into()),
            Notification::Success("Signed out.".into()),
        ]
    );
}

#[tokio::test]
async fn logout_does_not_refetch_mounted_queries() {
    let server = MockServer::start();
    mock_login(&server);
    let list = server.mock(|when, then| {
        when.method("GET").path("/rooms");
        then.status(200).json_body(json!({
            "items": [{
                "_id": "r1",
                "house": "h1",
                "name": "101",
                "price": 1000,
                "status": "available",
            }],
            "total": 1,
        }));
    });

    let ctx = context(
        &server,
        Arc::new(MemorySessionStore::new()),
        Arc::new(MemoryNotifier::new()),
    );
    auth::authenticate(&ctx, "777111").await.expect("signed in");
    let mut sub = ctx.cache().subscribe(rooms::list(&ctx, RoomFilter::default()));
    assert_eq!(sub.settled().await.status, QueryStatus::Success);

    auth::logout(&ctx).await.expect("signed out");
    let state = sub.settled().await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(state.status, QueryStatus::Idle);
    assert!(state.data.is_none());
    assert_eq!(sub.state().status, QueryStatus::Idle);
    list.assert_calls(1);
}
