use std::sync::Arc;
use std::time::Duration;

use httpmock::MockServer;
use rentbook::AppContext;
use rentbook::application::queries::{houses, rooms, tenants};
use rentbook::application::{MemoryNotifier, Notification};
use rentbook::cache::QueryStatus;
use rentbook::infra::transport::Transport;
use rentbook_api_types::{HouseFilter, Profile, RoomCreate, RoomFilter, TenantFilter};
use serde_json::json;

fn profile() -> Profile {
    Profile {
        id: "u1".into(),
        telegram_id: 42,
        first_name: "Mai".into(),
        last_name: None,
        username: None,
        photo_url: None,
    }
}

fn context(server: &MockServer, notifier: Arc<MemoryNotifier>) -> AppContext {
    let transport =
        Transport::new(&server.base_url(), Duration::from_secs(5)).expect("transport");
    let ctx = AppContext::builder(transport).notifier(notifier).build();
    ctx.transport().set_token(Some("tok".into()));
    ctx.profile().set(Some(profile()));
    ctx
}

fn room(id: &str, house: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "house": house,
        "name": id,
        "price": 1000,
        "status": "available",
    })
}

fn by_house(house: &str) -> RoomFilter {
    RoomFilter {
        house: Some(house.into()),
        ..RoomFilter::default()
    }
}

#[tokio::test]
async fn creating_a_room_refetches_every_mounted_room_list_once() {
    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.method("GET").path("/rooms").query_param("house", "h1");
        then.status(200)
            .json_body(json!({ "items": [room("r1", "h1")], "total": 1 }));
    });
    let second = server.mock(|when, then| {
        when.method("GET").path("/rooms").query_param("house", "h2");
        then.status(200)
            .json_body(json!({ "items": [room("r2", "h2")], "total": 1 }));
    });
    let create = server.mock(|when, then| {
        when.method("POST")
            .path("/rooms/create")
            .json_body(json!({ "house": "h1", "name": "102", "price": 900, "capacity": 2 }));
        then.status(201).json_body(room("r3", "h1"));
    });

    let notifier = Arc::new(MemoryNotifier::new());
    let ctx = context(&server, notifier.clone());
    let mut a = ctx.cache().subscribe(rooms::list(&ctx, by_house("h1")));
    let mut b = ctx.cache().subscribe(rooms::list(&ctx, by_house("h2")));
    assert_eq!(a.settled().await.status, QueryStatus::Success);
    assert_eq!(b.settled().await.status, QueryStatus::Success);

    let created = rooms::create(&ctx)
        .mutate(RoomCreate {
            house: "h1".into(),
            name: "102".into(),
            price: 900,
            capacity: 2,
            floor: None,
        })
        .await
        .expect("room created");
    assert_eq!(created.id, "r3");

    assert_eq!(a.state().status, QueryStatus::Loading);
    assert_eq!(b.state().status, QueryStatus::Loading);
    assert!(a.state().data.is_some(), "stale data stays visible while refetching");

    assert_eq!(a.settled().await.status, QueryStatus::Success);
    assert_eq!(b.settled().await.status, QueryStatus::Success);
    create.assert();
    first.assert_calls(2);
    second.assert_calls(2);
    assert_eq!(
        notifier.notifications(),
        vec![Notification::Success("Room created.".into())]
    );
}

#[tokio::test]
async fn failed_mutation_reports_server_message_and_keeps_cache() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method("GET").path("/rooms");
        then.status(200)
            .json_body(json!({ "items": [room("r1", "h1")], "total": 1 }));
    });
    server.mock(|when, then| {
        when.method("POST").path("/rooms/create");
        then.status(409)
            .json_body(json!({ "statusCode": 409, "message": "Room name already used" }));
    });

    let notifier = Arc::new(MemoryNotifier::new());
    let ctx = context(&server, notifier.clone());
    let mut sub = ctx.cache().subscribe(rooms::list(&ctx, by_house("h1")));
    sub.settled().await;

    let err = rooms::create(&ctx)
        .mutate(RoomCreate {
            house: "h1".into(),
            name: "101".into(),
            price: 900,
            capacity: 1,
            floor: None,
        })
        .await
        .expect_err("conflict");
    assert_eq!(err.status(), Some(409));

    assert_eq!(sub.state().status, QueryStatus::Success);
    list.assert_calls(1);
    assert_eq!(
        notifier.notifications(),
        vec![Notification::Error("Room name already used".into())]
    );
}

#[tokio::test]
async fn concurrent_reads_share_one_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/houses");
        then.status(200)
            .delay(Duration::from_millis(50))
            .json_body(json!({ "items": [], "total": 0 }));
    });

    let ctx = context(&server, Arc::new(MemoryNotifier::new()));
    let spec = houses::list(&ctx, HouseFilter::default());
    let mut first = ctx.cache().subscribe(spec.clone());
    let mut second = ctx.cache().subscribe(spec.clone());
    let fetched = ctx.cache().fetch(&spec);

    let (a, b, c) = tokio::join!(first.settled(), second.settled(), fetched);
    assert_eq!(a.status, QueryStatus::Success);
    assert_eq!(b.status, QueryStatus::Success);
    assert_eq!(c.expect("shared result").total, 0);
    mock.assert_calls(1);
}

#[tokio::test]
async fn queries_wait_for_sign_in_and_required_filters() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET");
        then.status(200).json_body(json!({ "items": [], "total": 0 }));
    });

    let transport =
        Transport::new(&server.base_url(), Duration::from_secs(5)).expect("transport");
    let ctx = AppContext::builder(transport).build();

    let signed_out = ctx.cache().subscribe(houses::list(&ctx, HouseFilter::default()));
    assert!(!signed_out.is_enabled());
    assert_eq!(signed_out.state().status, QueryStatus::Idle);

    ctx.profile().set(Some(profile()));
    let no_room = ctx
        .cache()
        .subscribe(tenants::list(&ctx, TenantFilter::default()));
    assert!(!no_room.is_enabled());
    assert_eq!(no_room.state().status, QueryStatus::Idle);

    mock.assert_calls(0);
}

#[tokio::test]
async fn tenant_total_key_ignores_pagination() {
    let server = MockServer::start();
    let ctx = context(&server, Arc::new(MemoryNotifier::new()));
    let page = |page: u32| TenantFilter {
        room: Some("r1".into()),
        page: Some(page),
        page_size: Some(10),
        ..TenantFilter::default()
    };

    let first = tenants::total(&ctx, &page(1));
    let third = tenants::total(&ctx, &page(3));
    assert_eq!(first.key(), third.key());

    let list_first = tenants::list(&ctx, page(1));
    let list_third = tenants::list(&ctx, page(3));
    assert_ne!(list_first.key(), list_third.key());
}

#[tokio::test]
async fn switching_rooms_keeps_previous_page_until_the_new_one_arrives() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/rooms").query_param("house", "h1");
        then.status(200)
            .json_body(json!({ "items": [room("r1", "h1")], "total": 1 }));
    });
    server.mock(|when, then| {
        when.method("GET").path("/rooms").query_param("house", "h2");
        then.status(200)
            .delay(Duration::from_millis(50))
            .json_body(json!({ "items": [room("r2", "h2")], "total": 1 }));
    });

    let ctx = context(&server, Arc::new(MemoryNotifier::new()));
    let mut sub = ctx.cache().subscribe(rooms::list(&ctx, by_house("h1")));
    sub.settled().await;

    sub.set_query(rooms::list(&ctx, by_house("h2")));
    let shown = sub.state();
    assert_eq!(shown.status, QueryStatus::Loading);
    assert!(shown.is_placeholder);
    assert_eq!(shown.data.expect("placeholder").items[0].id, "r1");

    let settled = sub.settled().await;
    assert!(!settled.is_placeholder);
    assert_eq!(settled.data.expect("new page").items[0].id, "r2");
}
