use std::time::Duration;

use httpmock::MockServer;
use rentbook::application::services::{RoomService, SchedulerService, TenantService};
use rentbook::infra::transport::{ErrorKind, Transport};
use rentbook_api_types::{Deleted, RoomPatch, SchedulerBillFilter, TenantFilter, Update};
use serde_json::json;

fn transport(server: &MockServer) -> Transport {
    let transport =
        Transport::new(&server.base_url(), Duration::from_secs(5)).expect("transport");
    transport.set_token(Some("tok".into()));
    transport
}

fn tenants_page(count: usize, total: u64) -> serde_json::Value {
    let items: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "_id": format!("t{i}"),
                "room": "r1",
                "name": format!("Tenant {i}"),
                "phone": "0900000000",
            })
        })
        .collect();
    json!({ "items": items, "total": total })
}

#[tokio::test]
async fn tenant_page_and_total_agree() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method("GET")
            .path("/tenant")
            .query_param("room", "r1")
            .query_param("page", "1")
            .query_param("pageSize", "10")
            .header("authorization", "Bearer tok");
        then.status(200).json_body(tenants_page(10, 42));
    });
    let total = server.mock(|when, then| {
        when.method("GET")
            .path("/tenant/total")
            .query_param("room", "r1");
        then.status(200).json_body(json!({ "total": 42 }));
    });

    let service = TenantService::new(transport(&server));
    let filter = TenantFilter {
        room: Some("r1".into()),
        page: Some(1),
        page_size: Some(10),
        ..TenantFilter::default()
    };

    let page = service.list(&filter).await.expect("tenant page");
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total, 42);

    let count = service.total(&filter).await.expect("tenant total");
    assert_eq!(count.total, 42);

    list.assert();
    total.assert();
}

#[tokio::test]
async fn update_sends_patch_body_to_record_path() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("PATCH")
            .path("/rooms/r1")
            .json_body(json!({ "price": 1500 }));
        then.status(200).json_body(json!({
            "_id": "r1",
            "house": "h1",
            "name": "101",
            "price": 1500,
            "status": "available",
        }));
    });

    let service = RoomService::new(transport(&server));
    let patch = RoomPatch {
        price: Some(1500),
        ..RoomPatch::default()
    };
    let room = service
        .update(Update::new("r1", patch))
        .await
        .expect("room update");

    assert_eq!(room.id, "r1");
    assert_eq!(room.price, 1500);
    mock.assert();
}

#[tokio::test]
async fn blank_id_never_reaches_the_network() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET");
        then.status(200).json_body(json!({}));
    });

    let service = RoomService::new(transport(&server));
    let err = service.get("   ").await.expect_err("blank id");

    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert_eq!(err.status(), None);
    mock.assert_calls(0);
}

#[tokio::test]
async fn server_message_list_is_joined() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("PATCH").path("/tenant/t1");
        then.status(400).json_body(json!({
            "statusCode": 400,
            "message": ["phone must be valid", "name should not be empty"],
        }));
    });

    let service = TenantService::new(transport(&server));
    let err = service
        .update(Update::new("t1", Default::default()))
        .await
        .expect_err("bad request");

    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(err.status(), Some(400));
    assert_eq!(
        err.message(),
        Some("phone must be valid; name should not be empty")
    );
}

#[tokio::test]
async fn oversized_page_is_a_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/tenant");
        then.status(200).json_body(tenants_page(3, 2));
    });

    let service = TenantService::new(transport(&server));
    let filter = TenantFilter {
        room: Some("r1".into()),
        ..TenantFilter::default()
    };
    let err = service.list(&filter).await.expect_err("items exceed total");
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn toggle_status_patches_without_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("PATCH").path("/tenant/t1/toggle-status");
        then.status(200).json_body(json!({
            "_id": "t1",
            "room": "r1",
            "name": "An",
            "phone": "0900",
            "isActive": false,
        }));
    });

    let service = TenantService::new(transport(&server));
    let tenant = service.toggle_status("t1").await.expect("toggle");
    assert!(!tenant.is_active);
    mock.assert();
}

#[tokio::test]
async fn delete_accepts_acknowledgement() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("DELETE").path("/scheduler/s1");
        then.status(200).json_body(json!({ "success": true }));
    });

    let service = SchedulerService::new(transport(&server));
    let deleted = service.delete("s1").await.expect("delete");
    assert!(deleted.succeeded());
    assert!(matches!(deleted, Deleted::Ack { .. }));
    mock.assert();
}

#[tokio::test]
async fn scheduler_bills_require_a_scheduler() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/scheduler/bill");
        then.status(200).json_body(json!({ "items": [], "total": 0 }));
    });

    let service = SchedulerService::new(transport(&server));
    let err = service
        .bills(&SchedulerBillFilter::default())
        .await
        .expect_err("scheduler missing");
    assert_eq!(err.kind(), ErrorKind::Precondition);
    mock.assert_calls(0);

    let filter = SchedulerBillFilter {
        scheduler: Some("s1".into()),
        ..SchedulerBillFilter::default()
    };
    let page = service.bills(&filter).await.expect("bills");
    assert!(page.items.is_empty());
    mock.assert();
}
