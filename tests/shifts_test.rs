mod common;

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bar_pos_client::error::Error;
use bar_pos_client::modal::{Choice, ModalKind};
use bar_pos_client::orders::OrderDraft;
use bar_pos_client::shifts::{ShiftBrowser, ShiftController, ShiftState};
use bar_pos_client::types::PaymentMethod;
use bar_pos_client::PosClient;

use common::{client, modal};

fn shift_page(current: u32, total: u32) -> serde_json::Value {
    json!({
        "shifts": [{
            "id": 10 + current,
            "startTime": "2024-03-01 16:00:00",
            "endTime": "2024-03-01 23:30:00",
            "bartender": "Petr",
            "orderCount": 1,
            "orderItems": [{
                "id": 501,
                "customer": "Jana_Novak",
                "products": "Pivo x2",
                "totalPrice": "90",
                "date": "2024-03-01 18:00:00",
                "paymentMethod": "cash",
                "payed": "@true",
                "cancelled": "@false"
            }]
        }],
        "currentPage": current,
        "totalPages": total
    })
}

fn browser(pos: &PosClient) -> ShiftBrowser {
    ShiftBrowser::new(pos.shifts(), pos.orders(), pos.inventory(), 5)
}

#[tokio::test]
async fn test_pagination_stops_at_boundaries_without_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shifts"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shift_page(1, 2)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/shifts"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shift_page(2, 2)))
        .expect(1)
        .mount(&server)
        .await;

    let pos = client(&server.uri());
    let modal = modal(&[]);
    let mut browser = browser(&pos);

    browser.show_page(1, &modal).await.unwrap();
    assert!(browser.pager().prev_disabled());
    assert!(!browser.pager().next_disabled());
    assert!(!browser.prev(&modal).await.unwrap());

    assert!(browser.next(&modal).await.unwrap());
    assert_eq!(browser.pager().current_page(), 2);
    assert!(browser.pager().next_disabled());
    assert!(!browser.next(&modal).await.unwrap());

    assert!(browser.render().contains("Strana 2 z 2"));
}

#[tokio::test]
async fn test_expanding_a_shift_builds_its_order_table() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shifts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shift_page(1, 1)))
        .mount(&server)
        .await;

    let pos = client(&server.uri());
    let mut browser = browser(&pos);
    browser.load(1).await.unwrap();

    let table = browser.toggle("11").unwrap();
    assert!(table.contains("501"));
    assert!(table.contains("90.00 Kč"));
    assert!(table.contains("zrušit"));
    assert_eq!(browser.expanded(), Some("11"));

    assert_eq!(browser.toggle("11"), None);
    assert_eq!(browser.expanded(), None);
    assert_eq!(browser.toggle("999"), None);
}

#[tokio::test]
async fn test_cancel_order_refreshes_inventory_then_shifts() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/orders/501"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "cancelled"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Pivo", "price": "45", "quantity": 52}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/shifts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shift_page(1, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let pos = client(&server.uri());
    let modal = modal(&[Choice::Yes]);
    let mut browser = browser(&pos);

    assert!(browser.cancel_order("501", &modal).await.unwrap());
    assert_eq!(browser.products()[0].quantity, 52);
    assert_eq!(browser.shifts().len(), 1);

    let requests = server.received_requests().await.unwrap();
    let sequence: Vec<String> = requests
        .iter()
        .map(|r| format!("{} {}", r.method, r.url.path()))
        .collect();
    assert_eq!(sequence, vec!["DELETE /orders/501", "GET /products", "GET /shifts"]);
}

#[tokio::test]
async fn test_declined_restore_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/orders/501/restore"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let pos = client(&server.uri());
    let modal = modal(&[Choice::No]);
    let mut browser = browser(&pos);

    assert!(!browser.restore_order("501", &modal).await.unwrap());
}

#[tokio::test]
async fn test_confirmed_restore_refreshes_inventory_then_shifts() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/orders/501/restore"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "restored"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Pivo", "price": "45", "quantity": 49}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/shifts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shift_page(1, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let pos = client(&server.uri());
    let modal = modal(&[Choice::Yes]);
    let mut browser = browser(&pos);

    assert!(browser.restore_order("501", &modal).await.unwrap());
    assert_eq!(browser.products()[0].quantity, 49);
    assert_eq!(browser.shifts().len(), 1);
    assert!(modal.surface().errors().is_empty());

    let requests = server.received_requests().await.unwrap();
    let sequence: Vec<String> = requests
        .iter()
        .map(|r| format!("{} {}", r.method, r.url.path()))
        .collect();
    assert_eq!(sequence, vec!["PUT /orders/501/restore", "GET /products", "GET /shifts"]);
}

#[tokio::test]
async fn test_failed_restore_is_reported_and_stops() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/orders/501/restore"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Order not found"})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let pos = client(&server.uri());
    let modal = modal(&[Choice::Yes]);
    let mut browser = browser(&pos);

    let result = browser.restore_order("501", &modal).await;

    assert!(matches!(result, Err(Error::Server { status: 404, .. })));
    assert!(modal.surface().errors()[0].contains("Order not found"));
}

#[tokio::test]
async fn test_controller_state_comes_from_server() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/currentShift"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "active": true,
            "shift": {"id": 7, "bartender": "Eva", "startTime": "2024-03-02 16:00:00", "endTime": null}
        })))
        .mount(&server)
        .await;

    let pos = client(&server.uri());
    let mut controller = ShiftController::new(pos.shifts(), pos.orders());
    assert_eq!(controller.state(), &ShiftState::NoActiveShift);

    controller.load().await.unwrap();

    assert_eq!(
        controller.state(),
        &ShiftState::ShiftActive {
            shift_id: "7".to_string(),
            bartender: "Eva".to_string(),
        }
    );
}

#[tokio::test]
async fn test_start_shift_with_empty_name_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/startShift"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let pos = client(&server.uri());
    let modal = modal(&[]);
    let mut controller = ShiftController::new(pos.shifts(), pos.orders());

    let result = controller.start_shift("  ", &modal).await;

    assert!(matches!(result, Err(Error::Validation(_))));
    assert_eq!(controller.state(), &ShiftState::NoActiveShift);
    assert_eq!(modal.surface().errors().len(), 1);
}

#[tokio::test]
async fn test_start_without_id_fails_when_server_shows_no_shift() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/startShift"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/currentShift"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .expect(1)
        .mount(&server)
        .await;

    let pos = client(&server.uri());
    let modal = modal(&[]);
    let mut controller = ShiftController::new(pos.shifts(), pos.orders());

    let result = controller.start_shift("Petr", &modal).await;

    assert!(matches!(result, Err(Error::General(_))));
    assert_eq!(controller.state(), &ShiftState::NoActiveShift);
    assert_eq!(modal.surface().errors().len(), 1);
    assert!(modal
        .surface()
        .shown()
        .iter()
        .all(|(kind, _)| *kind != ModalKind::Info));
}

#[tokio::test]
async fn test_end_shift_without_tracked_id_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/endShift"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let pos = client(&server.uri());
    let modal = modal(&[]);
    let mut controller = ShiftController::new(pos.shifts(), pos.orders());

    let result = controller.end_shift(&modal).await;

    assert!(matches!(result, Err(Error::NoActiveShift)));
    assert_eq!(modal.surface().errors().len(), 1);
}

#[tokio::test]
async fn test_shift_lifecycle_start_then_end_with_summary() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/startShift"))
        .and(body_json(json!({"bartender": "Petr"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"shiftID": 42})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/endShift"))
        .and(body_json(json!({"shiftID": "42"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ended"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/shiftSummary"))
        .and(query_param("shiftID", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalRevenue": 1250,
            "cashRevenue": "800",
            "cardRevenue": 300.5,
            "employeeAccountRevenue": "149.5"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let pos = client(&server.uri());
    let modal = modal(&[]);
    let mut controller = ShiftController::new(pos.shifts(), pos.orders());

    controller.start_shift("Petr", &modal).await.unwrap();
    assert_eq!(controller.state().shift_id(), Some("42"));

    let summary = controller.end_shift(&modal).await.unwrap();
    assert_eq!(summary.total_revenue, 1250.0);
    assert_eq!(summary.employee_account_revenue, 149.5);
    assert_eq!(controller.state(), &ShiftState::NoActiveShift);

    let shown = modal.surface().shown();
    let (kind, text) = shown.last().unwrap();
    assert_eq!(*kind, ModalKind::Info);
    assert!(text.contains("1250.00 Kč"));
    assert!(text.contains("300.50 Kč"));
}

#[tokio::test]
async fn test_log_order_posts_draft_against_active_shift() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/currentShift"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "3", "bartender": "Eva"})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/logOrder"))
        .and(body_json(json!({
            "order": [{"name": "Pivo", "price": 45.0, "quantity": 2}],
            "paymentMethod": "employeeAccount",
            "totalAmount": 90.0,
            "selectedCustomer": "Jana Novak",
            "shiftID": "3"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let pos = client(&server.uri());
    let modal = modal(&[]);
    let mut controller = ShiftController::new(pos.shifts(), pos.orders());
    controller.load().await.unwrap();

    let mut draft = OrderDraft::new();
    draft.add("Pivo", 45.0, 2).unwrap();

    controller
        .log_order(&mut draft, PaymentMethod::EmployeeAccount, Some("Jana Novak"), &modal)
        .await
        .unwrap();

    assert!(draft.is_empty());
}

#[tokio::test]
async fn test_log_order_without_shift_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/logOrder"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let pos = client(&server.uri());
    let modal = modal(&[]);
    let controller = ShiftController::new(pos.shifts(), pos.orders());

    let mut draft = OrderDraft::new();
    draft.add("Rum", 60.0, 1).unwrap();

    let result = controller.log_order(&mut draft, PaymentMethod::Cash, None, &modal).await;

    assert!(matches!(result, Err(Error::NoActiveShift)));
    assert!(!draft.is_empty());
}
