//! The ID scanner against a paginated mock API.

use futures::{StreamExt, TryStreamExt};
use linebot_integration_tests::mock_client;
use linebot_messaging::LineError;
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_pages(server: &MockServer, base: &str) {
    Mock::given(method("GET"))
        .and(path(base))
        .and(query_param_is_missing("start"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"userIds": ["U1", "U2"], "next": "p2"})),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(base))
        .and(query_param("start", "p2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"userIds": ["U3", "U4"], "next": "p3"})),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(base))
        .and(query_param("start", "p3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"userIds": ["U5"]})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_scan_all_followers() {
    let server = MockServer::start().await;
    mount_pages(&server, "/v2/bot/followers/ids").await;

    let client = mock_client(&server);
    let ids = client.get_follower_ids(None).scan().collect_ids().await.unwrap();
    assert_eq!(ids, ["U1", "U2", "U3", "U4", "U5"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_scan_fetches_lazily() {
    let server = MockServer::start().await;
    mount_pages(&server, "/v2/bot/followers/ids").await;

    let client = mock_client(&server);
    let first_two: Vec<String> = client
        .get_follower_ids(None)
        .scan()
        .take(2)
        .try_collect()
        .await
        .unwrap();
    assert_eq!(first_two, ["U1", "U2"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);

    let first_three: Vec<String> = client
        .get_follower_ids(None)
        .scan()
        .take(3)
        .try_collect()
        .await
        .unwrap();
    assert_eq!(first_three, ["U1", "U2", "U3"]);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_scan_group_members() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/bot/group/C1/members/ids"))
        .and(query_param_is_missing("start"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"memberIds": ["U1"], "next": "m2"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/bot/group/C1/members/ids"))
        .and(query_param("start", "m2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"memberIds": ["U2"]})))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let ids = client.get_group_member_ids("C1", None).scan().collect_ids().await.unwrap();
    assert_eq!(ids, ["U1", "U2"]);
}

#[tokio::test]
async fn test_scan_stops_at_first_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/bot/followers/ids"))
        .and(query_param_is_missing("start"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"userIds": ["U1"], "next": "broken"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/bot/followers/ids"))
        .and(query_param("start", "broken"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "Internal error"})))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let items: Vec<_> = client.get_follower_ids(None).scan().collect().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_deref().unwrap(), "U1");
    match &items[1] {
        Err(LineError::Api(e)) => assert_eq!(e.status, 500),
        other => panic!("expected API error, got {:?}", other),
    }
}
