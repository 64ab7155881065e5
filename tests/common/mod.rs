//! Shared test fixtures: a recording transport that replays AWeber resources.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use aweber_api::clients::{ApiError, HttpError, HttpMethod, HttpRequest, HttpResponse, Transport};
use aweber_api::{AWeberApi, AWeberConfig, AccessToken, ConsumerKey, ConsumerSecret, OAuthToken, TokenSecret};
use serde_json::{json, Map, Value};

pub const API_BASE: &str = "https://api.aweber.com/1.0";

/// Ids of the lists in account 1, in server order.
pub fn list_ids() -> Vec<u64> {
    let mut ids = vec![303_449, 505_454];
    ids.extend(600_001..=600_022);
    ids
}

/// A request as seen by the transport.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub data: Option<Map<String, Value>>,
    pub token: Option<OAuthToken>,
}

#[derive(Clone, Debug)]
struct MockResponse {
    status: u16,
    body: Value,
    location: Option<String>,
}

/// Replays canned responses keyed by method and URL, recording every request.
///
/// Unknown URLs answer 404.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: HashMap<(HttpMethod, String), MockResponse>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    /// Creates a transport with no responses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a transport loaded with the account 1 fixtures.
    pub fn new() -> Self {
        let mut mock = Self::empty();
        load_fixtures(&mut mock);
        mock
    }

    pub fn on(&mut self, method: HttpMethod, url: &str, status: u16, body: Value) {
        self.responses.insert(
            (method, url.to_string()),
            MockResponse {
                status,
                body,
                location: None,
            },
        );
    }

    pub fn on_created(&mut self, url: &str, location: &str) {
        self.responses.insert(
            (HttpMethod::Post, url.to_string()),
            MockResponse {
                status: 201,
                body: Value::Null,
                location: Some(location.to_string()),
            },
        );
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.requests.lock().unwrap().clear();
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = request.full_url();
        self.requests.lock().unwrap().push(RecordedRequest {
            method: request.http_method,
            url: url.clone(),
            data: request.data.clone(),
            token: request.token.clone(),
        });

        let Some(response) = self.responses.get(&(request.http_method, url.clone())) else {
            return Err(HttpError::Response(ApiError::from_response(
                404,
                &error_body(404, "NotFoundError", &format!("No fixture for {url}")),
            )));
        };

        let mut headers = HashMap::new();
        if let Some(location) = &response.location {
            headers.insert("location".to_string(), vec![location.clone()]);
        }
        let response = HttpResponse::new(response.status, headers, response.body.clone());
        if response.is_ok() {
            Ok(response)
        } else {
            Err(HttpError::Response(ApiError::from_response(
                response.code,
                &response.body,
            )))
        }
    }
}

/// Builds an API root that talks to `mock`.
pub fn create_test_api(mock: MockTransport) -> (AWeberApi, Arc<MockTransport>) {
    let mock = Arc::new(mock);
    let transport: Arc<dyn Transport> = mock.clone();
    (AWeberApi::with_transport(create_test_config(), transport), mock)
}

pub fn create_test_config() -> AWeberConfig {
    AWeberConfig::builder()
        .consumer_key(ConsumerKey::new("1").unwrap())
        .consumer_secret(ConsumerSecret::new("2").unwrap())
        .access_token(
            AccessToken::new("access").unwrap(),
            TokenSecret::new("access-secret").unwrap(),
        )
        .build()
        .unwrap()
}

// ============================================================================
// Resource bodies
// ============================================================================

pub fn entry(path: &str, resource_type: &str, fields: Value) -> Value {
    let mut body = json!({
        "self_link": format!("{API_BASE}{path}"),
        "resource_type_link": format!("{API_BASE}/#{resource_type}"),
        "http_etag": "\"1234567890\"",
    });
    if let Some(id) = path.rsplit('/').next().and_then(|s| s.parse::<u64>().ok()) {
        body["id"] = json!(id);
    }
    if let (Some(body), Value::Object(fields)) = (body.as_object_mut(), fields) {
        body.extend(fields);
    }
    body
}

pub fn page(resource_type: &str, entries: Vec<Value>, total_size: Option<usize>, next: Option<&str>) -> Value {
    let mut body = json!({
        "entries": entries,
        "start": 0,
        "resource_type_link": format!("{API_BASE}/#{resource_type}-page-resource"),
    });
    if let Some(total) = total_size {
        body["total_size"] = json!(total);
    }
    if let Some(next) = next {
        body["next_collection_link"] = json!(format!("{API_BASE}{next}"));
    }
    body
}

pub fn error_body(status: u16, error_type: &str, message: &str) -> Value {
    json!({
        "error": {
            "status": status,
            "type": error_type,
            "message": message,
            "documentation_url": "https://labs.aweber.com/docs/troubleshooting"
        }
    })
}

fn links(path: &str, names: &[&str]) -> Value {
    let mut map = Map::new();
    for name in names {
        map.insert(
            format!("{name}_collection_link"),
            json!(format!("{API_BASE}{path}/{name}")),
        );
    }
    Value::Object(map)
}

fn merge(mut a: Value, b: Value) -> Value {
    if let (Some(a), Value::Object(b)) = (a.as_object_mut(), b) {
        a.extend(b);
    }
    a
}

pub fn account_body() -> Value {
    entry(
        "/accounts/1",
        "account",
        links("/accounts/1", &["lists", "integrations"]),
    )
}

pub fn list_body(id: u64) -> Value {
    let path = format!("/accounts/1/lists/{id}");
    entry(
        &path,
        "list",
        merge(
            json!({"name": format!("default{id}"), "total_subscribers": 2}),
            links(
                &path,
                &["campaigns", "custom_fields", "subscribers", "web_forms", "web_form_split_tests"],
            ),
        ),
    )
}

pub fn subscriber_body(list: u64, id: u64, name: &str, email: &str) -> Value {
    entry(
        &format!("/accounts/1/lists/{list}/subscribers/{id}"),
        "subscriber",
        json!({
            "name": name,
            "email": email,
            "status": "subscribed",
            "custom_fields": {"Color": "blue", "Walruses": ""},
            "ad_tracking": "ebook",
        }),
    )
}

fn web_forms_for(list: u64) -> Vec<Value> {
    let count = match list {
        303_449 => 2,
        505_454 => 1,
        600_005 => 3,
        _ => 0,
    };
    (1..=count)
        .map(|n| {
            let id = list * 10 + n;
            entry(
                &format!("/accounts/1/lists/{list}/web_forms/{id}"),
                "web_form",
                json!({"name": format!("Form {n}"), "type": "inline"}),
            )
        })
        .collect()
}

fn split_tests_for(list: u64) -> Vec<Value> {
    let count = match list {
        303_449 => 1,
        600_010 => 2,
        _ => 0,
    };
    (1..=count)
        .map(|n| {
            let id = list * 10 + n;
            entry(
                &format!("/accounts/1/lists/{list}/web_form_split_tests/{id}"),
                "web_form_split_test",
                json!({"name": format!("Split {n}")}),
            )
        })
        .collect()
}

/// Expected web form URLs across all lists, list by list.
pub fn expected_web_form_urls() -> Vec<String> {
    list_ids()
        .into_iter()
        .flat_map(web_forms_for)
        .map(|body| body["self_link"].as_str().unwrap().replace(API_BASE, ""))
        .collect()
}

/// Expected split test URLs across all lists, list by list.
pub fn expected_split_test_urls() -> Vec<String> {
    list_ids()
        .into_iter()
        .flat_map(split_tests_for)
        .map(|body| body["self_link"].as_str().unwrap().replace(API_BASE, ""))
        .collect()
}

fn load_fixtures(mock: &mut MockTransport) {
    use HttpMethod::{Delete, Get, Patch, Post};

    let bad_request = |message: &str| error_body(400, "WebServiceError", message);

    // Accounts
    mock.on(Get, "/accounts", 200, page("account", vec![account_body()], Some(1), None));
    mock.on(Get, "/accounts/1", 200, account_body());
    mock.on(
        Get,
        "/accounts/1?ws.op=findSubscribers&email=joe%40example.com",
        200,
        page(
            "subscriber",
            vec![subscriber_body(303_449, 1, "Joe Jones", "joe@example.com")],
            None,
            None,
        ),
    );
    mock.on(
        Get,
        "/accounts/1?ws.op=findSubscribers&email=joe%40example.com&ws.show=total_size",
        200,
        json!(1),
    );
    mock.on(
        Get,
        "/accounts/1?ws.op=findSubscribers&name=bob",
        400,
        bad_request("Method requires access to Subscriber information."),
    );

    // Lists, two pages of twenty
    let lists: Vec<Value> = list_ids().into_iter().map(list_body).collect();
    let total = lists.len();
    mock.on(
        Get,
        "/accounts/1/lists",
        200,
        page(
            "list",
            lists[..20].to_vec(),
            Some(total),
            Some("/accounts/1/lists?ws.start=20&ws.size=20"),
        ),
    );
    let mut second = page("list", lists[20..].to_vec(), Some(total), None);
    second["start"] = json!(20);
    mock.on(Get, "/accounts/1/lists?ws.start=20&ws.size=20", 200, second);

    for id in list_ids() {
        mock.on(Get, &format!("/accounts/1/lists/{id}"), 200, list_body(id));
        let forms = web_forms_for(id);
        let count = forms.len();
        mock.on(
            Get,
            &format!("/accounts/1/lists/{id}/web_forms"),
            200,
            page("web_form", forms, Some(count), None),
        );
        let tests = split_tests_for(id);
        let count = tests.len();
        mock.on(
            Get,
            &format!("/accounts/1/lists/{id}/web_form_split_tests"),
            200,
            page("web_form_split_test", tests, Some(count), None),
        );
    }

    // Campaigns and broadcasts
    let campaigns = vec![
        entry(
            "/accounts/1/lists/303449/campaigns/b1",
            "broadcast_campaign",
            json!({"subject": "Spring sale"}),
        ),
        entry(
            "/accounts/1/lists/303449/campaigns/f2",
            "followup_campaign",
            json!({"subject": "Welcome"}),
        ),
    ];
    mock.on(
        Get,
        "/accounts/1/lists/303449/campaigns",
        200,
        page("campaign", campaigns, Some(2), None),
    );
    let broadcasts = vec![
        entry(
            "/accounts/1/lists/303449/broadcasts/2",
            "broadcast",
            json!({"subject": "Sent one", "status": "sent"}),
        ),
        entry(
            "/accounts/1/lists/303449/broadcasts/5",
            "broadcast",
            json!({"subject": "Sent two", "status": "sent"}),
        ),
    ];
    mock.on(
        Get,
        "/accounts/1/lists/303449/broadcasts?status=sent",
        200,
        page("broadcast", broadcasts, None, None),
    );
    mock.on(
        Get,
        "/accounts/1/lists/303449/broadcasts/total?status=sent",
        200,
        json!({"total_size": 2}),
    );
    mock.on(Post, "/accounts/1/lists/303449/broadcasts/2/schedule", 201, Value::Null);
    mock.on(
        Post,
        "/accounts/1/lists/303449/broadcasts/3/schedule",
        400,
        bad_request("Broadcast 3 cannot be scheduled."),
    );
    mock.on(Post, "/accounts/1/lists/303449/broadcasts/2/cancel", 204, Value::Null);
    mock.on(
        Post,
        "/accounts/1/lists/303449/broadcasts/3/cancel",
        400,
        bad_request("Broadcast 3 is not scheduled."),
    );

    // Custom fields
    let field = |id: u64, name: &str| {
        entry(
            &format!("/accounts/1/lists/303449/custom_fields/{id}"),
            "custom_field",
            json!({"name": name, "is_subscriber_updateable": false}),
        )
    };
    mock.on(
        Get,
        "/accounts/1/lists/303449/custom_fields",
        200,
        page("custom_field", vec![field(1, "Color")], Some(1), None),
    );
    mock.on(Get, "/accounts/1/lists/303449/custom_fields/1", 200, field(1, "Color"));
    mock.on(Get, "/accounts/1/lists/303449/custom_fields/2", 200, field(2, "Walruses"));
    mock.on_created(
        "/accounts/1/lists/303449/custom_fields",
        "https://api.aweber.com/1.0/accounts/1/lists/303449/custom_fields/2",
    );
    mock.on(
        Post,
        "/accounts/1/lists/505454/custom_fields",
        400,
        bad_request("Custom field name already exists."),
    );

    // Subscribers
    let joe = subscriber_body(303_449, 1, "Joe Jones", "joe@example.com");
    let jane = subscriber_body(303_449, 2, "Jane Doe", "jane@example.com");
    mock.on(
        Get,
        "/accounts/1/lists/303449/subscribers",
        200,
        page("subscriber", vec![joe.clone(), jane.clone()], Some(2), None),
    );
    mock.on(Get, "/accounts/1/lists/303449/subscribers/1", 200, joe.clone());
    mock.on(Get, "/accounts/1/lists/303449/subscribers/2", 200, jane);
    mock.on(
        Get,
        "/accounts/1/lists/505454/subscribers/1",
        200,
        subscriber_body(505_454, 1, "Joe Jones", "joe@example.com"),
    );
    mock.on(
        Get,
        "/accounts/1/lists/303449/subscribers?ws.op=find&email=joe%40example.com",
        200,
        page("subscriber", vec![joe], None, None),
    );
    mock.on(
        Get,
        "/accounts/1/lists/303449/subscribers?ws.op=find&email=joe%40example.com&ws.show=total_size",
        200,
        json!(1),
    );
    mock.on(
        Get,
        "/accounts/1/lists/303449/subscribers?ws.op=find&name=joe",
        400,
        bad_request("Invalid search parameter: name"),
    );
    let activity = vec![
        entry(
            "/accounts/1/lists/303449/subscribers/1/activity/1",
            "tracked_event",
            json!({"type": "opened", "event_time": "2014-09-06 18:55:00"}),
        ),
        entry(
            "/accounts/1/lists/303449/subscribers/1/activity/2",
            "tracked_event",
            json!({"type": "clicked", "event_time": "2014-09-06 19:02:00"}),
        ),
    ];
    mock.on(
        Get,
        "/accounts/1/lists/303449/subscribers/1?ws.op=getActivity",
        200,
        page("tracked_event", activity, None, None),
    );
    mock.on(
        Get,
        "/accounts/1/lists/303449/subscribers/1?ws.op=getActivity&ws.show=total_size",
        200,
        json!(2),
    );
    mock.on(Post, "/accounts/1/lists/303449/subscribers/1", 201, Value::Null);
    mock.on(Patch, "/accounts/1/lists/303449/subscribers/1", 209, Value::Null);
    mock.on(
        Patch,
        "/accounts/1/lists/303449/subscribers/2",
        400,
        bad_request("Invalid custom field: New Custom Field"),
    );
    mock.on(Delete, "/accounts/1/lists/303449/subscribers/1", 200, Value::Null);
    mock.on(
        Delete,
        "/accounts/1/lists/303449/subscribers/2",
        400,
        bad_request("Subscriber cannot be deleted."),
    );

    // OAuth token endpoints
    mock.on(
        Post,
        "https://auth.aweber.com/1.0/oauth/request_token",
        200,
        json!("oauth_token=request&oauth_token_secret=request-secret&oauth_callback_confirmed=true"),
    );
    mock.on(
        Post,
        "https://auth.aweber.com/1.0/oauth/access_token",
        200,
        json!("oauth_token=new-access&oauth_token_secret=new-access-secret"),
    );
}
