use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use solar_explorer::data::{spawn_request_worker, ApiReply, ApiRequest};
use solar_explorer::{ApiClient, ApiError, ServerConfig};
use tiny_http::{Header, Method, Response, Server};
use url::Url;

const RECV_TIMEOUT: Duration = Duration::from_secs(10);

const BODIES: &str = r##"{
    "Sun": {"radius": 10, "color": "#ffd700", "orbital_radius": 0, "orbital_period": 0,
            "info": "Our star", "current_position": {"x": 0, "y": 0, "z": 0}},
    "Earth": {"radius": 2.5, "color": "#4169e1", "orbital_radius": 50, "orbital_period": 365.25,
              "info": "Home", "current_position": {"x": 50, "y": 0, "z": 0}}
}"##;

const HALLEY: &str = r##"{
    "name": "Halley Comet",
    "info": "Periodic comet",
    "data": {"radius": 0.5, "color": "#cccccc", "orbital_radius": 170, "orbital_period": 27510}
}"##;

const RELATIONSHIP: &str = r#"{
    "body1": "Earth", "body2": "Mars",
    "relationship": "Neighbouring terrestrial planets.",
    "current_distance": 27.5
}"#;

/// Requests seen by the canned server: method, raw URL and body.
type Seen = Arc<Mutex<Vec<(String, String, String)>>>;

/// Serves canned JSON on an ephemeral port until the test process exits.
fn canned_server() -> (Url, Seen) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    let seen: Seen = Arc::default();
    let log = Arc::clone(&seen);

    thread::spawn(move || {
        for mut request in server.incoming_requests() {
            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);
            let method = request.method().clone();
            let url = request.url().to_string();
            log.lock()
                .unwrap()
                .push((method.to_string(), url.clone(), body.clone()));

            let json = match (&method, url.as_str()) {
                (Method::Get, "/api/bodies") => Some(BODIES.to_string()),
                (Method::Get, "/api/body/Halley%20Comet") => Some(HALLEY.to_string()),
                (Method::Get, "/api/relationship/Earth/Mars") => Some(RELATIONSHIP.to_string()),
                (Method::Get, "/api/body/Garbled") => Some("{\"name\": 42}".to_string()),
                (Method::Post, "/api/simulation/pause") => {
                    Some(r#"{"paused": true, "time": 12.5}"#.to_string())
                }
                (Method::Post, "/api/simulation/speed") => {
                    let speed: serde_json::Value = serde_json::from_str(&body).unwrap();
                    Some(format!(r#"{{"speed": {}}}"#, speed["speed"]))
                }
                _ => None,
            };

            let response = match json {
                Some(json) => Response::from_string(json).with_header(
                    Header::from_bytes("Content-Type", "application/json").unwrap(),
                ),
                None => Response::from_string("Not Found").with_status_code(404),
            };
            let _ = request.respond(response);
        }
    });

    let url = format!("http://127.0.0.1:{port}").parse().unwrap();
    (url, seen)
}

fn client_for(base_url: Url) -> ApiClient {
    ApiClient::new(&ServerConfig {
        base_url,
        request_timeout: Duration::from_secs(5),
    })
}

#[test]
fn fetches_the_body_catalog() {
    let (url, _) = canned_server();

    let bodies = client_for(url).fetch_bodies().unwrap();

    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies["Earth"].radius, 2.5);
    assert_eq!(bodies["Sun"].color, "#ffd700");
    assert!(bodies["Earth"].current_position.is_some());
}

#[test]
fn body_names_are_percent_encoded() {
    let (url, seen) = canned_server();

    let info = client_for(url).fetch_body_info("Halley Comet").unwrap();

    assert_eq!(info.name, "Halley Comet");
    assert_eq!(info.data.orbital_period, 27510.0);
    assert_eq!(seen.lock().unwrap()[0].1, "/api/body/Halley%20Comet");
}

#[test]
fn relationship_keeps_argument_order() {
    let (url, seen) = canned_server();

    let rel = client_for(url).fetch_relationship("Earth", "Mars").unwrap();

    assert_eq!(rel.body1, "Earth");
    assert_eq!(rel.current_distance, Some(27.5));
    assert_eq!(seen.lock().unwrap()[0].1, "/api/relationship/Earth/Mars");
}

#[test]
fn controls_post_to_the_simulation_endpoints() {
    let (url, seen) = canned_server();
    let client = client_for(url);

    let paused = client.toggle_pause().unwrap();
    let speed = client.set_speed(2.5).unwrap();

    assert!(paused.paused);
    assert_eq!(paused.time, 12.5);
    assert_eq!(speed.speed, 2.5);

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].0, "POST");
    assert_eq!(seen[1].1, "/api/simulation/speed");
    let body: serde_json::Value = serde_json::from_str(&seen[1].2).unwrap();
    assert_eq!(body, serde_json::json!({ "speed": 2.5 }));
}

#[test]
fn non_success_status_is_request_failed() {
    let (url, _) = canned_server();

    let err = client_for(url).fetch_body_info("Vulcan").unwrap_err();

    assert!(
        matches!(err, ApiError::RequestFailed { status: 404, ref endpoint } if endpoint.ends_with("/api/body/Vulcan")),
        "unexpected error: {err:?}"
    );
}

#[test]
fn wrong_shape_is_decode_error() {
    let (url, _) = canned_server();

    let err = client_for(url).fetch_body_info("Garbled").unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }), "unexpected error: {err:?}");
}

#[test]
fn refused_connection_is_network_error() {
    // Bind then drop to get a port nobody is listening on.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let url = format!("http://127.0.0.1:{port}").parse().unwrap();

    let err = client_for(url).fetch_bodies().unwrap_err();

    assert!(matches!(err, ApiError::Network { .. }), "unexpected error: {err:?}");
}

#[test]
fn worker_delivers_replies_off_thread() {
    let (url, _) = canned_server();
    let (requests, replies) = spawn_request_worker(client_for(url));

    requests
        .send(ApiRequest::FetchRelationship("Earth".into(), "Mars".into()))
        .unwrap();
    let reply = replies.recv_timeout(RECV_TIMEOUT).expect("worker reply");

    match reply {
        ApiReply::Relationship {
            first,
            second,
            result,
        } => {
            assert_eq!((first.as_str(), second.as_str()), ("Earth", "Mars"));
            assert_eq!(result.unwrap().relationship, "Neighbouring terrestrial planets.");
        }
        other => panic!("unexpected reply: {other:?}"),
    }
}
