//! HTTP adapter tests against a live `tiny_http` listener

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use dbt_ops::api::ServiceState;
use dbt_ops::config::DeploySettings;
use dbt_ops::deploy::{DeployJob, DeployWorker, Launcher, StatusCell};
use dbt_ops::server::tiny_http::serve;
use tiny_http::Server;

use crate::common::fixtures::{FixedLauncher, GatedLauncher};

/// Start a service on an ephemeral port and return its address
fn start(launcher: impl Launcher + 'static) -> SocketAddr {
    let settings = DeploySettings::default();
    let job = DeployJob::new(Arc::new(launcher), settings.launch_spec(), StatusCell::new());
    let state = ServiceState {
        service_name: settings.service_name,
        worker: DeployWorker::spawn(job).unwrap(),
    };

    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    thread::spawn(move || serve(&server, &state));
    addr
}

/// Send one request and return (status code, JSON body)
fn request(addr: SocketAddr, method: &str, path: &str) -> (u16, serde_json::Value) {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    write!(
        stream,
        "{method} {path} HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
    )
    .unwrap();

    let mut raw = String::new();
    let _ = stream.read_to_string(&mut raw);

    let status = raw
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .unwrap();
    let body = raw.split_once("\r\n\r\n").map_or("", |(_, body)| body);
    (status, serde_json::from_str(body).unwrap())
}

fn wait_for_state(addr: SocketAddr, state: &str) -> serde_json::Value {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let (_, body) = request(addr, "GET", "/");
        if body["last_execution"]["status"] == state || Instant::now() > deadline {
            return body;
        }
        thread::sleep(Duration::from_millis(20));
    }
}

#[test]
fn test_health_endpoint() {
    let addr = start(FixedLauncher::success());
    let (status, body) = request(addr, "GET", "/");

    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "dbt-transformer");
    assert!(body["last_execution"]["status"].is_null());
}

#[test]
fn test_run_then_success() {
    let (release, gate) = std::sync::mpsc::channel();
    let addr = start(GatedLauncher::new(gate));

    let (status, body) = request(addr, "POST", "/run");
    assert_eq!(status, 200);
    assert_eq!(body["status"], "started");
    assert!(body["timestamp"].is_string());

    let running = wait_for_state(addr, "running");
    assert_eq!(running["last_execution"]["status"], "running");

    release.send(()).unwrap();
    let done = wait_for_state(addr, "success");
    assert_eq!(done["last_execution"]["message"], "Deployment completed successfully");
}

#[test]
fn test_get_run_reports_error() {
    let addr = start(FixedLauncher::failure("permission denied"));

    let (status, _) = request(addr, "GET", "/run");
    assert_eq!(status, 200);

    let body = wait_for_state(addr, "error");
    assert_eq!(body["last_execution"]["status"], "error");
    assert_eq!(body["last_execution"]["message"], "permission denied");
}

#[test]
fn test_unknown_route_is_404() {
    let addr = start(FixedLauncher::success());
    let (status, body) = request(addr, "GET", "/deploy");

    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[test]
fn test_wrong_method_on_known_path_is_405() {
    let addr = start(FixedLauncher::success());
    let (status, body) = request(addr, "POST", "/");

    assert_eq!(status, 405);
    assert_eq!(body["error"]["code"], "METHOD_NOT_ALLOWED");
}
