use std::time::Duration;

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use vrp_api_client::api::{ApiError, VrpClient};
use vrp_api_client::cli::args::RunOptions;
use vrp_api_client::cli::run::execute;
use vrp_api_client::config::ClientConfig;
use vrp_api_client::evaluation::check::check_solution;
use vrp_api_client::fixtures::sample_request::sample_request;
use vrp_api_client::report::render::render_solution;

struct Captured {
    head: String,
    body: Value,
}

/// Serves one HTTP exchange per canned reply, in order, and hands back each request received.
async fn serve(replies: Vec<(&'static str, String)>) -> (String, mpsc::UnboundedReceiver<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        for (status, reply) in replies {
            let (mut socket, _) = listener.accept().await.unwrap();
            let (head, body) = read_request(&mut socket).await;

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reply.len(),
                reply
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
            let _ = tx.send(Captured { head, body });
        }
    });

    (url, rx)
}

async fn serve_once(status: &'static str, reply: String) -> (String, mpsc::UnboundedReceiver<Captured>) {
    serve(vec![(status, reply)]).await
}

// Headers, then as many body bytes as Content-Length says.
async fn read_request(socket: &mut TcpStream) -> (String, Vec<u8>) {
    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = socket.read(&mut buf).await.unwrap();
        raw.extend_from_slice(&buf[..n]);
        if let Some(end) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&raw[..end]).to_string();
            let len = head
                .lines()
                .find_map(|l| {
                    let (k, v) = l.split_once(':')?;
                    k.eq_ignore_ascii_case("content-length")
                        .then(|| v.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            let mut body = raw[end + 4..].to_vec();
            while body.len() < len {
                let n = socket.read(&mut buf).await.unwrap();
                assert!(n > 0, "client closed mid-body");
                body.extend_from_slice(&buf[..n]);
            }
            return (head, body);
        }
        assert!(n > 0, "client closed before sending headers");
    }
}

fn options_for(url: &str) -> RunOptions {
    RunOptions {
        server_url: Some(url.to_string()),
        timeout_secs: Some(5),
        ..RunOptions::default()
    }
}

fn client_for(url: String) -> VrpClient {
    VrpClient::new(ClientConfig {
        server_url: url,
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn solved_reply() -> String {
    json!({
        "feasible": true,
        "summary": "Objective: 691600",
        "total_distance": 6916.0,
        "wall_time_ms": 120,
        "routes": [
            {"vehicle_id": 0, "nodes": [0, 13, 15, 11, 12, 0], "distance": 1552},
            {"vehicle_id": 1, "nodes": [0, 5, 2, 10, 16, 14, 9, 0], "distance": 2192},
            {"vehicle_id": 2, "nodes": [0, 4, 3, 0], "distance": 1392},
            {"vehicle_id": 3, "nodes": [0, 7, 1, 6, 8, 0], "distance": 1780}
        ]
    })
    .to_string()
}

#[tokio::test]
async fn posts_sample_problem_and_renders_plan() {
    let (url, mut captured) = serve_once("200 OK", solved_reply()).await;
    let client = client_for(url);
    let request = sample_request();

    let solution = client.solve(&request).await.unwrap();

    let captured = captured.recv().await.unwrap();
    assert!(captured.head.starts_with("POST /solve HTTP/1.1"));
    assert!(captured
        .head
        .to_ascii_lowercase()
        .contains("content-type: application/json"));
    assert_eq!(captured.body, serde_json::to_value(&request).unwrap());

    assert_eq!(solution.total_distance, 6916);
    assert_eq!(solution.routes.len(), 4);
    assert!(check_solution(&request, &solution).is_empty());

    let report = render_solution(&solution);
    assert!(report.starts_with("\n=== VRP Solution ===\nFeasible: Yes\nTotal Distance: 6916m\nWall Time: 120ms\n"));
    assert!(report.contains("  Vehicle 3: 0 -> 7 -> 1 -> 6 -> 8 -> 0 (Distance: 1780m)\n"));
    assert!(report.ends_with("\nSummary:\nObjective: 691600\n"));
}

#[tokio::test]
async fn non_200_carries_status_and_body() {
    let body = r#"{"detail":"No feasible solution found"}"#.to_string();
    let (url, _captured) = serve_once("422 Unprocessable Entity", body.clone()).await;

    let err = client_for(url).solve(&sample_request()).await.unwrap_err();
    match &err {
        ApiError::Http { status, body: got } => {
            assert_eq!(status.as_u16(), 422);
            assert_eq!(got, &body);
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
    assert!(err.to_string().starts_with("HTTP error: 422\nResponse body: "));
}

#[tokio::test]
async fn infeasible_reply_reports_summary() {
    let reply = json!({"feasible": false, "summary": "no vehicle can reach node 16"}).to_string();
    let (url, _captured) = serve_once("200 OK", reply).await;

    let err = client_for(url).solve(&sample_request()).await.unwrap_err();
    assert_eq!(err.to_string(), "Solve failed: no vehicle can reach node 16");
}

#[tokio::test]
async fn garbage_body_is_a_parse_failure() {
    let (url, _captured) = serve_once("200 OK", "<html>oops</html>".to_string()).await;

    let err = client_for(url).solve(&sample_request()).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidJson));
}

#[tokio::test]
async fn health_probe_reads_service_status() {
    let reply = json!({
        "status": "ok",
        "service": "VRP Solver",
        "version": "2.0.0",
        "solver_available": ["greedy", "ortools"]
    })
    .to_string();
    let (url, mut captured) = serve_once("200 OK", reply).await;

    let health = client_for(format!("{}/", url)).health().await.unwrap();
    assert!(health.is_ok());
    assert_eq!(health.version, "2.0.0");

    let captured = captured.recv().await.unwrap();
    assert!(captured.head.starts_with("GET /health HTTP/1.1"));
}

fn health_reply(status: &str) -> String {
    json!({"status": status, "service": "VRP Solver", "version": "2.0.0", "solver_available": ["ortools"]})
        .to_string()
}

#[tokio::test]
async fn check_flag_fails_the_run_on_a_broken_pair() {
    // vehicle 3 delivers 6 before picking up 1
    let reply = json!({
        "feasible": true,
        "summary": "",
        "total_distance": 6916,
        "wall_time_ms": 5,
        "routes": [
            {"vehicle_id": 0, "nodes": [0, 13, 15, 11, 12, 0], "distance": 1552},
            {"vehicle_id": 1, "nodes": [0, 5, 2, 10, 16, 14, 9, 0], "distance": 2192},
            {"vehicle_id": 2, "nodes": [0, 4, 3, 0], "distance": 1392},
            {"vehicle_id": 3, "nodes": [0, 7, 6, 1, 8, 0], "distance": 1780}
        ]
    })
    .to_string();
    let (url, _captured) = serve_once("200 OK", reply).await;
    let opts = RunOptions {
        check: true,
        ..options_for(&url)
    };
    let mut out = Vec::new();

    let err = execute(opts, sample_request(), &mut out).await.unwrap_err();

    assert!(err.to_string().ends_with("plan checks failed"));
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("vehicle 3 delivers 6 before picking up 1"));
}

#[tokio::test]
async fn check_flag_passes_a_consistent_plan() {
    let (url, _captured) = serve_once("200 OK", solved_reply()).await;
    let opts = RunOptions {
        check: true,
        ..options_for(&url)
    };
    let mut out = Vec::new();

    execute(opts, sample_request(), &mut out).await.unwrap();

    assert!(String::from_utf8(out).unwrap().ends_with("\nChecks: all passed\n"));
}

#[tokio::test]
async fn unhealthy_service_stops_before_solving() {
    // a /solve reply is queued so a stray solve would be observed
    let (url, mut captured) = serve(vec![
        ("200 OK", health_reply("down")),
        ("200 OK", solved_reply()),
    ])
    .await;
    let opts = RunOptions {
        health: true,
        ..options_for(&url)
    };

    let err = execute(opts, sample_request(), &mut Vec::new()).await.unwrap_err();

    assert_eq!(err.to_string(), "service reported status 'down'");
    let first = captured.recv().await.unwrap();
    assert!(first.head.starts_with("GET /health HTTP/1.1"));
    assert!(captured.try_recv().is_err());
}

#[tokio::test]
async fn healthy_service_is_probed_then_solved() {
    let (url, mut captured) = serve(vec![
        ("200 OK", health_reply("ok")),
        ("200 OK", solved_reply()),
    ])
    .await;
    let opts = RunOptions {
        health: true,
        ..options_for(&url)
    };

    execute(opts, sample_request(), &mut Vec::new()).await.unwrap();

    assert!(captured.recv().await.unwrap().head.starts_with("GET /health "));
    assert!(captured.recv().await.unwrap().head.starts_with("POST /solve "));
}

#[tokio::test]
async fn csv_flag_writes_the_routes() {
    let (url, _captured) = serve_once("200 OK", solved_reply()).await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("routes.csv");
    let opts = RunOptions {
        csv: Some(path.clone()),
        ..options_for(&url)
    };

    execute(opts, sample_request(), &mut Vec::new()).await.unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("vehicle_id,stop,node,route_distance\n0,0,0,1552\n"));
    // 6 + 8 + 4 + 6 stops
    assert_eq!(written.lines().count(), 1 + 24);
}
