use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use vision_sense::clients::{DetectionApi, HttpDetectionApi, HttpMediaHost, MediaHost};
use vision_sense::common::SelectedFile;
use vision_sense::data::AppConfig;

/// Answers exactly one request with `status` and a JSON `body`, returning the raw request.
fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        request
    });
    (format!("http://{}", addr), handle)
}

fn read_request(stream: &mut impl Read) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn api_for(base: &str) -> HttpDetectionApi {
    HttpDetectionApi::new(&AppConfig::new().with_backend_url(base))
}

#[test]
fn detect_posts_image_url_and_parses_result() {
    let body = r#"{"image_url":"https://host/cat.jpg","detections":[{"object":"cat","confidence":0.93,"description":"A small domesticated mammal.","box":{"x1":10,"y1":20,"x2":210,"y2":220}}],"total_detections":1}"#;
    let (base, server) = serve_once("200 OK", body);

    let result = api_for(&base).detect("https://host/cat.jpg").unwrap();
    let request = server.join().unwrap();

    assert!(request.starts_with("POST /detect "), "{}", request);
    assert!(request.contains(r#""image_url":"https://host/cat.jpg""#));
    assert_eq!(result.len(), 1);
    assert_eq!(result.total_detections, Some(1));
    assert_eq!(result.detections[0].get_label(), "cat 93%");
    assert_eq!(result.detections[0].description.as_deref(), Some("A small domesticated mammal."));
}

#[test]
fn detect_server_error_is_reported() {
    let (base, server) = serve_once(
        "500 Internal Server Error",
        r#"{"error":"Detection failed","details":"timeout"}"#,
    );

    let err = api_for(&base).detect("https://host/cat.jpg").unwrap_err();
    server.join().unwrap();

    assert!(format!("{:#}", err).contains("Detection API request failed"), "{:#}", err);
}

#[test]
fn detect_malformed_body_is_an_error() {
    let (base, server) = serve_once("200 OK", "{\"image_url\":");

    let err = api_for(&base).detect("https://host/cat.jpg").unwrap_err();
    server.join().unwrap();

    assert!(format!("{:#}", err).contains("Malformed detection response"));
}

#[test]
fn health_reads_backend_status() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"status":"running","message":"backend running","model_loaded":true}"#,
    );

    let health = api_for(&base).health().unwrap();
    let request = server.join().unwrap();

    assert!(request.starts_with("GET / "));
    assert_eq!(health.status, "running");
    assert!(health.model_loaded);
}

#[test]
fn upload_sends_file_and_preset_as_multipart() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"secure_url":"https://media.example/cat.jpg","public_id":"cat"}"#,
    );
    let host = HttpMediaHost::new(&format!("{}/image/upload", base), "object");
    let file = SelectedFile::new("cat.jpg", "image/jpeg", b"jpeg-bytes".to_vec());

    let url = host.upload(&file).unwrap();
    let request = server.join().unwrap();

    assert_eq!(url, "https://media.example/cat.jpg");
    assert!(request.starts_with("POST /image/upload "));
    assert!(request.to_lowercase().contains("content-type: multipart/form-data; boundary="));
    assert!(request.contains("name=\"file\"; filename=\"cat.jpg\""));
    assert!(request.contains("jpeg-bytes"));
    assert!(request.contains("name=\"upload_preset\"\r\n\r\nobject\r\n"));
}

#[test]
fn upload_rejection_is_reported() {
    let (base, server) = serve_once(
        "400 Bad Request",
        r#"{"error":{"message":"Upload preset not found"}}"#,
    );
    let host = HttpMediaHost::new(&base, "missing");

    let err = host
        .upload(&SelectedFile::new("cat.jpg", "image/jpeg", vec![1, 2, 3]))
        .unwrap_err();
    server.join().unwrap();

    assert!(err.to_string().contains("Failed to upload image to media host"));
}
