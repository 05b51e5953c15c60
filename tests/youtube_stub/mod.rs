#![allow(dead_code)]

use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

use serde_json::Value;

pub const THREADS_PATH: &str = "/youtube/v3/commentThreads";

#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: String,
}

impl StubResponse {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn error(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_owned(),
        }
    }
}

/// Serves scripted `commentThreads` responses in order. Once the script runs
/// out the last response is repeated.
pub struct YoutubeStub {
    pub api_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl YoutubeStub {
    pub fn spawn(script: Vec<StubResponse>) -> Self {
        assert!(!script.is_empty(), "stub script must not be empty");
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start youtube stub server");
        let addr = server.server_addr();
        let api_url = format!("http://{addr}{THREADS_PATH}");

        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            let mut served = 0usize;
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let url = request.url().to_string();
                let path = url.split('?').next().unwrap_or(&url);
                if request.method() != &tiny_http::Method::Get || path != THREADS_PATH {
                    let _ = request.respond(
                        tiny_http::Response::from_string("not found").with_status_code(404),
                    );
                    continue;
                }

                seen.lock().expect("lock request log").push(url.clone());

                let scripted = &script[served.min(script.len() - 1)];
                served += 1;

                let header =
                    tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                        .expect("build header");
                let response = tiny_http::Response::from_string(scripted.body.clone())
                    .with_status_code(scripted.status)
                    .with_header(header);
                let _ = request.respond(response);
            }
        });

        Self {
            api_url,
            requests,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    /// Request URLs (path and query) received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("lock request log").clone()
    }
}

impl Drop for YoutubeStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

pub fn comment(id: &str, parent_id: Option<&str>) -> Value {
    let mut snippet = serde_json::json!({
        "videoId": "dQw4w9WgXcQ",
        "textDisplay": format!("text of {id}"),
        "textOriginal": format!("text of {id}"),
        "authorDisplayName": "@someone",
        "authorChannelId": { "value": format!("UC{id}") },
        "canRate": true,
        "viewerRating": "none",
        "likeCount": 2,
        "publishedAt": "2018-08-20T08:42:03Z",
        "updatedAt": "2018-08-20T08:42:03Z",
    });
    if let Some(parent_id) = parent_id {
        snippet["parentId"] = Value::String(parent_id.to_owned());
    }
    serde_json::json!({
        "kind": "youtube#comment",
        "etag": "etag",
        "id": id,
        "snippet": snippet,
    })
}

pub fn comment_thread(id: &str, replies: usize) -> Value {
    let mut thread = serde_json::json!({
        "kind": "youtube#commentThread",
        "etag": "etag",
        "id": id,
        "snippet": {
            "channelId": "UC4u77JhpmafFQ-Z9Lsoakug",
            "videoId": "dQw4w9WgXcQ",
            "topLevelComment": comment(id, None),
            "canReply": true,
            "totalReplyCount": replies,
            "isPublic": true,
        },
    });
    if replies > 0 {
        let comments = (0..replies)
            .map(|idx| comment(&format!("{id}.r{idx}"), Some(id)))
            .collect::<Vec<_>>();
        thread["replies"] = serde_json::json!({ "comments": comments });
    }
    thread
}

/// A page of `items` threads where every thread has `replies` replies.
pub fn page(batch: usize, items: usize, replies: usize, next_page_token: Option<&str>) -> Value {
    let threads = (0..items)
        .map(|idx| comment_thread(&format!("b{batch}t{idx}"), replies))
        .collect::<Vec<_>>();
    let mut body = serde_json::json!({
        "kind": "youtube#commentThreadListResponse",
        "pageInfo": { "totalResults": items, "resultsPerPage": 100 },
        "items": threads,
    });
    if let Some(token) = next_page_token {
        body["nextPageToken"] = Value::String(token.to_owned());
    }
    body
}
