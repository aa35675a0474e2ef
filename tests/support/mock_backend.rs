//! In-process stand-in for the analytical backend.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

/// Canned reply for one route.
#[derive(Clone, Debug)]
pub enum Reply {
    Json(String),
    EventStream(String),
    Status(u16, String),
}

/// One received request: path without slashes plus decoded query pairs.
#[derive(Clone, Debug)]
pub struct Recorded {
    pub route: String,
    pub query: HashMap<String, String>,
}

pub struct MockBackend {
    base_url: String,
    routes: Arc<Mutex<HashMap<String, Reply>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
    stop: Arc<AtomicBool>,
    addr: std::net::SocketAddr,
}

impl MockBackend {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend addr");
        let routes: Arc<Mutex<HashMap<String, Reply>>> = Arc::default();
        let requests: Arc<Mutex<Vec<Recorded>>> = Arc::default();
        let stop = Arc::new(AtomicBool::new(false));
        {
            let routes = routes.clone();
            let requests = requests.clone();
            let stop = stop.clone();
            thread::spawn(move || {
                for stream in listener.incoming() {
                    if stop.load(Ordering::Relaxed) {
                        break;
                    }
                    let Ok(stream) = stream else {
                        continue;
                    };
                    let routes = routes.clone();
                    let requests = requests.clone();
                    thread::spawn(move || serve(stream, &routes, &requests));
                }
            });
        }
        Self {
            base_url: format!("http://{addr}/"),
            routes,
            requests,
            stop,
            addr,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn route(&self, route: &str, reply: Reply) {
        self.routes.lock().unwrap().insert(route.to_string(), reply);
    }

    pub fn json(&self, route: &str, body: serde_json::Value) {
        self.route(route, Reply::Json(body.to_string()));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, route: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.route == route)
            .collect()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        let _ = TcpStream::connect(self.addr);
    }
}

fn serve(
    mut stream: TcpStream,
    routes: &Mutex<HashMap<String, Reply>>,
    requests: &Mutex<Vec<Recorded>>,
) {
    let Some(target) = read_request_target(&stream) else {
        return;
    };
    let url = match url::Url::parse(&format!("http://mock{target}")) {
        Ok(url) => url,
        Err(_) => return,
    };
    let route = url.path().trim_matches('/').to_string();
    let query = url.query_pairs().into_owned().collect();
    requests.lock().unwrap().push(Recorded {
        route: route.clone(),
        query,
    });
    let reply = routes
        .lock()
        .unwrap()
        .get(&route)
        .cloned()
        .unwrap_or_else(|| Reply::Status(404, format!("no route {route}")));
    let (status, content_type, body) = match reply {
        Reply::Json(body) => (200, "application/json", body),
        Reply::EventStream(body) => (200, "text/event-stream", body),
        Reply::Status(code, body) => (code, "text/plain", body),
    };
    let reason = if status == 200 { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn read_request_target(stream: &TcpStream) -> Option<String> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    loop {
        let mut header = String::new();
        let read = reader.read_line(&mut header).ok()?;
        if read == 0 || header == "\r\n" || header == "\n" {
            break;
        }
    }
    request_line.split_whitespace().nth(1).map(str::to_string)
}
