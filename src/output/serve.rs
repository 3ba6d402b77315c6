use crate::{
    output::{DynLazy, Output, Route},
    portfolio::Catalog,
    Error, Result,
};
use http::{header, Method, Request, Response, StatusCode, Uri, Version};
use httparse::Status;
use std::{
    io::{Read, Write},
    net::TcpListener,
    str::FromStr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        LazyLock, Mutex,
    },
    thread::available_parallelism,
    time::{Duration, Instant},
};
use tracing::{debug, info, warn};

/// Requests larger than this are dropped.
const MAX_REQUEST_BYTES: usize = 64 * 1024;

pub fn serve(start: Instant, addr: &str, catalog: &Catalog, output: &Output<'_>) -> Result<()> {
    let listener = TcpListener::bind(addr).map_err(|source| Error::Bind {
        addr: addr.to_owned(),
        source,
    })?;

    let background_threads = &AtomicUsize::new(0);
    let http_threads = &AtomicUsize::new(0);
    let mut queue = output.iter().collect::<Vec<_>>();
    // Closed page first, then modal pages, then everything else.
    queue.sort_by_key(|(path, _)| (path.as_str() != "/index.html", !path.ends_with(".html")));
    let work = &Mutex::new(queue.into_iter());
    let available_parallelism = available_parallelism()
        .map(|n| n.get())
        .unwrap_or_default()
        .max(1);

    std::thread::scope(|scope| -> Result<()> {
        // Background rendering.
        let cpus = (available_parallelism / 2).clamp(1, 4);
        for thread in 0..cpus {
            let guard = Guard::new(background_threads);
            scope.spawn(move || {
                while let Some((path, file)) = {
                    let next = work.lock().ok().and_then(|mut work| work.next());
                    next
                } {
                    LazyLock::force(file);
                    debug!(event = "serve.prerendered", path = %path);
                    while http_threads.load(Ordering::SeqCst) > thread {
                        std::thread::sleep(Duration::from_millis(100));
                    }
                }

                drop(guard);

                if background_threads.load(Ordering::SeqCst) == 0 {
                    info!(
                        event = "serve.background_complete",
                        elapsed = %format!("{:.1}s", start.elapsed().as_secs_f32()),
                    );
                }
            });
        }

        info!(
            event = "serve.listening",
            elapsed = %format!("{:.1}s", start.elapsed().as_secs_f32()),
            url = %format!("http://{addr}"),
        );

        loop {
            let mut stream = match listener.accept() {
                Ok((stream, _)) => stream,
                Err(error) => {
                    warn!(event = "serve.accept_failed", error = %error);
                    continue;
                }
            };
            scope.spawn(move || {
                let _guard = Guard::new(http_threads);
                handle_connection(&mut stream, catalog, output);
            });
        }
    })
}

/// Answers one request read from `stream`.
pub fn handle_connection<S: Read + Write>(stream: &mut S, catalog: &Catalog, output: &Output<'_>) {
    let Some(request) = read_request(stream) else {
        return;
    };

    let (status, content_type, body) = if request.method() != Method::GET
        && request.method() != Method::HEAD
    {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "text/plain; charset=utf-8",
            b"method not allowed".to_vec(),
        )
    } else if let Some((path, file)) = resolve(output, catalog, request.uri().path()) {
        (StatusCode::OK, content_type(path), file.to_vec())
    } else {
        (
            StatusCode::NOT_FOUND,
            "text/plain; charset=utf-8",
            b"not found".to_vec(),
        )
    };

    let Ok(response) = Response::builder()
        .version(request.version())
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, body.len())
        .body(body)
    else {
        return;
    };

    info!(
        event = "serve.request",
        status = response.status().as_u16(),
        method = %request.method(),
        uri = %request.uri(),
    );

    let status_line = format!(
        "{:?} {} {}\r\n",
        response.version(),
        response.status().as_u16(),
        response.status().canonical_reason().unwrap_or_default()
    );

    let mut headers = String::new();
    for (name, value) in response.headers() {
        headers.push_str(&format!("{}: {}\r\n", name, value.to_str().unwrap_or("")));
    }
    headers.push_str("\r\n");

    let body: &[u8] = if request.method() == Method::HEAD {
        &[]
    } else {
        response.body()
    };

    let written = stream
        .write_all(status_line.as_bytes())
        .and_then(|_| stream.write_all(headers.as_bytes()))
        .and_then(|_| stream.write_all(body))
        .and_then(|_| stream.flush());
    if let Err(error) = written {
        warn!(event = "serve.connection_dropped", uri = %request.uri(), error = %error);
    }
}

fn read_request<S: Read>(stream: &mut S) -> Option<Request<()>> {
    let mut buf = Vec::new();
    loop {
        let mut tmp = [0u8; 1024];
        match stream.read(&mut tmp) {
            Ok(0) => return None,
            Ok(n) => {
                buf.extend_from_slice(&tmp[0..n]);
            }
            Err(error) => {
                warn!(event = "serve.connection_dropped", error = %error);
                return None;
            }
        };

        let mut headers = [httparse::EMPTY_HEADER; 128];
        let mut parse_req = httparse::Request::new(&mut headers);
        match parse_req.parse(&buf) {
            Ok(Status::Complete(_)) => {
                let method = parse_req.method.and_then(|m| Method::from_str(m).ok())?;
                let uri = parse_req.path.and_then(|p| Uri::from_str(p).ok())?;
                let mut builder = Request::builder().method(method).uri(uri).version(
                    if parse_req.version == Some(1) {
                        Version::HTTP_11
                    } else {
                        Version::HTTP_10
                    },
                );
                for header in parse_req.headers.iter() {
                    builder = builder.header(header.name, header.value);
                }
                return builder.body(()).ok();
            }
            Ok(Status::Partial) if buf.len() < MAX_REQUEST_BYTES => {}
            Ok(Status::Partial) | Err(_) => {
                warn!(event = "serve.bad_request", bytes = buf.len());
                return None;
            }
        }
    }
}

/// Finds the file for a request path. A path naming an unknown project gets the closed page.
pub fn resolve<'o, 'a>(
    output: &'o Output<'a>,
    catalog: &Catalog,
    path: &str,
) -> Option<(&'o str, &'o DynLazy<'a, Vec<u8>>)> {
    let mut file = path.to_owned();
    if file.ends_with('/') {
        file.push_str("index.html");
    }
    if let Some((key, value)) = output.get_key_value(&file) {
        return Some((key.as_str(), value));
    }

    let route = Route::parse(path)?;
    let state = route.to_state(catalog);
    let canonical = Route::for_state(&state);
    if state.is_open() && canonical != route {
        return None;
    }
    output
        .get_key_value(&canonical.path::<false>())
        .map(|(key, value)| (key.as_str(), value))
}

fn content_type(path: &str) -> &'static str {
    let extension = path
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase());
    match extension.as_deref() {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("xml") => "application/xml",
        Some("txt") => "text/plain; charset=utf-8",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        // Help Chrome
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}

struct Guard<'a>(&'a AtomicUsize);

impl<'a> Guard<'a> {
    pub fn new(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl<'a> Drop for Guard<'a> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
