//! Development file server
//!
//! Serves files from a directory over plain HTTP, one request at a time.
//! Every response carries cache-defeating headers because the emitted bundle
//! changes on every build; a cached copy would keep serving bugs that were
//! already fixed.
//!
//! This is a convenience for local iteration only. It shares no state with
//! the bundling path.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Component, Path, PathBuf};

use console::Style;

use crate::error::{LuapackError, Result};

/// Cache policy applied to every response
const CACHE_CONTROL: &str = "no-cache, no-store, must-revalidate";

/// A response ready to be written to the client
#[derive(Debug, PartialEq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Response {
    fn ok(content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type,
            body,
        }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: message.as_bytes().to_vec(),
        }
    }

    fn status_text(&self) -> &'static str {
        match self.status {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            405 => "Method Not Allowed",
            _ => "Internal Server Error",
        }
    }

    /// Serialize head and, unless `head_only`, body
    pub fn to_bytes(&self, head_only: bool) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {} {}\r\n\
             Content-Type: {}\r\n\
             Content-Length: {}\r\n\
             Cache-Control: {}\r\n\
             Connection: close\r\n\
             \r\n",
            self.status,
            self.status_text(),
            self.content_type,
            self.body.len(),
            CACHE_CONTROL,
        );

        let mut bytes = head.into_bytes();
        if !head_only {
            bytes.extend_from_slice(&self.body);
        }
        bytes
    }
}

/// Guess a Content-Type from the file extension
fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        Some("svg") => "image/svg+xml",
        Some("lua") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// Resolve a request path to a file under `root`.
///
/// Returns `None` for anything that would escape the root. `/` maps to
/// `index.html`.
fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let trimmed = request_path.split(['?', '#']).next().unwrap_or("");
    let relative = trimmed.trim_start_matches('/');
    let relative = if relative.is_empty() {
        "index.html"
    } else {
        relative
    };

    let candidate = Path::new(relative);
    if candidate
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }

    Some(root.join(candidate))
}

/// Handle one parsed request line against the served directory
pub fn handle_request(root: &Path, method: &str, path: &str) -> Response {
    if method != "GET" && method != "HEAD" {
        return Response::error(405, "method not allowed");
    }

    let Some(file_path) = resolve(root, path) else {
        return Response::error(400, "bad request path");
    };

    match std::fs::read(&file_path) {
        Ok(body) => Response::ok(content_type(&file_path), body),
        Err(_) => Response::error(404, "not found"),
    }
}

fn handle_connection(stream: &mut TcpStream, root: &Path) -> std::io::Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    // Drain the remaining headers so the client sees a clean close
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 || line == "\r\n" || line == "\n" {
            break;
        }
    }

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("/");

    let response = handle_request(root, method, path);
    stream.write_all(&response.to_bytes(method == "HEAD"))?;
    stream.flush()
}

/// Run the request loop until the process is terminated.
///
/// Requests are handled one at a time; a failed connection is reported and
/// the loop keeps serving.
pub fn serve(root: &Path, port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr).map_err(|e| LuapackError::BindFailed {
        addr: addr.clone(),
        reason: e.to_string(),
    })?;

    println!(
        "{} http://{addr}/ (serving {})",
        Style::new().bold().green().apply_to("Static server running on"),
        root.display(),
    );

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(e) = handle_connection(&mut stream, root) {
                    eprintln!("request failed: {e}");
                }
            }
            Err(e) => eprintln!("connection failed: {e}"),
        }
    }

    Ok(())
}
