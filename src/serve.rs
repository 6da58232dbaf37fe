//! Local preview server for a built site.
//!
//! Serves the output directory over plain HTTP. There is no rebuild-on-change
//! machinery: edit, run `smallpress build`, refresh. Requests resolve the way
//! a static host would:
//!
//! 1. Exact file match → serve it
//! 2. Directory with an `index.html` → serve that
//! 3. Anything else → 404

use std::borrow::Cow;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tiny_http::{Header, Request, Response, Server};

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("cannot bind to {0}: {1}")]
    Bind(SocketAddr, Box<dyn std::error::Error + Send + Sync>),
}

/// Address for `port` on the loopback interface.
pub fn local_addr(port: u16) -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port)
}

/// Serve `root` on the loopback interface, blocking until the process exits.
///
/// Request failures (unreadable file, client gone mid-response) are reported
/// to stderr and the loop keeps going.
pub fn serve(root: &Path, port: u16) -> Result<(), ServeError> {
    let addr = local_addr(port);
    let server = Server::http(addr).map_err(|e| ServeError::Bind(addr, e))?;

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, root) {
            eprintln!("request failed: {}", e);
        }
    }

    Ok(())
}

fn handle_request(request: Request, root: &Path) -> std::io::Result<()> {
    match resolve(root, request.url()) {
        Some(file) => {
            let body = fs::read(&file)?;
            let response = Response::from_data(body).with_header(content_type_header(&file));
            request.respond(response)
        }
        None => {
            let response = Response::from_string("404 Not Found").with_status_code(404);
            request.respond(response)
        }
    }
}

/// Map a request URL to a file under `root`.
///
/// Query strings are stripped and percent-escapes decoded before the lookup.
/// An exact file wins; a directory falls back to its `index.html`. Any `..`
/// component is refused rather than resolved. `None` becomes a 404 in the
/// caller.
fn resolve(root: &Path, raw_url: &str) -> Option<PathBuf> {
    let path = raw_url.split('?').next().unwrap_or(raw_url);
    let decoded = urlencoding::decode(path)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| path.to_string());

    let mut candidate = root.to_path_buf();
    for part in Path::new(decoded.trim_matches('/')).components() {
        match part {
            Component::Normal(seg) => candidate.push(seg),
            Component::CurDir => {}
            // `..`, a rooted path or a drive prefix would leave `root`.
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if candidate.is_file() {
        return Some(candidate);
    }
    if candidate.is_dir() {
        let index = candidate.join("index.html");
        if index.is_file() {
            return Some(index);
        }
    }
    None
}

fn content_type_header(path: &Path) -> Header {
    // Static name, static value: cannot fail.
    Header::from_bytes("Content-Type", content_type(path)).unwrap()
}

/// Content type by file extension, `application/octet-stream` when unknown.
fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}
