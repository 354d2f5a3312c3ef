//! # HTTP Harness
//!
//! A small static-file server on top of any [`FileSystem`], available with the
//! `server` feature.
//!
//! ## Behavior
//!
//! | Request | Response |
//! |---------|----------|
//! | File | `200` with the bytes and a `Content-Type` guessed from the extension |
//! | Directory without trailing `/` | `301` to the slash form |
//! | Directory | its `index.html` if present, else an HTML listing |
//! | `.../index.html` | `301` to the directory |
//! | File with trailing `/` | `301` to the slash-less form |
//! | Not found | `404 page not found` |
//!
//! Redirect locations are relative to the request (`./`, `docs/`,
//! `../app.js`), so a request path starting with `//` cannot send the client
//! to another host.
//!
//! Range requests and conditional GETs are not handled.

use std::io::Read;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::path::clean;
use crate::{DirEntry, File, FileSystem, FsError};

type SharedFs = Arc<dyn FileSystem>;

/// Characters escaped in a listing href, matching URL path escaping.
const HREF: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Build a router serving every GET and HEAD request from `fs`.
///
/// # Example
///
/// ```rust
/// use chainedfs::{ChainedFileSystem, DirFs, serve};
/// use std::sync::Arc;
///
/// let chain = ChainedFileSystem::new(vec![Box::new(DirFs::new("static"))]);
/// let app: axum::Router = serve::router(Arc::new(chain));
/// ```
pub fn router(fs: Arc<dyn FileSystem>) -> Router {
    Router::new()
        .route("/", get(serve_root))
        .route("/*path", get(serve_path))
        .with_state(fs)
}

async fn serve_root(State(fs): State<SharedFs>) -> Response {
    respond_blocking(fs, "/".to_owned()).await
}

async fn serve_path(State(fs): State<SharedFs>, Path(path): Path<String>) -> Response {
    respond_blocking(fs, format!("/{path}")).await
}

async fn respond_blocking(fs: SharedFs, request_path: String) -> Response {
    match tokio::task::spawn_blocking(move || respond(fs.as_ref(), &request_path)).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(%err, "file handler panicked");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Resolve one request path against `fs`.
fn respond(fs: &dyn FileSystem, request_path: &str) -> Response {
    if let Some(dir) = request_path.strip_suffix("index.html") {
        if dir.ends_with('/') {
            return redirect("./");
        }
    }

    let name = clean(request_path);
    let mut file = match fs.open(&name) {
        Ok(file) => file,
        Err(err) => return error_response(request_path, &err),
    };
    let meta = match file.stat() {
        Ok(meta) => meta,
        Err(err) => return error_response(request_path, &err),
    };

    if meta.is_dir() {
        if !request_path.ends_with('/') {
            return redirect(&format!("{}/", last_segment(request_path)));
        }
        let index = if name == "/" {
            "/index.html".to_owned()
        } else {
            format!("{name}/index.html")
        };
        if let Ok(index_file) = fs.open(&index) {
            if index_file.stat().map(|m| m.is_file()).unwrap_or(false) {
                return send_file(index_file, &index);
            }
        }
        return match file.read_dir() {
            Ok(entries) => {
                tracing::debug!(path = request_path, entries = entries.len(), "listing directory");
                listing(&entries)
            }
            Err(err) => error_response(request_path, &err),
        };
    }

    if request_path.ends_with('/') && request_path != "/" {
        return redirect(&format!("../{}", last_segment(request_path.trim_end_matches('/'))));
    }
    send_file(file, &name)
}

fn send_file(mut file: Box<dyn File>, name: &str) -> Response {
    let mut body = Vec::new();
    if let Err(err) = file.read_to_end(&mut body) {
        return error_response(name, &FsError::io("read", name, err));
    }
    let content_type = mime_guess::from_path(name)
        .first_or_octet_stream()
        .to_string();
    tracing::debug!(path = name, bytes = body.len(), "serving file");
    ([(header::CONTENT_TYPE, content_type)], body).into_response()
}

fn redirect(location: &str) -> Response {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, location.to_owned())],
    )
        .into_response()
}

/// Final segment of a request path, percent-encoded for a `Location` header.
fn last_segment(path: &str) -> String {
    let segment = path.rsplit('/').next().unwrap_or_default();
    utf8_percent_encode(segment, HREF).to_string()
}

fn listing(entries: &[DirEntry]) -> Response {
    let mut html = String::from("<pre>\n");
    for entry in entries {
        let mut name = entry.name.clone();
        if entry.is_dir() {
            name.push('/');
        }
        let href = escape_html(&utf8_percent_encode(&name, HREF).to_string());
        let text = escape_html(&name);
        html.push_str(&format!("<a href=\"{href}\">{text}</a>\n"));
    }
    html.push_str("</pre>\n");
    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html).into_response()
}

/// HTTP status for a failed lookup.
pub fn status_for(err: &FsError) -> StatusCode {
    match err {
        e if e.is_not_found() => StatusCode::NOT_FOUND,
        FsError::InvalidPath { .. } => StatusCode::NOT_FOUND,
        FsError::PermissionDenied { .. } => StatusCode::FORBIDDEN,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(path: &str, err: &FsError) -> Response {
    let status = status_for(err);
    if status == StatusCode::NOT_FOUND {
        tracing::info!(path, "not found");
        return (status, "404 page not found\n").into_response();
    }
    tracing::warn!(path, %err, "lookup failed");
    let reason = status.canonical_reason().unwrap_or("error");
    (status, format!("{} {reason}\n", status.as_u16())).into_response()
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
