//! Conditional and ranged responses for a loaded resource
//!
//! Freshness is keyed on the resource's modification time at second
//! precision:
//!
//! - `If-Unmodified-Since` older than the file gives `412`
//! - `If-Modified-Since` at or after the file gives `304`
//! - a single `bytes=` range gives `206`, or `416` when it cannot be met
//!
//! Malformed or multi-part range headers are ignored and the whole body is
//! sent.

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use std::time::SystemTime;

use super::resolver::Resource;

/// Outcome of reading a `Range` header against a body length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteRange {
    /// No usable range, send everything
    Full,
    /// Inclusive start and end offsets
    Partial(u64, u64),
    /// Syntactically fine but outside the body
    Unsatisfiable,
}

/// Parse a `Range` header value for a body of `len` bytes
pub fn parse_range(value: &str, len: u64) -> ByteRange {
    let Some(spec) = value.trim().strip_prefix("bytes=") else {
        return ByteRange::Full;
    };
    if spec.contains(',') {
        return ByteRange::Full;
    }
    let Some((start, end)) = spec.trim().split_once('-') else {
        return ByteRange::Full;
    };

    if start.is_empty() {
        // Suffix range: "-500" is the last 500 bytes
        return match end.parse::<u64>() {
            Ok(0) => ByteRange::Unsatisfiable,
            Ok(_) if len == 0 => ByteRange::Unsatisfiable,
            Ok(n) => ByteRange::Partial(len.saturating_sub(n), len - 1),
            Err(_) => ByteRange::Full,
        };
    }

    let Ok(start) = start.parse::<u64>() else {
        return ByteRange::Full;
    };
    let end = if end.is_empty() {
        None
    } else {
        match end.parse::<u64>() {
            Ok(e) if e >= start => Some(e),
            _ => return ByteRange::Full,
        }
    };

    if start >= len {
        return ByteRange::Unsatisfiable;
    }
    let last = len - 1;
    ByteRange::Partial(start, end.map_or(last, |e| e.min(last)))
}

fn unix_secs(time: SystemTime) -> Option<u64> {
    time.duration_since(SystemTime::UNIX_EPOCH).ok().map(|d| d.as_secs())
}

fn header_time(headers: &HeaderMap, name: header::HeaderName) -> Option<u64> {
    let value = headers.get(name)?.to_str().ok()?;
    httpdate::parse_http_date(value).ok().and_then(unix_secs)
}

/// Build the response for `resource`, honouring conditional and range
/// request headers.
///
/// `HEAD` is answered like `GET`; the body is dropped by the server.
pub fn serve_content(method: &Method, headers: &HeaderMap, resource: &Resource) -> Response {
    let modified = unix_secs(resource.last_modified);
    let last_modified = HeaderValue::from_str(&httpdate::fmt_http_date(resource.last_modified)).ok();

    if let (Some(modified), Some(since)) = (modified, header_time(headers, header::IF_UNMODIFIED_SINCE)) {
        if modified > since {
            return StatusCode::PRECONDITION_FAILED.into_response();
        }
    }

    if method == Method::GET || method == Method::HEAD {
        if let (Some(modified), Some(since)) = (modified, header_time(headers, header::IF_MODIFIED_SINCE)) {
            if modified <= since {
                let mut response = StatusCode::NOT_MODIFIED.into_response();
                if let Some(value) = last_modified {
                    response.headers_mut().insert(header::LAST_MODIFIED, value);
                }
                return response;
            }
        }
    }

    let len = resource.body.len() as u64;
    let range = if method == Method::GET {
        headers
            .get(header::RANGE)
            .and_then(|v| v.to_str().ok())
            .map_or(ByteRange::Full, |v| parse_range(v, len))
    } else {
        ByteRange::Full
    };

    let mut response = match range {
        ByteRange::Full => (StatusCode::OK, Body::from(resource.body.clone())).into_response(),
        ByteRange::Partial(start, end) => {
            // Offsets are bounded by the in-memory body length
            let slice = resource.body[start as usize..=end as usize].to_vec();
            let mut response = (StatusCode::PARTIAL_CONTENT, Body::from(slice)).into_response();
            if let Ok(value) = HeaderValue::from_str(&format!("bytes {start}-{end}/{len}")) {
                response.headers_mut().insert(header::CONTENT_RANGE, value);
            }
            response
        }
        ByteRange::Unsatisfiable => {
            let mut response = StatusCode::RANGE_NOT_SATISFIABLE.into_response();
            if let Ok(value) = HeaderValue::from_str(&format!("bytes */{len}")) {
                response.headers_mut().insert(header::CONTENT_RANGE, value);
            }
            return response;
        }
    };

    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(resource.mime_type));
    headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));
    if let Some(value) = last_modified {
        headers.insert(header::LAST_MODIFIED, value);
    }
    response
}
