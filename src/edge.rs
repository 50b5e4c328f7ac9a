//! Static JSON request handlers
//!
//! Three stateless greeting endpoints served next to the game. They do not
//! touch the simulation.

use serde::Serialize;

use crate::error::Result;

pub const CONTENT_TYPE: &str = "application/json";
pub const BANNER_HEADER: &str = "x-edgefunctions";
pub const BANNER: &str = "Welcome to use EdgeOne Pages Functions.";

/// Response body shared by every handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Greeting {
    pub code: i32,
    pub message: String,
}

/// Minimal HTTP-style response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: String,
}

impl EdgeResponse {
    fn json(greeting: &Greeting) -> Result<Self> {
        Ok(Self {
            status: 200,
            headers: vec![("content-type", CONTENT_TYPE), (BANNER_HEADER, BANNER)],
            body: serde_json::to_string(greeting)?,
        })
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| *v)
    }
}

fn greet(message: impl Into<String>) -> Result<EdgeResponse> {
    EdgeResponse::json(&Greeting {
        code: 0,
        message: message.into(),
    })
}

/// Catch-all handler
pub fn index() -> Result<EdgeResponse> {
    greet("Hello 全部进这里")
}

/// `/meta`
pub fn meta() -> Result<EdgeResponse> {
    greet("Hello Meta111")
}

/// `/test/<id>`: echoes the path parameter
pub fn test_id(id: &str) -> Result<EdgeResponse> {
    log::debug!("edge request /test/{id}");
    greet(format!("Hello {id}"))
}

/// Dispatch a request path to its handler
pub fn route(path: &str) -> Result<EdgeResponse> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        ["meta"] => meta(),
        ["test", id] => test_id(id),
        _ => index(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(resp: &EdgeResponse) -> serde_json::Value {
        serde_json::from_str(&resp.body).unwrap()
    }

    #[test]
    fn test_meta_route() {
        let resp = route("/meta").unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(
            body(&resp),
            serde_json::json!({"code": 0, "message": "Hello Meta111"})
        );
    }

    #[test]
    fn test_id_is_echoed() {
        let resp = route("/test/42?x=1").unwrap();
        assert_eq!(body(&resp)["message"], "Hello 42");
    }

    #[test]
    fn test_everything_else_hits_index() {
        for path in ["/", "", "/anything/else", "/test", "/test/1/2"] {
            let resp = route(path).unwrap();
            assert_eq!(body(&resp)["message"], "Hello 全部进这里", "path {path}");
        }
    }

    #[test]
    fn test_headers() {
        let resp = index().unwrap();
        assert_eq!(resp.header("Content-Type"), Some("application/json"));
        assert_eq!(resp.header("x-edgefunctions"), Some(BANNER));
        assert_eq!(resp.header("x-missing"), None);
    }

    #[test]
    fn test_field_order() {
        let resp = meta().unwrap();
        assert_eq!(resp.body, r#"{"code":0,"message":"Hello Meta111"}"#);
    }
}
