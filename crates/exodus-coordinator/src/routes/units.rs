use crate::http::{Response, StatusCode};

use super::Router;

pub(super) fn handle(router: &Router) -> Response {
    let listing = router.registry.list(router.clock.now());
    let body = serde_json::to_vec(&listing).unwrap_or_else(|_| b"[]".to_vec());
    Response::json(StatusCode::Ok, body)
}
