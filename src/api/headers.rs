//! Alert and error headers attached to resource responses

use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// Prefix of every alert message key
pub const APPLICATION_NAME: &str = "entityApp";

pub const ALERT_HEADER: &str = "x-entityapp-alert";
pub const ERROR_HEADER: &str = "x-entityapp-error";
pub const PARAMS_HEADER: &str = "x-entityapp-params";

fn insert(headers: &mut HeaderMap, name: &'static str, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(v) => {
            headers.insert(HeaderName::from_static(name), v);
        }
        Err(_) => tracing::warn!("Dropping non-ASCII value for header {}", name),
    }
}

pub fn alert(message: &str, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, ALERT_HEADER, message);
    insert(&mut headers, PARAMS_HEADER, param);
    headers
}

pub fn entity_creation_alert(entity_name: &str, param: &str) -> HeaderMap {
    alert(
        &format!("{}.{}.created", APPLICATION_NAME, entity_name),
        param,
    )
}

pub fn entity_update_alert(entity_name: &str, param: &str) -> HeaderMap {
    alert(
        &format!("{}.{}.updated", APPLICATION_NAME, entity_name),
        param,
    )
}

pub fn entity_deletion_alert(entity_name: &str, param: &str) -> HeaderMap {
    alert(
        &format!("{}.{}.deleted", APPLICATION_NAME, entity_name),
        param,
    )
}

pub fn failure_alert(entity_name: &str, error_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, ERROR_HEADER, &format!("error.{}", error_key));
    insert(&mut headers, PARAMS_HEADER, entity_name);
    headers
}
