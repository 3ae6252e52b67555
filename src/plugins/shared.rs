use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::pagination::{paginate, ListEnvelope, LOOKUP_PAGE, PAGE_SIZE};

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct InsertResponse {
    #[serde(rename = "insertId")]
    pub insert_id: i32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct AffectedRows {
    #[serde(rename = "affectedRows")]
    pub affected_rows: u64,
}

/// Page of a list endpoint. An empty page is always answered with the
/// "no records" envelope.
pub fn page_envelope<T>(rows: Vec<T>, page: i64, total: i64) -> ListEnvelope<T> {
    if rows.is_empty() {
        ListEnvelope::empty()
    } else {
        paginate(rows, page, total, PAGE_SIZE)
    }
}

/// Plain listing: 200 even when nothing matched.
pub fn listing<T>(rows: Vec<T>, page: i64, total: i64) -> Json<ListEnvelope<T>> {
    Json(page_envelope(rows, page, total))
}

/// Filtered listing: 404 with the empty envelope when nothing matched.
pub fn filtered<T>(rows: Vec<T>, page: i64, total: i64) -> (StatusCode, Json<ListEnvelope<T>>) {
    let status = if rows.is_empty() { StatusCode::NOT_FOUND } else { StatusCode::OK };
    (status, Json(page_envelope(rows, page, total)))
}

/// By-id lookup, reported as page 0 of the list page size.
pub fn lookup<T>(rows: Vec<T>, total: i64) -> (StatusCode, Json<ListEnvelope<T>>) {
    filtered(rows, LOOKUP_PAGE, total)
}

/// Update and delete succeed only when exactly one row was touched.
pub fn affected(affected_rows: u64) -> (StatusCode, Json<AffectedRows>) {
    let status = if affected_rows == 1 { StatusCode::OK } else { StatusCode::NOT_FOUND };
    (status, Json(AffectedRows { affected_rows }))
}

pub fn inserted(insert_id: i32) -> Json<InsertResponse> {
    Json(InsertResponse { insert_id })
}
