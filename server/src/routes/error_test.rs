use super::*;

#[test]
fn body_has_error_envelope() {
    let err = ApiError::new(StatusCode::BAD_REQUEST, "invalid_credentials", "Invalid login credentials");
    assert_eq!(
        err.body(),
        json!({ "error": { "code": "invalid_credentials", "message": "Invalid login credentials" } })
    );
}

#[test]
fn from_status_keeps_client_error_message() {
    let err = ApiError::from_status(StatusCode::FORBIDDEN, "forbidden", &"not yours");
    assert_eq!(err.status, StatusCode::FORBIDDEN);
    assert_eq!(err.message, "not yours");
}

#[test]
fn from_status_hides_server_error_message() {
    let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "unexpected_failure", &"connection refused");
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.message, INTERNAL_ERROR_MESSAGE);
}

#[test]
fn sqlx_errors_become_opaque_500() {
    let err = ApiError::from(sqlx::Error::RowNotFound);
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.code, "unexpected_failure");
}

#[test]
fn into_response_uses_status() {
    let resp = ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "weak_password", "too short").into_response();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
