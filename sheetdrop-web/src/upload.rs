//! Multipart upload over `XmlHttpRequest`.
//!
//! The JSON endpoints go through reqwest, but fetch has no way to observe
//! request-body progress, so the import upload uses XHR and bridges its
//! callbacks into async through a oneshot channel. The browser supplies the
//! multipart boundary, so no Content-Type header is set here.

use futures::channel::oneshot;
use shared::models::{ErrorResponse, ImportResult, progress_percent};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{FormData, ProgressEvent, XmlHttpRequest};
use yew::Callback;

use crate::api::ApiError;

type Outcome = Result<(u16, String), String>;

/// POST `file` as the `file` part of a multipart body, emitting a clamped
/// whole percentage on each progress event. Resolves once the transfer
/// reaches a terminal state; there is no client-side timeout.
pub async fn send_multipart(
    url: &str,
    token: Option<String>,
    file: &web_sys::File,
    on_progress: Callback<u8>,
) -> Result<ImportResult, ApiError> {
    let xhr = XmlHttpRequest::new()
        .map_err(|_| ApiError::Network("The browser refused to open the request".to_string()))?;
    xhr.open("POST", url)
        .map_err(|_| ApiError::Network(format!("Invalid upload URL: {url}")))?;
    let _ = xhr.set_request_header("Accept", "application/json");
    if let Some(token) = token {
        let _ = xhr.set_request_header("Authorization", &format!("Bearer {token}"));
    }

    let (sender, receiver) = oneshot::channel::<Outcome>();
    let sender = Rc::new(RefCell::new(Some(sender)));

    {
        let progress = Closure::<dyn FnMut(ProgressEvent)>::new(move |event: ProgressEvent| {
            on_progress.emit(progress_percent(event.loaded(), event.total()));
        });
        if let Ok(upload) = xhr.upload() {
            upload.set_onprogress(Some(progress.as_ref().unchecked_ref()));
        }
        progress.forget();
    }

    {
        let xhr_handle = xhr.clone();
        let sender_handle = Rc::clone(&sender);
        let onload = Closure::<dyn FnMut()>::new(move || {
            let status = xhr_handle.status().unwrap_or(0);
            let body = xhr_handle
                .response_text()
                .ok()
                .flatten()
                .unwrap_or_default();
            if let Some(sender) = sender_handle.borrow_mut().take() {
                let _ = sender.send(Ok((status, body)));
            }
        });
        xhr.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();
    }

    {
        let sender_handle = Rc::clone(&sender);
        let onerror = Closure::<dyn FnMut()>::new(move || {
            if let Some(sender) = sender_handle.borrow_mut().take() {
                let _ = sender.send(Err("The upload could not reach the server".to_string()));
            }
        });
        xhr.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();
    }

    let form = FormData::new()
        .map_err(|_| ApiError::Network("Could not build the upload body".to_string()))?;
    form.append_with_blob("file", file)
        .map_err(|_| ApiError::Network("Could not attach the file".to_string()))?;
    xhr.send_with_opt_form_data(Some(&form))
        .map_err(|_| ApiError::Network("The upload could not be started".to_string()))?;

    let (status, body) = receiver
        .await
        .map_err(|_| ApiError::Network("The upload was interrupted".to_string()))?
        .map_err(ApiError::Network)?;

    interpret_response(status, &body)
}

/// Map a terminal XHR state to the import outcome: a 2xx body is the
/// backend's verdict, anything else becomes a display message, preferring
/// the backend's own wording when the body carries one.
fn interpret_response(status: u16, body: &str) -> Result<ImportResult, ApiError> {
    if (200..300).contains(&status) {
        return serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()));
    }
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|error| error.to_string())
        .unwrap_or_else(|_| format!("Request failed (HTTP {status})"));
    Err(ApiError::Status {
        code: status,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body_is_decoded() {
        let result = interpret_response(
            200,
            r#"{"success": true, "totalRows": 50, "importedRows": 48, "errors": []}"#,
        )
        .unwrap();

        assert!(result.success);
        assert_eq!(result.total_rows, 50);
    }

    #[test]
    fn test_backend_message_is_preferred() {
        let err = interpret_response(422, r#"{"message": "Column DNI is required"}"#).unwrap_err();

        assert_eq!(err.to_string(), "Column DNI is required");
        match err {
            ApiError::Status { code, .. } => assert_eq!(code, 422),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_opaque_failure_gets_generic_message() {
        let err = interpret_response(500, "<html>boom</html>").unwrap_err();

        assert_eq!(err.to_string(), "Request failed (HTTP 500)");
    }

    #[test]
    fn test_unauthorized_status_is_recognizable() {
        let err = interpret_response(401, "").unwrap_err();

        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_malformed_success_body_is_a_decode_error() {
        let err = interpret_response(200, "not json").unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
    }
}
