use hyper::{Response, body::Incoming};

use crate::tracking::networking::NetworkResponse;

/// Response head of a sent request, the body stays on the connection until the response is closed.
#[derive(Debug)]
pub struct HttpResponse {
    message: String,
    response: Response<Incoming>,
}

impl From<Response<Incoming>> for HttpResponse {
    fn from(response: Response<Incoming>) -> Self {
        HttpResponse {
            message: response.status().canonical_reason().unwrap_or("").to_string(),
            response,
        }
    }
}

impl NetworkResponse for HttpResponse {
    fn response_code(&self) -> u16 {
        self.response.status().as_u16()
    }

    fn response_message(&self) -> &str {
        &self.message
    }

    fn close(self: Box<Self>) {
        let HttpResponse { response, .. } = *self;
        drop(response);
    }
}
