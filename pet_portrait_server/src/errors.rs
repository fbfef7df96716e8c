use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use pet_portrait_engine::{traits::StorefrontApiError, OrderFlowError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("Authentication Error. {0}")]
    AuthenticationError(String),
    #[error("Payment has not been captured. {0}")]
    PaymentNotCaptured(String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error(transparent)]
    OrderFlow(#[from] OrderFlowError),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            Self::PaymentNotCaptured(_) => StatusCode::PAYMENT_REQUIRED,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::OrderFlow(e) => match e {
                OrderFlowError::Pricing(_) => StatusCode::BAD_REQUEST,
                OrderFlowError::Underpayment { .. } => StatusCode::BAD_REQUEST,
                OrderFlowError::OrderNotFound(_) => StatusCode::NOT_FOUND,
                OrderFlowError::Backend(StorefrontApiError::OrderNotFound(_)) => StatusCode::NOT_FOUND,
                OrderFlowError::Backend(StorefrontApiError::CustomerNotFound(_)) => StatusCode::NOT_FOUND,
                OrderFlowError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<StorefrontApiError> for ServerError {
    fn from(e: StorefrontApiError) -> Self {
        match e {
            StorefrontApiError::OrderNotFound(id) => Self::NoRecordFound(format!("Order {id}")),
            StorefrontApiError::CustomerNotFound(id) => Self::NoRecordFound(format!("Customer {id}")),
            StorefrontApiError::ModificationNoOp => Self::NoRecordFound("Nothing matched the request".to_string()),
            StorefrontApiError::DatabaseError(e) => Self::BackendError(format!("Database error: {e}")),
        }
    }
}
