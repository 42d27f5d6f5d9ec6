//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    alert::Alert, backend::BackendError, endpoints, internal_server_error::InternalServerError,
    not_found::NotFoundError,
};

/// The message shown when the transaction form is missing a value or the signature.
pub const INCOMPLETE_TRANSACTION_MSG: &str =
    "Por favor, preencha todos os campos obrigatórios e assine.";

/// The details shown when a signature has more points than the pad accepts.
pub const SIGNATURE_TOO_LONG_MSG: &str = "Limpe o quadro e assine novamente.";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The transaction form is missing the name, date, amount or signature.
    #[error("the transaction is missing a required value or the signature")]
    IncompleteTransaction,

    /// The amount could not be parsed as a number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The amount is below zero.
    #[error("the amount cannot be negative")]
    NegativeAmount,

    /// The date could not be parsed as a calendar date.
    #[error("\"{0}\" is not a valid date")]
    InvalidDate(String),

    /// A new password has fewer characters than the given minimum.
    #[error("the password must have at least {0} characters")]
    PasswordTooShort(usize),

    /// The remote backend refused a request or could not be reached.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// A stroke had too many pointer events, or the signature has too many points.
    #[error("the signature has too many points")]
    SignatureTooLong,

    /// The captured signature could not be encoded as an image.
    #[error("could not encode the signature: {0}")]
    SignatureEncoding(String),

    /// The backend refused the session, so the user was signed out.
    #[error("the session is no longer valid")]
    SessionExpired,

    /// The request did not belong to a known screen.
    #[error("the screen for this request could not be found")]
    ScreenMissing,

    /// Could not acquire the screen registry lock.
    #[error("could not acquire the screen registry lock")]
    ScreenRegistryLock,

    /// The operating system could not provide random bytes for a screen ID.
    #[error("could not generate a screen ID: {0}")]
    ScreenIdGeneration(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource is still on screen.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::Backend(error) => {
                tracing::error!("Unhandled backend error: {error}");
                InternalServerError {
                    description: "Não foi possível falar com o servidor.",
                    fix: "Verifique sua conexão e tente novamente.",
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    ///
    /// [Error::SessionExpired] is answered with a HTMX redirect to the root
    /// page instead, where the auth screen is shown.
    pub fn into_alert_response(self) -> Response {
        if self == Error::SessionExpired {
            tracing::info!("Session expired. Redirecting to root page.");
            return (HxRedirect(endpoints::ROOT.to_owned()), StatusCode::OK).into_response();
        }

        let (status_code, alert) = match self {
            Error::IncompleteTransaction => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::ErrorSimple {
                    message: INCOMPLETE_TRANSACTION_MSG.to_owned(),
                },
            ),
            Error::InvalidAmount(amount) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::Error {
                    message: "Valor inválido".to_owned(),
                    details: format!("\"{amount}\" não é um valor válido. Use, por exemplo, 150,00."),
                },
            ),
            Error::NegativeAmount => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::Error {
                    message: "Valor inválido".to_owned(),
                    details: "O valor não pode ser negativo.".to_owned(),
                },
            ),
            Error::InvalidDate(date) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::Error {
                    message: "Data inválida".to_owned(),
                    details: format!("\"{date}\" não é uma data válida."),
                },
            ),
            Error::PasswordTooShort(min_length) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::Error {
                    message: "Senha muito curta".to_owned(),
                    details: format!("A senha deve ter pelo menos {min_length} caracteres."),
                },
            ),
            Error::SignatureTooLong => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::Error {
                    message: "Assinatura muito longa".to_owned(),
                    details: SIGNATURE_TOO_LONG_MSG.to_owned(),
                },
            ),
            Error::Backend(error) => (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "Erro ao comunicar com o servidor".to_owned(),
                    details: error.to_string(),
                },
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Transação não encontrada".to_owned(),
                    details: "A transação não está mais na lista. \
                    Recarregue a página para ver a lista atualizada."
                        .to_owned(),
                },
            ),
            Error::ScreenMissing => (
                StatusCode::UNAUTHORIZED,
                Alert::Error {
                    message: "Sessão expirada".to_owned(),
                    details: "Recarregue a página e entre novamente.".to_owned(),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Algo deu errado".to_owned(),
                        details: "Ocorreu um erro inesperado, verifique os logs do servidor."
                            .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}
