//! The route that records a new transaction from the form and the captured signature.

use axum::{
    Extension, Form,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    alert::Alert,
    screen::{Screen, SubmitOutcome},
    transaction::{FormDraft, page::screen_partial},
};

pub const TRANSACTION_CREATED_MSG: &str = "Transação registrada com sucesso!";
pub const TRANSACTION_SAVED_LOCALLY_MSG: &str = "Transação salva apenas nesta tela";

/// A route handler for creating a new transaction.
///
/// Responds with the re-rendered screen (cleared form, the new record at the
/// head of the list) and an alert saying where the record was stored. If the
/// form is incomplete, responds with an error alert and leaves the screen as
/// it was.
pub async fn create_transaction_endpoint(
    Extension(screen): Extension<Screen>,
    Form(draft): Form<FormDraft>,
) -> Response {
    let mut controller = screen.lock().await;

    let alert = match controller.submit(draft).await {
        Ok(SubmitOutcome::PersistedRemotely(_)) => Alert::SuccessSimple {
            message: TRANSACTION_CREATED_MSG.to_owned(),
        },
        Ok(SubmitOutcome::PersistedLocallyOnly { reason, .. }) => Alert::Warning {
            message: TRANSACTION_SAVED_LOCALLY_MSG.to_owned(),
            details: format!(
                "Não foi possível enviar a transação ao servidor ({reason}). \
                Ela aparece como não sincronizada e será perdida ao sair."
            ),
        },
        Err(error) => {
            tracing::debug!("Rejected transaction: {error}");
            return error.into_alert_response();
        }
    };

    html! {
        (screen_partial(&controller))
        (alert.into_oob_markup(true))
    }
    .into_response()
}
