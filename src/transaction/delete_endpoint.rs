use axum::{
    Extension,
    extract::Path,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    alert::Alert,
    screen::{DeleteOutcome, Screen},
    transaction::{TransactionId, transaction_list},
};

pub const TRANSACTION_DELETED_MSG: &str = "Transação excluída.";
pub const REMOTE_DELETE_FAILED_MSG: &str = "Transação removida apenas desta tela";

/// A route handler for deleting a transaction, responds with the updated list and an alert.
///
/// The transaction is removed from the list even if the backend could not
/// delete it, in which case the alert warns that the remote copy may remain.
pub async fn delete_transaction_endpoint(
    Extension(screen): Extension<Screen>,
    Path(transaction_id): Path<String>,
) -> Response {
    let transaction_id = TransactionId::new(transaction_id);
    let mut controller = screen.lock().await;

    let alert = match controller.delete(&transaction_id).await {
        Ok(DeleteOutcome::DeletedRemotely | DeleteOutcome::Discarded) => Alert::SuccessSimple {
            message: TRANSACTION_DELETED_MSG.to_owned(),
        },
        Ok(DeleteOutcome::RemovedLocallyOnly(reason)) => Alert::Warning {
            message: REMOTE_DELETE_FAILED_MSG.to_owned(),
            details: format!(
                "Não foi possível excluir a transação no servidor ({reason}). \
                Ela pode continuar armazenada lá."
            ),
        },
        Err(error) => {
            tracing::debug!("Could not delete transaction {transaction_id}: {error}");
            return error.into_alert_response();
        }
    };

    html! {
        (transaction_list(controller.transactions(), controller.list_source()))
        (alert.into_oob_markup(true))
    }
    .into_response()
}
