//! The list of recent transactions shown next to the form.

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    html::{BADGE_WARNING_STYLE, BUTTON_DELETE_STYLE, CARD_STYLE},
    screen::ListSource,
    transaction::{SyncState, Transaction, format_currency, format_date},
};

pub const EMPTY_LIST_MSG: &str = "Nenhuma transação registrada ainda.";
pub const UNSYNCED_BADGE_TEXT: &str = "Não sincronizada";
pub const DEMO_DATA_BANNER_MSG: &str =
    "Não foi possível carregar as transações do servidor. Exibindo dados de demonstração.";
const DELETE_CONFIRMATION_MSG: &str = "Tem certeza que deseja excluir esta transação?";

fn transaction_item(transaction: &Transaction) -> Markup {
    let delete_url = format_endpoint(endpoints::TRANSACTION, &transaction.id);

    html! {
        li
            data-transaction-id=(transaction.id)
            class="p-4 border border-gray-200 rounded-lg dark:border-gray-700"
        {
            div class="flex items-start justify-between mb-2"
            {
                div
                {
                    h3 class="font-semibold" { (transaction.person_name) }

                    p class="text-sm text-gray-600 dark:text-gray-400"
                    {
                        time datetime=(transaction.date) { (format_date(transaction.date)) }
                    }

                    @if transaction.sync == SyncState::LocalOnly {
                        span class=(BADGE_WARNING_STYLE) { (UNSYNCED_BADGE_TEXT) }
                    }
                }

                div class="flex items-center gap-2"
                {
                    span class="font-bold text-blue-600 dark:text-blue-400"
                    {
                        (format_currency(transaction.amount))
                    }

                    button
                        type="button"
                        hx-delete=(delete_url)
                        hx-confirm=(DELETE_CONFIRMATION_MSG)
                        hx-target="#transaction-list"
                        hx-swap="outerHTML"
                        hx-target-error="#alert-container"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Excluir"
                    }
                }
            }

            @if let Some(notes) = &transaction.notes {
                p data-notes class="mt-2 text-sm text-gray-600 dark:text-gray-400" { (notes) }
            }
        }
    }
}

/// The card listing `transactions` in the order given, most recent first.
pub fn transaction_list(transactions: &[Transaction], source: ListSource) -> Markup {
    html! {
        section id="transaction-list" class=(CARD_STYLE)
        {
            h2 class="mb-4 text-xl font-bold" { "Transações Recentes" }

            @if source == ListSource::DemoFallback {
                p
                    id="demo-banner"
                    class="p-3 mb-4 text-sm text-yellow-800 rounded-lg bg-yellow-50 dark:bg-gray-800 dark:text-yellow-300"
                {
                    (DEMO_DATA_BANNER_MSG)
                }
            }

            @if transactions.is_empty() {
                p class="py-8 text-center text-gray-500" { (EMPTY_LIST_MSG) }
            } @else {
                ul class="space-y-4"
                {
                    @for transaction in transactions {
                        (transaction_item(transaction))
                    }
                }
            }
        }
    }
}
