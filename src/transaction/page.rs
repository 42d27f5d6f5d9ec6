//! The root page: the auth screen when no one is signed in, otherwise the
//! transaction form and the list of recent transactions.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, PreEscaped, html};

use crate::{
    auth::auth_screen,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, CARD_STYLE, HeadElement, LINK_STYLE, base, submit_button},
    screen::{Controller, ScreenState, find_or_create_screen},
    signature::signature_widget,
    transaction::{notes_field, transaction_form_fields, transaction_list},
};

pub const MAIN_SCREEN_TITLE: &str = "Controle de Cartão - Emergências";

// Pointer events on the canvas must not scroll the page on touch screens.
const SIGNATURE_CANVAS_STYLE: &str = r#"
#signature-canvas {
    touch-action: none;
    cursor: crosshair;
    background-size: 100% 100%;
}
"#;

fn transaction_form(controller: &Controller) -> Markup {
    html! {
        section class=(CARD_STYLE)
        {
            h2 class="mb-4 text-xl font-bold" { "Registrar Nova Transação" }

            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target="#screen"
                hx-swap="outerHTML"
                hx-target-error="#alert-container"
                hx-disabled-elt="#submit-transaction"
                class="space-y-6"
            {
                (transaction_form_fields(controller.draft()))
                (signature_widget(controller.signature()))
                (notes_field(controller.draft()))
                (submit_button("submit-transaction", "Registrar Transação", BUTTON_PRIMARY_STYLE))
            }
        }
    }
}

/// The part of the main screen that changes when a transaction is submitted.
pub fn screen_partial(controller: &Controller) -> Markup {
    html! {
        div id="screen" class="grid grid-cols-1 gap-8 lg:grid-cols-3"
        {
            div class="lg:col-span-2"
            {
                (transaction_form(controller))
            }

            div
            {
                (transaction_list(controller.transactions(), controller.list_source()))
            }
        }
    }
}

fn main_screen(controller: &Controller) -> Markup {
    let email = controller
        .user()
        .and_then(|user| user.email.as_deref())
        .unwrap_or_default();

    html! {
        header class="text-white bg-blue-600 shadow-lg"
        {
            div class="flex items-center justify-between px-4 py-6 mx-auto max-w-6xl"
            {
                h1 class="text-3xl font-bold" { (MAIN_SCREEN_TITLE) }

                div class="flex items-center gap-4"
                {
                    span id="user-email" class="text-sm opacity-90" { (email) }

                    a
                        href=(endpoints::LOG_OUT)
                        class=(LINK_STYLE)
                    {
                        "Sair"
                    }
                }
            }
        }

        main class="px-4 py-8 mx-auto max-w-6xl"
        {
            (screen_partial(controller))
        }
    }
}

/// Display the auth screen or the main screen, depending on whether the
/// request's screen has a signed-in user.
///
/// The screen is created on the first visit and its cookie refreshed on
/// every visit after that.
pub async fn get_root_page(State(state): State<ScreenState>, jar: PrivateCookieJar) -> Response {
    let (jar, screen) = match find_or_create_screen(&state, jar) {
        Ok(found) => found,
        Err(error) => return error.into_response(),
    };

    let mut controller = screen.lock().await;
    controller.bootstrap().await;
    controller.sync_auth_state().await;

    let page = if controller.is_signed_in() {
        base(
            "Transações",
            &[
                HeadElement::ScriptLink(endpoints::SIGNATURE_SCRIPT.to_owned()),
                HeadElement::Style(PreEscaped(SIGNATURE_CANVAS_STYLE.to_owned())),
            ],
            &main_screen(&controller),
        )
    } else {
        base("Entrar", &[], &auth_screen())
    };

    (jar, page).into_response()
}
