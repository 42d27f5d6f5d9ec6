//! Alerts for telling the user how an action went.
//!
//! Alerts are rendered into `#alert-container`, either as the target of a
//! failed htmx request (`hx-target-error`) or as an out-of-band swap next to
//! a successful response.

use axum::response::Html;
use maud::{Markup, html};

/// An alert message with optional details.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Success { message: String, details: String },
    SuccessSimple { message: String },
    Warning { message: String, details: String },
    Error { message: String, details: String },
    ErrorSimple { message: String },
}

impl Alert {
    fn parts(&self) -> (&str, &str, &'static str, &'static str) {
        const SUCCESS_STYLE: &str = "text-green-800 bg-green-50 border-green-300 \
            dark:bg-gray-800 dark:text-green-400 dark:border-green-800";
        const WARNING_STYLE: &str = "text-yellow-800 bg-yellow-50 border-yellow-300 \
            dark:bg-gray-800 dark:text-yellow-300 dark:border-yellow-800";
        const ERROR_STYLE: &str = "text-red-800 bg-red-50 border-red-300 \
            dark:bg-gray-800 dark:text-red-400 dark:border-red-800";

        let (message, details, style, kind) = match self {
            Alert::Success { message, details } => (message, details.as_str(), SUCCESS_STYLE, "success"),
            Alert::SuccessSimple { message } => (message, "", SUCCESS_STYLE, "success"),
            Alert::Warning { message, details } => (message, details.as_str(), WARNING_STYLE, "warning"),
            Alert::Error { message, details } => (message, details.as_str(), ERROR_STYLE, "error"),
            Alert::ErrorSimple { message } => (message, "", ERROR_STYLE, "error"),
        };

        (message.as_str(), details, style, kind)
    }

    /// The alert itself, without the surrounding container.
    pub fn into_markup(self) -> Markup {
        let (message, details, style, kind) = self.parts();

        html! {
            div
                role="alert"
                data-alert=(kind)
                class={ "flex items-start gap-3 p-4 mb-4 text-sm border rounded-lg " (style) }
            {
                div class="flex-1"
                {
                    p class="font-medium" { (message) }

                    @if !details.is_empty()
                    {
                        p class="mt-1" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Fechar"
                    class="font-bold"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        }
    }

    /// The alert as the new contents of `#alert-container`.
    pub fn into_html(self) -> Html<String> {
        Html(self.into_oob_markup(false).into_string())
    }

    /// The alert wrapped in `#alert-container`, marked for an out-of-band
    /// swap when `out_of_band` is set.
    pub fn into_oob_markup(self, out_of_band: bool) -> Markup {
        html! {
            @if out_of_band
            {
                div
                    id="alert-container"
                    hx-swap-oob="true"
                    class="w-full max-w-md px-4"
                    style=(ALERT_CONTAINER_POSITION)
                {
                    (self.into_markup())
                }
            }
            @else
            {
                (self.into_markup())
            }
        }
    }
}

/// Keeps the alert container floating at the bottom of the screen.
pub const ALERT_CONTAINER_POSITION: &str =
    "position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;";
