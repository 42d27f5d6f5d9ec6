//! The signature widget: the drawing surface, its status line and the clear button.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE},
    signature::{SURFACE_HEIGHT, SURFACE_WIDTH, SignaturePad},
};

pub const SIGNATURE_CAPTURED_MSG: &str = "Assinatura capturada.";
pub const SIGNATURE_MISSING_MSG: &str = "Assine no quadro acima.";

/// The line under the surface telling the user whether a signature was captured.
pub fn signature_status(pad: &SignaturePad) -> Markup {
    html! {
        p
            id="signature-status"
            data-captured=(pad.has_signature())
            class="text-sm text-gray-500 dark:text-gray-400"
        {
            @if pad.has_signature() {
                (SIGNATURE_CAPTURED_MSG)
            } @else {
                (SIGNATURE_MISSING_MSG)
            }
        }
    }
}

/// The whole widget. The stored signature, if any, is drawn as the
/// background of the surface so it survives a re-render.
pub fn signature_widget(pad: &SignaturePad) -> Markup {
    let background = pad
        .has_signature()
        .then(|| format!("background-image: url({}); background-size: contain;", pad.signature()));

    html! {
        div id="signature-widget" class="space-y-2"
        {
            label
                for="signature-canvas"
                class=(FORM_LABEL_STYLE)
            {
                "Assinatura Digital *"
            }

            canvas
                id="signature-canvas"
                width=(SURFACE_WIDTH)
                height=(SURFACE_HEIGHT)
                data-endpoint=(endpoints::SIGNATURE_STROKES_API)
                style=[background]
                class="w-full max-w-[400px] bg-white border border-gray-300 rounded cursor-crosshair touch-none dark:border-gray-600"
            {}

            div class="flex items-center justify-between"
            {
                (signature_status(pad))

                button
                    type="button"
                    hx-post=(endpoints::SIGNATURE_CLEAR_API)
                    hx-target="#signature-widget"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "Limpar"
                }
            }
        }
    }
}
