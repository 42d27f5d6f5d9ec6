//! The transaction form: the draft the user is typing and how it is validated.

use std::str::FromStr;

use maud::{Markup, html};
use rust_decimal::Decimal;
use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    transaction::NewTransaction,
};

const FORM_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The raw values of the transaction form.
///
/// Every field is kept as text so that a missing value can be reported to
/// the user instead of failing to deserialize the request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FormDraft {
    #[serde(default)]
    pub name: String,
    /// The date as sent by a date input, e.g. "2024-06-19".
    #[serde(default)]
    pub date: String,
    /// The amount as typed, e.g. "150.00" or "150,00".
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub notes: String,
}

impl FormDraft {
    /// Check the draft and the captured `signature`, producing a transaction
    /// ready to be stored.
    ///
    /// # Errors
    ///
    /// - [Error::IncompleteTransaction] if the name, date, amount or signature is missing.
    /// - [Error::InvalidDate] if the date is not a valid calendar date.
    /// - [Error::InvalidAmount] if the amount is not a number.
    /// - [Error::NegativeAmount] if the amount is below zero.
    pub fn validate(&self, signature: &str) -> Result<NewTransaction, Error> {
        if self.name.trim().is_empty()
            || self.date.trim().is_empty()
            || self.amount.trim().is_empty()
            || signature.is_empty()
        {
            return Err(Error::IncompleteTransaction);
        }

        let date = Date::parse(self.date.trim(), FORM_DATE_FORMAT)
            .map_err(|_| Error::InvalidDate(self.date.clone()))?;

        let amount = parse_amount(&self.amount)?;

        let notes = if self.notes.is_empty() {
            None
        } else {
            Some(self.notes.clone())
        };

        Ok(NewTransaction {
            person_name: self.name.trim().to_owned(),
            date,
            amount,
            notes,
            signature: signature.to_owned(),
        })
    }
}

fn parse_amount(text: &str) -> Result<Decimal, Error> {
    let normalized = text.trim().replace(',', ".");
    let amount =
        Decimal::from_str(&normalized).map_err(|_| Error::InvalidAmount(text.to_owned()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(Error::NegativeAmount);
    }

    Ok(amount)
}

/// The input fields of the transaction form, prefilled from `draft`.
pub fn transaction_form_fields(draft: &FormDraft) -> Markup {
    html! {
        div class="grid grid-cols-1 md:grid-cols-2 gap-4"
        {
            div
            {
                label
                    for="name"
                    class=(FORM_LABEL_STYLE)
                {
                    "Nome da Pessoa *"
                }

                input
                    name="name"
                    id="name"
                    type="text"
                    placeholder="Digite o nome completo"
                    value=(draft.name)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label
                    for="date"
                    class=(FORM_LABEL_STYLE)
                {
                    "Data *"
                }

                input
                    name="date"
                    id="date"
                    type="date"
                    value=(draft.date)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Valor (R$) *"
            }

            input
                name="amount"
                id="amount"
                type="number"
                step="0.01"
                min="0"
                placeholder="0,00"
                value=(draft.amount)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

/// The optional notes field, placed after the signature widget.
pub fn notes_field(draft: &FormDraft) -> Markup {
    html! {
        div
        {
            label
                for="notes"
                class=(FORM_LABEL_STYLE)
            {
                "Anotações"
            }

            textarea
                name="notes"
                id="notes"
                rows="3"
                placeholder="Observações sobre a transação..."
                class=(FORM_TEXT_INPUT_STYLE)
            {
                (draft.notes)
            }
        }
    }
}
