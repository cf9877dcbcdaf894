// src/validation.rs
//
// Regras de entrada usadas pelo `#[derive(Validate)]` dos payloads.
// Nada aqui toca no banco: cada função olha só para o valor recebido.

use std::borrow::Cow;

use rust_decimal::Decimal;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::error::AppError,
    models::{
        Label,
        auth::Role,
        mission::{MissionStatus, Priority, ServiceType},
        payment::{PaymentMethod, PaymentStatus},
        staff::StaffStatus,
    },
};

fn error(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

fn one_of<T: Label>(value: &str) -> Result<(), ValidationError> {
    match T::parse(value) {
        Some(_) => Ok(()),
        None => Err(error("one_of", format!("doit être: {}", T::expected()))),
    }
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("blank", "ne doit pas être vide".to_string()));
    }
    Ok(())
}

pub fn positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(error("positive", "doit être supérieur à 0".to_string()));
    }
    Ok(())
}

pub fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(error("non_negative", "doit être un nombre positif".to_string()));
    }
    Ok(())
}

// ISO 4217: três letras maiúsculas
pub fn currency(value: &str) -> Result<(), ValidationError> {
    if value.len() == 3 && value.chars().all(|c| c.is_ascii_uppercase()) {
        return Ok(());
    }
    Err(error("currency", "doit être un code ISO 4217 (ex: EUR)".to_string()))
}

pub fn role(value: &str) -> Result<(), ValidationError> {
    one_of::<Role>(value)
}

pub fn staff_status(value: &str) -> Result<(), ValidationError> {
    one_of::<StaffStatus>(value)
}

pub fn service_type(value: &str) -> Result<(), ValidationError> {
    one_of::<ServiceType>(value)
}

pub fn mission_status(value: &str) -> Result<(), ValidationError> {
    one_of::<MissionStatus>(value)
}

pub fn priority(value: &str) -> Result<(), ValidationError> {
    one_of::<Priority>(value)
}

pub fn payment_method(value: &str) -> Result<(), ValidationError> {
    one_of::<PaymentMethod>(value)
}

pub fn payment_status(value: &str) -> Result<(), ValidationError> {
    one_of::<PaymentStatus>(value)
}

/// Roda o derive e devolve todas as violações de uma vez.
pub fn check<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(AppError::ValidationError)
}

/// Erro de validação de um único campo, para regras que dependem de quem chama.
pub fn field_error(field: &'static str, message: &str) -> AppError {
    let mut errors = ValidationErrors::new();
    errors.add(field, error("invalid", message.to_string()));
    AppError::ValidationError(errors)
}

/// Converte o texto já validado no enum correspondente.
pub fn parse_label<T: Label>(field: &'static str, value: Option<&str>) -> Result<Option<T>, AppError> {
    match value {
        None => Ok(None),
        Some(raw) => T::parse(raw)
            .map(Some)
            .ok_or_else(|| field_error(field, &format!("doit être: {}", T::expected()))),
    }
}

/// Igual a `parse_label`, mas o campo é obrigatório.
pub fn require_label<T: Label>(field: &'static str, value: Option<&str>) -> Result<T, AppError> {
    parse_label(field, value)?.ok_or_else(|| field_error(field, &format!("{} est requis", field)))
}

/// Valor obrigatório já garantido pelo derive; nunca confia só nisso.
pub fn require<T>(field: &'static str, value: Option<T>) -> Result<T, AppError> {
    value.ok_or_else(|| field_error(field, &format!("{} est requis", field)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        mission::{CreateMissionPayload, UpdateMissionPayload},
        payment::CreatePaymentPayload,
        staff::{CreateStaffPayload, UpdateStaffPayload},
    };
    use serde_json::json;

    fn mission(body: serde_json::Value) -> CreateMissionPayload {
        serde_json::from_value(body).expect("payload de teste")
    }

    #[test]
    fn mission_create_reports_every_missing_field_at_once() {
        let errors = mission(json!({})).validate().unwrap_err();
        let fields = errors.field_errors();

        assert_eq!(fields.len(), 4);
        for field in ["title", "client_id", "location", "service_type"] {
            assert!(fields.contains_key(field), "faltou {field}");
        }
    }

    #[test]
    fn mission_create_rejects_blank_and_unknown_values() {
        let errors = mission(json!({
            "title": "   ",
            "client_id": "7d3c2a9e-6a7e-4f4e-9a51-0d9b1c1f2b10",
            "location": "Paris",
            "service_type": "incineration",
            "priority": "asap"
        }))
        .validate()
        .unwrap_err();
        let fields = errors.field_errors();

        assert_eq!(fields.len(), 3);
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("service_type"));
        assert!(fields.contains_key("priority"));
    }

    #[test]
    fn mission_create_accepts_minimal_payload() {
        let payload = mission(json!({
            "title": "Collecte X",
            "client_id": "7d3c2a9e-6a7e-4f4e-9a51-0d9b1c1f2b10",
            "location": "Paris",
            "service_type": "ramassage"
        }));
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn partial_mission_update_only_checks_present_fields() {
        let ok: UpdateMissionPayload = serde_json::from_value(json!({ "title": "Nouveau" })).unwrap();
        assert!(ok.validate().is_ok());

        let bad: UpdateMissionPayload =
            serde_json::from_value(json!({ "title": "", "status": "done" })).unwrap();
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
    }

    #[test]
    fn staff_create_requires_names_and_position() {
        let payload: CreateStaffPayload = serde_json::from_value(json!({
            "id": "7d3c2a9e-6a7e-4f4e-9a51-0d9b1c1f2b10",
            "status": "retired",
            "hourly_rate": -3.5
        }))
        .unwrap();
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();

        for field in ["first_name", "last_name", "position", "status", "hourly_rate"] {
            assert!(fields.contains_key(field), "faltou {field}");
        }
    }

    #[test]
    fn staff_partial_update_relaxes_required_fields() {
        let payload: UpdateStaffPayload =
            serde_json::from_value(json!({ "phone": "0102030405", "hourly_rate": 0 })).unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn payment_amount_must_be_strictly_positive() {
        let payload: CreatePaymentPayload = serde_json::from_value(json!({
            "client_id": "7d3c2a9e-6a7e-4f4e-9a51-0d9b1c1f2b10",
            "mission_id": "1f0e6f5a-0c63-4b7e-9d55-2c6c0a3d9b11",
            "amount": 0,
            "payment_method": "cash"
        }))
        .unwrap();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("amount"));
    }

    #[test]
    fn payment_method_must_be_known() {
        let payload: CreatePaymentPayload = serde_json::from_value(json!({
            "client_id": "7d3c2a9e-6a7e-4f4e-9a51-0d9b1c1f2b10",
            "mission_id": "1f0e6f5a-0c63-4b7e-9d55-2c6c0a3d9b11",
            "amount": 10,
            "payment_method": "bitcoin"
        }))
        .unwrap();
        let errors = payload.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 1);
        assert!(errors.field_errors().contains_key("payment_method"));
    }

    #[test]
    fn parse_label_maps_known_values() {
        let status: Option<MissionStatus> = parse_label("status", Some("in_progress")).unwrap();
        assert_eq!(status, Some(MissionStatus::InProgress));
        assert!(parse_label::<MissionStatus>("status", Some("nope")).is_err());
        assert_eq!(parse_label::<Priority>("priority", None).unwrap(), None);
    }

    #[test]
    fn currency_codes() {
        assert!(currency("EUR").is_ok());
        assert!(currency("eur").is_err());
        assert!(currency("EURO").is_err());
    }
}
