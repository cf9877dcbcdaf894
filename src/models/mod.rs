// src/models/mod.rs

/// Conjunto fechado de valores que chega como texto no payload.
///
/// Os payloads guardam o texto cru para que a validação possa listar todos os
/// campos inválidos de uma vez; a conversão para o enum acontece depois.
pub trait Label: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == value)
    }

    fn expected() -> String {
        Self::ALL
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

macro_rules! impl_label {
    ($ty:ty { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $crate::models::Label for $ty {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::models::Label::as_str(self))
            }
        }
    };
}

pub mod activity;
pub mod auth;
pub mod client;
pub mod mission;
pub mod payment;
pub mod staff;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

// Corpo das respostas de exclusão
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Mission supprimée avec succès")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// `?id=` das formas antigas de DELETE
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    pub id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::{Label, auth::Role, payment::PaymentStatus, staff::StaffStatus};

    #[test]
    fn labels_parse_and_print_the_wire_text() {
        assert_eq!(Role::parse("staff"), Some(Role::Staff));
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(PaymentStatus::Refunded.to_string(), "refunded");
        assert_eq!(StaffStatus::parse("on_leave"), Some(StaffStatus::OnLeave));
        assert!(Role::expected().contains("admin"));
    }
}
