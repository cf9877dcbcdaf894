// Orquestração por recurso: leituras de pré-condição, máquinas de estado e a saga de contas.
pub mod activity_service;
pub mod identity;
pub mod mission_service;
pub mod payment_service;
pub mod staff_service;
pub mod user_service;
