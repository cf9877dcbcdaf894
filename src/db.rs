// Cada repositório é um trait (a fronteira com o banco) mais a implementação Postgres.
pub mod user_repo;
pub use user_repo::{PgUserRepository, UserRepository};
pub mod client_repo;
pub use client_repo::{ClientRepository, PgClientRepository};
pub mod staff_repo;
pub use staff_repo::{PgStaffRepository, StaffRepository};
pub mod mission_repo;
pub use mission_repo::{MissionRepository, PgMissionRepository};
pub mod payment_repo;
pub use payment_repo::{PaymentRepository, PgPaymentRepository};
pub mod activity_repo;
pub use activity_repo::{ActivityRepository, PgActivityRepository};

use uuid::Uuid;

/// Recorte de visibilidade aplicado às listagens conforme o papel de quem chama.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordScope {
    /// Admin: sem restrição
    All,
    /// Cliente: apenas registros do seu `clients.id`
    Client(Uuid),
    /// Pessoal: missões atribuídas a si ou ainda sem responsável
    StaffOrUnassigned(Uuid),
    /// Nada visível (ex.: cliente sem ficha, pessoal em pagamentos)
    Nothing,
}

impl RecordScope {
    /// Mesmo critério das listagens, aplicado a uma missão já carregada.
    pub fn admits_mission(&self, client_id: Uuid, assigned_staff_id: Option<Uuid>) -> bool {
        match *self {
            RecordScope::All => true,
            RecordScope::Client(own) => own == client_id,
            RecordScope::StaffOrUnassigned(me) => {
                assigned_staff_id.is_none() || assigned_staff_id == Some(me)
            }
            RecordScope::Nothing => false,
        }
    }
}
