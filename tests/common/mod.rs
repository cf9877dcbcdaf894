// Infraestrutura dos testes de rota: repositórios em memória + provedor de identidade falso.
#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::types::Json;
use tower::ServiceExt;
use uuid::Uuid;

use waste_ops_api::{
    common::error::AppError,
    config::{AppState, DEFAULT_SESSION_COOKIE},
    db::{
        ActivityRepository, ClientRepository, MissionRepository, PaymentRepository, RecordScope,
        StaffRepository, UserRepository,
    },
    models::{
        activity::{Comment, MissionUpdate, NewComment, NewMissionUpdate, NewRating, Rating},
        auth::{IdentityUser, NewIdentity, NewUser, Role, Session, User, UserChanges},
        client::Client,
        mission::{
            Mission, MissionChanges, MissionFilter, MissionListItem, MissionStatus, NewMission,
            Priority, ServiceType,
        },
        payment::{
            NewPayment, Payment, PaymentChanges, PaymentFilter, PaymentListItem, PaymentMethod,
            PaymentStatus,
        },
        staff::{Availability, NewStaffProfile, StaffChanges, StaffFilter, StaffProfile, StaffStatus},
    },
    routes::build_router,
    services::identity::IdentityProvider,
};

// --- Banco em memória ---

#[derive(Default)]
pub struct Tables {
    pub users: Vec<User>,
    pub clients: Vec<Client>,
    pub staff: Vec<StaffProfile>,
    pub missions: Vec<Mission>,
    pub payments: Vec<Payment>,
    pub comments: Vec<Comment>,
    pub updates: Vec<MissionUpdate>,
    pub ratings: Vec<Rating>,
    /// Quantas escritas chegaram ao "banco"
    pub writes: usize,
}

#[derive(Default)]
pub struct MemoryStore {
    pub tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn writes(&self) -> usize {
        self.tables.lock().unwrap().writes
    }

    pub fn mission(&self, id: Uuid) -> Option<Mission> {
        self.tables
            .lock()
            .unwrap()
            .missions
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }

    pub fn payment(&self, id: Uuid) -> Option<Payment> {
        self.tables
            .lock()
            .unwrap()
            .payments
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.tables.lock().unwrap().users.clone())
    }

    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        let mut t = self.tables.lock().unwrap();
        if t.users.iter().any(|u| u.email == user.email || u.id == user.id) {
            return Err(AppError::AlreadyExists("Cet e-mail".into()));
        }
        let row = User {
            id: user.id,
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        t.users.push(row.clone());
        t.writes += 1;
        Ok(row)
    }

    async fn update(&self, id: Uuid, changes: &UserChanges) -> Result<Option<User>, AppError> {
        let mut t = self.tables.lock().unwrap();
        t.writes += 1;
        Ok(t.users.iter_mut().find(|u| u.id == id).map(|u| {
            if let Some(v) = &changes.full_name {
                u.full_name = v.clone();
            }
            if let Some(v) = changes.role {
                u.role = v;
            }
            u.updated_at = Utc::now();
            u.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut t = self.tables.lock().unwrap();
        let before = t.users.len();
        t.users.retain(|u| u.id != id);
        t.writes += 1;
        Ok(t.users.len() < before)
    }
}

#[async_trait]
impl ClientRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.clients.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Client>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.clients.iter().find(|c| c.user_id == Some(user_id)).cloned())
    }
}

#[async_trait]
impl StaffRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StaffProfile>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.staff.iter().find(|s| s.id == id).cloned())
    }

    async fn list(&self, filter: &StaffFilter) -> Result<Vec<StaffProfile>, AppError> {
        let t = self.tables.lock().unwrap();
        let mut rows: Vec<StaffProfile> = t
            .staff
            .iter()
            .filter(|s| filter.department.is_none() || s.department == filter.department)
            .filter(|s| filter.position.as_ref().is_none_or(|p| &s.position == p))
            .filter(|s| filter.status.is_none_or(|st| s.status == st))
            .filter(|s| filter.skills.as_ref().is_none_or(|k| s.skills.contains(k)))
            .cloned()
            .collect();
        if let Some(limit) = filter.limit {
            rows.truncate(limit as usize);
        }
        Ok(rows)
    }

    async fn create(&self, p: &NewStaffProfile) -> Result<StaffProfile, AppError> {
        let mut t = self.tables.lock().unwrap();
        let row = StaffProfile {
            id: p.id,
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            phone: p.phone.clone(),
            address: p.address.clone(),
            hire_date: p.hire_date,
            position: p.position.clone(),
            department: p.department.clone(),
            hourly_rate: p.hourly_rate,
            skills: p.skills.clone(),
            certifications: p.certifications.clone(),
            availability: Json(p.availability),
            status: p.status,
            emergency_contact: p.emergency_contact.clone().map(Json),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        t.staff.push(row.clone());
        t.writes += 1;
        Ok(row)
    }

    async fn update(
        &self,
        id: Uuid,
        c: &StaffChanges,
    ) -> Result<Option<StaffProfile>, AppError> {
        let mut t = self.tables.lock().unwrap();
        t.writes += 1;
        Ok(t.staff.iter_mut().find(|s| s.id == id).map(|s| {
            if let Some(v) = &c.first_name {
                s.first_name = v.clone();
            }
            if let Some(v) = &c.last_name {
                s.last_name = v.clone();
            }
            if let Some(v) = &c.phone {
                s.phone = Some(v.clone());
            }
            if let Some(v) = &c.position {
                s.position = v.clone();
            }
            if let Some(v) = &c.department {
                s.department = Some(v.clone());
            }
            if let Some(v) = c.hourly_rate {
                s.hourly_rate = Some(v);
            }
            if let Some(v) = c.status {
                s.status = v;
            }
            if let Some(v) = &c.address {
                s.address = Some(v.clone());
            }
            if let Some(v) = c.hire_date {
                s.hire_date = v;
            }
            if let Some(v) = &c.skills {
                s.skills = v.clone();
            }
            if let Some(v) = &c.certifications {
                s.certifications = v.clone();
            }
            if let Some(v) = c.availability {
                s.availability = Json(v);
            }
            if let Some(v) = &c.emergency_contact {
                s.emergency_contact = Some(Json(v.clone()));
            }
            s.updated_at = Utc::now();
            s.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut t = self.tables.lock().unwrap();
        let before = t.staff.len();
        t.staff.retain(|s| s.id != id);
        t.writes += 1;
        Ok(t.staff.len() < before)
    }
}

#[async_trait]
impl MissionRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Mission>, AppError> {
        Ok(self.mission(id))
    }

    async fn list(
        &self,
        f: &MissionFilter,
        scope: RecordScope,
    ) -> Result<Vec<MissionListItem>, AppError> {
        let t = self.tables.lock().unwrap();
        let mut rows: Vec<MissionListItem> = t
            .missions
            .iter()
            .filter(|m| scope.admits_mission(m.client_id, m.assigned_staff_id))
            .filter(|m| f.client_id.is_none_or(|c| m.client_id == c))
            .filter(|m| f.assigned_staff_id.is_none() || m.assigned_staff_id == f.assigned_staff_id)
            .filter(|m| f.status.is_none_or(|s| m.status == s))
            .filter(|m| f.service_type.is_none_or(|s| m.service_type == s))
            .filter(|m| f.priority.is_none_or(|p| m.priority == p))
            .filter(|m| f.zone.is_none() || m.zone == f.zone)
            .map(|m| MissionListItem {
                mission: m.clone(),
                client_company_name: t
                    .clients
                    .iter()
                    .find(|c| c.id == m.client_id)
                    .map(|c| c.company_name.clone()),
                assigned_staff_name: m
                    .assigned_staff_id
                    .and_then(|id| t.staff.iter().find(|s| s.id == id))
                    .map(|s| s.display_name()),
            })
            .collect();
        if let Some(limit) = f.limit {
            rows.truncate(limit as usize);
        }
        Ok(rows)
    }

    async fn list_for_staff(&self, staff_ids: &[Uuid]) -> Result<Vec<Mission>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.missions
            .iter()
            .filter(|m| m.assigned_staff_id.is_some_and(|id| staff_ids.contains(&id)))
            .cloned()
            .collect())
    }

    async fn create(&self, m: &NewMission) -> Result<Mission, AppError> {
        let mut t = self.tables.lock().unwrap();
        let row = Mission {
            id: Uuid::new_v4(),
            title: m.title.clone(),
            description: m.description.clone(),
            location: m.location.clone(),
            service_type: m.service_type,
            status: m.status,
            priority: m.priority,
            client_id: m.client_id,
            assigned_staff_id: m.assigned_staff_id,
            scheduled_date: m.scheduled_date,
            scheduled_time: m.scheduled_time.clone(),
            estimated_duration: m.estimated_duration,
            special_instructions: m.special_instructions.clone(),
            equipment_needed: m.equipment_needed.clone(),
            gps_location: m.gps_location.clone(),
            zone: m.zone.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        t.missions.push(row.clone());
        t.writes += 1;
        Ok(row)
    }

    async fn update(&self, id: Uuid, c: &MissionChanges) -> Result<Option<Mission>, AppError> {
        let mut t = self.tables.lock().unwrap();
        t.writes += 1;
        Ok(t.missions.iter_mut().find(|m| m.id == id).map(|m| {
            if let Some(v) = &c.title {
                m.title = v.clone();
            }
            if let Some(v) = &c.description {
                m.description = Some(v.clone());
            }
            if let Some(v) = &c.location {
                m.location = v.clone();
            }
            if let Some(v) = c.service_type {
                m.service_type = v;
            }
            if let Some(v) = c.status {
                m.status = v;
            }
            if let Some(v) = c.priority {
                m.priority = v;
            }
            if let Some(v) = c.assigned_staff_id {
                m.assigned_staff_id = Some(v);
            }
            if let Some(v) = c.scheduled_date {
                m.scheduled_date = Some(v);
            }
            if let Some(v) = &c.scheduled_time {
                m.scheduled_time = Some(v.clone());
            }
            if let Some(v) = c.estimated_duration {
                m.estimated_duration = Some(v);
            }
            if let Some(v) = &c.special_instructions {
                m.special_instructions = Some(v.clone());
            }
            if let Some(v) = &c.equipment_needed {
                m.equipment_needed = v.clone();
            }
            if let Some(v) = &c.gps_location {
                m.gps_location = Some(v.clone());
            }
            if let Some(v) = &c.zone {
                m.zone = Some(v.clone());
            }
            m.updated_at = Utc::now();
            m.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut t = self.tables.lock().unwrap();
        let before = t.missions.len();
        t.missions.retain(|m| m.id != id);
        t.writes += 1;
        Ok(t.missions.len() < before)
    }
}

#[async_trait]
impl PaymentRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, AppError> {
        Ok(self.payment(id))
    }

    async fn list(
        &self,
        f: &PaymentFilter,
        scope: RecordScope,
    ) -> Result<Vec<PaymentListItem>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.payments
            .iter()
            .filter(|p| match scope {
                RecordScope::All => true,
                RecordScope::Client(id) => p.client_id == id,
                _ => false,
            })
            .filter(|p| f.payment_status.is_none_or(|s| p.payment_status == s))
            .filter(|p| f.client_id.is_none_or(|c| p.client_id == c))
            .map(|p| PaymentListItem {
                payment: p.clone(),
                mission_title: t
                    .missions
                    .iter()
                    .find(|m| m.id == p.mission_id)
                    .map(|m| m.title.clone()),
                client_company_name: t
                    .clients
                    .iter()
                    .find(|c| c.id == p.client_id)
                    .map(|c| c.company_name.clone()),
            })
            .collect())
    }

    async fn create(&self, p: &NewPayment) -> Result<Payment, AppError> {
        let mut t = self.tables.lock().unwrap();
        let row = Payment {
            id: Uuid::new_v4(),
            mission_id: p.mission_id,
            client_id: p.client_id,
            amount: p.amount,
            currency: p.currency.clone(),
            payment_method: p.payment_method,
            payment_status: PaymentStatus::Pending,
            due_date: p.due_date,
            paid_at: None,
            invoice_ref: p.invoice_ref.clone(),
            description: p.description.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        t.payments.push(row.clone());
        t.writes += 1;
        Ok(row)
    }

    async fn update(&self, id: Uuid, c: &PaymentChanges) -> Result<Option<Payment>, AppError> {
        let mut t = self.tables.lock().unwrap();
        t.writes += 1;
        Ok(t.payments.iter_mut().find(|p| p.id == id).map(|p| {
            if let Some(v) = c.amount {
                p.amount = v;
            }
            if let Some(v) = &c.currency {
                p.currency = v.clone();
            }
            if let Some(v) = c.payment_method {
                p.payment_method = v;
            }
            if let Some(v) = c.payment_status {
                p.payment_status = v;
            }
            if let Some(v) = c.due_date {
                p.due_date = Some(v);
            }
            if let Some(v) = c.paid_at {
                p.paid_at = Some(v);
            }
            if let Some(v) = &c.invoice_ref {
                p.invoice_ref = Some(v.clone());
            }
            if let Some(v) = &c.description {
                p.description = Some(v.clone());
            }
            p.updated_at = Utc::now();
            p.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut t = self.tables.lock().unwrap();
        let before = t.payments.len();
        t.payments.retain(|p| p.id != id);
        t.writes += 1;
        Ok(t.payments.len() < before)
    }
}

#[async_trait]
impl ActivityRepository for MemoryStore {
    async fn add_comment(&self, c: &NewComment) -> Result<Comment, AppError> {
        let mut t = self.tables.lock().unwrap();
        let row = Comment {
            id: Uuid::new_v4(),
            mission_id: c.mission_id,
            user_id: c.user_id,
            content: c.content.clone(),
            created_at: Utc::now(),
        };
        t.comments.push(row.clone());
        t.writes += 1;
        Ok(row)
    }

    async fn add_mission_update(&self, u: &NewMissionUpdate) -> Result<MissionUpdate, AppError> {
        let mut t = self.tables.lock().unwrap();
        let row = MissionUpdate {
            id: Uuid::new_v4(),
            mission_id: u.mission_id,
            staff_id: u.staff_id,
            update_type: u.update_type.clone(),
            content: u.content.clone(),
            photo_url: u.photo_url.clone(),
            timestamp: Utc::now(),
        };
        t.updates.push(row.clone());
        t.writes += 1;
        Ok(row)
    }

    async fn add_rating(&self, r: &NewRating) -> Result<Rating, AppError> {
        let mut t = self.tables.lock().unwrap();
        if t.ratings.iter().any(|x| x.mission_id == r.mission_id) {
            return Err(AppError::AlreadyExists("L'évaluation de cette mission".into()));
        }
        let row = Rating {
            id: Uuid::new_v4(),
            mission_id: r.mission_id,
            staff_id: r.staff_id,
            client_id: r.client_id,
            rating: r.rating,
            comment: r.comment.clone(),
            created_at: Utc::now(),
        };
        t.ratings.push(row.clone());
        t.writes += 1;
        Ok(row)
    }

    async fn rating_for_mission(&self, mission_id: Uuid) -> Result<Option<Rating>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.ratings.iter().find(|r| r.mission_id == mission_id).cloned())
    }

    async fn ratings_for_staff(&self, staff_ids: &[Uuid]) -> Result<Vec<Rating>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.ratings
            .iter()
            .filter(|r| staff_ids.contains(&r.staff_id))
            .cloned()
            .collect())
    }
}

// --- Provedor de identidade falso ---

#[derive(Default)]
pub struct FakeIdentity {
    /// token de acesso → id do usuário
    pub sessions: Mutex<HashMap<String, Uuid>>,
    pub created: Mutex<Vec<IdentityUser>>,
    pub deleted: Mutex<Vec<Uuid>>,
    pub updated: Mutex<Vec<Uuid>>,
    pub verified: Mutex<Vec<String>>,
}

impl FakeIdentity {
    pub fn grant(&self, user_id: Uuid) -> String {
        let token = format!("token-{user_id}");
        self.sessions.lock().unwrap().insert(token.clone(), user_id);
        token
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn get_session(&self, access_token: &str) -> Result<Option<Session>, AppError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .get(access_token)
            .map(|id| Session {
                user_id: *id,
                email: None,
                expires_at: Utc::now().timestamp() + 3600,
            }))
    }

    async fn verify_otp(&self, kind: &str, token_hash: &str) -> Result<(), AppError> {
        if token_hash == "valid-hash" {
            self.verified.lock().unwrap().push(format!("{kind}:{token_hash}"));
            return Ok(());
        }
        Err(AppError::IdentityRejected("Token has expired or is invalid".into()))
    }

    async fn create_user(&self, identity: &NewIdentity) -> Result<IdentityUser, AppError> {
        let user = IdentityUser {
            id: Uuid::new_v4(),
            email: Some(identity.email.clone()),
        };
        self.created.lock().unwrap().push(user.clone());
        Ok(user)
    }

    // Contas semeadas com `grant` também existem no provedor
    async fn get_user_by_id(&self, id: Uuid) -> Result<Option<IdentityUser>, AppError> {
        if self.sessions.lock().unwrap().values().any(|u| *u == id) {
            return Ok(Some(IdentityUser { id, email: None }));
        }
        Ok(self
            .created
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn update_user_by_id(&self, id: Uuid, _changes: &UserChanges) -> Result<(), AppError> {
        self.updated.lock().unwrap().push(id);
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), AppError> {
        self.deleted.lock().unwrap().push(id);
        Ok(())
    }
}

// --- Aplicação de teste ---

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub identity: Arc<FakeIdentity>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let identity = Arc::new(FakeIdentity::default());

        let state = AppState {
            users: store.clone(),
            clients: store.clone(),
            staff: store.clone(),
            missions: store.clone(),
            payments: store.clone(),
            activity: store.clone(),
            identity: identity.clone(),
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
        };

        Self {
            router: build_router(state),
            store,
            identity,
        }
    }

    /// Cria a linha em `users` e devolve um token de sessão válido.
    pub fn user(&self, role: Role) -> (User, String) {
        let user = User {
            id: Uuid::new_v4(),
            full_name: format!("Utilisateur {role}"),
            email: format!("{}@example.fr", Uuid::new_v4()),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.store.tables.lock().unwrap().users.push(user.clone());
        let token = self.identity.grant(user.id);
        (user, token)
    }

    pub fn client_for(&self, user_id: Option<Uuid>, company: &str) -> Client {
        let client = Client {
            id: Uuid::new_v4(),
            user_id,
            company_name: company.to_string(),
            contact_person: "Contact".into(),
            phone: None,
            address: None,
            contract_type: None,
            contract_start_date: None,
            contract_end_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.store.tables.lock().unwrap().clients.push(client.clone());
        client
    }

    pub fn staff_profile(&self, id: Uuid, status: StaffStatus) -> StaffProfile {
        let profile = StaffProfile {
            id,
            first_name: "Lucas".into(),
            last_name: "Bernard".into(),
            phone: None,
            address: None,
            hire_date: Utc::now().date_naive(),
            position: "Chauffeur".into(),
            department: Some("Collecte".into()),
            hourly_rate: Some(Decimal::new(1850, 2)),
            skills: vec!["poids-lourd".into()],
            certifications: vec![],
            availability: Json(Availability::default()),
            status,
            emergency_contact: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.store.tables.lock().unwrap().staff.push(profile.clone());
        profile
    }

    pub fn mission(
        &self,
        client_id: Uuid,
        assignee: Option<Uuid>,
        status: MissionStatus,
    ) -> Mission {
        let mission = Mission {
            id: Uuid::new_v4(),
            title: "Collecte hebdomadaire".into(),
            description: Some("Bacs jaunes".into()),
            location: "Lyon".into(),
            service_type: ServiceType::Recyclage,
            status,
            priority: Priority::High,
            client_id,
            assigned_staff_id: assignee,
            scheduled_date: None,
            scheduled_time: Some("08:00".into()),
            estimated_duration: Some(90),
            special_instructions: None,
            equipment_needed: vec!["benne".into()],
            gps_location: None,
            zone: Some("Nord".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.store.tables.lock().unwrap().missions.push(mission.clone());
        mission
    }

    pub fn payment(&self, mission: &Mission, status: PaymentStatus) -> Payment {
        let payment = Payment {
            id: Uuid::new_v4(),
            mission_id: mission.id,
            client_id: mission.client_id,
            amount: Decimal::new(15000, 2),
            currency: "EUR".into(),
            payment_method: PaymentMethod::BankTransfer,
            payment_status: status,
            due_date: None,
            paid_at: None,
            invoice_ref: None,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.store.tables.lock().unwrap().payments.push(payment.clone());
        payment
    }

    pub async fn call(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let body = match body {
            Some(v) => Body::from(serde_json::to_string(&v).unwrap()),
            None => Body::empty(),
        };

        let resp = self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}
