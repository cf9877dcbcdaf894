// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{
    db::{
        ActivityRepository, ClientRepository, MissionRepository, PaymentRepository,
        PgActivityRepository, PgClientRepository, PgMissionRepository, PgPaymentRepository,
        PgStaffRepository, PgUserRepository, StaffRepository, UserRepository,
    },
    services::identity::{IdentityProvider, SupabaseIdentity},
};

pub const DEFAULT_SESSION_COOKIE: &str = "sb-access-token";

// Configuração lida do ambiente (.env incluso). Os segredos nunca vão para o log.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub supabase_url: String,
    pub service_role_key: String,
    pub jwt_secret: String,
    pub session_cookie: String,
    pub bind_addr: String,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let supabase_url = env::var("SUPABASE_URL")
            .or_else(|_| env::var("NEXT_PUBLIC_SUPABASE_URL"))
            .context("SUPABASE_URL (ou NEXT_PUBLIC_SUPABASE_URL) deve ser definida")?;
        let service_role_key = env::var("SUPABASE_SERVICE_ROLE_KEY")
            .context("SUPABASE_SERVICE_ROLE_KEY deve ser definida")?;
        let jwt_secret =
            env::var("SUPABASE_JWT_SECRET").context("SUPABASE_JWT_SECRET deve ser definido")?;

        let session_cookie =
            env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| DEFAULT_SESSION_COOKIE.to_string());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .context("DATABASE_MAX_CONNECTIONS deve ser um número")?,
            Err(_) => 5,
        };

        Ok(Self {
            database_url,
            supabase_url,
            service_role_key,
            jwt_secret,
            session_cookie,
            bind_addr,
            max_connections,
        })
    }

    pub async fn connect(&self) -> anyhow::Result<PgPool> {
        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&self.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
        Ok(pool)
    }
}

// Grafo de dependências compartilhado por todas as rotas
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub clients: Arc<dyn ClientRepository>,
    pub staff: Arc<dyn StaffRepository>,
    pub missions: Arc<dyn MissionRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub activity: Arc<dyn ActivityRepository>,
    pub identity: Arc<dyn IdentityProvider>,
    pub session_cookie: String,
}

impl AppState {
    pub fn new(config: &Config, pool: PgPool) -> Self {
        let identity = SupabaseIdentity::new(
            &config.supabase_url,
            config.service_role_key.clone(),
            config.jwt_secret.clone(),
        );

        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            clients: Arc::new(PgClientRepository::new(pool.clone())),
            staff: Arc::new(PgStaffRepository::new(pool.clone())),
            missions: Arc::new(PgMissionRepository::new(pool.clone())),
            payments: Arc::new(PgPaymentRepository::new(pool.clone())),
            activity: Arc::new(PgActivityRepository::new(pool)),
            identity: Arc::new(identity),
            session_cookie: config.session_cookie.clone(),
        }
    }
}
