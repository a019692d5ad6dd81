//! Provisions an employee account in `PostgreSQL`.
//!
//! Usage:
//!
//! ```text
//! fieldwatch-seed-user <phone> <password>
//! ```
//!
//! The database URL comes from `FIELDWATCH_DATABASE_URL` or the
//! `database_url` key of the TOML file named by `FIELDWATCH_CONFIG`. The
//! password is hashed by the database so that `check_password` can verify
//! it at sign-in.

use camino::Utf8PathBuf;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use fieldwatch::auth::adapters::postgres::PostgresUserRepository;
use fieldwatch::auth::domain::{AuthDomainError, PhoneNumber};
use fieldwatch::auth::ports::UserRepositoryError;
use fieldwatch::config::{ConfigError, FieldwatchConfig};
use fieldwatch::telemetry;
use std::env;
use thiserror::Error;
use tokio::runtime::Builder;
use tracing::{info, warn};

const CONFIG_PATH_VAR: &str = "FIELDWATCH_CONFIG";

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
enum SeedError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error(transparent)]
    Input(#[from] AuthDomainError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build connection pool: {0}")]
    Pool(#[source] diesel::r2d2::PoolError),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] std::io::Error),
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

#[derive(Debug, PartialEq, Eq)]
struct SeedArgs {
    phone: PhoneNumber,
    password: String,
}

fn main() -> Result<(), BoxError> {
    telemetry::init("info")?;
    let args = parse_args(env::args())?;
    let config_path = env::var(CONFIG_PATH_VAR).ok().map(Utf8PathBuf::from);
    let config = FieldwatchConfig::load(config_path.as_deref())?;
    seed(&config, args).inspect_err(|err| warn!(?err, "seeding failed;"))?;
    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<SeedArgs, SeedError> {
    let _program = args.next();
    let phone = args
        .next()
        .ok_or_else(|| SeedError::InvalidArgs("missing phone argument".into()))?;
    let password = args
        .next()
        .ok_or_else(|| SeedError::InvalidArgs("missing password argument".into()))?;
    if let Some(extra) = args.next() {
        return Err(SeedError::InvalidArgs(format!(
            "unexpected extra argument: {extra}"
        )));
    }
    if password.is_empty() {
        return Err(SeedError::Input(AuthDomainError::EmptyPassword));
    }
    Ok(SeedArgs {
        phone: PhoneNumber::new(phone)?,
        password,
    })
}

fn seed(config: &FieldwatchConfig, args: SeedArgs) -> Result<(), SeedError> {
    let manager = ConnectionManager::<PgConnection>::new(config.require_database_url()?);
    let pool = Pool::builder()
        .max_size(config.pool_size)
        .build(manager)
        .map_err(SeedError::Pool)?;
    let repository = PostgresUserRepository::new(pool);

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(SeedError::RuntimeInit)?;
    let user_id = runtime.block_on(repository.register_with_password(&args.phone, &args.password))?;
    info!(%user_id, phone = %args.phone, "user provisioned");
    Ok(())
}
