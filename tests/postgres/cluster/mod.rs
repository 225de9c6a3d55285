//! Embedded `PostgreSQL` cluster shared by the storage integration tests.
//!
//! The cluster is started once per test binary. When it cannot start (for
//! example when the runner is root, which `PostgreSQL` refuses) the fixture
//! yields an error and tests skip instead of failing.


use self::env_utils::port_override;
use self::fs_utils::{sync_password_from_file, sync_port_from_pid};
use super::helpers::test_runtime;
use crate::test_helpers::EnvVarGuard;
use diesel::prelude::*;
use pg_embedded_setup_unpriv::{ExecutionPrivileges, TestBootstrapSettings, bootstrap_for_tests};
use postgresql_embedded::{PostgreSQL, Settings, Status};
use rstest::fixture;
use std::sync::{Mutex, OnceLock};
use tokio::runtime::Runtime;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

static SHARED_CLUSTER: OnceLock<Result<ManagedCluster, String>> = OnceLock::new();
static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Shared `PostgreSQL` cluster handle for integration tests.
pub type PostgresCluster = &'static ManagedCluster;

/// Managed embedded `PostgreSQL` cluster.
pub struct ManagedCluster {
    settings: Settings,
    runtime: Runtime,
    postgres: Mutex<Option<PostgreSQL>>,
}

impl ManagedCluster {
    fn start() -> Result<Self, BoxError> {
        let port_guard = EnvVarGuard::set_many(&port_override()?);
        let mut bootstrap: TestBootstrapSettings =
            bootstrap_for_tests().map_err(|err| Box::new(err) as BoxError)?;
        drop(port_guard);
        if matches!(bootstrap.privileges, ExecutionPrivileges::Root) {
            return Err("embedded PostgreSQL cannot run as root".into());
        }
        sync_password_from_file(&mut bootstrap.settings)?;

        let runtime = test_runtime()?;
        let env_guard =
            EnvVarGuard::set_many(&EnvVarGuard::changes_from(&bootstrap.environment.to_env()));
        let mut postgres = PostgreSQL::new(bootstrap.settings.clone());
        let started = runtime.block_on(async {
            postgres.setup().await?;
            if !matches!(postgres.status(), Status::Started) {
                postgres.start().await?;
            }
            Ok::<(), postgresql_embedded::Error>(())
        });
        drop(env_guard);
        started.map_err(|err| Box::new(err) as BoxError)?;

        let mut settings = postgres.settings().clone();
        sync_port_from_pid(&mut settings)?;
        Ok(Self {
            settings,
            runtime,
            postgres: Mutex::new(Some(postgres)),
        })
    }

    /// Returns the connection URL for `database`.
    #[must_use]
    pub fn database_url(&self, database: &str) -> String {
        self.settings.url(database)
    }

    /// Creates `template` and runs `migrate` against it unless it exists.
    pub fn ensure_template_exists<F>(&self, template: &str, migrate: F) -> Result<(), BoxError>
    where
        F: FnOnce(&str) -> Result<(), BoxError>,
    {
        let _guard = TEMPLATE_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if self.database_exists(template)? {
            return Ok(());
        }

        self.execute_admin_sql(&format!("CREATE DATABASE {}", quote_identifier(template)))?;
        if let Err(err) = migrate(&self.database_url(template)) {
            self.drop_database(template)?;
            return Err(err);
        }
        Ok(())
    }

    /// Clones `template` into a database dropped when the handle goes away.
    pub fn temporary_database_from_template(
        &'static self,
        name: &str,
        template: &str,
    ) -> Result<TemporaryDatabase, BoxError> {
        self.execute_admin_sql(&format!(
            "CREATE DATABASE {} TEMPLATE {}",
            quote_identifier(name),
            quote_identifier(template),
        ))?;
        Ok(TemporaryDatabase {
            cluster: self,
            name: name.to_owned(),
        })
    }

    fn drop_database(&self, name: &str) -> Result<(), BoxError> {
        self.execute_admin_sql(&format!(
            "DROP DATABASE IF EXISTS {} WITH (FORCE)",
            quote_identifier(name)
        ))
    }

    fn execute_admin_sql(&self, sql: &str) -> Result<(), BoxError> {
        let mut conn = PgConnection::establish(&self.database_url("postgres"))
            .map_err(|err| Box::new(err) as BoxError)?;
        diesel::sql_query(sql)
            .execute(&mut conn)
            .map_err(|err| Box::new(err) as BoxError)?;
        Ok(())
    }

    fn database_exists(&self, name: &str) -> Result<bool, BoxError> {
        #[derive(diesel::QueryableByName)]
        struct ExistsRow {
            #[diesel(sql_type = diesel::sql_types::Bool)]
            exists: bool,
        }

        let mut conn = PgConnection::establish(&self.database_url("postgres"))
            .map_err(|err| Box::new(err) as BoxError)?;
        let row = diesel::sql_query(
            "SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1) AS exists",
        )
        .bind::<diesel::sql_types::Text, _>(name)
        .get_result::<ExistsRow>(&mut conn)
        .map_err(|err| Box::new(err) as BoxError)?;
        Ok(row.exists)
    }
}

impl Drop for ManagedCluster {
    fn drop(&mut self) {
        let postgres = self
            .postgres
            .get_mut()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take();
        if let Some(postgres) = postgres {
            drop(self.runtime.block_on(postgres.stop()));
        }
    }
}

/// Database cloned from the migrated template for a single test.
pub struct TemporaryDatabase {
    cluster: PostgresCluster,
    name: String,
}

impl TemporaryDatabase {
    /// Returns the connection URL for this database.
    #[must_use]
    pub fn url(&self) -> String {
        self.cluster.database_url(&self.name)
    }
}

impl Drop for TemporaryDatabase {
    fn drop(&mut self) {
        drop(self.cluster.drop_database(&self.name));
    }
}

/// Provides the shared cluster, or the reason it could not start.
///
/// Startup runs on a dedicated thread because the cluster owns a runtime of
/// its own and fixtures are resolved inside async tests.
#[fixture]
pub fn postgres_cluster() -> Result<PostgresCluster, BoxError> {
    SHARED_CLUSTER
        .get_or_init(|| {
            std::thread::spawn(|| ManagedCluster::start().map_err(|err| err.to_string()))
                .join()
                .unwrap_or_else(|_| Err("cluster bootstrap panicked".to_owned()))
        })
        .as_ref()
        .map_err(|reason| reason.clone().into())
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
