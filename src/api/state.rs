//! Shared application state for the API.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use crate::auth::Actor;
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::identity::IdentityProvider;
use crate::models::{ContractType, Employee, EmployeeStatus, Role};
use crate::services::{
    AttendanceWorkflow, DeductionCatalog, EmployeeDirectory, LeaveWorkflow, PayslipService,
};
use crate::store::retry::RetryPolicy;
use crate::store::Store;

/// Shared application state.
///
/// The services all clone the same `Arc<Store>`, so every handler sees
/// one consistent set of collections.
#[derive(Clone)]
pub struct AppState {
    /// The backing store.
    pub store: Arc<Store>,
    /// Employee and department records.
    pub directory: EmployeeDirectory,
    /// The deduction rule catalog.
    pub catalog: DeductionCatalog,
    /// Payslip generation and payment.
    pub payslips: PayslipService,
    /// Attendance request/approval workflow.
    pub attendance: AttendanceWorkflow,
    /// Leave request/approval workflow.
    pub leave: LeaveWorkflow,
    /// Retry policy applied to mutating handlers.
    pub retry: RetryPolicy,
}

impl AppState {
    /// Builds the state over a fresh store, without seeding.
    pub fn new(identity: Arc<dyn IdentityProvider>, config: &EngineConfig) -> Self {
        let store = Arc::new(Store::new());
        Self {
            directory: EmployeeDirectory::new(Arc::clone(&store), identity),
            catalog: DeductionCatalog::new(Arc::clone(&store)),
            payslips: PayslipService::new(Arc::clone(&store)),
            attendance: AttendanceWorkflow::new(Arc::clone(&store)),
            leave: LeaveWorkflow::new(Arc::clone(&store)),
            retry: config.retry.policy(),
            store,
        }
    }

    /// Builds the state and applies the configured seed data.
    ///
    /// The administrator is written to the store directly: onboarding
    /// requires a privileged actor, and on an empty store there is none
    /// yet. Everything after that goes through the services as the
    /// seeded administrator.
    pub async fn bootstrap(
        config: &EngineConfig,
        identity: Arc<dyn IdentityProvider>,
    ) -> EngineResult<Self> {
        let state = Self::new(Arc::clone(&identity), config);

        let Some(admin_seed) = &config.seed.admin else {
            info!("No administrator configured; skipping seed data");
            return Ok(state);
        };

        let admin_id = identity
            .create_account(&admin_seed.email, &admin_seed.password)
            .await?;
        let admin = state
            .store
            .employees
            .insert(Employee {
                id: admin_id,
                name: admin_seed.name.clone(),
                email: admin_seed.email.clone(),
                department: "Administration".to_string(),
                designation: "Administrator".to_string(),
                base_salary: Decimal::ZERO,
                joining_date: Utc::now().date_naive(),
                contract_type: ContractType::FullTime,
                status: EmployeeStatus::Active,
                role: Role::Admin,
                manager_id: None,
            })
            .await;
        info!(admin_id = %admin.id, email = %admin.email, "Administrator seeded");

        let actor = Actor::new(admin.id, Role::Admin);
        for name in &config.seed.departments {
            state.directory.add_department(name, &actor).await?;
        }
        for rule in &config.seed.deductions {
            state
                .catalog
                .add_rule(&rule.name, rule.kind, rule.amount, &actor)
                .await?;
        }
        info!(
            departments = config.seed.departments.len(),
            deduction_rules = config.seed.deductions.len(),
            "Seed data applied"
        );

        Ok(state)
    }
}
