//! Authentication and identity registration service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{CreateIdentity, Employee, Identity, Role, SessionClaims, Student, UsersListing},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate by name and password and return a signed session token.
    ///
    /// Students are looked up before employees. Unknown names and wrong
    /// passwords fail the same way.
    pub async fn authenticate(&self, name: &str, password: &str) -> AppResult<(String, SessionClaims)> {
        let name = name.trim();
        let candidates: [Option<Identity>; 2] = [
            self.repository.users.find_student_by_name(name).await?.map(Identity::from),
            self.repository.users.find_employee_by_name(name).await?.map(Identity::from),
        ];

        for identity in candidates.into_iter().flatten() {
            if verify_password(&identity.password_hash, password)? {
                let claims = self.claims_for(&identity);
                let token = claims
                    .create_token(&self.config.session_secret)
                    .map_err(|e| AppError::Internal(format!("Failed to create session token: {}", e)))?;
                tracing::info!("{} {} logged in", identity.role, identity.id);
                return Ok((token, claims));
            }
        }

        tracing::warn!("Failed login attempt for name {:?}", name);
        Err(AppError::InvalidCredentials)
    }

    /// Decode a session token, `None` when missing, expired or forged
    pub fn session_from_token(&self, token: &str) -> Option<SessionClaims> {
        SessionClaims::from_token(token, &self.config.session_secret).ok()
    }

    fn claims_for(&self, identity: &Identity) -> SessionClaims {
        let now = Utc::now().timestamp();
        SessionClaims {
            sub: identity.name.clone(),
            user_id: identity.id,
            role: identity.role,
            exp: now + (self.config.session_expiration_hours as i64 * 3600),
            iat: now,
        }
    }

    /// Register a student
    pub async fn create_student(&self, request: CreateIdentity) -> AppResult<Student> {
        let hash = self.prepare_registration(&request).await?;
        let student = self.repository.users.create_student(request.name.trim(), &hash).await?;
        tracing::info!("Registered student {} ({})", student.id, student.name);
        Ok(student)
    }

    /// Register an employee
    pub async fn create_employee(&self, request: CreateIdentity) -> AppResult<Employee> {
        let hash = self.prepare_registration(&request).await?;
        let employee = self.repository.users.create_employee(request.name.trim(), &hash).await?;
        tracing::info!("Registered employee {} ({})", employee.id, employee.name);
        Ok(employee)
    }

    /// Register either kind of identity
    pub async fn register(&self, request: CreateIdentity, role: Role) -> AppResult<i64> {
        match role {
            Role::Student => self.create_student(request).await.map(|s| s.id),
            Role::Employee => self.create_employee(request).await.map(|e| e.id),
        }
    }

    /// Validate the request, enforce name uniqueness and hash the password
    async fn prepare_registration(&self, request: &CreateIdentity) -> AppResult<String> {
        request.validate()?;
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Name is required".to_string()));
        }
        if self.repository.users.name_exists(name).await? {
            return Err(AppError::Conflict(format!("Name {:?} already exists", name)));
        }
        hash_password(&request.password)
    }

    pub async fn get_student(&self, id: i64) -> AppResult<Student> {
        self.repository.users.get_student(id).await
    }

    pub async fn list_students(&self) -> AppResult<Vec<Student>> {
        self.repository.users.list_students().await
    }

    /// All students and employees
    pub async fn list(&self) -> AppResult<UsersListing> {
        Ok(UsersListing {
            students: self.repository.users.list_students().await?,
            employees: self.repository.users.list_employees().await?,
        })
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a password against a stored PHC hash
pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
