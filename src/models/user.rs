//! Identity models (students and employees) and session claims

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

/// Class of an authenticated identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Employee => "employee",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Student model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: i64,
    pub name: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password: String,
}

/// Employee model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password: String,
}

/// Identity found by a name lookup, before password verification
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: i64,
    pub name: String,
    pub role: Role,
    pub password_hash: String,
}

impl From<Student> for Identity {
    fn from(student: Student) -> Self {
        Identity {
            id: student.id,
            name: student.name,
            role: Role::Student,
            password_hash: student.password,
        }
    }
}

impl From<Employee> for Identity {
    fn from(employee: Employee) -> Self {
        Identity {
            id: employee.id,
            name: employee.name,
            role: Role::Employee,
            password_hash: employee.password,
        }
    }
}

/// Register request for `/students/add` and `/employees/add`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateIdentity {
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login form
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// All registered identities, as listed on `/users`
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UsersListing {
    pub students: Vec<Student>,
    pub employees: Vec<Employee>,
}

/// Signed session claims stored in the session cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub user_id: i64,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl SessionClaims {
    /// Create a new signed token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and verify a signed token (signature and expiry)
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn is_employee(&self) -> bool {
        self.role == Role::Employee
    }

    /// Loan, return and report operations are reserved to employees
    pub fn require_employee(&self) -> Result<(), AppError> {
        if self.is_employee() {
            Ok(())
        } else {
            Err(AppError::AuthRequired)
        }
    }
}
