//! Students and employees repository

use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::user::{Employee, Student},
};

use super::conflict_on_duplicate;

#[derive(Clone)]
pub struct UsersRepository {
    pool: SqlitePool,
}

impl UsersRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get student by ID
    pub async fn get_student(&self, id: i64) -> AppResult<Student> {
        sqlx::query_as::<_, Student>("SELECT * FROM students WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Student with id {} not found", id)))
    }

    pub async fn find_student_by_name(&self, name: &str) -> AppResult<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT * FROM students WHERE name = ? COLLATE NOCASE ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(student)
    }

    pub async fn find_employee_by_name(&self, name: &str) -> AppResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees WHERE name = ? COLLATE NOCASE ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(employee)
    }

    /// Check whether a name is taken by any student or employee
    pub async fn name_exists(&self, name: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(SELECT 1 FROM students WHERE name = ? COLLATE NOCASE)
                OR EXISTS(SELECT 1 FROM employees WHERE name = ? COLLATE NOCASE)
            "#,
        )
        .bind(name)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Insert a student with an already hashed password.
    ///
    /// The insert and the employees lookup are one statement, so a name can
    /// never end up in both tables.
    pub async fn create_student(&self, name: &str, password_hash: &str) -> AppResult<Student> {
        sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (name, password)
            SELECT ?, ?
            WHERE NOT EXISTS(SELECT 1 FROM employees WHERE name = ? COLLATE NOCASE)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(password_hash)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_duplicate(e, "Name already exists"))?
        .ok_or_else(|| AppError::Conflict(format!("Name {:?} already exists", name)))
    }

    /// Insert an employee with an already hashed password
    pub async fn create_employee(&self, name: &str, password_hash: &str) -> AppResult<Employee> {
        sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (name, password)
            SELECT ?, ?
            WHERE NOT EXISTS(SELECT 1 FROM students WHERE name = ? COLLATE NOCASE)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(password_hash)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_duplicate(e, "Name already exists"))?
        .ok_or_else(|| AppError::Conflict(format!("Name {:?} already exists", name)))
    }

    pub async fn list_students(&self) -> AppResult<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>("SELECT * FROM students ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(students)
    }

    pub async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }
}
