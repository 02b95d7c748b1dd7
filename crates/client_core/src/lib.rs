use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::StudentId,
    error::{ApiError, ApiException},
    protocol::{Student, StudentPayload},
};
use tracing::debug;

/// The student directory service consumed by the application shell.
///
/// Implementations perform one request per call and never retry; a failed
/// call leaves the server-side collection in whatever state the server
/// reports on the next `list_students`.
#[async_trait]
pub trait StudentService: Send + Sync {
    async fn list_students(&self) -> Result<Vec<Student>>;
    async fn create_student(&self, payload: &StudentPayload) -> Result<Student>;
    async fn update_student(
        &self,
        student_id: StudentId,
        payload: &StudentPayload,
    ) -> Result<Student>;
    async fn delete_student(&self, student_id: StudentId) -> Result<()>;
}

/// REST client for the roster API:
/// `GET/POST /students`, `PUT/DELETE /students/{id}`.
pub struct RosterClient {
    http: Client,
    server_url: String,
}

impl RosterClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        let mut server_url = server_url.into();
        while server_url.ends_with('/') {
            server_url.pop();
        }
        Self {
            http: Client::new(),
            server_url,
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }
}

/// Maps a non-success response to the structured `ApiError` body when the
/// server sent one, falling back to the bare status code otherwise.
async fn check_status(res: reqwest::Response) -> Result<reqwest::Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    match res.json::<ApiError>().await {
        Ok(body) => Err(ApiException::from(body).into()),
        Err(_) => Err(anyhow!("student service request failed with status {status}")),
    }
}

#[async_trait]
impl StudentService for RosterClient {
    async fn list_students(&self) -> Result<Vec<Student>> {
        let res = self
            .http
            .get(format!("{}/students", self.server_url))
            .send()
            .await
            .context("failed to reach student service")?;
        let students: Vec<Student> = check_status(res)
            .await?
            .json()
            .await
            .context("malformed student list response")?;
        debug!(count = students.len(), "fetched student roster");
        Ok(students)
    }

    async fn create_student(&self, payload: &StudentPayload) -> Result<Student> {
        let res = self
            .http
            .post(format!("{}/students", self.server_url))
            .json(payload)
            .send()
            .await
            .context("failed to reach student service")?;
        let student: Student = check_status(res)
            .await?
            .json()
            .await
            .context("malformed create response")?;
        debug!(student_id = student.id.0, "created student");
        Ok(student)
    }

    async fn update_student(
        &self,
        student_id: StudentId,
        payload: &StudentPayload,
    ) -> Result<Student> {
        let res = self
            .http
            .put(format!("{}/students/{}", self.server_url, student_id.0))
            .json(payload)
            .send()
            .await
            .context("failed to reach student service")?;
        let student: Student = check_status(res)
            .await?
            .json()
            .await
            .context("malformed update response")?;
        debug!(student_id = student.id.0, "updated student");
        Ok(student)
    }

    async fn delete_student(&self, student_id: StudentId) -> Result<()> {
        let res = self
            .http
            .delete(format!("{}/students/{}", self.server_url, student_id.0))
            .send()
            .await
            .context("failed to reach student service")?;
        check_status(res).await?;
        debug!(student_id = student_id.0, "deleted student");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
