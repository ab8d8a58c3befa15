use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct HealthResponse {
    /// `ok` when every dependency answered, `degraded` otherwise.
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}
