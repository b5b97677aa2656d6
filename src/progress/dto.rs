use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TrackProgressResponse {
    pub message: &'static str,
    pub completed_days: i32,
    pub badge: Option<&'static str>,
    /// The cycle just completed; clients return to their start screen.
    pub redirect: bool,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
