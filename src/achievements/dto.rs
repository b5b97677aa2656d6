use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LikeRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub title: String,
    pub comment: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
