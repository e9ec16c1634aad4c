//! Request/Response DTOs

use board_core::{AccountUpdate, PostDraft, Registration};
use board_db::PostChanges;
use serde::{Deserialize, Serialize};

// ==================== Account Types ====================

/// Registration request
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Registration {
            email: req.email,
            password: req.password,
            name: req.name,
        }
    }
}

/// Login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Profile update request; omitted fields are left unchanged
#[derive(Deserialize, Default)]
pub struct UpdateAccountRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

impl From<UpdateAccountRequest> for AccountUpdate {
    fn from(req: UpdateAccountRequest) -> Self {
        AccountUpdate {
            email: req.email,
            name: req.name,
            password: req.password,
        }
    }
}

// ==================== Board Types ====================

#[derive(Deserialize)]
pub struct CreateBoardRequest {
    pub title: String,
    pub content: String,
}

impl From<CreateBoardRequest> for PostDraft {
    fn from(req: CreateBoardRequest) -> Self {
        PostDraft {
            title: req.title,
            content: req.content,
        }
    }
}

#[derive(Deserialize, Default)]
pub struct UpdateBoardRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl From<UpdateBoardRequest> for PostChanges {
    fn from(req: UpdateBoardRequest) -> Self {
        PostChanges {
            title: req.title,
            content: req.content,
        }
    }
}

// ==================== Comment Types ====================

#[derive(Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

// ==================== Common ====================

/// Acknowledgement for mutations
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
