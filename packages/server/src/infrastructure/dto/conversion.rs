//! Conversion logic between DTOs and domain entities.

use crate::domain::entity;
use crate::infrastructure::dto::http as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<entity::ChatMessage> for dto::MessageDto {
    fn from(model: entity::ChatMessage) -> Self {
        Self {
            id: model.id,
            username: model.username.into_string(),
            content: model.content.into_string(),
            created_at: model.created_at.value(),
        }
    }
}

impl From<entity::VideoAsset> for dto::VideoDto {
    fn from(model: entity::VideoAsset) -> Self {
        Self {
            filename: model.filename,
            original_name: model.original_name,
            url: model.url,
            uploader: model.uploader.into_string(),
            size: model.size,
            uploaded_at: model.uploaded_at.value(),
        }
    }
}
