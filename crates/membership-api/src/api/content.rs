//! Public content listings and their back-office management.

use super::types::*;
use super::AppState;
use crate::error::ApiError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use entity::{
    achievement, announcement, election_document, gallery_item, media_coverage, panel_member,
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use tracing::info;

// Announcements

pub async fn list_announcements(
    State(state): State<AppState>,
) -> Result<Json<Vec<announcement::Model>>, ApiError> {
    let rows = entity::Announcement::find()
        .order_by_desc(announcement::Column::PublishedOn)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

pub async fn create_announcement(
    State(state): State<AppState>,
    Json(body): Json<AnnouncementRequest>,
) -> Result<(StatusCode, Json<announcement::Model>), ApiError> {
    let row = announcement::ActiveModel {
        title: Set(body.title),
        body: Set(body.body),
        attachment_url: Set(body.attachment_url),
        published_on: Set(body.published_on),
        created_at: Set(state.clock.now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    info!(announcement_id = row.id, "Announcement published");
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn update_announcement(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<AnnouncementRequest>,
) -> Result<Json<announcement::Model>, ApiError> {
    let row = entity::Announcement::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound)?;

    let mut active: announcement::ActiveModel = row.into();
    active.title = Set(body.title);
    active.body = Set(body.body);
    active.attachment_url = Set(body.attachment_url);
    active.published_on = Set(body.published_on);

    Ok(Json(active.update(&state.db).await?))
}

pub async fn delete_announcement(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let result = entity::Announcement::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(Json(MessageResponse {
        message: "Announcement deleted".into(),
    }))
}

// Executive panel

pub async fn list_panel_members(
    State(state): State<AppState>,
) -> Result<Json<Vec<panel_member::Model>>, ApiError> {
    let rows = entity::PanelMember::find()
        .order_by_asc(panel_member::Column::DisplayOrder)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

pub async fn create_panel_member(
    State(state): State<AppState>,
    Json(body): Json<PanelMemberRequest>,
) -> Result<(StatusCode, Json<panel_member::Model>), ApiError> {
    let row = panel_member::ActiveModel {
        name: Set(body.name),
        designation: Set(body.designation),
        district: Set(body.district),
        photo_url: Set(body.photo_url),
        display_order: Set(body.display_order),
        created_at: Set(state.clock.now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn delete_panel_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let result = entity::PanelMember::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(Json(MessageResponse {
        message: "Panel member removed".into(),
    }))
}

// Achievements

pub async fn list_achievements(
    State(state): State<AppState>,
) -> Result<Json<Vec<achievement::Model>>, ApiError> {
    let rows = entity::Achievement::find()
        .order_by_desc(achievement::Column::AchievedOn)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

pub async fn create_achievement(
    State(state): State<AppState>,
    Json(body): Json<AchievementRequest>,
) -> Result<(StatusCode, Json<achievement::Model>), ApiError> {
    let row = achievement::ActiveModel {
        title: Set(body.title),
        description: Set(body.description),
        image_url: Set(body.image_url),
        achieved_on: Set(body.achieved_on),
        created_at: Set(state.clock.now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn delete_achievement(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let result = entity::Achievement::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(Json(MessageResponse {
        message: "Achievement deleted".into(),
    }))
}

// Gallery

pub async fn list_gallery_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<gallery_item::Model>>, ApiError> {
    let rows = entity::GalleryItem::find()
        .order_by_desc(gallery_item::Column::CreatedAt)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

pub async fn create_gallery_item(
    State(state): State<AppState>,
    Json(body): Json<GalleryItemRequest>,
) -> Result<(StatusCode, Json<gallery_item::Model>), ApiError> {
    let row = gallery_item::ActiveModel {
        title: Set(body.title),
        image_url: Set(body.image_url),
        taken_on: Set(body.taken_on),
        created_at: Set(state.clock.now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn delete_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let result = entity::GalleryItem::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(Json(MessageResponse {
        message: "Gallery item deleted".into(),
    }))
}

// Media coverage

pub async fn list_media_coverage(
    State(state): State<AppState>,
) -> Result<Json<Vec<media_coverage::Model>>, ApiError> {
    let rows = entity::MediaCoverage::find()
        .order_by_desc(media_coverage::Column::PublishedOn)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

pub async fn create_media_coverage(
    State(state): State<AppState>,
    Json(body): Json<MediaCoverageRequest>,
) -> Result<(StatusCode, Json<media_coverage::Model>), ApiError> {
    let row = media_coverage::ActiveModel {
        title: Set(body.title),
        outlet: Set(body.outlet),
        article_url: Set(body.article_url),
        image_url: Set(body.image_url),
        published_on: Set(body.published_on),
        created_at: Set(state.clock.now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn delete_media_coverage(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let result = entity::MediaCoverage::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(Json(MessageResponse {
        message: "Media coverage deleted".into(),
    }))
}

// Election documents

pub async fn list_election_documents(
    State(state): State<AppState>,
) -> Result<Json<Vec<election_document::Model>>, ApiError> {
    let rows = entity::ElectionDocument::find()
        .order_by_desc(election_document::Column::PublishedOn)
        .all(&state.db)
        .await?;
    Ok(Json(rows))
}

pub async fn create_election_document(
    State(state): State<AppState>,
    Json(body): Json<ElectionDocumentRequest>,
) -> Result<(StatusCode, Json<election_document::Model>), ApiError> {
    let row = election_document::ActiveModel {
        title: Set(body.title),
        file_url: Set(body.file_url),
        published_on: Set(body.published_on),
        created_at: Set(state.clock.now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn delete_election_document(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let result = entity::ElectionDocument::delete_by_id(id)
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound);
    }
    Ok(Json(MessageResponse {
        message: "Election document deleted".into(),
    }))
}
