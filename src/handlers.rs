use crate::errors::AppError;
use crate::extract::extract_palette;
use crate::harmony::harmony_palette;
use crate::model::{LikeModel, MIN_FEEDBACK};
use crate::models::{
    AppData, FeedbackRecord, FeedbackRequest, FeedbackResponse, HarmonyRequest, LikedPalette,
    PaletteMethod, PaletteResponse, UploadProba, UploadResponse, PALETTE_SIZE,
};
use crate::palette::{palette_features, parse_hex, random_palette};
use crate::state::AppState;
use crate::storage::{persist_data, sanitize_filename};
use crate::ui::render_index;
use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use chrono::Local;
use tokio::fs;
use tracing::info;

const GENERATE_CANDIDATES: usize = 15;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let colors = random_palette(PALETTE_SIZE);
    let mut data = state.data.lock().await;
    let palette_id = data.insert_palette(colors.clone(), PaletteMethod::Random, None);
    persist_data(&state.data_path, &data).await?;
    Ok(Html(render_index(&colors, palette_id)))
}

/// Draws random candidates and, once the model is usable, keeps the one it
/// scores highest. Without a usable model the first draw wins and no
/// probability is reported.
pub async fn generate(State(state): State<AppState>) -> Result<Json<PaletteResponse>, AppError> {
    let mut data = state.data.lock().await;
    let (colors, proba) = {
        let model = state.model.lock().await;
        pick_candidate(model.as_ref(), data.feedback.len())
    };

    let palette_id = data.insert_palette(colors.clone(), PaletteMethod::Random, None);
    persist_data(&state.data_path, &data).await?;

    Ok(Json(PaletteResponse {
        palette_id,
        colors,
        proba,
    }))
}

pub async fn feedback(
    State(state): State<AppState>,
    Json(payload): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    // Anything other than "like" counts as a dislike; the value is an open
    // string on the wire.
    let liked = payload.feedback == "like";

    let mut data = state.data.lock().await;
    let features = {
        let palette = data
            .palette_mut(payload.palette_id)
            .ok_or_else(|| AppError::not_found("palette not found"))?;
        if liked {
            palette.likes += 1;
        } else {
            palette.dislikes += 1;
        }
        palette_features(&palette.colors)
    };

    data.feedback.push(FeedbackRecord {
        palette_id: payload.palette_id,
        liked,
        features,
    });
    persist_data(&state.data_path, &data).await?;

    retrain(&state, &data).await;

    Ok(Json(FeedbackResponse {
        message: "feedback recorded".to_string(),
    }))
}

pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::bad_request(err.to_string()))?
    {
        if field.name() == Some("image") {
            let name = field.file_name().unwrap_or("upload").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|err| AppError::bad_request(err.to_string()))?;
            file = Some((name, bytes.to_vec()));
        }
    }

    let (name, bytes) = file.ok_or_else(|| AppError::bad_request("no file uploaded"))?;
    if bytes.is_empty() {
        return Err(AppError::bad_request("uploaded file is empty"));
    }

    let colors = extract_palette(&bytes)
        .map_err(|err| AppError::bad_request(format!("could not read image: {err}")))?;

    let filename = format!(
        "{}_{}",
        Local::now().timestamp_millis(),
        sanitize_filename(&name)
    );
    fs::create_dir_all(&state.uploads_dir).await?;
    fs::write(state.uploads_dir.join(&filename), &bytes).await?;

    let mut data = state.data.lock().await;
    let palette_id =
        data.insert_palette(colors.clone(), PaletteMethod::Image, Some(filename.clone()));
    persist_data(&state.data_path, &data).await?;

    let proba = {
        let model = state.model.lock().await;
        match score(model.as_ref(), data.feedback.len(), &colors) {
            Some(proba) => UploadProba::Score(proba),
            None => UploadProba::NeedFeedback,
        }
    };

    Ok(Json(UploadResponse {
        palette_id,
        colors,
        image: format!("/uploads/{filename}"),
        proba,
    }))
}

pub async fn serve_upload(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    if filename.contains(['/', '\\']) || filename.contains("..") {
        return Err(AppError::not_found("image not found"));
    }

    let bytes = fs::read(state.uploads_dir.join(&filename))
        .await
        .map_err(|_| AppError::not_found("image not found"))?;

    Ok(([(header::CONTENT_TYPE, content_type_for(&filename))], bytes).into_response())
}

pub async fn liked_palettes(
    State(state): State<AppState>,
) -> Result<Json<Vec<LikedPalette>>, AppError> {
    let data = state.data.lock().await;
    let list = data
        .palettes
        .iter()
        .filter(|palette| palette.likes > 0)
        .map(|palette| LikedPalette {
            id: palette.id,
            colors: palette.colors.clone(),
            likes: palette.likes,
            dislikes: palette.dislikes,
            image: palette
                .image_path
                .as_ref()
                .map(|name| format!("/uploads/{name}")),
        })
        .collect();
    Ok(Json(list))
}

pub async fn generate_harmony(
    State(state): State<AppState>,
    Json(payload): Json<HarmonyRequest>,
) -> Result<Json<PaletteResponse>, AppError> {
    let base = parse_hex(&payload.base_color).ok_or_else(|| {
        AppError::bad_request(format!("invalid base color: {:?}", payload.base_color))
    })?;
    let colors = harmony_palette(base, &payload.scheme)
        .ok_or_else(|| AppError::bad_request(format!("unknown scheme: {:?}", payload.scheme)))?;

    let mut data = state.data.lock().await;
    let palette_id = data.insert_palette(colors.clone(), PaletteMethod::Harmony, None);
    persist_data(&state.data_path, &data).await?;

    let proba = {
        let model = state.model.lock().await;
        score(model.as_ref(), data.feedback.len(), &colors)
    };

    Ok(Json(PaletteResponse {
        palette_id,
        colors,
        proba,
    }))
}

async fn retrain(state: &AppState, data: &AppData) {
    let model = LikeModel::fit(&data.feedback);
    match &model {
        Some(_) => info!(samples = data.feedback.len(), "like model retrained"),
        None => info!("not enough vote variety to train the like model"),
    }
    *state.model.lock().await = model;
}

fn pick_candidate(model: Option<&LikeModel>, samples: usize) -> (Vec<String>, Option<f64>) {
    let Some(model) = model.filter(|_| samples >= MIN_FEEDBACK) else {
        return (random_palette(PALETTE_SIZE), None);
    };

    let mut best: Option<(Vec<String>, f64)> = None;
    for _ in 0..GENERATE_CANDIDATES {
        let colors = random_palette(PALETTE_SIZE);
        let proba = model.predict(&palette_features(&colors));
        if best.as_ref().is_none_or(|(_, current)| proba > *current) {
            best = Some((colors, proba));
        }
    }

    match best {
        Some((colors, proba)) => (colors, Some(proba)),
        None => (random_palette(PALETTE_SIZE), None),
    }
}

fn score(model: Option<&LikeModel>, samples: usize, colors: &[String]) -> Option<f64> {
    if samples < MIN_FEEDBACK {
        return None;
    }
    Some(model?.predict(&palette_features(colors)))
}

fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_covers_common_image_extensions() {
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("b.JPG"), "image/jpeg");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }

    #[test]
    fn candidate_without_model_has_no_score() {
        let (colors, proba) = pick_candidate(None, 100);
        assert_eq!(colors.len(), PALETTE_SIZE);
        assert!(proba.is_none());
    }

    #[test]
    fn candidate_with_sparse_feedback_has_no_score() {
        let votes: Vec<FeedbackRecord> = (0..4)
            .map(|i| FeedbackRecord {
                palette_id: i,
                liked: i % 2 == 0,
                features: vec![if i % 2 == 0 { 0.9 } else { 0.1 }; crate::models::FEATURE_COUNT],
            })
            .collect();
        let model = LikeModel::fit(&votes).expect("trainable");
        let (_, proba) = pick_candidate(Some(&model), MIN_FEEDBACK - 1);
        assert!(proba.is_none());
        let (_, proba) = pick_candidate(Some(&model), MIN_FEEDBACK);
        assert!(proba.is_some());
    }
}
