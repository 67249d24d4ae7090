use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Every palette in the app is exactly five colors.
pub const PALETTE_SIZE: usize = 5;
/// One normalized RGB triple per color.
pub const FEATURE_COUNT: usize = PALETTE_SIZE * 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteMethod {
    Random,
    Image,
    Harmony,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteRecord {
    pub id: u64,
    pub colors: Vec<String>,
    pub method: PaletteMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub dislikes: u64,
}

/// A single like/dislike vote, with the palette's feature vector frozen at
/// vote time so the model can be rebuilt from the store alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub palette_id: u64,
    pub liked: bool,
    pub features: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub next_id: u64,
    pub palettes: Vec<PaletteRecord>,
    pub feedback: Vec<FeedbackRecord>,
}

impl AppData {
    pub fn insert_palette(
        &mut self,
        colors: Vec<String>,
        method: PaletteMethod,
        image_path: Option<String>,
    ) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.palettes.push(PaletteRecord {
            id,
            colors,
            method,
            image_path,
            likes: 0,
            dislikes: 0,
        });
        id
    }

    pub fn palette_mut(&mut self, id: u64) -> Option<&mut PaletteRecord> {
        self.palettes.iter_mut().find(|palette| palette.id == id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaletteResponse {
    pub palette_id: u64,
    pub colors: Vec<String>,
    pub proba: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub feedback: String,
    pub palette_id: u64,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub palette_id: u64,
    pub colors: Vec<String>,
    pub image: String,
    pub proba: UploadProba,
}

/// The upload endpoint reports either a numeric score or the literal marker
/// `"need_feedback"` when the model cannot score yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UploadProba {
    Score(f64),
    NeedFeedback,
}

impl Serialize for UploadProba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            UploadProba::Score(proba) => serializer.serialize_f64(*proba),
            UploadProba::NeedFeedback => serializer.serialize_str("need_feedback"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LikedPalette {
    pub id: u64,
    pub colors: Vec<String>,
    pub likes: u64,
    pub dislikes: u64,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HarmonyRequest {
    pub base_color: String,
    pub scheme: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_palette_assigns_sequential_ids() {
        let mut data = AppData::default();
        let first = data.insert_palette(vec!["#112233".into()], PaletteMethod::Random, None);
        let second = data.insert_palette(vec!["#445566".into()], PaletteMethod::Harmony, None);
        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert!(data.palette_mut(first).is_some());
        assert!(data.palette_mut(99).is_none());
    }

    #[test]
    fn upload_proba_serializes_both_shapes() {
        let score = serde_json::to_value(UploadProba::Score(0.25)).unwrap();
        assert_eq!(score, serde_json::json!(0.25));
        let marker = serde_json::to_value(UploadProba::NeedFeedback).unwrap();
        assert_eq!(marker, serde_json::json!("need_feedback"));
    }
}
