use crate::model::LikeModel;
use crate::models::AppData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub uploads_dir: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub model: Arc<Mutex<Option<LikeModel>>>,
}

impl AppState {
    /// The model is rebuilt from the stored votes, so restarting the server
    /// keeps its predictions.
    pub fn new(data_path: PathBuf, uploads_dir: PathBuf, data: AppData) -> Self {
        let model = LikeModel::fit(&data.feedback);
        Self {
            data_path,
            uploads_dir,
            data: Arc::new(Mutex::new(data)),
            model: Arc::new(Mutex::new(model)),
        }
    }
}
