//! Inference Engine - ONNX Runtime Integration
//!
//! Loads the exported patch-risk classifier and runs batch probability
//! prediction over the fixed feature order.
//! The scorer only sees the `RiskClassifier` trait, so tests swap in a stub.

use std::fs;
use std::path::{Path, PathBuf};

use ndarray::ArrayView2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};

use crate::constants::APP_NAME;
use crate::logic::config::GateConfig;
use crate::logic::error::{GateError, GateResult};

/// Output name used by CatBoost / skl2onnx classifier exports
pub const PROBABILITY_OUTPUT: &str = "probabilities";

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Model metadata
#[derive(Debug, Clone)]
pub struct ModelMetadata {
    pub model_path: String,
    pub sha256: String,
    pub output_name: String,
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub struct InferenceError(pub String);

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InferenceError: {}", self.0)
    }
}

impl std::error::Error for InferenceError {}

impl From<InferenceError> for GateError {
    fn from(e: InferenceError) -> Self {
        GateError::ModelFailure(e.0)
    }
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Binary classifier exposing positive-class probabilities
pub trait RiskClassifier {
    /// Short description for logs (path, "stub", ...)
    fn name(&self) -> &str;

    /// SHA-256 of the artifact, if backed by one
    fn fingerprint(&self) -> Option<&str> {
        None
    }

    /// One probability in [0, 1] per row, in row order, at the model's f32 precision.
    /// Columns of `features` follow the configured feature order.
    fn predict_probability(&self, features: ArrayView2<'_, f32>) -> Result<Vec<f32>, InferenceError>;
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

pub struct OnnxClassifier {
    session: Mutex<Session>,
    metadata: ModelMetadata,
}

impl OnnxClassifier {
    /// Load ONNX model from file
    pub fn load(model_path: &Path) -> Result<Self, InferenceError> {
        log::info!("Loading model from {}", model_path.display());

        let model_bytes = fs::read(model_path).map_err(|e| {
            InferenceError(format!("Failed to read model {}: {}", model_path.display(), e))
        })?;
        let sha256 = sha256_hex(&model_bytes);

        let session = Session::builder()
            .map_err(|e| InferenceError(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError(format!("Failed to set optimization: {}", e)))?
            .commit_from_memory(&model_bytes)
            .map_err(|e| InferenceError(format!("Failed to load model: {}", e)))?;

        let input_name = session.inputs.first()
            .map(|i| i.name.clone())
            .ok_or_else(|| InferenceError("No input defined".to_string()))?;

        let output_name = session.outputs.iter()
            .find(|o| o.name == PROBABILITY_OUTPUT)
            .or_else(|| session.outputs.last())
            .map(|o| o.name.clone())
            .ok_or_else(|| InferenceError("No output defined".to_string()))?;

        log::info!(
            "Model loaded (sha256: {}, input: {}, output: {})",
            sha256, input_name, output_name
        );

        let metadata = ModelMetadata {
            model_path: model_path.display().to_string(),
            sha256,
            output_name,
        };

        Ok(Self { session: Mutex::new(session), metadata })
    }
}

impl RiskClassifier for OnnxClassifier {
    fn name(&self) -> &str {
        &self.metadata.model_path
    }

    fn fingerprint(&self) -> Option<&str> {
        Some(&self.metadata.sha256)
    }

    fn predict_probability(&self, features: ArrayView2<'_, f32>) -> Result<Vec<f32>, InferenceError> {
        let n_rows = features.nrows();
        if n_rows == 0 {
            return Ok(Vec::new());
        }

        let input_tensor = Value::from_array(features.to_owned())
            .map_err(|e| InferenceError(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError(format!("Inference failed: {}", e)))?;

        let output = outputs.get(&self.metadata.output_name)
            .ok_or_else(|| InferenceError(format!("No output '{}'", self.metadata.output_name)))?;

        let (shape, data) = output.try_extract_tensor::<f32>()
            .map_err(|e| InferenceError(format!("Extract error: {}", e)))?;
        let dims: Vec<i64> = shape.iter().copied().collect();

        positive_class_probabilities(&dims, data, n_rows)
    }
}

// ============================================================================
// OUTPUT DECODING
// ============================================================================

/// Pick the positive-class column out of a classifier output tensor.
///
/// Accepts `[rows, 2]` (column 1), `[rows, 1]` or `[rows]`.
pub fn positive_class_probabilities(
    dims: &[i64],
    data: &[f32],
    n_rows: usize,
) -> Result<Vec<f32>, InferenceError> {
    let rows = dims.first().copied().unwrap_or(-1);
    if rows != n_rows as i64 {
        return Err(InferenceError(format!(
            "Output has {} rows, expected {}", rows, n_rows
        )));
    }

    let (stride, column) = match dims {
        [_] | [_, 1] => (1usize, 0usize),
        [_, 2] => (2, 1),
        _ => {
            return Err(InferenceError(format!("Unsupported output shape {:?}", dims)));
        }
    };

    if data.len() != n_rows * stride {
        return Err(InferenceError(format!(
            "Output has {} values, expected {}", data.len(), n_rows * stride
        )));
    }

    data.chunks(stride)
        .enumerate()
        .map(|(row, chunk)| {
            let p = chunk[column];
            if p.is_finite() && (0.0..=1.0).contains(&p) {
                Ok(p)
            } else {
                Err(InferenceError(format!(
                    "Probability {} for row {} is outside [0, 1]", p, row + 1
                )))
            }
        })
        .collect()
}

// ============================================================================
// ARTIFACT LOOKUP
// ============================================================================

/// Fallback locations searched when the configured path is missing
pub fn fallback_model_paths(configured: &Path) -> Vec<PathBuf> {
    let Some(file_name) = configured.file_name() else {
        return Vec::new();
    };

    let mut paths = Vec::new();

    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        paths.push(exe_dir.join("models").join(file_name));
    }

    if let Some(data_dir) = dirs::data_local_dir() {
        paths.push(data_dir.join(APP_NAME).join("models").join(file_name));
    }

    paths
}

/// First existing path among the configured one and the fallbacks
pub fn resolve_model_path(configured: &Path, fallbacks: &[PathBuf]) -> GateResult<PathBuf> {
    if configured.is_file() {
        return Ok(configured.to_path_buf());
    }

    if let Some(local) = fallbacks.iter().find(|p| p.is_file()) {
        log::info!("Using local model path: {}", local.display());
        return Ok(local.clone());
    }

    let tried = fallbacks.first()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<no fallback>".to_string());

    Err(GateError::ModelFailure(format!(
        "Model file not found at {} or {}",
        configured.display(),
        tried
    )))
}

/// Resolve and load the configured classifier
pub fn load_classifier(config: &GateConfig) -> GateResult<Box<dyn RiskClassifier>> {
    let fallbacks = fallback_model_paths(&config.model_path);
    let path = resolve_model_path(&config.model_path, &fallbacks)?;
    let classifier = OnnxClassifier::load(&path)?;
    Ok(Box::new(classifier))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
