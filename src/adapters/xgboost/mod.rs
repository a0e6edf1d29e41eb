//! XGBoost adapter: Implementation of FloodModel over an XGBoost JSON export.
//!
//! Reads the document written by `Booster.save_model("*.json")` and evaluates
//! the tree ensemble directly. Only the `gbtree` booster with regression or
//! logistic objectives is supported.
//!
//! # Integrity
//!
//! If a `<model>.sha256` file sits next to the model, the SHA-256 of the
//! model bytes must match its first token (the `sha256sum` format).
//!
//! # Feature matching
//!
//! Columns are bound by name at load time. The export must list exactly the
//! twenty form features; their order in the file is irrelevant.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::domain::{FeatureKey, FeatureVector, FEATURE_COUNT};
use crate::ports::{FloodModel, ModelError};

#[derive(Debug, Deserialize)]
struct RawModel {
    learner: RawLearner,
}

#[derive(Debug, Deserialize)]
struct RawLearner {
    #[serde(default)]
    feature_names: Vec<String>,
    learner_model_param: RawModelParam,
    objective: RawObjective,
    gradient_booster: RawBooster,
}

#[derive(Debug, Deserialize)]
struct RawModelParam {
    base_score: NumberOrString,
}

#[derive(Debug, Deserialize)]
struct RawObjective {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawBooster {
    name: String,
    model: RawTrees,
}

#[derive(Debug, Deserialize)]
struct RawTrees {
    trees: Vec<RawTree>,
}

#[derive(Debug, Deserialize)]
struct RawTree {
    left_children: Vec<i64>,
    right_children: Vec<i64>,
    split_indices: Vec<i64>,
    split_conditions: Vec<f64>,
    #[serde(default)]
    default_left: Vec<Flag>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

/// Older exports write `default_left` as 0/1, newer ones as booleans.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

impl Flag {
    fn is_set(self) -> bool {
        match self {
            Self::Bool(b) => b,
            Self::Int(i) => i != 0,
        }
    }
}

/// Output transform applied to the summed margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Regression objectives: the margin is the prediction.
    Identity,
    /// Logistic objectives: the margin goes through a sigmoid.
    Logistic,
}

impl Objective {
    fn from_name(name: &str) -> Result<Self, ModelError> {
        match name {
            "reg:squarederror" | "reg:linear" | "reg:absoluteerror" | "reg:pseudohubererror" => {
                Ok(Self::Identity)
            }
            "reg:logistic" | "binary:logistic" => Ok(Self::Logistic),
            other => Err(ModelError::UnsupportedObjective(other.to_string())),
        }
    }

    /// `base_score` is stored in output space; convert it to a margin.
    fn base_margin(self, base_score: f64) -> Result<f64, ModelError> {
        match self {
            Self::Identity => Ok(base_score),
            Self::Logistic => {
                if !(base_score > 0.0 && base_score < 1.0) {
                    return Err(ModelError::Malformed(format!(
                        "logistic base_score {base_score} must be in (0, 1)"
                    )));
                }
                Ok((base_score / (1.0 - base_score)).ln())
            }
        }
    }

    fn transform(self, margin: f64) -> f64 {
        match self {
            Self::Identity => margin,
            Self::Logistic => 1.0 / (1.0 + (-margin).exp()),
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Split {
        column: usize,
        threshold: f64,
        left: usize,
        right: usize,
        default_left: bool,
    },
    Leaf(f64),
}

/// Flat node array; every child index is greater than its parent's.
#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn from_raw(id: usize, raw: &RawTree, n_columns: usize) -> Result<Self, ModelError> {
        let n = raw.left_children.len();
        let malformed = |msg: String| ModelError::Malformed(format!("tree {id}: {msg}"));

        if n == 0 {
            return Err(malformed("no nodes".into()));
        }
        if raw.right_children.len() != n
            || raw.split_indices.len() != n
            || raw.split_conditions.len() != n
            || (!raw.default_left.is_empty() && raw.default_left.len() != n)
        {
            return Err(malformed("node array lengths differ".into()));
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let (l, r) = (raw.left_children[i], raw.right_children[i]);
            if l == -1 {
                if r != -1 {
                    return Err(malformed(format!("node {i} has only a right child")));
                }
                nodes.push(Node::Leaf(raw.split_conditions[i]));
                continue;
            }

            let child = |c: i64| -> Result<usize, ModelError> {
                usize::try_from(c)
                    .ok()
                    .filter(|&c| c > i && c < n)
                    .ok_or_else(|| malformed(format!("node {i} has invalid child {c}")))
            };
            let column = usize::try_from(raw.split_indices[i])
                .ok()
                .filter(|&c| c < n_columns)
                .ok_or_else(|| {
                    malformed(format!(
                        "node {i} splits on unknown column {}",
                        raw.split_indices[i]
                    ))
                })?;

            nodes.push(Node::Split {
                column,
                threshold: raw.split_conditions[i],
                left: child(l)?,
                right: child(r)?,
                default_left: raw.default_left.get(i).is_some_and(|f| f.is_set()),
            });
        }

        Ok(Self { nodes })
    }

    fn leaf_value(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf(value) => return *value,
                Node::Split {
                    column,
                    threshold,
                    left,
                    right,
                    default_left,
                } => {
                    let x = row[*column];
                    idx = if x.is_nan() {
                        if *default_left {
                            *left
                        } else {
                            *right
                        }
                    } else if x < *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Gradient-boosted tree ensemble loaded from an XGBoost JSON export.
#[derive(Debug, Clone)]
pub struct XgboostModel {
    objective: Objective,
    objective_name: String,
    base_margin: f64,
    /// Form feature feeding each model column.
    columns: Vec<FeatureKey>,
    trees: Vec<Tree>,
}

impl XgboostModel {
    /// Load and validate a model file.
    ///
    /// # Errors
    /// Returns `ModelError::NotFound` if the file does not exist, and other
    /// variants if it is unreadable, corrupt or incompatible with the form.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.is_file() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }

        let bytes = std::fs::read(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        verify_checksum(path, &bytes)?;

        let model = Self::from_slice(&bytes)?;

        tracing::info!(
            "Loaded model from {:?} (objective={}, trees={}, base_margin={})",
            path,
            model.objective_name,
            model.trees.len(),
            model.base_margin
        );
        Ok(model)
    }

    /// Parse a model from JSON bytes.
    ///
    /// # Errors
    /// Returns error if the document is not a usable model.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let raw: RawModel =
            serde_json::from_slice(bytes).map_err(|e| ModelError::Malformed(e.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawModel) -> Result<Self, ModelError> {
        let learner = raw.learner;

        if learner.gradient_booster.name != "gbtree" {
            return Err(ModelError::Malformed(format!(
                "unsupported booster {:?} (expected gbtree)",
                learner.gradient_booster.name
            )));
        }

        let objective = Objective::from_name(&learner.objective.name)?;
        let base_score = parse_base_score(&learner.learner_model_param.base_score)?;
        let base_margin = objective.base_margin(base_score)?;
        let columns = bind_columns(&learner.feature_names)?;

        let raw_trees = &learner.gradient_booster.model.trees;
        if raw_trees.is_empty() {
            return Err(ModelError::Malformed("model contains no trees".into()));
        }
        let trees = raw_trees
            .iter()
            .enumerate()
            .map(|(id, t)| Tree::from_raw(id, t, columns.len()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            objective,
            objective_name: learner.objective.name,
            base_margin,
            columns,
            trees,
        })
    }

    #[must_use]
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    #[must_use]
    pub fn objective(&self) -> Objective {
        self.objective
    }
}

impl FloodModel for XgboostModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let row: Vec<f64> = self
            .columns
            .iter()
            .map(|&key| f64::from(features.get(key)))
            .collect();

        let margin = self.base_margin + self.trees.iter().map(|t| t.leaf_value(&row)).sum::<f64>();
        let output = self.objective.transform(margin);

        if !output.is_finite() {
            return Err(ModelError::NonFinite(output));
        }
        Ok(output)
    }

    fn summary(&self) -> String {
        format!(
            "Powered by XGBoost | {} trees | {}",
            self.trees.len(),
            self.objective_name
        )
    }
}

/// `base_score` is written as `"5E-1"` by 1.x/2.x and `"[5E-1]"` by 3.x.
fn parse_base_score(value: &NumberOrString) -> Result<f64, ModelError> {
    match value {
        NumberOrString::Number(n) => Ok(*n),
        NumberOrString::String(s) => {
            let trimmed = s.trim().trim_start_matches('[').trim_end_matches(']').trim();
            trimmed
                .parse::<f64>()
                .map_err(|_| ModelError::Malformed(format!("invalid base_score {s:?}")))
        }
    }
}

fn bind_columns(names: &[String]) -> Result<Vec<FeatureKey>, ModelError> {
    if names.is_empty() {
        return Err(ModelError::FeatureMismatch(
            "model carries no feature names".into(),
        ));
    }
    if names.len() != FEATURE_COUNT {
        return Err(ModelError::FeatureMismatch(format!(
            "expected {FEATURE_COUNT} features, model has {}",
            names.len()
        )));
    }

    let mut seen = [false; FEATURE_COUNT];
    let mut columns = Vec::with_capacity(FEATURE_COUNT);
    for name in names {
        let key = FeatureKey::from_name(name)
            .ok_or_else(|| ModelError::FeatureMismatch(format!("unknown feature {name:?}")))?;
        if std::mem::replace(&mut seen[key.index()], true) {
            return Err(ModelError::FeatureMismatch(format!(
                "duplicate feature {name:?}"
            )));
        }
        columns.push(key);
    }
    Ok(columns)
}

fn checksum_path(path: &Path) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(".sha256");
    PathBuf::from(s)
}

fn sha256_hex_bytes(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

fn verify_checksum(path: &Path, bytes: &[u8]) -> Result<(), ModelError> {
    let sidecar = checksum_path(path);
    if !sidecar.exists() {
        tracing::debug!("No checksum file at {:?}; skipping integrity check", sidecar);
        return Ok(());
    }

    let content = std::fs::read_to_string(&sidecar).map_err(|source| ModelError::Io {
        path: sidecar.clone(),
        source,
    })?;
    let expected = content
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    let actual = sha256_hex_bytes(bytes);

    if expected != actual {
        return Err(ModelError::ChecksumMismatch { expected, actual });
    }
    tracing::debug!("Model checksum verified ({})", actual);
    Ok(())
}
