use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{Metadata, Profile, ProfileError, Sample};

/// A profile read from one source, with whatever metadata came along.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Loaded {
    pub profile: Profile,
    pub metadata: Metadata,
}

/// Result of probing a single candidate file.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadOutcome {
    Found(Loaded),
    Absent,
    Malformed(String),
}

impl From<Result<Loaded, ProfileError>> for LoadOutcome {
    fn from(result: Result<Loaded, ProfileError>) -> Self {
        match result {
            Ok(loaded) => LoadOutcome::Found(loaded),
            Err(err) if err.is_not_found() => LoadOutcome::Absent,
            Err(err) => LoadOutcome::Malformed(err.to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    Export,
    Table,
    Synthetic,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticParams {
    pub count: usize,
    pub start: f64,
    pub end: f64,
    pub noise_std: f64,
}

impl Default for SyntheticParams {
    fn default() -> Self {
        Self {
            count: 100,
            start: 0.0,
            end: 1000.0,
            noise_std: 5.0,
        }
    }
}

/// Ordered candidate locations probed by [`resolve`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub export_candidates: Vec<PathBuf>,
    pub table_candidates: Vec<PathBuf>,
    pub synthetic: SyntheticParams,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            export_candidates: vec![
                PathBuf::from("./elevation_data/elevation_profile.json"),
                PathBuf::from("./elevation_profile.json"),
                PathBuf::from("elevation_profile.json"),
            ],
            table_candidates: vec![
                PathBuf::from("./elevation_data/elevation_profile.csv"),
                PathBuf::from("./elevation_profile.csv"),
                PathBuf::from("elevation_profile.csv"),
            ],
            synthetic: SyntheticParams::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Resolved {
    pub kind: SourceKind,
    pub path: Option<PathBuf>,
    pub loaded: Loaded,
}

#[derive(Deserialize)]
struct ExportDocument {
    #[serde(rename = "elevationProfile")]
    elevation_profile: Option<Vec<(f64, Option<f64>)>>,
    #[serde(default)]
    metadata: Option<Metadata>,
}

#[derive(Deserialize)]
struct TableRow {
    distance: f64,
    #[serde(default)]
    elevation: Option<f64>,
}

/// Parse the structured export: `{"elevationProfile": [[d, e], ...], "metadata": {...}}`.
pub fn parse_export(text: &str) -> Result<Loaded, ProfileError> {
    let doc: ExportDocument = serde_json::from_str(text)?;
    let pairs = doc
        .elevation_profile
        .ok_or_else(|| ProfileError::MissingField("elevationProfile".into()))?;
    Ok(Loaded {
        profile: pairs.into_iter().map(Sample::from).collect(),
        metadata: doc.metadata.unwrap_or_default(),
    })
}

/// Parse a bare JSON array of `[distance, elevation]` pairs.
pub fn parse_pairs(text: &str) -> Result<Profile, ProfileError> {
    let pairs: Vec<(f64, Option<f64>)> = serde_json::from_str(text)?;
    Ok(pairs.into_iter().map(Sample::from).collect())
}

/// Parse a CSV table with `distance` and `elevation` header columns.
pub fn parse_table<R: io::Read>(reader: R) -> Result<Profile, ProfileError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut samples = Vec::new();
    for row in reader.deserialize() {
        let row: TableRow = row?;
        samples.push(match row.elevation {
            Some(e) => Sample::new(row.distance, e),
            None => Sample::missing(row.distance),
        });
    }
    Ok(Profile::new(samples))
}

fn read_export(path: &Path) -> Result<Loaded, ProfileError> {
    let text = fs::read_to_string(path)?;
    parse_export(&text)
}

fn read_pairs(path: &Path) -> Result<Loaded, ProfileError> {
    let text = fs::read_to_string(path)?;
    Ok(Loaded {
        profile: parse_pairs(&text)?,
        metadata: Metadata::default(),
    })
}

fn read_table(path: &Path) -> Result<Loaded, ProfileError> {
    let file = fs::File::open(path)?;
    Ok(Loaded {
        profile: parse_table(file)?,
        metadata: Metadata::default(),
    })
}

pub fn load_export(path: &Path) -> LoadOutcome {
    read_export(path).into()
}

pub fn load_pairs(path: &Path) -> LoadOutcome {
    read_pairs(path).into()
}

pub fn load_table(path: &Path) -> LoadOutcome {
    read_table(path).into()
}

/// Load a single file, choosing the parser from its extension.
///
/// `.json` files are read as a structured export first and as a bare pair
/// array second; `.csv` files as a table.
pub fn load_path(path: &Path) -> Result<Loaded, ProfileError> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "json" => {
            let text = fs::read_to_string(path)?;
            match parse_export(&text) {
                Ok(loaded) => Ok(loaded),
                Err(export_err) => parse_pairs(&text)
                    .map(|profile| Loaded {
                        profile,
                        metadata: Metadata::default(),
                    })
                    .map_err(|_| export_err),
            }
        }
        "csv" => read_table(path),
        _ => Err(ProfileError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Mountain-like profile: two sinusoids plus Gaussian noise on evenly spaced distances.
pub fn synthesize<R: Rng + ?Sized>(params: &SyntheticParams, rng: &mut R) -> Profile {
    let noise = match Normal::new(0.0, params.noise_std.abs()) {
        Ok(normal) => Some(normal),
        Err(err) => {
            warn!("Ignoring noise_std {}: {}", params.noise_std, err);
            None
        }
    };
    let step = if params.count > 1 {
        (params.end - params.start) / (params.count - 1) as f64
    } else {
        0.0
    };
    (0..params.count)
        .map(|i| {
            let d = params.start + step * i as f64;
            let jitter = noise.as_ref().map_or(0.0, |n| n.sample(rng));
            Sample::new(
                d,
                100.0 + 50.0 * (d / 200.0).sin() + 20.0 * (d / 50.0).sin() + jitter,
            )
        })
        .collect()
}

fn probe(
    candidates: &[PathBuf],
    kind: SourceKind,
    load: fn(&Path) -> LoadOutcome,
) -> Option<Resolved> {
    for path in candidates {
        debug!("Trying to load: {}", path.display());
        match load(path) {
            LoadOutcome::Found(loaded) => {
                info!(
                    "Loaded elevation data from {} ({} points)",
                    path.display(),
                    loaded.profile.len()
                );
                return Some(Resolved {
                    kind,
                    path: Some(path.clone()),
                    loaded,
                });
            }
            LoadOutcome::Absent => debug!("Not found: {}", path.display()),
            LoadOutcome::Malformed(reason) => {
                warn!("Error loading {}: {}", path.display(), reason)
            }
        }
    }
    None
}

/// Pick the first usable source: export candidates, then tables, then synthetic data.
pub fn resolve<R: Rng + ?Sized>(config: &SourceConfig, rng: &mut R) -> Resolved {
    if let Some(found) = probe(&config.export_candidates, SourceKind::Export, load_export) {
        return found;
    }
    if let Some(found) = probe(&config.table_candidates, SourceKind::Table, load_table) {
        return found;
    }
    info!("No elevation data files found; generating sample data");
    Resolved {
        kind: SourceKind::Synthetic,
        path: None,
        loaded: Loaded {
            profile: synthesize(&config.synthetic, rng),
            metadata: Metadata::default(),
        },
    }
}
