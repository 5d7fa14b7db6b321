//! A tile provider that only understands the tile set manifest.
//!
//! [`ManifestProvider`] reads a 3D Tiles `tileset.json`, derives the root
//! bounding sphere from its bounding volume and announces the load through
//! the usual [`TileEvent`]s. It streams no geometry; real providers plug in
//! through the same [`TileStreamProvider`] trait.

use std::collections::HashMap;
use std::sync::mpsc::Sender;

use glam::{DMat4, DVec3, Vec3};
use serde::Deserialize;

use super::{BoundingSphere, GroupId, TileEvent, TileParams, TileStreamProvider};
use crate::camera::{CameraKind, CameraView, Resolution};
use crate::error::TilesError;

/// Fallback manifest location used by the viewer binary.
pub const DEFAULT_TILESET: &str = "./3dtiles2/tileset.json";

const WGS84_A: f64 = 6_378_137.0;
const WGS84_E2: f64 = 6.694_379_990_14e-3;

/// Root of a `tileset.json` document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TilesetManifest {
    /// Format metadata.
    pub asset: Asset,
    /// Error, in meters, introduced if the tile set is not rendered.
    #[serde(default)]
    pub geometric_error: f64,
    /// Root tile.
    pub root: Tile,
}

/// `asset` block of a manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    /// 3D Tiles specification version, e.g. `"1.0"`.
    pub version: String,
}

/// One node of the tile hierarchy.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    /// Volume enclosing this tile and its descendants.
    pub bounding_volume: BoundingVolume,
    /// Column-major local-to-parent transform.
    #[serde(default)]
    pub transform: Option<[f64; 16]>,
    /// Error, in meters, introduced if this tile is not refined.
    #[serde(default)]
    pub geometric_error: f64,
    /// Renderable payload, if any.
    #[serde(default)]
    pub content: Option<TileContent>,
    /// Child tiles.
    #[serde(default)]
    pub children: Vec<Tile>,
}

/// `content` block of a tile.
#[derive(Debug, Clone, Deserialize)]
pub struct TileContent {
    /// Content location relative to the manifest.
    pub uri: String,
}

/// Exactly one of the three bounding volume encodings.
#[derive(Debug, Clone, Deserialize)]
pub struct BoundingVolume {
    /// Oriented box: center followed by three half-axis vectors.
    #[serde(rename = "box", default)]
    pub oriented_box: Option<[f64; 12]>,
    /// Sphere: center followed by radius.
    #[serde(default)]
    pub sphere: Option<[f64; 4]>,
    /// Geographic region: west, south, east, north (radians), min and max
    /// height (meters) on the WGS84 ellipsoid.
    #[serde(default)]
    pub region: Option<[f64; 6]>,
}

impl BoundingVolume {
    /// Enclosing sphere in the tile's local frame.
    #[must_use]
    pub fn bounding_sphere(&self) -> Option<(DVec3, f64)> {
        if let Some(s) = self.sphere {
            return Some((DVec3::new(s[0], s[1], s[2]), s[3]));
        }
        if let Some(b) = self.oriented_box {
            let center = DVec3::new(b[0], b[1], b[2]);
            let x = DVec3::new(b[3], b[4], b[5]);
            let y = DVec3::new(b[6], b[7], b[8]);
            let z = DVec3::new(b[9], b[10], b[11]);
            let radius =
                (x.length_squared() + y.length_squared() + z.length_squared())
                    .sqrt();
            return Some((center, radius));
        }
        self.region.map(region_sphere)
    }
}

/// Sphere around a WGS84 region, sampled on a 3x3 lon/lat grid at both
/// heights so the ellipsoid's bulge is covered.
fn region_sphere(region: [f64; 6]) -> (DVec3, f64) {
    let [west, south, east, north, min_h, max_h] = region;
    let mut points = Vec::with_capacity(18);
    for i in 0..3 {
        let lon = west + (east - west) * f64::from(i) * 0.5;
        for j in 0..3 {
            let lat = south + (north - south) * f64::from(j) * 0.5;
            points.push(geodetic_to_ecef(lon, lat, min_h));
            points.push(geodetic_to_ecef(lon, lat, max_h));
        }
    }
    let (min, max) = points.iter().fold(
        (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
        |(lo, hi), p| (lo.min(*p), hi.max(*p)),
    );
    let center = (min + max) * 0.5;
    let radius = points
        .iter()
        .map(|p| p.distance(center))
        .fold(0.0, f64::max);
    (center, radius)
}

fn geodetic_to_ecef(lon: f64, lat: f64, height: f64) -> DVec3 {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    let n = WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
    DVec3::new(
        (n + height) * cos_lat * cos_lon,
        (n + height) * cos_lat * sin_lon,
        (n * (1.0 - WGS84_E2) + height) * sin_lat,
    )
}

impl TilesetManifest {
    /// Parse a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`TilesError::Manifest`] for malformed JSON or a root with
    /// no recognised bounding volume.
    pub fn parse(json: &str) -> Result<Self, TilesError> {
        let manifest: Self = serde_json::from_str(json)?;
        if manifest.root.bounding_volume.bounding_sphere().is_none() {
            return Err(TilesError::Manifest(
                "root tile has no box, sphere or region bounding volume".into(),
            ));
        }
        Ok(manifest)
    }

    /// Root bounding sphere with the root transform applied.
    #[must_use]
    pub fn root_sphere(&self) -> Option<BoundingSphere> {
        let (center, radius) = self.root.bounding_volume.bounding_sphere()?;
        let (center, radius) = match self.root.transform {
            Some(cols) => {
                let m = DMat4::from_cols_array(&cols);
                let scale = m
                    .x_axis
                    .truncate()
                    .length()
                    .max(m.y_axis.truncate().length())
                    .max(m.z_axis.truncate().length());
                (m.transform_point3(center), radius * scale)
            }
            None => (center, radius),
        };
        let sphere = BoundingSphere::new(center.as_vec3(), radius as f32);
        sphere.is_usable().then_some(sphere)
    }
}

/// Read manifest text from a local path or an `http(s)` URL.
///
/// # Errors
///
/// Returns [`TilesError::Io`] for unreadable files and
/// [`TilesError::Fetch`] for failed or unsupported remote requests.
pub fn read_manifest(location: &str) -> Result<String, TilesError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        return fetch_remote(location);
    }
    Ok(std::fs::read_to_string(location)?)
}

#[cfg(feature = "viewer")]
fn fetch_remote(url: &str) -> Result<String, TilesError> {
    log::info!("Fetching tileset manifest from {url}");
    ureq::get(url)
        .call()
        .map_err(|e| TilesError::Fetch(format!("{url}: {e}")))?
        .into_body()
        .read_to_string()
        .map_err(|e| TilesError::Fetch(format!("{url}: {e}")))
}

#[cfg(not(feature = "viewer"))]
fn fetch_remote(url: &str) -> Result<String, TilesError> {
    Err(TilesError::Fetch(format!(
        "{url}: remote manifests need the `viewer` feature"
    )))
}

enum LoadState {
    Loaded(TilesetManifest),
    Failed(String),
}

/// Provider backed by a single parsed manifest.
///
/// Load failures are not returned from the constructor; they surface as a
/// [`TileEvent::LoadError`] on the first update, like any other provider.
pub struct ManifestProvider {
    location: String,
    state: LoadState,
    announced: bool,
    cameras: Vec<CameraKind>,
    resolutions: HashMap<CameraKind, Resolution>,
    params: Option<TileParams>,
    root_translation: Vec3,
    subscribers: Vec<Sender<TileEvent>>,
}

impl ManifestProvider {
    /// Read and parse the manifest at `location`.
    #[must_use]
    pub fn open(location: &str) -> Self {
        log::info!("Loading tileset from: {location}");
        let state = match read_manifest(location)
            .and_then(|text| TilesetManifest::parse(&text))
        {
            Ok(manifest) => LoadState::Loaded(manifest),
            Err(e) => LoadState::Failed(e.to_string()),
        };
        Self::with_state(location, state)
    }

    /// Wrap an already parsed manifest.
    #[must_use]
    pub fn from_manifest(location: &str, manifest: TilesetManifest) -> Self {
        Self::with_state(location, LoadState::Loaded(manifest))
    }

    fn with_state(location: &str, state: LoadState) -> Self {
        Self {
            location: location.to_owned(),
            state,
            announced: false,
            cameras: Vec::new(),
            resolutions: HashMap::new(),
            params: None,
            root_translation: Vec3::ZERO,
            subscribers: Vec::new(),
        }
    }

    /// Where the manifest was read from.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The parsed manifest, if loading succeeded.
    #[must_use]
    pub fn manifest(&self) -> Option<&TilesetManifest> {
        match &self.state {
            LoadState::Loaded(m) => Some(m),
            LoadState::Failed(_) => None,
        }
    }

    /// Cameras currently bound for tile selection.
    #[must_use]
    pub fn bound_cameras(&self) -> &[CameraKind] {
        &self.cameras
    }

    /// Resolution last set for `camera`.
    #[must_use]
    pub fn resolution(&self, camera: CameraKind) -> Option<Resolution> {
        self.resolutions.get(&camera).copied()
    }

    /// Parameters received by the last `set_params`.
    #[must_use]
    pub fn params(&self) -> Option<&TileParams> {
        self.params.as_ref()
    }

    fn emit(&mut self, event: &TileEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl TileStreamProvider for ManifestProvider {
    fn bind_camera(&mut self, camera: CameraKind) {
        if !self.cameras.contains(&camera) {
            self.cameras.push(camera);
        }
    }

    fn unbind_camera(&mut self, camera: CameraKind) {
        self.cameras.retain(|c| *c != camera);
        let _ = self.resolutions.remove(&camera);
    }

    fn set_resolution(&mut self, camera: CameraKind, resolution: Resolution) {
        let _ = self.resolutions.insert(camera, resolution);
    }

    fn bounding_sphere(&self) -> Option<BoundingSphere> {
        let mut sphere = self.manifest()?.root_sphere()?;
        sphere.center += self.root_translation;
        Some(sphere)
    }

    fn subscribe(&mut self, sender: Sender<TileEvent>) {
        self.subscribers.push(sender);
    }

    fn set_params(&mut self, params: &TileParams) {
        self.params = Some(params.clone());
    }

    fn root_group(&self) -> GroupId {
        GroupId(0)
    }

    fn set_root_translation(&mut self, translation: Vec3) {
        self.root_translation = translation;
    }

    fn update(&mut self, view: &CameraView) {
        if !self.cameras.contains(&view.kind) {
            log::warn!("update with unbound camera {:?}", view.kind);
            return;
        }
        if self.announced || self.subscribers.is_empty() {
            return;
        }
        self.announced = true;
        let event = match &self.state {
            LoadState::Loaded(_) => TileEvent::TileSetLoaded,
            LoadState::Failed(msg) => {
                TileEvent::LoadError(format!("{}: {msg}", self.location))
            }
        };
        self.emit(&event);
    }
}
