//! The four user actions, each run to completion against a [`MapEngine`].

use std::path::PathBuf;
use std::sync::Arc;

use rand::Rng;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::engine::MapEngine;
use crate::error::Result;
use crate::export::{default_output_path, save_png};
use crate::geo::GeoExtent;
use crate::layer::{KmlLayer, LayerId};
use crate::overlay::{OverlayKind, OverlaySlots};
use crate::picker::{default_cache_dir, stage_in_cache, FilePicker, PickRequest};
use crate::viewpoint::{random_viewpoint, Viewpoint};

/// Result of an action the user may back out of.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome<T> {
    Completed(T),
    Cancelled,
}

impl<T> Outcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(v) => Some(v),
            Outcome::Cancelled => None,
        }
    }
}

/// Summary of a freshly attached overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedOverlay {
    pub kind: OverlayKind,
    pub layer_id: LayerId,
    pub name: String,
    pub extent: Option<GeoExtent>,
    pub geometry_count: usize,
    /// Layer that previously occupied the slot.
    pub replaced: Option<LayerId>,
}

pub struct ViewController<E, P, R> {
    engine: E,
    picker: P,
    rng: R,
    config: AppConfig,
    overlays: OverlaySlots,
    cache_dir: PathBuf,
    output_path: Option<PathBuf>,
}

impl<E: MapEngine, P: FilePicker, R: Rng> ViewController<E, P, R> {
    pub fn new(engine: E, picker: P, rng: R, config: AppConfig) -> Self {
        Self {
            engine,
            picker,
            rng,
            config,
            overlays: OverlaySlots::new(),
            cache_dir: default_cache_dir(),
            output_path: None,
        }
    }

    pub fn with_cache_dir(mut self, dir: PathBuf) -> Self {
        self.cache_dir = dir;
        self
    }

    /// Write exports to `path` instead of the configured location.
    pub fn with_output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AppConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn overlays(&self) -> &OverlaySlots {
        &self.overlays
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn picker(&self) -> &P {
        &self.picker
    }

    pub fn output_path(&self) -> Result<PathBuf> {
        match &self.output_path {
            Some(path) => Ok(path.clone()),
            None => default_output_path(&self.config.export),
        }
    }

    /// Pull back to a wide view over a random point, then zoom in to it at
    /// a random scale.
    pub fn random_location(&mut self) -> Result<Viewpoint> {
        let vp_config = &self.config.viewpoint;
        let target = random_viewpoint(&mut self.rng, vp_config);
        let duration = vp_config.transition();
        let zoom_out = Viewpoint::center(target.target(), vp_config.zoom_out_scale);

        if let Viewpoint::Center { center, scale } = target {
            info!(lat = center.lat, lon = center.lon, scale, "Random viewpoint");
        }
        self.engine.set_viewpoint(&zoom_out, duration)?;
        self.engine.set_viewpoint(&target, duration)?;
        Ok(target)
    }

    /// Export the current view and write it as PNG. Returns where it went.
    pub fn save_image(&mut self) -> Result<PathBuf> {
        let buffer = self.engine.export_image()?;
        let path = self.output_path()?;
        save_png(&buffer, &path)?;
        info!(
            path = %path.display(),
            width = buffer.width(),
            height = buffer.height(),
            "Saved map image"
        );
        Ok(path)
    }

    pub fn load_flight_path(&mut self) -> Result<Outcome<LoadedOverlay>> {
        self.load_overlay(OverlayKind::FlightPath)
    }

    pub fn load_coverage(&mut self) -> Result<Outcome<LoadedOverlay>> {
        self.load_overlay(OverlayKind::Coverage)
    }

    /// Pick a KML file and show it in `kind`'s slot, replacing what was there,
    /// then zoom to it.
    ///
    /// Nothing changes when the user cancels or the file fails to load.
    pub fn load_overlay(&mut self, kind: OverlayKind) -> Result<Outcome<LoadedOverlay>> {
        let Some(picked) = self.picker.pick_file(&PickRequest::kml())? else {
            info!(kind = kind.label(), "File selection cancelled");
            return Ok(Outcome::Cancelled);
        };
        info!(kind = kind.label(), file = %picked.file_name, "Loading overlay");

        let staged = stage_in_cache(&picked, &self.cache_dir)?;
        let layer = Arc::new(KmlLayer::from_file(kind, &staged)?);

        let replaced = self.overlays.get(kind).map(|previous| previous.id);
        if let Some(previous) = replaced {
            if !self.engine.remove_layer(previous)? {
                warn!(id = %previous, "Previous overlay was not attached");
            }
        }
        if let Err(e) = self.engine.add_layer(Arc::clone(&layer)) {
            self.overlays.take(kind);
            return Err(e);
        }
        self.overlays.replace(Arc::clone(&layer));

        match layer.extent {
            Some(extent) => {
                let duration = self.config.overlays.transition();
                let zoom_out =
                    Viewpoint::center(extent.center(), kind.zoom_out_scale(&self.config.overlays));
                self.engine.set_viewpoint(&zoom_out, duration)?;
                self.engine.set_viewpoint(&Viewpoint::extent(extent), duration)?;
            }
            None => warn!(kind = kind.label(), name = %layer.name, "Overlay has no geometry"),
        }

        Ok(Outcome::Completed(LoadedOverlay {
            kind,
            layer_id: layer.id,
            name: layer.name.clone(),
            extent: layer.extent,
            geometry_count: layer.document.geometry_count(),
            replaced,
        }))
    }
}
