pub mod error;
pub mod consts;
pub mod config;
pub mod geo;
pub mod projection;
pub mod viewpoint;
pub mod animation;
pub mod kml;
pub mod layer;
pub mod overlay;
pub mod export;
pub mod picker;
pub mod engine;
pub mod controller;
