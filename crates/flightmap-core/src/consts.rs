/// Smallest map scale denominator a random viewpoint may use (1:50,000).
pub const MIN_RANDOM_SCALE: f64 = 50_000.0;

/// Largest map scale denominator a random viewpoint may use (1:50,000,000).
pub const MAX_RANDOM_SCALE: f64 = 50_000_000.0;

/// Scale of the "pull back" phase before jumping to a random viewpoint.
pub const RANDOM_ZOOM_OUT_SCALE: f64 = 50_000_000.0;

/// Pull-back scale before zooming to a flight path (global view).
pub const FLIGHT_PATH_ZOOM_OUT_SCALE: f64 = 50_000_000.0;

/// Pull-back scale before zooming to a coverage overlay (regional view).
pub const COVERAGE_ZOOM_OUT_SCALE: f64 = 2_000_000.0;

/// Duration of each phase of a two-phase viewpoint transition, in milliseconds.
pub const TRANSITION_MILLIS: u64 = 1_000;

/// File name of the exported map image.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "MyImage.png";

/// Name of the application directory under the platform config/cache dirs.
pub const APP_DIR_NAME: &str = "flightmap";

/// Screen resolution assumed when converting between scale and ground resolution.
pub const SCREEN_DPI: f64 = 96.0;

/// Metres per inch.
pub const METERS_PER_INCH: f64 = 0.0254;

/// WGS84 semi-major axis used by Web Mercator, in metres.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Latitude limit of the Web Mercator projection, in degrees.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

/// Fraction of the view kept free around an extent when zooming to it.
pub const EXTENT_PADDING_FRACTION: f64 = 0.1;

/// Scale used when zooming to an extent that has no area (a single point).
pub const POINT_EXTENT_SCALE: f64 = 50_000.0;

/// Largest scale (most zoomed in) reachable by fitting an extent.
pub const MIN_VIEW_SCALE: f64 = 1_000.0;

/// Finest graticule spacing the basemap will draw, in degrees.
pub const MIN_GRATICULE_SPACING_DEG: f64 = 0.1;

/// Bytes per pixel of BGRA8888 / RGBA8888 buffers.
pub const BYTES_PER_PIXEL: usize = 4;
