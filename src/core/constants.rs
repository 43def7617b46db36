//! Core constants for the permit map.
//! Keeping them in a single place makes it easier to tweak viewer-wide magic numbers.

/// Web Mercator sphere radius in meters (EPSG:3857).
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Highest projected y the camera extent may reach before it is pushed back.
pub const EXTENT_Y_MAX: f64 = 20_000_000.0;

/// Lowest projected y the camera extent may reach before it is pushed back.
pub const EXTENT_Y_MIN: f64 = -20_000_000.0;

/// Initial view center (New Mexico).
pub const DEFAULT_CENTER: (f64, f64) = (34.3727, -105.0324);

/// Initial zoom level.
pub const DEFAULT_ZOOM: f64 = 6.0;

/// The view never zooms out further than this.
pub const DEFAULT_MIN_ZOOM: f64 = 2.0;

/// Background shown behind the basemap.
pub const DEFAULT_BACKGROUND: [u8; 3] = [29, 34, 36];

/// Where the permit CSV is served from.
pub const DEFAULT_SOURCE: &str = "/assets/Methane_Permits.csv";

/// Where the engine looks for its static assets.
pub const DEFAULT_ASSETS_PATH: &str = "./assets";

/// Number of positional columns a permit row carries.
pub const RECORD_COLUMNS: usize = 10;
