pub mod geojson;
pub mod ingest;
pub mod record;
pub mod source;
