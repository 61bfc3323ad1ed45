pub mod geojson;
pub mod input;
pub mod options;
