pub mod ecb;
pub mod sdmx_csv;

pub use ecb::EcbProvider;
