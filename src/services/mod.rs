pub mod asset_encoder;
pub mod sample_fetcher;
