mod noise;
mod scan;

pub use noise::{DropoutConfig, GaussianNoiseConfig, ScanNoiseConfig, SpikeConfig, apply_noise};
pub use scan::{
    ROOM_HALF_DEPTH, ROOM_HALF_WIDTH, clean_scan, generate_scans, random_stream, room_range,
};
