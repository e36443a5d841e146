#[cfg(feature = "live")]
pub mod capture;
pub mod decoder;
pub mod encoder;
#[cfg(feature = "live")]
pub mod playback;
pub mod resample;
