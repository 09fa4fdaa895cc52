#![warn(clippy::pedantic)]
#![allow(clippy::missing_panics_doc, clippy::must_use_candidate)]

pub mod config;
pub mod device_log;
pub mod pacing;
pub mod playback;
pub mod remote;
mod session;
pub mod store;

pub use config::{ConfigError, PlaybackConfig};
pub use device_log::{DEVICE_LOG_CAPACITY, DeviceEvent, DeviceLog};
pub use pacing::{Pacer, Ticker, Unpaced};
pub use remote::{DetectionRequest, FaceDetector, RemoteSolver, SolveRequest};
pub use session::{ACCOUNT_KEY, Session, SessionError, VARIANT_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
