pub mod link;
pub mod remote;
pub mod sensors;

pub use link::RobotLink;
pub use remote::RemoteRobot;
pub use sensors::{probe_front, ProximityBand, SENSOR_CRITICAL, SENSOR_SAFE, SENSOR_WARNING};
