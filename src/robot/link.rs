use crate::error::Result;
use std::collections::HashMap;

/// Contract for the robot actuation & sensing service.
///
/// The search core is a pure orchestration layer over this trait: it never
/// owns a wire protocol or a file format. A session brackets all other calls
/// with exactly one `connect` and one `disconnect`. Every motion command is
/// blocking (`move_wheels_timed` returns only after the configured duration
/// has elapsed), and callers are expected to `wait` around sensor reads and
/// commands so the service is never flooded.
pub trait RobotLink {
    fn connect(&mut self) -> Result<()>;

    fn disconnect(&mut self) -> Result<()>;

    /// Read the full infrared sweep as sensor-id -> proximity magnitude
    /// (higher = closer). May be empty, which callers treat as "no obstacle".
    fn read_ir_sensors(&mut self) -> Result<HashMap<String, f64>>;

    /// Command differential drive for `duration_s` seconds, blocking until
    /// the motion window has elapsed.
    fn move_wheels_timed(&mut self, left_speed: i32, right_speed: i32, duration_s: f64) -> Result<()>;

    /// Immediately halt actuation.
    fn stop_motors(&mut self) -> Result<()>;

    /// Settling delay between commands.
    fn wait(&mut self, seconds: f64);
}
