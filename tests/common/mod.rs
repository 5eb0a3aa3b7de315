// Each test binary compiles this module separately and uses a different
// subset of the helpers.
#![allow(dead_code)]

use memnav::error::Result;
use memnav::robot::RobotLink;
use std::collections::{HashMap, VecDeque};

/// Everything the core sends over the wire, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Connect,
    Disconnect,
    Move {
        left: i32,
        right: i32,
        duration_s: f64,
    },
    Stop,
    Wait(f64),
    ReadSensors,
}

/// Test double for the actuation & sensing service.
///
/// Hands out front-sensor readings from a scripted trace, one per read; once
/// the trace runs dry the last value repeats. Waits are recorded, never
/// slept.
pub struct ScriptedRobot {
    readings: VecDeque<f64>,
    last_reading: f64,
    empty_sweeps: bool,
    pub commands: Vec<Command>,
}

impl ScriptedRobot {
    pub fn new(trace: &[f64]) -> Self {
        Self {
            readings: trace.iter().copied().collect(),
            last_reading: trace.last().copied().unwrap_or(0.0),
            empty_sweeps: false,
            commands: Vec::new(),
        }
    }

    /// A robot whose sensor sweeps come back empty (no obstacle policy).
    pub fn with_empty_sweeps() -> Self {
        Self {
            readings: VecDeque::new(),
            last_reading: 0.0,
            empty_sweeps: true,
            commands: Vec::new(),
        }
    }

    pub fn moves(&self) -> Vec<(i32, i32, f64)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Move {
                    left,
                    right,
                    duration_s,
                } => Some((*left, *right, *duration_s)),
                _ => None,
            })
            .collect()
    }

    /// Commands issued before the first stop, i.e. the gene-execution window.
    pub fn commands_before_first_stop(&self) -> &[Command] {
        let cut = self
            .commands
            .iter()
            .position(|c| *c == Command::Stop)
            .unwrap_or(self.commands.len());
        &self.commands[..cut]
    }
}

impl RobotLink for ScriptedRobot {
    fn connect(&mut self) -> Result<()> {
        self.commands.push(Command::Connect);
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        self.commands.push(Command::Disconnect);
        Ok(())
    }

    fn read_ir_sensors(&mut self) -> Result<HashMap<String, f64>> {
        self.commands.push(Command::ReadSensors);
        if self.empty_sweeps {
            return Ok(HashMap::new());
        }
        let value = match self.readings.pop_front() {
            Some(v) => {
                self.last_reading = v;
                v
            }
            None => self.last_reading,
        };
        Ok(HashMap::from([("Front-C".to_string(), value)]))
    }

    fn move_wheels_timed(&mut self, left_speed: i32, right_speed: i32, duration_s: f64) -> Result<()> {
        self.commands.push(Command::Move {
            left: left_speed,
            right: right_speed,
            duration_s,
        });
        Ok(())
    }

    fn stop_motors(&mut self) -> Result<()> {
        self.commands.push(Command::Stop);
        Ok(())
    }

    fn wait(&mut self, seconds: f64) {
        self.commands.push(Command::Wait(seconds));
    }
}
