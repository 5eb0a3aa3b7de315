use crate::error::{MemnavError, Result};
use crate::robot::link::RobotLink;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, TcpStream};
use std::thread;
use std::time::Duration;

/// Blocking JSON-lines client for the remote robot simulator.
///
/// Each command is one JSON object per line:
/// `{"name": "MOVE-WHEELS", "parameters": {...}, "id": n}`, answered by
/// `{"id": n, "status": "ok"|"error", ...}`. The simulator acknowledges a
/// motion command when it starts; the client enforces the blocking contract
/// of [`RobotLink::move_wheels_timed`] by sleeping out the motion window
/// after the acknowledgement.
pub struct RemoteRobot {
    addr: String,
    stream: Option<TcpStream>,
    reader: Option<BufReader<TcpStream>>,
    next_id: u64,
}

#[derive(Serialize)]
struct WireRequest<'a> {
    name: &'a str,
    parameters: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct WireResponse {
    id: u64,
    status: String,
    #[serde(default)]
    values: HashMap<String, f64>,
    #[serde(default)]
    message: String,
}

impl RemoteRobot {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            addr: format!("{}:{}", host, port),
            stream: None,
            reader: None,
            next_id: 0,
        }
    }

    fn roundtrip(&mut self, name: &str, parameters: serde_json::Value) -> Result<WireResponse> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| MemnavError::Robot("not connected".to_string()))?;

        self.next_id += 1;
        let request = WireRequest {
            name,
            parameters,
            id: self.next_id,
        };

        let mut line = serde_json::to_string(&request)?;
        line.push('\n');
        log::debug!("-> {}", line.trim_end());
        stream.write_all(line.as_bytes())?;
        stream.flush()?;

        let reader = self
            .reader
            .as_mut()
            .ok_or_else(|| MemnavError::Robot("not connected".to_string()))?;

        let mut response_line = String::new();
        let n = reader.read_line(&mut response_line)?;
        if n == 0 {
            return Err(MemnavError::Robot("connection closed by service".to_string()));
        }
        log::debug!("<- {}", response_line.trim_end());

        let response: WireResponse = serde_json::from_str(response_line.trim_end())?;
        if response.id != request.id {
            return Err(MemnavError::Robot(format!(
                "response id {} does not match request id {}",
                response.id, request.id
            )));
        }
        if response.status != "ok" {
            return Err(MemnavError::Robot(format!(
                "{} rejected: {}",
                name, response.message
            )));
        }

        Ok(response)
    }
}

impl RobotLink for RemoteRobot {
    fn connect(&mut self) -> Result<()> {
        let stream = TcpStream::connect(&self.addr)
            .map_err(|e| MemnavError::Robot(format!("connect to {} failed: {}", self.addr, e)))?;
        let reader = BufReader::new(
            stream
                .try_clone()
                .map_err(|e| MemnavError::Robot(format!("socket clone failed: {}", e)))?,
        );
        self.stream = Some(stream);
        self.reader = Some(reader);
        log::info!("connected to robot service at {}", self.addr);
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
        }
        self.reader = None;
        log::info!("disconnected from robot service");
        Ok(())
    }

    fn read_ir_sensors(&mut self) -> Result<HashMap<String, f64>> {
        let response = self.roundtrip("READ-IRS", serde_json::json!({}))?;
        Ok(response.values)
    }

    fn move_wheels_timed(&mut self, left_speed: i32, right_speed: i32, duration_s: f64) -> Result<()> {
        self.roundtrip(
            "MOVE-WHEELS",
            serde_json::json!({
                "lspeed": left_speed,
                "rspeed": right_speed,
                "time": duration_s,
            }),
        )?;
        // The ack arrives when the motion starts; block out the window here.
        thread::sleep(Duration::from_secs_f64(duration_s));
        Ok(())
    }

    fn stop_motors(&mut self) -> Result<()> {
        self.roundtrip("STOP-MOTORS", serde_json::json!({}))?;
        Ok(())
    }

    fn wait(&mut self, seconds: f64) {
        thread::sleep(Duration::from_secs_f64(seconds));
    }
}
