//! `upsc` command-line client
//!
//! Runs `upsc <ups>` from Network UPS Tools and parses its output.

use super::{StatusSource, UpsReading};
use crate::error::SourceError;
use std::process::Command;

/// Status source backed by the NUT `upsc` client
#[derive(Debug, Clone)]
pub struct UpscSource {
    program: String,
    ups: String,
}

impl UpscSource {
    /// Create a source querying `ups` (e.g. `nutdev1` or `ups@host`)
    pub fn new(program: impl Into<String>, ups: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ups: ups.into(),
        }
    }

    fn command_line(&self) -> String {
        format!("{} {}", self.program, self.ups)
    }
}

impl StatusSource for UpscSource {
    fn read(&self) -> Result<UpsReading, SourceError> {
        log::debug!("Running {}", self.command_line());

        let output = Command::new(&self.program)
            .arg(&self.ups)
            .output()
            .map_err(|e| SourceError::Spawn {
                command: self.command_line(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(SourceError::CommandFailed {
                command: self.command_line(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let reading = UpsReading::parse(&String::from_utf8_lossy(&output.stdout));
        log::debug!("{} returned {} variables", self.command_line(), reading.len());
        Ok(reading)
    }

    fn describe(&self) -> String {
        self.ups.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program() {
        let source = UpscSource::new("/nonexistent/upsc", "nutdev1");
        let err = source.poll().unwrap_err();
        assert!(matches!(err, SourceError::Spawn { .. }));
    }

    #[test]
    #[cfg(unix)]
    fn test_failing_program() {
        let source = UpscSource::new("false", "nutdev1");
        let err = source.read().unwrap_err();
        assert!(matches!(err, SourceError::CommandFailed { .. }));
    }

    #[test]
    #[cfg(unix)]
    fn test_program_output_parsed() {
        // `echo` prints its argument, which stands in for upsc output here
        let source = UpscSource::new("echo", "ups.status: OL");
        let reading = source.read().unwrap();
        assert_eq!(reading.get("ups.status"), Some("OL"));
        assert_eq!(source.describe(), "ups.status: OL");
    }
}
