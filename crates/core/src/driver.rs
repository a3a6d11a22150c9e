//! Registration drivers.
//!
//! A driver turns a fixed/moving scan pair into a deformation field file. The
//! registration method itself is external; drivers only launch it.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use superbench_types::{CaseNumber, NonEmptyText};

use crate::dataset::CaseDescriptor;
use crate::{BenchError, BenchResult};

/// Which way a case is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The fixed scan is the reference, the moving scan is warped onto it.
    FixedToMoving,
    /// Roles are swapped: the moving scan is the reference.
    MovingToFixed,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::FixedToMoving => f.write_str("fixed_to_moving"),
            Direction::MovingToFixed => f.write_str("moving_to_fixed"),
        }
    }
}

/// One registration the driver must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub case: CaseNumber,
    pub direction: Direction,
    /// Reference image of this registration.
    pub fixed_image: PathBuf,
    /// Image warped onto `fixed_image`.
    pub moving_image: PathBuf,
    pub output_deformation_field: PathBuf,
}

impl RegistrationRequest {
    /// Builds the request for `direction`, writing its field to `output`.
    pub fn for_case(case: &CaseDescriptor, direction: Direction, output: PathBuf) -> Self {
        let images = &case.image_file_names;
        let (fixed_image, moving_image) = match direction {
            Direction::FixedToMoving => (images.fixed.clone(), images.moving.clone()),
            Direction::MovingToFixed => (images.moving.clone(), images.fixed.clone()),
        };

        Self {
            case: case.case_number,
            direction,
            fixed_image,
            moving_image,
            output_deformation_field: output,
        }
    }
}

/// Anything able to register two images and write a deformation field.
pub trait RegistrationDriver: Send + Sync {
    fn register(&self, request: &RegistrationRequest) -> BenchResult<()>;
}

/// Runs an external registration program once per request.
///
/// Arguments may contain the placeholders `{fixed}`, `{moving}` and
/// `{output}`, which are replaced with the request's paths.
#[derive(Debug, Clone)]
pub struct CommandDriver {
    program: NonEmptyText,
    args: Vec<String>,
}

impl CommandDriver {
    pub fn new(program: impl AsRef<str>, args: Vec<String>) -> BenchResult<Self> {
        Ok(Self {
            program: NonEmptyText::new(program)?,
            args,
        })
    }

    pub fn program(&self) -> &str {
        self.program.as_str()
    }

    /// Returns the argument list with placeholders substituted for `request`.
    ///
    /// Each template is scanned once, so text coming from a substituted path
    /// is never treated as a placeholder. Paths are passed through as
    /// `OsString` without any lossy conversion.
    pub fn expand_args(&self, request: &RegistrationRequest) -> Vec<OsString> {
        let placeholders: [(&str, &Path); 3] = [
            ("{fixed}", request.fixed_image.as_path()),
            ("{moving}", request.moving_image.as_path()),
            ("{output}", request.output_deformation_field.as_path()),
        ];

        self.args
            .iter()
            .map(|template| expand_template(template, &placeholders))
            .collect()
    }
}

fn expand_template(template: &str, placeholders: &[(&str, &Path)]) -> OsString {
    let mut expanded = OsString::new();
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        expanded.push(&rest[..start]);
        let tail = &rest[start..];

        match placeholders
            .iter()
            .find(|(token, _)| tail.starts_with(token))
        {
            Some((token, path)) => {
                expanded.push(path.as_os_str());
                rest = &tail[token.len()..];
            }
            None => {
                expanded.push("{");
                rest = &tail[1..];
            }
        }
    }

    expanded.push(rest);
    expanded
}

impl RegistrationDriver for CommandDriver {
    fn register(&self, request: &RegistrationRequest) -> BenchResult<()> {
        let args = self.expand_args(request);
        tracing::debug!(
            "case {} ({}): running {} {:?}",
            request.case,
            request.direction,
            self.program,
            args
        );

        let output = Command::new(self.program.as_str())
            .args(&args)
            .output()
            .map_err(BenchError::DriverSpawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("{} exited with {}", self.program, output.status),
                text => format!("{} exited with {}: {}", self.program, output.status, text),
            };
            return Err(BenchError::Registration {
                case: request.case,
                direction: request.direction,
                message,
            });
        }

        Ok(())
    }
}
