use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

/// Wall-clock budget for one slicer invocation. Enforcing it is the
/// caller's concern; the builder never spawns the process.
pub const SLICER_TIMEOUT: Duration = Duration::from_secs(7200);

/// Exit code the slicer uses to signal an input below the slicing threshold.
pub const INPUT_SIZE_LOW_EXIT_CODE: u32 = 200;

/// Builds invocations of the external file-slicing binary.
#[derive(Debug, Clone)]
pub struct SliceCommandBuilder {
    binary_path: PathBuf,
}

impl SliceCommandBuilder {
    pub fn new(binary_path: impl Into<PathBuf>) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }

    /// Argument list for slicing `input_path` into `output_dir`.
    ///
    /// The slice manifest lands next to the output directory under the same
    /// name with a `.manifest` suffix. The threshold argument is appended
    /// only when a threshold was given.
    pub fn args(
        &self,
        table_name: &str,
        input_path: &Path,
        output_dir: &Path,
        input_size_threshold: Option<&str>,
    ) -> Vec<String> {
        let mut args = vec![
            format!("--table-input-path={}", input_path.display()),
            format!("--table-name={table_name}"),
            format!("--table-output-path={}", output_dir.display()),
            format!("--table-output-manifest-path={}.manifest", output_dir.display()),
            "--gzip=true".to_string(),
            format!("--input-size-low-exit-code={INPUT_SIZE_LOW_EXIT_CODE}"),
        ];
        if let Some(threshold) = input_size_threshold {
            args.push(format!("--input-size-threshold={threshold}"));
        }
        args
    }

    /// Ready-to-spawn command for the slicer binary.
    pub fn command(
        &self,
        table_name: &str,
        input_path: &Path,
        output_dir: &Path,
        input_size_threshold: Option<&str>,
    ) -> Command {
        let mut command = Command::new(&self.binary_path);
        command.args(self.args(table_name, input_path, output_dir, input_size_threshold));
        command
    }
}
