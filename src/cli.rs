use std::path::PathBuf;

use clap::Parser;

use crate::logic::error::{GateError, GateResult};

/// CI risk gate for firmware patch feature files.
///
/// Exit codes: 0 = PASS, 1 = FAIL (high-risk patches found), 2 = ERROR.
#[derive(Parser, Debug)]
#[command(name = "risk-gate", author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the firmware features CSV
    #[arg(value_name = "INPUT_CSV")]
    pub input: Option<PathBuf>,
}

impl Cli {
    /// Input path, or a usage error before any I/O happens
    pub fn input_path(&self) -> GateResult<PathBuf> {
        self.input.clone().ok_or(GateError::Usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_input() {
        let cli = Cli::try_parse_from(["risk-gate", "new_firmware_features.csv"]).unwrap();
        assert_eq!(cli.input_path().unwrap(), PathBuf::from("new_firmware_features.csv"));
    }

    #[test]
    fn test_no_args_is_usage_error() {
        let cli = Cli::try_parse_from(["risk-gate"]).unwrap();
        assert!(matches!(cli.input_path(), Err(GateError::Usage)));
    }

    #[test]
    fn test_extra_args_rejected() {
        assert!(Cli::try_parse_from(["risk-gate", "a.csv", "b.csv"]).is_err());
    }
}
