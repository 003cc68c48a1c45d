use std::{error::Error, fs, path::PathBuf, process::ExitCode};

use clap::Parser;
use matrix_calc::{OperationRequest, OperationResponse, OperationSelector};

/// Add, subtract, multiply or divide two matrices given as text.
///
/// Rows are separated by ';' and values by spaces, e.g. "1 2;3 4".
#[derive(Parser, Debug)]
#[command(name = "matrix-cli", version)]
struct Args {
    /// Matrix A
    #[arg(required_unless_present = "request", allow_hyphen_values = true)]
    matrix_a: Option<String>,

    /// Matrix B
    #[arg(required_unless_present = "request", allow_hyphen_values = true)]
    matrix_b: Option<String>,

    #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
    rows_a: i32,

    #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
    cols_a: i32,

    #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
    rows_b: i32,

    #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
    cols_b: i32,

    /// add, subtract, multiply, divide (or 0-3, or + - * /)
    #[arg(short, long, default_value = "add")]
    op: String,

    /// Reject malformed matrix text instead of zero-filling it
    #[arg(long)]
    strict: bool,

    /// Read the whole request from a JSON file instead of arguments
    #[arg(long, conflicts_with_all = ["matrix_a", "matrix_b"])]
    request: Option<PathBuf>,

    /// Print a JSON response instead of the bare matrix text
    #[arg(long)]
    json: bool,
}

impl Args {
    fn into_request(self) -> Result<(OperationRequest, bool), Box<dyn Error>> {
        if let Some(path) = &self.request {
            log::debug!("Reading request from {}", path.display());
            let content = fs::read_to_string(path)?;
            let request: OperationRequest = serde_json::from_str(&content)?;
            return Ok((request, self.json));
        }
        let request = OperationRequest {
            matrix_a: self.matrix_a.unwrap_or_default(),
            matrix_b: self.matrix_b.unwrap_or_default(),
            rows_a: self.rows_a,
            cols_a: self.cols_a,
            rows_b: self.rows_b,
            cols_b: self.cols_b,
            operation: OperationSelector::from(self.op),
            strict: self.strict,
        };
        Ok((request, self.json))
    }
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (request, json) = Args::parse().into_request()?;
    log::info!(
        "A: {}x{}, B: {}x{}, operation: {:?}",
        request.rows_a,
        request.cols_a,
        request.rows_b,
        request.cols_b,
        request.operation
    );

    let result = request.evaluate();
    let failed = result.is_err();
    if json {
        let response = OperationResponse::from(result);
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        match result {
            Ok(matrix) => println!("{}", matrix),
            Err(err) => eprintln!("{}", err.to_error_text()),
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_to_request() {
        let args = Args::parse_from([
            "matrix-cli", "1 2;3 4", "5 6;7 8", "--op", "multiply", "--strict",
        ]);
        let (request, json) = args.into_request().unwrap();
        assert!(!json);
        assert!(request.strict);
        assert_eq!(request.rows_a, 2);
        assert_eq!(request.evaluate_to_text(), "19 22;43 50");
    }

    #[test]
    fn test_numeric_op_and_dimensions() {
        let args = Args::parse_from([
            "matrix-cli", "1 2", "1 2 3", "--rows-a", "1", "--cols-a", "2", "--rows-b", "1",
            "--cols-b", "3", "-o", "0",
        ]);
        let (request, _) = args.into_request().unwrap();
        assert_eq!(request.operation, OperationSelector::Code(0));
        assert_eq!(
            request.evaluate_to_text(),
            "Error: Matrix dimensions don't match for addition"
        );
    }

    #[test]
    fn test_matrices_required_without_request() {
        assert!(Args::try_parse_from(["matrix-cli", "1 2;3 4"]).is_err());
    }
}
