use matrix_core::{DecodeMode, DenseMatrix, Matrix, decode_with, encode};
use serde::{Deserialize, Serialize};

use crate::{Operation, error::Result};

/// Operation as given by a caller: a boundary code or a name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OperationSelector {
    Code(i32),
    Name(String),
}

impl OperationSelector {
    pub fn resolve(&self) -> Result<Operation> {
        match self {
            OperationSelector::Code(code) => Operation::try_from(*code),
            OperationSelector::Name(name) => name.parse(),
        }
    }
}

impl From<Operation> for OperationSelector {
    fn from(op: Operation) -> Self {
        OperationSelector::Code(op.code())
    }
}

impl From<String> for OperationSelector {
    fn from(s: String) -> Self {
        match s.trim().parse::<i32>() {
            Ok(code) => OperationSelector::Code(code),
            Err(_) => OperationSelector::Name(s),
        }
    }
}

/// One full request: both encoded operands, their declared shapes and the
/// operation to apply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OperationRequest {
    pub matrix_a: String,
    pub matrix_b: String,
    pub rows_a: i32,
    pub cols_a: i32,
    pub rows_b: i32,
    pub cols_b: i32,
    pub operation: OperationSelector,
    /// Reject malformed or short matrix text instead of zero-filling it.
    #[serde(default)]
    pub strict: bool,
}

impl OperationRequest {
    pub fn decode_mode(&self) -> DecodeMode {
        if self.strict {
            DecodeMode::Strict
        } else {
            DecodeMode::Lenient
        }
    }

    pub fn evaluate(&self) -> Result<DenseMatrix> {
        let mode = self.decode_mode();
        let a = decode_operand(&self.matrix_a, self.rows_a, self.cols_a, mode)?;
        let b = decode_operand(&self.matrix_b, self.rows_b, self.cols_b, mode)?;
        let operation = self.operation.resolve()?;
        log::debug!(
            "Applying {} to {:?} and {:?} matrices",
            operation,
            a.dims(),
            b.dims()
        );
        crate::perform(&a, &b, operation)
    }

    /// Encoded result, or `"Error: <message>"`.
    pub fn evaluate_to_text(&self) -> String {
        match self.evaluate() {
            Ok(result) => encode(&result),
            Err(err) => {
                log::warn!("Matrix operation failed: {}", err);
                err.to_error_text()
            }
        }
    }
}

fn decode_operand(text: &str, rows: i32, cols: i32, mode: DecodeMode) -> Result<DenseMatrix> {
    let (rows, cols) = DenseMatrix::checked_dims(rows.into(), cols.into())?;
    Ok(decode_with(text, rows, cols, mode)?)
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OperationResponse {
    Ok { result: String, matrix: DenseMatrix },
    Error { message: String },
}

impl From<Result<DenseMatrix>> for OperationResponse {
    fn from(result: Result<DenseMatrix>) -> Self {
        match result {
            Ok(matrix) => OperationResponse::Ok {
                result: encode(&matrix),
                matrix,
            },
            Err(err) => OperationResponse::Error {
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use matrix_core::MatrixError;

    fn request(a: &str, b: &str, dims: [i32; 4], operation: OperationSelector) -> OperationRequest {
        OperationRequest {
            matrix_a: a.to_string(),
            matrix_b: b.to_string(),
            rows_a: dims[0],
            cols_a: dims[1],
            rows_b: dims[2],
            cols_b: dims[3],
            operation,
            strict: false,
        }
    }

    #[test]
    fn test_deserialize_with_code_and_name() {
        let json = r#"{
            "matrix_a": "1 2;3 4", "matrix_b": "5 6;7 8",
            "rows_a": 2, "cols_a": 2, "rows_b": 2, "cols_b": 2,
            "operation": 2
        }"#;
        let req: OperationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.operation, OperationSelector::Code(2));
        assert!(!req.strict);
        assert_eq!(req.evaluate_to_text(), "19 22;43 50");

        let json = json.replace("\"operation\": 2", "\"operation\": \"multiply\", \"strict\": true");
        let req: OperationRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req.operation, OperationSelector::Name("multiply".to_string()));
        assert_eq!(req.decode_mode(), DecodeMode::Strict);
        assert_eq!(req.evaluate_to_text(), "19 22;43 50");
    }

    #[test]
    fn test_selector_from_string() {
        assert_eq!(OperationSelector::from("3".to_string()), OperationSelector::Code(3));
        assert_eq!(
            OperationSelector::from("add".to_string()).resolve().unwrap(),
            Operation::Add
        );
        assert_eq!(OperationSelector::from(Operation::Divide), OperationSelector::Code(3));
    }

    #[test]
    fn test_negative_dimensions_are_reported() {
        let req = request("1 2", "1 2", [-1, 2, 1, 2], Operation::Add.into());
        match req.evaluate() {
            Err(CalcError::Matrix(MatrixError::InvalidDimension { rows, cols })) => {
                assert_eq!((rows, cols), (-1, 2));
            }
            other => panic!("Expected InvalidDimension, got {:?}", other),
        }
        assert_eq!(req.evaluate_to_text(), "Error: Invalid matrix dimensions: -1x2");
    }

    #[test]
    fn test_strict_request_rejects_bad_token() {
        let mut req = request("1 x;3 4", "1 0;0 1", [2, 2, 2, 2], Operation::Multiply.into());
        assert_eq!(req.evaluate_to_text(), "1 0;3 4");
        req.strict = true;
        assert_eq!(
            req.evaluate_to_text(),
            "Error: Invalid value at Matrix[1][2]: 'x'"
        );
    }

    #[test]
    fn test_response_serialization() {
        let ok: OperationResponse = Ok(DenseMatrix::identity(1)).into();
        let value = serde_json::to_value(&ok).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["result"], "1");
        assert_eq!(value["matrix"]["rows"], 1);

        let err: OperationResponse = Err(CalcError::InvalidOperation(9)).into();
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["message"], "Invalid operation code");
    }
}
