use std::fmt;
use std::str::FromStr;

use matrix_core::DenseMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};

/// The four elementary operations, with their boundary codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add = 0,
    Subtract = 1,
    Multiply = 2,
    /// Right-multiplication by the inverse of the second operand.
    Divide = 3,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    pub fn apply(self, a: &DenseMatrix, b: &DenseMatrix) -> Result<DenseMatrix> {
        let result = match self {
            Operation::Add => a.add(b),
            Operation::Subtract => a.subtract(b),
            Operation::Multiply => a.multiply(b),
            Operation::Divide => a.divide(b),
        };
        Ok(result?)
    }
}

impl TryFrom<i32> for Operation {
    type Error = CalcError;

    fn try_from(code: i32) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.code() == code)
            .ok_or(CalcError::InvalidOperation(code))
    }
}

/// Accepts a name (`add`), a symbol (`+`) or a numeric code (`0`).
impl FromStr for Operation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i32>() {
            return Operation::try_from(code);
        }
        match s.to_ascii_lowercase().as_str() {
            "add" | "+" => Ok(Operation::Add),
            "subtract" | "sub" | "-" => Ok(Operation::Subtract),
            "multiply" | "mul" | "*" | "x" => Ok(Operation::Multiply),
            "divide" | "div" | "/" => Ok(Operation::Divide),
            _ => Err(CalcError::UnknownOperation(s.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
