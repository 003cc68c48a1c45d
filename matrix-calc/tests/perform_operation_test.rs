use matrix_calc::{ERROR_PREFIX, Operation, is_error, perform, perform_operation, perform_request_json};
use matrix_core::{DenseMatrix, Matrix, decode, encode};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Helper for float comparison in tests
fn assert_approx_eq_vec(a: &[f64], b: &[f64], tolerance: f64) {
    assert_eq!(a.len(), b.len(), "Vector lengths differ");
    for i in 0..a.len() {
        let diff = (a[i] - b[i]).abs();
        assert!(
            diff <= tolerance,
            "Verification failed at index {}: expected {}, got {}, diff {}",
            i,
            b[i],
            a[i],
            diff
        );
    }
}

#[test]
fn test_multiply_scenario() {
    init_logging();
    assert_eq!(
        perform_operation("1 2;3 4", "5 6;7 8", 2, 2, 2, 2, 2),
        "19 22;43 50"
    );
}

#[test]
fn test_divide_by_identity_scenario() {
    assert_eq!(
        perform_operation("1 2;3 4", "1 0;0 1", 2, 2, 2, 2, 3),
        "1 2;3 4"
    );
}

#[test]
fn test_divide_by_singular_scenario() {
    init_logging();
    let result = perform_operation("1 2;3 4", "0 0;0 0", 2, 2, 2, 2, 3);
    assert_eq!(result, "Error: Matrix is singular, cannot be inverted");
    assert!(is_error(&result));
}

#[test]
fn test_add_shape_mismatch_scenario() {
    assert_eq!(
        perform_operation("1 2", "1 2 3", 1, 2, 1, 3, 0),
        "Error: Matrix dimensions don't match for addition"
    );
}

#[test]
fn test_subtract_and_add() {
    assert_eq!(
        perform_operation("5 5;5 5", "1 2;3 4", 2, 2, 2, 2, 1),
        "4 3;2 1"
    );
    assert_eq!(
        perform_operation("0.5 1.5", "0.25 -1.5", 1, 2, 1, 2, 0),
        "0.75 0"
    );
}

#[test]
fn test_divide_error_messages() {
    assert_eq!(
        perform_operation("1 2;3 4", "1 2 3;4 5 6", 2, 2, 2, 3, 3),
        "Error: Divisor matrix must be square for division"
    );
    assert_eq!(
        perform_operation("1 2 3", "1 0;0 1", 1, 3, 2, 2, 3),
        "Error: Matrix dimensions don't match for division"
    );
    assert_eq!(
        perform_operation("1 2;3 4", "1 2;2 4", 2, 2, 2, 2, 3),
        "Error: Matrix is singular, cannot be inverted"
    );
}

#[test]
fn test_multiply_shape_mismatch() {
    assert_eq!(
        perform_operation("1 2 3", "1 2 3", 1, 3, 1, 3, 2),
        "Error: Matrix dimensions don't match for multiplication"
    );
}

#[test]
fn test_invalid_operation_code() {
    for code in [-1, 4, 100] {
        let result = perform_operation("1", "1", 1, 1, 1, 1, code);
        assert_eq!(result, "Error: Invalid operation code");
    }
}

#[test]
fn test_lenient_decode_at_boundary() {
    // Row 0 stops at the bad token, row 1 is read fully
    assert_eq!(
        perform_operation("1 x;3 4", "0 0;0 0", 2, 2, 2, 2, 0),
        "1 0;3 4"
    );
    // Missing input is zero
    assert_eq!(perform_operation("", "", 1, 2, 1, 2, 0), "0 0");
}

#[test]
fn test_divide_matches_inverse_product() {
    let a = decode("3 1 4;1 5 9", 2, 3);
    let b = decode("2 7 1;8 2 8;1 8 2", 3, 3);
    let text = perform_operation(&encode(&a), &encode(&b), 2, 3, 3, 3, 3);
    assert!(!is_error(&text), "unexpected error: {}", text);

    let quotient = decode(&text, 2, 3);
    let expected = a.multiply(&b.inverse().unwrap()).unwrap();
    assert_approx_eq_vec(quotient.data(), expected.data(), 1e-12);
}

#[test]
fn test_typed_perform() {
    let a = DenseMatrix::from_data(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let b = DenseMatrix::from_data(3, 1, vec![1.0, 1.0, 1.0]).unwrap();
    let product = perform(&a, &b, Operation::Multiply).unwrap();
    assert_eq!(product.dims(), (2, 1));
    assert_eq!(product.data(), &[6.0, 15.0]);
}

#[test]
fn test_json_boundary() {
    let json = r#"{"matrix_a": "1 2;3 4", "matrix_b": "1 0;0 1",
        "rows_a": 2, "cols_a": 2, "rows_b": 2, "cols_b": 2, "operation": "divide"}"#;
    assert_eq!(perform_request_json(json), "1 2;3 4");

    let result = perform_request_json("{ not json");
    assert!(result.starts_with(ERROR_PREFIX));
    assert!(result.starts_with("Error: Invalid request:"));
}

#[test]
fn test_oversized_dimensions_report_error_text() {
    let result = perform_operation("", "", i32::MAX, i32::MAX, 1, 1, 0);
    assert!(result.starts_with(ERROR_PREFIX), "got {}", result);
    assert!(result.contains("too large to allocate"));

    // Operands are empty, the product shape is not
    let result = perform_operation("", "", i32::MAX, 0, 0, i32::MAX, 2);
    assert!(result.starts_with(ERROR_PREFIX), "got {}", result);
}
