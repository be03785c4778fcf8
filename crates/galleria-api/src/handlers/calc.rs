use axum::Json;
use galleria_core::AppError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};

#[derive(Debug, Deserialize, ToSchema)]
pub struct EvaluateRequest {
    /// `"<number> <op> <number>"`, tokens separated by spaces
    #[schema(example = "3 + 4")]
    pub expression: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EvaluateResponse {
    pub expression: String,
    pub value: f64,
}

/// Evaluate a single binary arithmetic expression
#[utoipa::path(
    post,
    path = "/api/v0/calc/evaluate",
    tag = "calc",
    request_body = EvaluateRequest,
    responses(
        (status = 200, description = "Expression evaluated", body = EvaluateResponse),
        (status = 400, description = "Malformed expression, division by zero or a result out of range", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(request), fields(operation = "evaluate_expression"))]
pub async fn evaluate_expression(
    ValidatedJson(request): ValidatedJson<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, HttpAppError> {
    let value = galleria_calc::evaluate(&request.expression)
        .map_err(|e| AppError::InvalidExpression(e.to_string()))?;

    // JSON has no representation for infinities or NaN.
    if !value.is_finite() {
        return Err(AppError::InvalidExpression(format!(
            "Result of '{}' is not a finite number",
            request.expression
        ))
        .into());
    }

    Ok(Json(EvaluateResponse {
        expression: request.expression,
        value,
    }))
}
