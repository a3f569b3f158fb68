//! Conditional-mode scoring: judge a measured vibration against the
//! regressor's expectation for the current operating conditions.

use crate::logic::features::ConditionVector;
use crate::logic::model::{Oracle, Threshold};
use crate::logic::telemetry::ConditionReading;

use super::{ScoreError, Verdict};

/// Score one reading. One oracle call; the residual is the absolute error
/// between the measured vibration and the predicted normal vibration.
pub fn score(
    oracle: &dyn Oracle,
    threshold: Threshold,
    reading: &ConditionReading,
) -> Result<Verdict, ScoreError> {
    let vector = ConditionVector::from_reading(reading);

    if !vector.is_finite() {
        return Err(ScoreError::MalformedInput(
            "non-finite conditioning value".to_string(),
        ));
    }
    if !reading.actual_vibration.is_finite() {
        return Err(ScoreError::MalformedInput(
            "non-finite vibration measurement".to_string(),
        ));
    }

    let predicted = oracle.predict(vector.as_slice()).map_err(|e| {
        log::error!("conditional oracle failure: {e}");
        ScoreError::ModelUnavailable
    })?;

    Ok(Verdict::judge(predicted, reading.actual_vibration, threshold))
}
