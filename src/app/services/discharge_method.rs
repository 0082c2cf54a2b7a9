//! Discharge method selection

use crate::app::models::{DischargeEquation, DischargeMethod};
use crate::{Error, Result};

/// Map the handheld's discharge equation to the standardized method
///
/// Only the mean-section and mid-section equations are supported; anything
/// else is rejected rather than defaulted.
pub fn select_discharge_method(equation: &DischargeEquation) -> Result<DischargeMethod> {
    match equation {
        DischargeEquation::MeanSection => Ok(DischargeMethod::MeanSection),
        DischargeEquation::MidSection => Ok(DischargeMethod::MidSection),
        DischargeEquation::Other(label) => Err(Error::unsupported_configuration(format!(
            "unsupported discharge equation '{}'",
            label
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_equations() {
        assert_eq!(
            select_discharge_method(&DischargeEquation::MeanSection).unwrap(),
            DischargeMethod::MeanSection
        );
        assert_eq!(
            select_discharge_method(&DischargeEquation::MidSection).unwrap(),
            DischargeMethod::MidSection
        );
    }

    #[test]
    fn test_unrecognized_equation_is_unsupported_configuration() {
        let result = select_discharge_method(&DischargeEquation::Other("Japanese".to_string()));

        match result {
            Err(Error::UnsupportedConfiguration { message }) => {
                assert!(message.contains("Japanese"));
            }
            other => panic!("Expected UnsupportedConfiguration, got {:?}", other),
        }
    }
}
