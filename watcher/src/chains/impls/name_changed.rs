use alloy::dyn_abi::DynSolValue;

use crate::errors::WatcherError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameChangedEvent {
    pub old_name: String,
    pub new_name: String,
}

impl NameChangedEvent {
    pub fn from_decoded_body(event: &str, body: &[DynSolValue]) -> Result<Self, WatcherError> {
        if body.len() != 2 {
            return Err(WatcherError::UnexpectedValue {
                event: event.to_string(),
                param: "body",
                expected: "two string parameters",
            });
        }

        let old_name = Self::extract_string(event, &body[0], "oldName")?;
        let new_name = Self::extract_string(event, &body[1], "newName")?;

        Ok(NameChangedEvent { old_name, new_name })
    }

    fn extract_string(
        event: &str,
        value: &DynSolValue,
        param: &'static str,
    ) -> Result<String, WatcherError> {
        match value {
            DynSolValue::String(s) => Ok(s.clone()),
            _ => Err(WatcherError::UnexpectedValue {
                event: event.to_string(),
                param,
                expected: "a string",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;

    #[test]
    fn test_from_decoded_body() {
        let body = vec![
            DynSolValue::String(String::new()),
            DynSolValue::String("satoshi".to_string()),
        ];
        let event = NameChangedEvent::from_decoded_body("NameChanged", &body).unwrap();
        assert_eq!(event.old_name, "");
        assert_eq!(event.new_name, "satoshi");
    }

    #[test]
    fn test_from_decoded_body_rejects_non_string() {
        let body = vec![
            DynSolValue::String("a".to_string()),
            DynSolValue::Uint(U256::from(1), 256),
        ];
        let err = NameChangedEvent::from_decoded_body("NameChanged", &body).unwrap_err();
        assert!(matches!(
            err,
            WatcherError::UnexpectedValue {
                param: "newName",
                ..
            }
        ));
    }
}
