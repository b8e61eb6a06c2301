use crate::domain::model::{PhoneRecord, PhoneType};
use crate::utils::error::{LookupError, Result};
use chrono::Utc;
use phonenumber::{metadata::DATABASE, Mode, PhoneNumber, Type};

const UNKNOWN: &str = "Unknown";

/// Offline phone metadata lookup backed by libphonenumber data.
#[derive(Debug, Clone, Default)]
pub struct PhoneLookup;

impl PhoneLookup {
    pub fn new() -> Self {
        Self
    }

    /// Parses `number` without a default region, so it must be written in
    /// international `+` notation.
    pub fn lookup(&self, number: &str) -> Result<PhoneRecord> {
        let parsed = phonenumber::parse(None, number.trim()).map_err(|e| {
            LookupError::PhoneFormatError {
                message: e.to_string(),
            }
        })?;

        if !phonenumber::is_valid(&parsed) {
            return Err(LookupError::InvalidPhoneError {
                number: number.to_string(),
            });
        }

        let number_type = classify(parsed.number_type(&DATABASE));
        let international = format(&parsed, Mode::International);
        tracing::debug!("Phone {} classified as {:?}", international, number_type);

        Ok(PhoneRecord {
            number: international.clone(),
            valid: true,
            number_type,
            type_code: number_type.code(),
            // offline metadata has no carrier-name tables
            carrier: UNKNOWN.to_string(),
            region_code: region_code(&parsed),
            country_code: parsed.country().code(),
            national_number: parsed.national().value(),
            timezones: vec![UNKNOWN.to_string()],
            e164: format(&parsed, Mode::E164),
            national: format(&parsed, Mode::National),
            international,
            queried_at: Utc::now(),
        })
    }
}

fn format(number: &PhoneNumber, mode: Mode) -> String {
    number.format().mode(mode).to_string()
}

fn classify(kind: Type) -> PhoneType {
    match kind {
        Type::FixedLine | Type::FixedLineOrMobile => PhoneType::FixedLine,
        Type::Mobile => PhoneType::Mobile,
        Type::TollFree => PhoneType::TollFree,
        Type::PremiumRate => PhoneType::PremiumRate,
        Type::SharedCost => PhoneType::SharedCost,
        Type::Voip => PhoneType::Voip,
        Type::PersonalNumber => PhoneType::Personal,
        Type::Pager => PhoneType::Pager,
        Type::Uan => PhoneType::Uan,
        Type::Voicemail => PhoneType::Voicemail,
        _ => PhoneType::Unknown,
    }
}

fn region_code(number: &PhoneNumber) -> String {
    number
        .country()
        .id()
        .map(|id| format!("{:?}", id))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_us_number_is_valid() {
        let record = PhoneLookup::new().lookup("+14155552671").unwrap();

        assert!(record.valid);
        assert_eq!(record.e164, "+14155552671");
        assert_eq!(record.country_code, 1);
        assert_eq!(record.national_number, 4155552671);
        assert_eq!(record.region_code, "US");
        assert!(matches!(
            record.number_type,
            PhoneType::FixedLine | PhoneType::Mobile
        ));
        assert_eq!(record.type_code, record.number_type.code());
        assert_eq!(record.number, record.international);
    }

    #[test]
    fn test_number_without_region_is_format_error() {
        let err = PhoneLookup::new().lookup("4155552671").unwrap_err();
        assert!(matches!(err, LookupError::PhoneFormatError { .. }));
    }

    #[test]
    fn test_garbage_is_format_error() {
        let err = PhoneLookup::new().lookup("not a number").unwrap_err();
        assert!(matches!(err, LookupError::PhoneFormatError { .. }));
    }

    #[test]
    fn test_too_short_number_is_rejected() {
        let result = PhoneLookup::new().lookup("+1415");
        assert!(result.is_err());
    }

    #[test]
    fn test_unassigned_area_code_is_invalid() {
        let err = PhoneLookup::new().lookup("+15550123456").unwrap_err();
        assert!(matches!(err, LookupError::InvalidPhoneError { .. }));
    }

    #[test]
    fn test_number_types_and_codes() {
        let cases = [
            ("+18002530000", PhoneType::TollFree, 3),
            ("+19007654321", PhoneType::PremiumRate, 4),
            ("+442079460000", PhoneType::FixedLine, 0),
        ];
        for (number, expected, code) in cases {
            let record = PhoneLookup::new().lookup(number).unwrap();
            assert_eq!(record.number_type, expected, "{number}");
            assert_eq!(record.type_code, code, "{number}");
        }

        let london = PhoneLookup::new().lookup("+442079460000").unwrap();
        assert_eq!(london.region_code, "GB");
        assert_eq!(london.country_code, 44);
    }

    #[test]
    fn test_fixed_line_or_mobile_maps_to_fixed_line() {
        assert_eq!(classify(Type::FixedLineOrMobile), PhoneType::FixedLine);
        assert_eq!(classify(Type::PersonalNumber), PhoneType::Personal);
        assert_eq!(classify(Type::Voicemail).code(), 10);
    }
}
